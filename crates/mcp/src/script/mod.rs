//! WLST script generation.
//!
//! [`build_script`] turns a [`ScriptRequest`] into Jython source. Output is a
//! pure function of the request and connection, so identical calls produce
//! byte-identical scripts. Caller values are only ever embedded through
//! [`fragments::py_literal`].

mod applications;
pub mod fragments;
pub mod markers;
mod monitoring;
mod resources;
mod servers;

use std::fmt;

use wlst_types::{MetricType, StageMode};

use crate::config::ConnectionParameters;
use crate::types::WlstError;
use markers::OperationMarkers;

/// Definition of a new JDBC system resource.
#[derive(Clone, PartialEq, Eq)]
pub struct DatasourceDefinition {
    pub name: String,
    pub jndi_name: String,
    pub db_url: String,
    pub db_driver: String,
    pub db_user: String,
    pub db_password: String,
    pub targets: Vec<String>,
    pub min_capacity: u32,
    pub max_capacity: u32,
}

impl fmt::Debug for DatasourceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasourceDefinition")
            .field("name", &self.name)
            .field("jndi_name", &self.jndi_name)
            .field("db_url", &self.db_url)
            .field("db_driver", &self.db_driver)
            .field("db_user", &self.db_user)
            .field("db_password", &"[REDACTED]")
            .field("targets", &self.targets)
            .field("min_capacity", &self.min_capacity)
            .field("max_capacity", &self.max_capacity)
            .finish()
    }
}

/// One WLST operation with its already-validated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptRequest {
    TestConnection,
    ListServers,
    StartServer {
        server_name: String,
    },
    StopServer {
        server_name: String,
        force: bool,
    },
    RestartServer {
        server_name: String,
        force: bool,
    },
    Deploy {
        app_name: String,
        app_path: String,
        targets: Option<String>,
        stage_mode: StageMode,
        plan_path: Option<String>,
    },
    Undeploy {
        app_name: String,
        targets: Option<String>,
    },
    Redeploy {
        app_name: String,
        plan_path: Option<String>,
    },
    StartApplication {
        app_name: String,
    },
    StopApplication {
        app_name: String,
    },
    ListApplications,
    ServerHealth {
        server_name: Option<String>,
    },
    ServerMetrics {
        server_name: String,
        metric_type: MetricType,
    },
    ThreadDump {
        server_name: String,
    },
    ListDatasources,
    CreateDatasource(DatasourceDefinition),
    ListJmsResources,
    /// Caller-supplied script text, run without inspection.
    Custom {
        script: String,
    },
}

impl ScriptRequest {
    /// Stable operation name used in logs and error messages.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::TestConnection => "test-connection",
            Self::ListServers => "list-servers",
            Self::StartServer { .. } => "start-server",
            Self::StopServer { .. } => "stop-server",
            Self::RestartServer { .. } => "restart-server",
            Self::Deploy { .. } => "deploy",
            Self::Undeploy { .. } => "undeploy",
            Self::Redeploy { .. } => "redeploy",
            Self::StartApplication { .. } => "start-application",
            Self::StopApplication { .. } => "stop-application",
            Self::ListApplications => "list-applications",
            Self::ServerHealth { .. } => "server-health",
            Self::ServerMetrics { .. } => "server-metrics",
            Self::ThreadDump { .. } => "thread-dump",
            Self::ListDatasources => "list-datasources",
            Self::CreateDatasource(_) => "create-datasource",
            Self::ListJmsResources => "list-jms-resources",
            Self::Custom { .. } => "execute-script",
        }
    }

    /// Markers that decide success or failure; `None` for custom scripts,
    /// whose outcome is the exit status alone.
    pub fn markers(&self) -> Option<OperationMarkers> {
        use markers::*;

        let markers = match self {
            Self::TestConnection => OperationMarkers::completion(CONNECTION_SUCCESS),
            Self::ListServers => OperationMarkers::completion(SERVERS_DONE),
            Self::StartServer { .. } => OperationMarkers::new(SERVER_STARTED, START_ERROR),
            Self::StopServer { .. } => OperationMarkers::new(SERVER_STOPPED, STOP_ERROR),
            Self::RestartServer { .. } => OperationMarkers::new(SERVER_RESTARTED, RESTART_ERROR),
            Self::Deploy { .. } => OperationMarkers::new(DEPLOY_SUCCESS, DEPLOY_ERROR),
            Self::Undeploy { .. } => OperationMarkers::new(UNDEPLOY_SUCCESS, UNDEPLOY_ERROR),
            Self::Redeploy { .. } => OperationMarkers::new(REDEPLOY_SUCCESS, REDEPLOY_ERROR),
            Self::StartApplication { .. } => OperationMarkers::new(APP_STARTED, APP_START_ERROR),
            Self::StopApplication { .. } => OperationMarkers::new(APP_STOPPED, APP_STOP_ERROR),
            Self::ListApplications => OperationMarkers::completion(APPS_DONE),
            Self::ServerHealth { .. } => OperationMarkers::completion(HEALTH_DONE),
            Self::ServerMetrics { .. } => OperationMarkers::new(METRICS_JSON, METRICS_ERROR),
            Self::ThreadDump { .. } => OperationMarkers::new(THREAD_DUMP_END, THREAD_DUMP_ERROR),
            Self::ListDatasources => OperationMarkers::completion(DATASOURCES_DONE),
            Self::CreateDatasource(_) => OperationMarkers::new(DATASOURCE_CREATED, DATASOURCE_ERROR),
            Self::ListJmsResources => OperationMarkers::completion(JMS_DONE),
            Self::Custom { .. } => return None,
        };
        Some(markers)
    }
}

/// Build the script for `request`.
///
/// Managed operations are wrapped in connect/disconnect fragments and need a
/// connection. Custom scripts are wrapped when a connection is supplied and
/// passed through byte-for-byte otherwise.
pub fn build_script(request: &ScriptRequest, connection: Option<&ConnectionParameters>) -> Result<String, WlstError> {
    let body = match request {
        ScriptRequest::Custom { script } => {
            return Ok(match connection {
                Some(connection) => fragments::connected_custom_script(connection, script),
                None => script.clone(),
            });
        }
        ScriptRequest::TestConnection => servers::test_connection(),
        ScriptRequest::ListServers => servers::list_servers(),
        ScriptRequest::StartServer { server_name } => servers::start_server(server_name),
        ScriptRequest::StopServer { server_name, force } => servers::stop_server(server_name, *force),
        ScriptRequest::RestartServer { server_name, force } => servers::restart_server(server_name, *force),
        ScriptRequest::ThreadDump { server_name } => servers::thread_dump(server_name),
        ScriptRequest::Deploy {
            app_name,
            app_path,
            targets,
            stage_mode,
            plan_path,
        } => applications::deploy(app_name, app_path, targets.as_deref(), *stage_mode, plan_path.as_deref()),
        ScriptRequest::Undeploy { app_name, targets } => applications::undeploy(app_name, targets.as_deref()),
        ScriptRequest::Redeploy { app_name, plan_path } => applications::redeploy(app_name, plan_path.as_deref()),
        ScriptRequest::StartApplication { app_name } => applications::start_application(app_name),
        ScriptRequest::StopApplication { app_name } => applications::stop_application(app_name),
        ScriptRequest::ListApplications => applications::list_applications(),
        ScriptRequest::ServerHealth { server_name } => monitoring::server_health(server_name.as_deref()),
        ScriptRequest::ServerMetrics { server_name, metric_type } => monitoring::server_metrics(server_name, *metric_type),
        ScriptRequest::ListDatasources => resources::list_datasources(),
        ScriptRequest::CreateDatasource(definition) => resources::create_datasource(definition),
        ScriptRequest::ListJmsResources => resources::list_jms_resources(),
    };

    let connection = connection.ok_or_else(|| {
        WlstError::invalid_parameter("admin_url", format!("{} requires an admin server connection", request.operation()))
    })?;
    Ok(fragments::managed_script(connection, &body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn connection() -> ConnectionParameters {
        ConnectionParameters {
            admin_url: "t3://localhost:7001".to_string(),
            username: "weblogic".to_string(),
            password: "welcome1".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    #[test]
    fn identical_requests_produce_identical_scripts() {
        let request = ScriptRequest::StopServer {
            server_name: "ms1".to_string(),
            force: true,
        };
        let first = build_script(&request, Some(&connection())).unwrap();
        let second = build_script(&request.clone(), Some(&connection())).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("shutdown(serverName, 'Server', force='true')"));
    }

    #[test]
    fn managed_scripts_connect_before_and_disconnect_after() {
        let script = build_script(&ScriptRequest::ListServers, Some(&connection())).unwrap();
        let connect = script.find("connect('weblogic', 'welcome1', 't3://localhost:7001')").unwrap();
        let body = script.find("getServerLifeCycleRuntimes").unwrap();
        let disconnect = script.find("disconnect()").unwrap();
        assert!(connect < body && body < disconnect);
        assert!(script.starts_with("import json"));
    }

    #[test]
    fn managed_scripts_require_a_connection() {
        let error = build_script(&ScriptRequest::ListServers, None).unwrap_err();
        assert!(matches!(error, WlstError::InvalidParameter { .. }));
    }

    #[test]
    fn custom_script_passes_through_without_connection() {
        let text = "print('offline')\nreadDomain('/u01/domains/base')\n";
        let request = ScriptRequest::Custom { script: text.to_string() };
        assert_eq!(build_script(&request, None).unwrap(), text);
    }

    #[test]
    fn custom_script_is_wrapped_unmodified_with_connection() {
        let text = "ls()\nprint('it''s fine')";
        let request = ScriptRequest::Custom { script: text.to_string() };
        let script = build_script(&request, Some(&connection())).unwrap();
        assert!(script.contains(text));
        assert!(script.find("connect(").unwrap() < script.find(text).unwrap());
        assert!(script.find(text).unwrap() < script.find("disconnect()").unwrap());
    }

    #[test]
    fn caller_values_are_escaped() {
        let request = ScriptRequest::StartServer {
            server_name: "ms1'); shutdown('AdminServer".to_string(),
        };
        let script = build_script(&request, Some(&connection())).unwrap();
        assert!(script.contains(r"serverName = 'ms1\'); shutdown(\'AdminServer'"));
    }

    #[test]
    fn every_managed_operation_declares_markers() {
        let requests = [
            ScriptRequest::TestConnection,
            ScriptRequest::ListServers,
            ScriptRequest::ListApplications,
            ScriptRequest::ListDatasources,
            ScriptRequest::ListJmsResources,
            ScriptRequest::ServerHealth { server_name: None },
        ];
        for request in requests {
            let markers = request.markers().expect("managed operation has markers");
            let script = build_script(&request, Some(&connection())).unwrap();
            assert!(script.contains(markers.success), "{} script lacks {}", request.operation(), markers.success);
        }
        assert!(ScriptRequest::Custom { script: String::new() }.markers().is_none());
    }
}

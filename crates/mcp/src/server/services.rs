//! Tool implementations shared by every transport.
//!
//! Each call validates its arguments, resolves a fresh connection, builds a
//! script, runs it, interprets the markers and renders the result. Nothing is
//! cached between calls.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use wlst_types::{
    ApplicationListing, ApplicationStatus, ConnectionInfo, DatasourceInfo, DatasourceListing, HealthListing, JmsModule, JmsResources,
    JmsServer, OperationOutcome, ResponseFormat, ScriptExecution, ServerHealth, ServerListing, ServerMetrics, ServerStatus, ThreadDump,
};

use super::schemas::{
    ApplicationRequest, CreateDatasourceRequest, DeployRequest, ExecuteScriptRequest, ListRequest, RedeployRequest, ServerHealthRequest,
    ServerMetricsRequest, ShutdownServerRequest, StartServerRequest, TestConnectionRequest, ThreadDumpRequest, ToolRequest,
    UndeployRequest,
};
use crate::config::validation::{
    APP_NAME_MAX_CHARS, DATASOURCE_NAME_MAX_CHARS, JNDI_NAME_MAX_CHARS, SERVER_NAME_MAX_CHARS, parse_metric_type, parse_stage_mode,
    require_name, require_present, split_targets, trimmed, validate_pool_capacity,
};
use crate::config::{
    ConnectionOverrides, ConnectionParameters, TimeoutPolicy, WlstEnvironment, resolve_connection, resolve_optional_connection,
};
use crate::response::parser::{key_values, marker_message, marker_records, section};
use crate::response::{ToolOutput, interpret, render};
use crate::runner::{ProcessRunner, RawOutput, WlstRunner};
use crate::script::markers::{
    APP_STATUS, DATASOURCE, DOMAIN_NAME, DOMAIN_VERSION, JMS_MODULE, JMS_SERVER, METRICS_JSON, SERVER_HEALTH, SERVER_STATUS,
    THREAD_DUMP_END, THREAD_DUMP_START,
};
use crate::script::{DatasourceDefinition, ScriptRequest, build_script};
use crate::types::WlstError;

/// Shared state for WLST tool handlers: the startup environment snapshot and
/// the runner that executes scripts.
#[derive(Clone)]
pub struct WlstToolServices {
    environment: WlstEnvironment,
    runner: Arc<dyn WlstRunner>,
}

impl std::fmt::Debug for WlstToolServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WlstToolServices").field("environment", &self.environment).finish_non_exhaustive()
    }
}

impl WlstToolServices {
    /// Create services with an explicit runner.
    pub fn new(environment: WlstEnvironment, runner: Arc<dyn WlstRunner>) -> Self {
        Self { environment, runner }
    }

    /// Create services that launch the WLST executable located from `environment`.
    pub fn with_process_runner(environment: WlstEnvironment) -> Self {
        let runner = ProcessRunner::new(environment.wlst_executable());
        Self::new(environment, Arc::new(runner))
    }

    /// Build, run and interpret one script.
    ///
    /// The output is returned unmasked so that a secret which happens to
    /// match marker text cannot corrupt parsing. Errors are masked here;
    /// callers that echo raw output mask it themselves.
    async fn execute(
        &self,
        request: &ScriptRequest,
        connection: Option<&ConnectionParameters>,
        timeout: Duration,
        extra_secrets: &[&str],
    ) -> Result<RawOutput, WlstError> {
        let operation = request.operation();
        let script = build_script(request, connection)?;
        debug!(operation, script = %wlst_util::redact_sensitive(&script), "Generated WLST script");

        let output = self.runner.run(&script, timeout).await?;
        if let Err(error) = interpret(&output, operation, request.markers()) {
            let secrets = connection.map(|connection| connection.password.as_str()).into_iter().chain(extra_secrets.iter().copied());
            return Err(secrets.fold(error, WlstError::mask));
        }
        Ok(output)
    }

    async fn execute_managed(&self, request: &ScriptRequest, overrides: &ConnectionOverrides, policy: TimeoutPolicy) -> Result<RawOutput, WlstError> {
        let connection = resolve_connection(overrides, &self.environment, policy)?;
        self.execute(request, Some(&connection), connection.timeout, &[]).await
    }

    /// Run a state-changing operation and report its outcome.
    async fn mutate(
        &self,
        request: ScriptRequest,
        overrides: &ConnectionOverrides,
        policy: TimeoutPolicy,
        target: &str,
        message: String,
        format: ResponseFormat,
    ) -> Result<ToolOutput, WlstError> {
        let operation = request.operation();
        info!(operation, target, "Running WLST operation");
        self.execute_managed(&request, overrides, policy).await?;
        info!(operation, target, "WLST operation completed");
        render(&OperationOutcome::success(operation, target, message), format)
    }

    fn standard(&self) -> TimeoutPolicy {
        TimeoutPolicy::standard(&self.environment)
    }

    pub async fn test_connection(&self, request: &TestConnectionRequest) -> Result<ToolOutput, WlstError> {
        let connection = resolve_connection(&request.connection_overrides(), &self.environment, self.standard())?;
        let output = self
            .execute(&ScriptRequest::TestConnection, Some(&connection), connection.timeout, &[])
            .await?;

        let mut values = key_values(&output.stdout);
        let domain_name = values
            .shift_remove(DOMAIN_NAME)
            .ok_or_else(|| WlstError::unexpected_output("test-connection", format!("missing {DOMAIN_NAME}")))?;
        let info = ConnectionInfo {
            domain_name,
            domain_version: values.shift_remove(DOMAIN_VERSION).unwrap_or_else(|| "unknown".to_string()),
            admin_url: connection.admin_url,
        };
        render(&info, request.response_format())
    }

    pub async fn list_servers(&self, request: &ListRequest) -> Result<ToolOutput, WlstError> {
        let output = self
            .execute_managed(&ScriptRequest::ListServers, &request.connection_overrides(), self.standard())
            .await?;
        let servers: Vec<ServerStatus> = marker_records(&output.stdout, SERVER_STATUS);
        render(&ServerListing::new(servers), request.response_format())
    }

    pub async fn start_server(&self, request: &StartServerRequest) -> Result<ToolOutput, WlstError> {
        let server_name = require_name("server_name", &request.server_name, SERVER_NAME_MAX_CHARS)?;
        let message = format!("Server '{server_name}' started successfully");
        self.mutate(
            ScriptRequest::StartServer {
                server_name: server_name.clone(),
            },
            &request.connection_overrides(),
            self.standard(),
            &server_name,
            message,
            request.response_format(),
        )
        .await
    }

    pub async fn stop_server(&self, request: &ShutdownServerRequest) -> Result<ToolOutput, WlstError> {
        let server_name = require_name("server_name", &request.server_name, SERVER_NAME_MAX_CHARS)?;
        let force = request.force.unwrap_or(false);
        let message = if force {
            format!("Server '{server_name}' force-stopped successfully")
        } else {
            format!("Server '{server_name}' stopped successfully")
        };
        self.mutate(
            ScriptRequest::StopServer {
                server_name: server_name.clone(),
                force,
            },
            &request.connection_overrides(),
            self.standard(),
            &server_name,
            message,
            request.response_format(),
        )
        .await
    }

    pub async fn restart_server(&self, request: &ShutdownServerRequest) -> Result<ToolOutput, WlstError> {
        let server_name = require_name("server_name", &request.server_name, SERVER_NAME_MAX_CHARS)?;
        let message = format!("Server '{server_name}' restarted successfully");
        self.mutate(
            ScriptRequest::RestartServer {
                server_name: server_name.clone(),
                force: request.force.unwrap_or(false),
            },
            &request.connection_overrides(),
            self.standard(),
            &server_name,
            message,
            request.response_format(),
        )
        .await
    }

    pub async fn deploy(&self, request: &DeployRequest) -> Result<ToolOutput, WlstError> {
        let app_name = require_name("app_name", &request.app_name, APP_NAME_MAX_CHARS)?;
        let app_path = require_present("app_path", &request.app_path)?;
        let stage_mode = parse_stage_mode(request.stage_mode.as_deref())?;
        let targets = trimmed(request.targets.as_deref());
        let message = match &targets {
            Some(targets) => format!("Application '{app_name}' deployed to {targets}"),
            None => format!("Application '{app_name}' deployed successfully"),
        };
        self.mutate(
            ScriptRequest::Deploy {
                app_name: app_name.clone(),
                app_path,
                targets,
                stage_mode,
                plan_path: trimmed(request.plan_path.as_deref()),
            },
            &request.connection_overrides(),
            TimeoutPolicy::deployment(&self.environment),
            &app_name,
            message,
            request.response_format(),
        )
        .await
    }

    pub async fn undeploy(&self, request: &UndeployRequest) -> Result<ToolOutput, WlstError> {
        let app_name = require_name("app_name", &request.app_name, APP_NAME_MAX_CHARS)?;
        let message = format!("Application '{app_name}' undeployed successfully");
        self.mutate(
            ScriptRequest::Undeploy {
                app_name: app_name.clone(),
                targets: trimmed(request.targets.as_deref()),
            },
            &request.connection_overrides(),
            self.standard(),
            &app_name,
            message,
            request.response_format(),
        )
        .await
    }

    pub async fn redeploy(&self, request: &RedeployRequest) -> Result<ToolOutput, WlstError> {
        let app_name = require_name("app_name", &request.app_name, APP_NAME_MAX_CHARS)?;
        let message = format!("Application '{app_name}' redeployed successfully");
        self.mutate(
            ScriptRequest::Redeploy {
                app_name: app_name.clone(),
                plan_path: trimmed(request.plan_path.as_deref()),
            },
            &request.connection_overrides(),
            TimeoutPolicy::deployment(&self.environment),
            &app_name,
            message,
            request.response_format(),
        )
        .await
    }

    pub async fn start_application(&self, request: &ApplicationRequest) -> Result<ToolOutput, WlstError> {
        let app_name = require_name("app_name", &request.app_name, APP_NAME_MAX_CHARS)?;
        let message = format!("Application '{app_name}' started successfully");
        self.mutate(
            ScriptRequest::StartApplication { app_name: app_name.clone() },
            &request.connection_overrides(),
            self.standard(),
            &app_name,
            message,
            request.response_format(),
        )
        .await
    }

    pub async fn stop_application(&self, request: &ApplicationRequest) -> Result<ToolOutput, WlstError> {
        let app_name = require_name("app_name", &request.app_name, APP_NAME_MAX_CHARS)?;
        let message = format!("Application '{app_name}' stopped successfully");
        self.mutate(
            ScriptRequest::StopApplication { app_name: app_name.clone() },
            &request.connection_overrides(),
            self.standard(),
            &app_name,
            message,
            request.response_format(),
        )
        .await
    }

    pub async fn list_applications(&self, request: &ListRequest) -> Result<ToolOutput, WlstError> {
        let output = self
            .execute_managed(&ScriptRequest::ListApplications, &request.connection_overrides(), self.standard())
            .await?;
        let applications: Vec<ApplicationStatus> = marker_records(&output.stdout, APP_STATUS);
        render(&ApplicationListing::new(applications), request.response_format())
    }

    pub async fn server_health(&self, request: &ServerHealthRequest) -> Result<ToolOutput, WlstError> {
        let server_name = match request.server_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Some(require_name("server_name", name, SERVER_NAME_MAX_CHARS)?),
            _ => None,
        };
        let output = self
            .execute_managed(&ScriptRequest::ServerHealth { server_name }, &request.connection_overrides(), self.standard())
            .await?;
        let servers: Vec<ServerHealth> = marker_records(&output.stdout, SERVER_HEALTH);
        render(&HealthListing { servers }, request.response_format())
    }

    pub async fn server_metrics(&self, request: &ServerMetricsRequest) -> Result<ToolOutput, WlstError> {
        let server_name = require_name("server_name", &request.server_name, SERVER_NAME_MAX_CHARS)?;
        let metric_type = parse_metric_type(request.metric_type.as_deref())?;
        let output = self
            .execute_managed(
                &ScriptRequest::ServerMetrics { server_name, metric_type },
                &request.connection_overrides(),
                self.standard(),
            )
            .await?;

        let payload = marker_message(&output.stdout, METRICS_JSON)
            .ok_or_else(|| WlstError::unexpected_output("server-metrics", format!("missing {METRICS_JSON} payload")))?;
        let metrics: ServerMetrics = serde_json::from_str(&payload)
            .map_err(|error| WlstError::unexpected_output("server-metrics", format!("unparsable metrics payload: {error}")))?;
        render(&metrics, request.response_format())
    }

    pub async fn thread_dump(&self, request: &ThreadDumpRequest) -> Result<ToolOutput, WlstError> {
        let server_name = require_name("server_name", &request.server_name, SERVER_NAME_MAX_CHARS)?;
        let output = self
            .execute_managed(
                &ScriptRequest::ThreadDump {
                    server_name: server_name.clone(),
                },
                &request.connection_overrides(),
                self.standard(),
            )
            .await?;

        let thread_dump = section(&output.stdout, THREAD_DUMP_START, THREAD_DUMP_END)
            .ok_or_else(|| WlstError::unexpected_output("thread-dump", "thread dump section is incomplete"))?;
        render(
            &ThreadDump {
                server: server_name,
                thread_dump,
            },
            request.response_format(),
        )
    }

    pub async fn list_datasources(&self, request: &ListRequest) -> Result<ToolOutput, WlstError> {
        let output = self
            .execute_managed(&ScriptRequest::ListDatasources, &request.connection_overrides(), self.standard())
            .await?;
        let datasources: Vec<DatasourceInfo> = marker_records(&output.stdout, DATASOURCE);
        render(&DatasourceListing::new(datasources), request.response_format())
    }

    pub async fn create_datasource(&self, request: &CreateDatasourceRequest) -> Result<ToolOutput, WlstError> {
        let name = require_name("ds_name", &request.ds_name, DATASOURCE_NAME_MAX_CHARS)?;
        let jndi_name = require_name("jndi_name", &request.jndi_name, JNDI_NAME_MAX_CHARS)?;
        let db_url = require_present("db_url", &request.db_url)?;
        let db_driver = require_present("db_driver", &request.db_driver)?;
        let db_user = require_present("db_user", &request.db_user)?;
        if request.db_password.is_empty() {
            return Err(WlstError::invalid_parameter("db_password", "must not be empty"));
        }
        let targets = split_targets(&request.targets);
        if targets.is_empty() {
            return Err(WlstError::invalid_parameter("targets", "at least one target is required"));
        }
        let (min_capacity, max_capacity) = validate_pool_capacity(request.min_capacity, request.max_capacity)?;

        let definition = DatasourceDefinition {
            name: name.clone(),
            jndi_name: jndi_name.clone(),
            db_url,
            db_driver,
            db_user,
            db_password: request.db_password.clone(),
            targets,
            min_capacity,
            max_capacity,
        };
        let connection = resolve_connection(&request.connection_overrides(), &self.environment, self.standard())?;

        info!(datasource = %name, jndi = %jndi_name, "Creating JDBC datasource");
        self.execute(
            &ScriptRequest::CreateDatasource(definition),
            Some(&connection),
            connection.timeout,
            &[request.db_password.as_str()],
        )
        .await?;
        info!(datasource = %name, "JDBC datasource created");

        let message = format!("Datasource '{name}' created with JNDI name '{jndi_name}'");
        render(&OperationOutcome::success("create-datasource", name, message), request.response_format())
    }

    pub async fn list_jms_resources(&self, request: &ListRequest) -> Result<ToolOutput, WlstError> {
        let output = self
            .execute_managed(&ScriptRequest::ListJmsResources, &request.connection_overrides(), self.standard())
            .await?;
        let resources = JmsResources {
            servers: marker_records::<JmsServer>(&output.stdout, JMS_SERVER),
            modules: marker_records::<JmsModule>(&output.stdout, JMS_MODULE),
        };
        render(&resources, request.response_format())
    }

    /// Run caller-supplied WLST code, connected when credentials resolve and
    /// offline otherwise.
    pub async fn execute_script(&self, request: &ExecuteScriptRequest) -> Result<ToolOutput, WlstError> {
        if request.script.trim().is_empty() {
            return Err(WlstError::invalid_parameter("script", "must not be empty"));
        }
        let overrides = request.connection_overrides();
        let policy = TimeoutPolicy::script(&self.environment);
        let connection = resolve_optional_connection(&overrides, &self.environment, policy)?;
        let timeout = match &connection {
            Some(connection) => connection.timeout,
            None => policy.resolve(overrides.timeout)?,
        };

        info!(connected = connection.is_some(), timeout_secs = timeout.as_secs(), "Executing caller-supplied WLST script");
        let request_script = ScriptRequest::Custom {
            script: request.script.clone(),
        };
        let mut output = self.execute(&request_script, connection.as_ref(), timeout, &[]).await?;
        if let Some(connection) = &connection {
            output = output.mask(&connection.password);
        }

        let execution = ScriptExecution {
            connected: connection.is_some(),
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        };
        render(&execution, request.response_format())
    }
}

//! Records parsed from WLST output and returned as structured tool results.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a single server in the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub name: String,
    /// `None` when WLST could not read the runtime state.
    #[serde(default)]
    pub state: Option<String>,
}

/// All servers of a domain, in the order WLST reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerListing {
    pub servers: Vec<ServerStatus>,
    pub total: usize,
}

impl ServerListing {
    pub fn new(servers: Vec<ServerStatus>) -> Self {
        let total = servers.len();
        Self { servers, total }
    }
}

/// Current and intended state of a deployed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatus {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub intended_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListing {
    pub applications: Vec<ApplicationStatus>,
    pub total: usize,
}

impl ApplicationListing {
    pub fn new(applications: Vec<ApplicationStatus>) -> Self {
        let total = applications.len();
        Self { applications, total }
    }
}

/// Health snapshot of one running server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerHealth {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub health: Option<String>,
    #[serde(default)]
    pub open_sockets_current_count: Option<i64>,
    #[serde(default)]
    pub activation_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthListing {
    pub servers: Vec<ServerHealth>,
}

/// A metric category is either collected or carries the error WLST raised
/// while navigating to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricSection<T> {
    Failed { error: String },
    Collected(T),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JvmMetrics {
    pub heap_size_current: i64,
    pub heap_size_max: i64,
    pub heap_free_current: i64,
    pub heap_free_percent: i64,
    /// Milliseconds since the JVM started.
    pub uptime: i64,
}

impl JvmMetrics {
    pub fn heap_used(&self) -> i64 {
        self.heap_size_current - self.heap_free_current
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadPoolMetrics {
    pub execute_thread_total_count: i64,
    pub execute_thread_idle_count: i64,
    pub hogging_thread_count: i64,
    pub pending_user_request_count: i64,
    pub queue_length: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JdbcDataSourceMetrics {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    pub active_connections_current_count: i64,
    pub active_connections_high_count: i64,
    pub connections_total_count: i64,
    pub waiting_for_connection_current_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmsServerMetrics {
    pub name: String,
    pub messages_current_count: i64,
    pub messages_pending_count: i64,
    pub destinations_current_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmsRuntimeMetrics {
    pub connections_current_count: i64,
    pub connections_high_count: i64,
    pub jms_servers_current_count: i64,
    #[serde(default)]
    pub servers: Vec<JmsServerMetrics>,
}

/// Runtime metrics for one server; categories that were not requested are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMetrics {
    pub server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm: Option<MetricSection<JvmMetrics>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<MetricSection<ThreadPoolMetrics>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jdbc: Option<MetricSection<Vec<JdbcDataSourceMetrics>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jms: Option<MetricSection<JmsRuntimeMetrics>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceInfo {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceListing {
    pub datasources: Vec<DatasourceInfo>,
    pub total: usize,
}

impl DatasourceListing {
    pub fn new(datasources: Vec<DatasourceInfo>) -> Self {
        let total = datasources.len();
        Self { datasources, total }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmsServer {
    pub name: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

/// A queue or topic inside a JMS module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmsDestination {
    pub name: String,
    #[serde(default)]
    pub jndi_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmsModule {
    pub name: String,
    #[serde(default)]
    pub queues: Vec<JmsDestination>,
    #[serde(default)]
    pub topics: Vec<JmsDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JmsResources {
    pub servers: Vec<JmsServer>,
    pub modules: Vec<JmsModule>,
}

/// Domain information returned by a successful connection test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    pub domain_name: String,
    pub domain_version: String,
    pub admin_url: String,
}

/// Result of a mutating operation (start, stop, deploy, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub operation: String,
    pub target: String,
    pub status: String,
    pub message: String,
}

impl OperationOutcome {
    pub fn success(operation: impl Into<String>, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            target: target.into(),
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDump {
    pub server: String,
    pub thread_dump: String,
}

/// Captured output of a caller-supplied script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptExecution {
    /// Whether the script ran inside a connect/disconnect wrapper.
    pub connected: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metric_section_distinguishes_errors_from_values() {
        let failed: MetricSection<JvmMetrics> = serde_json::from_value(json!({ "error": "No such MBean" })).unwrap();
        assert_eq!(
            failed,
            MetricSection::Failed {
                error: "No such MBean".to_string()
            }
        );

        let collected: MetricSection<Vec<JdbcDataSourceMetrics>> = serde_json::from_value(json!([])).unwrap();
        assert_eq!(collected, MetricSection::Collected(Vec::new()));
    }

    #[test]
    fn server_metrics_omits_categories_that_were_not_requested() {
        let metrics = ServerMetrics {
            server: "ms1".to_string(),
            jvm: None,
            threads: Some(MetricSection::Collected(ThreadPoolMetrics {
                execute_thread_total_count: 12,
                execute_thread_idle_count: 4,
                hogging_thread_count: 0,
                pending_user_request_count: 0,
                queue_length: 0,
            })),
            jdbc: None,
            jms: None,
        };
        let value = serde_json::to_value(&metrics).unwrap();
        assert_eq!(value["threads"]["executeThreadTotalCount"], json!(12));
        assert!(value.get("jvm").is_none());
        assert!(value.get("jdbc").is_none());
    }

    #[test]
    fn application_status_reads_camel_case_keys() {
        let status: ApplicationStatus =
            serde_json::from_str(r#"{"name":"shop","state":"STATE_ACTIVE","intendedState":"STATE_ACTIVE"}"#).unwrap();
        assert_eq!(status.intended_state.as_deref(), Some("STATE_ACTIVE"));
    }

    #[test]
    fn null_states_still_deserialize() {
        let status: ApplicationStatus = serde_json::from_str(r#"{"name":"shop","state":null,"intendedState":null}"#).unwrap();
        assert_eq!(status.state, None);

        let health: ServerHealth = serde_json::from_str(r#"{"name":"ms1","state":"RUNNING","health":null}"#).unwrap();
        assert_eq!(health.health, None);

        let jdbc: MetricSection<Vec<JdbcDataSourceMetrics>> = serde_json::from_value(json!([{
            "name": "OrdersDS",
            "state": null,
            "activeConnectionsCurrentCount": 0,
            "activeConnectionsHighCount": 3,
            "connectionsTotalCount": 12,
            "waitingForConnectionCurrentCount": 0
        }]))
        .unwrap();
        let MetricSection::Collected(data_sources) = jdbc else {
            panic!("expected collected datasources");
        };
        assert_eq!(data_sources[0].state, None);
    }

    #[test]
    fn listings_count_their_entries() {
        let listing = ServerListing::new(vec![
            ServerStatus {
                name: "AdminServer".to_string(),
                state: Some("RUNNING".to_string()),
            },
            ServerStatus {
                name: "ms1".to_string(),
                state: Some("SHUTDOWN".to_string()),
            },
        ]);
        assert_eq!(listing.total, 2);
    }
}

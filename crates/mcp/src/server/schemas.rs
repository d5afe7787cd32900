use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wlst_types::ResponseFormat;

use crate::config::ConnectionOverrides;

/// Connection and formatting fields shared by every request.
pub trait ToolRequest {
    fn connection_overrides(&self) -> ConnectionOverrides;
    fn response_format(&self) -> ResponseFormat;
}

/// Implements [`ToolRequest`] for structs carrying the common connection
/// fields, with or without `timeout`.
macro_rules! tool_request {
    ($request:ty, timeout) => {
        impl ToolRequest for $request {
            fn connection_overrides(&self) -> ConnectionOverrides {
                ConnectionOverrides {
                    admin_url: self.admin_url.clone(),
                    username: self.username.clone(),
                    password: self.password.clone(),
                    timeout: self.timeout,
                }
            }

            fn response_format(&self) -> ResponseFormat {
                self.response_format.unwrap_or_default()
            }
        }
    };
    ($request:ty) => {
        impl ToolRequest for $request {
            fn connection_overrides(&self) -> ConnectionOverrides {
                ConnectionOverrides {
                    admin_url: self.admin_url.clone(),
                    username: self.username.clone(),
                    password: self.password.clone(),
                    timeout: None,
                }
            }

            fn response_format(&self) -> ResponseFormat {
                self.response_format.unwrap_or_default()
            }
        }
    };
}

/// Parameters for the connection test.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TestConnectionRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Timeout in seconds (10-600). Defaults to WLST_TIMEOUT.")]
    pub timeout: Option<u64>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(TestConnectionRequest, timeout);

/// Parameters for read-only listings (servers, applications, datasources, JMS).
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ListRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(ListRequest);

/// Parameters for starting a managed server.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StartServerRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    /// Server name as configured in the domain.
    #[schemars(description = "Name of the server (e.g., 'ManagedServer1').")]
    pub server_name: String,
    #[schemars(description = "Timeout in seconds (10-600). Defaults to WLST_TIMEOUT.")]
    pub timeout: Option<u64>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(StartServerRequest, timeout);

/// Parameters for stopping or restarting a server.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShutdownServerRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Name of the server (e.g., 'ManagedServer1').")]
    pub server_name: String,
    /// Skip waiting for in-flight work to complete.
    #[schemars(description = "Force shutdown without waiting for sessions to complete. Defaults to false.")]
    pub force: Option<bool>,
    #[schemars(description = "Timeout in seconds (10-600). Defaults to WLST_TIMEOUT.")]
    pub timeout: Option<u64>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(ShutdownServerRequest, timeout);

/// Parameters for deploying an application archive.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DeployRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Application name (1-200 characters).")]
    pub app_name: String,
    #[schemars(description = "Path to the WAR/EAR/JAR file or exploded directory, as seen by the admin server.")]
    pub app_path: String,
    #[schemars(description = "Comma-separated list of target servers or clusters. Defaults to the admin server.")]
    pub targets: Option<String>,
    #[schemars(description = "Staging mode: 'stage' (default), 'nostage', or 'external_stage'.")]
    pub stage_mode: Option<String>,
    #[schemars(description = "Optional path to a deployment plan.")]
    pub plan_path: Option<String>,
    #[schemars(description = "Timeout in seconds (10-600). Defaults to twice WLST_TIMEOUT.")]
    pub timeout: Option<u64>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(DeployRequest, timeout);

/// Parameters for undeploying an application.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UndeployRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Application name (1-200 characters).")]
    pub app_name: String,
    #[schemars(description = "Comma-separated list of targets to undeploy from. Defaults to all targets.")]
    pub targets: Option<String>,
    #[schemars(description = "Timeout in seconds (10-600). Defaults to WLST_TIMEOUT.")]
    pub timeout: Option<u64>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(UndeployRequest, timeout);

/// Parameters for redeploying an application in place.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RedeployRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Application name (1-200 characters).")]
    pub app_name: String,
    #[schemars(description = "Optional path to an updated deployment plan.")]
    pub plan_path: Option<String>,
    #[schemars(description = "Timeout in seconds (10-600). Defaults to twice WLST_TIMEOUT.")]
    pub timeout: Option<u64>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(RedeployRequest, timeout);

/// Parameters for starting or stopping a deployed application.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ApplicationRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Application name (1-200 characters).")]
    pub app_name: String,
    #[schemars(description = "Timeout in seconds (10-600). Defaults to WLST_TIMEOUT.")]
    pub timeout: Option<u64>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(ApplicationRequest, timeout);

/// Parameters for the health check.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerHealthRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Limit the check to one server. All running servers when omitted.")]
    pub server_name: Option<String>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(ServerHealthRequest);

/// Parameters for runtime metrics collection.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerMetricsRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Name of a running server.")]
    pub server_name: String,
    #[schemars(description = "Metric category: 'all' (default), 'jvm', 'threads', 'jdbc', or 'jms'.")]
    pub metric_type: Option<String>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(ServerMetricsRequest);

/// Parameters for capturing a thread dump.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ThreadDumpRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Name of a running server.")]
    pub server_name: String,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(ThreadDumpRequest);

/// Parameters for creating a generic JDBC datasource.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CreateDatasourceRequest {
    #[schemars(description = "Admin Server URL (e.g., 't3://localhost:7001'). Uses WLST_ADMIN_URL env var if not provided.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "Datasource name (1-200 characters).")]
    pub ds_name: String,
    #[schemars(description = "JNDI name (e.g., 'jdbc/myDS').")]
    pub jndi_name: String,
    #[schemars(description = "Database JDBC URL.")]
    pub db_url: String,
    #[schemars(description = "JDBC driver class name.")]
    pub db_driver: String,
    #[schemars(description = "Database username.")]
    pub db_user: String,
    #[schemars(description = "Database password.")]
    pub db_password: String,
    #[schemars(description = "Comma-separated list of target servers or clusters.")]
    pub targets: String,
    #[schemars(description = "Minimum pool capacity (0-100). Defaults to 1.")]
    pub min_capacity: Option<u32>,
    #[schemars(description = "Maximum pool capacity (1-500). Defaults to 15.")]
    pub max_capacity: Option<u32>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(CreateDatasourceRequest);

/// Parameters for running caller-supplied WLST code.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExecuteScriptRequest {
    #[schemars(description = "Admin Server URL. When URL, username and password all resolve the script runs connected; otherwise it runs offline.")]
    pub admin_url: Option<String>,
    #[schemars(description = "WebLogic admin username. Uses WLST_USERNAME env var if not provided.")]
    pub username: Option<String>,
    #[schemars(description = "WebLogic admin password. Uses WLST_PASSWORD env var if not provided.")]
    pub password: Option<String>,
    #[schemars(description = "WLST (Jython) script text. Runs unmodified and unsandboxed.")]
    pub script: String,
    #[schemars(description = "Timeout in seconds (10-1800). Defaults to WLST_TIMEOUT.")]
    pub timeout: Option<u64>,
    #[schemars(description = "Output format: 'markdown' (default) or 'json'.")]
    pub response_format: Option<ResponseFormat>,
}
tool_request!(ExecuteScriptRequest, timeout);

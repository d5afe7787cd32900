use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorData, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::response::ToolOutput;
use crate::server::errors::tool_error;
use crate::server::log_payload::build_log_payload;
use crate::server::schemas::{
    ApplicationRequest, CreateDatasourceRequest, DeployRequest, ExecuteScriptRequest, ListRequest, RedeployRequest, ServerHealthRequest,
    ServerMetricsRequest, ShutdownServerRequest, StartServerRequest, TestConnectionRequest, ThreadDumpRequest, UndeployRequest,
};
use crate::server::services::WlstToolServices;
use crate::types::WlstError;

const SERVER_INSTRUCTIONS: &str = "WebLogic administration through WLST.\n\
CONNECTION:\n\
- admin_url, username and password are optional on every tool; missing values fall back to WLST_ADMIN_URL, WLST_USERNAME and WLST_PASSWORD.\n\
- Call wlst_test_connection first when credentials are uncertain.\n\
OUTPUT:\n\
- response_format=markdown (default) returns readable text; response_format=json returns structured content.\n\
SAFETY:\n\
- Stop, restart, undeploy, stop_application and execute_script are destructive; confirm intent before calling them.\n\
- Each tool call starts a fresh WLST process; nothing is shared between calls.";

#[derive(Clone)]
pub struct WlstMcpCore {
    tool_router: ToolRouter<Self>,
    services: Arc<WlstToolServices>,
}

#[tool_router]
impl WlstMcpCore {
    /// Create a new MCP core handler backed by the shared tool services.
    pub fn new(services: Arc<WlstToolServices>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            services,
        }
    }

    #[tool(
        name = "wlst_test_connection",
        annotations(title = "Test WebLogic Connection", read_only_hint = true, idempotent_hint = true, open_world_hint = true),
        description = "Connect to the admin server and report the domain name and version. Use to verify credentials before other calls."
    )]
    async fn test_connection(&self, param: Parameters<TestConnectionRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.test_connection(&param.0).await;
        self.finish("wlst_test_connection", &param.0, result)
    }

    #[tool(
        name = "wlst_list_servers",
        annotations(title = "List WebLogic Servers", read_only_hint = true, idempotent_hint = true, open_world_hint = true),
        description = "List every server in the domain with its lifecycle state (RUNNING, SHUTDOWN, ADMIN, ...)."
    )]
    async fn list_servers(&self, param: Parameters<ListRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.list_servers(&param.0).await;
        self.finish("wlst_list_servers", &param.0, result)
    }

    #[tool(
        name = "wlst_start_server",
        annotations(
            title = "Start WebLogic Server",
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        ),
        description = "Start a managed server through the admin server. Blocks until the server reports RUNNING or the timeout elapses."
    )]
    async fn start_server(&self, param: Parameters<StartServerRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.start_server(&param.0).await;
        self.finish("wlst_start_server", &param.0, result)
    }

    #[tool(
        name = "wlst_stop_server",
        annotations(
            title = "Stop WebLogic Server",
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = true
        ),
        description = "Shut down a server. force=true skips waiting for in-flight sessions. Interrupts traffic on the target."
    )]
    async fn stop_server(&self, param: Parameters<ShutdownServerRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.stop_server(&param.0).await;
        self.finish("wlst_stop_server", &param.0, result)
    }

    #[tool(
        name = "wlst_restart_server",
        annotations(
            title = "Restart WebLogic Server",
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = false,
            open_world_hint = true
        ),
        description = "Shut down and start a server again. force=true applies to the shutdown step."
    )]
    async fn restart_server(&self, param: Parameters<ShutdownServerRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.restart_server(&param.0).await;
        self.finish("wlst_restart_server", &param.0, result)
    }

    #[tool(
        name = "wlst_deploy",
        annotations(
            title = "Deploy Application",
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = true
        ),
        description = "Deploy a WAR/EAR/JAR archive or exploded directory. app_path must be readable by the admin server. Default timeout is twice WLST_TIMEOUT."
    )]
    async fn deploy(&self, param: Parameters<DeployRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.deploy(&param.0).await;
        self.finish("wlst_deploy", &param.0, result)
    }

    #[tool(
        name = "wlst_undeploy",
        annotations(
            title = "Undeploy Application",
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = true
        ),
        description = "Remove an application from all targets, or only from the listed targets."
    )]
    async fn undeploy(&self, param: Parameters<UndeployRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.undeploy(&param.0).await;
        self.finish("wlst_undeploy", &param.0, result)
    }

    #[tool(
        name = "wlst_redeploy",
        annotations(
            title = "Redeploy Application",
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = true
        ),
        description = "Redeploy an existing application in place, optionally with an updated deployment plan."
    )]
    async fn redeploy(&self, param: Parameters<RedeployRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.redeploy(&param.0).await;
        self.finish("wlst_redeploy", &param.0, result)
    }

    #[tool(
        name = "wlst_start_application",
        annotations(
            title = "Start Application",
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = true,
            open_world_hint = true
        ),
        description = "Start a deployed application so it begins serving requests."
    )]
    async fn start_application(&self, param: Parameters<ApplicationRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.start_application(&param.0).await;
        self.finish("wlst_start_application", &param.0, result)
    }

    #[tool(
        name = "wlst_stop_application",
        annotations(
            title = "Stop Application",
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = true,
            open_world_hint = true
        ),
        description = "Stop a deployed application. It stays deployed but no longer serves requests."
    )]
    async fn stop_application(&self, param: Parameters<ApplicationRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.stop_application(&param.0).await;
        self.finish("wlst_stop_application", &param.0, result)
    }

    #[tool(
        name = "wlst_list_applications",
        annotations(title = "List Applications", read_only_hint = true, idempotent_hint = true, open_world_hint = true),
        description = "List deployed applications with their current and intended state."
    )]
    async fn list_applications(&self, param: Parameters<ListRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.list_applications(&param.0).await;
        self.finish("wlst_list_applications", &param.0, result)
    }

    #[tool(
        name = "wlst_server_health",
        annotations(title = "Server Health", read_only_hint = true, idempotent_hint = true, open_world_hint = true),
        description = "Report state, health, open sockets and activation time of running servers, or of one server when server_name is given."
    )]
    async fn server_health(&self, param: Parameters<ServerHealthRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.server_health(&param.0).await;
        self.finish("wlst_server_health", &param.0, result)
    }

    #[tool(
        name = "wlst_server_metrics",
        annotations(title = "Server Metrics", read_only_hint = true, idempotent_hint = true, open_world_hint = true),
        description = "Collect JVM heap, thread pool, JDBC pool and JMS runtime metrics from a running server. metric_type narrows the categories."
    )]
    async fn server_metrics(&self, param: Parameters<ServerMetricsRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.server_metrics(&param.0).await;
        self.finish("wlst_server_metrics", &param.0, result)
    }

    #[tool(
        name = "wlst_thread_dump",
        annotations(title = "Thread Dump", read_only_hint = true, idempotent_hint = false, open_world_hint = true),
        description = "Capture a full JVM thread dump from a running server. Useful for stuck or hogging threads."
    )]
    async fn thread_dump(&self, param: Parameters<ThreadDumpRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.thread_dump(&param.0).await;
        self.finish("wlst_thread_dump", &param.0, result)
    }

    #[tool(
        name = "wlst_list_datasources",
        annotations(title = "List JDBC Datasources", read_only_hint = true, idempotent_hint = true, open_world_hint = true),
        description = "List JDBC system resources with URL, driver and targets."
    )]
    async fn list_datasources(&self, param: Parameters<ListRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.list_datasources(&param.0).await;
        self.finish("wlst_list_datasources", &param.0, result)
    }

    #[tool(
        name = "wlst_create_datasource",
        annotations(
            title = "Create JDBC Datasource",
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = true
        ),
        description = "Create and target a generic JDBC datasource in one edit session. The session is cancelled when any step fails."
    )]
    async fn create_datasource(&self, param: Parameters<CreateDatasourceRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.create_datasource(&param.0).await;
        self.finish("wlst_create_datasource", &param.0, result)
    }

    #[tool(
        name = "wlst_list_jms_resources",
        annotations(title = "List JMS Resources", read_only_hint = true, idempotent_hint = true, open_world_hint = true),
        description = "List JMS servers with their targets and JMS modules with their queues and topics."
    )]
    async fn list_jms_resources(&self, param: Parameters<ListRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.list_jms_resources(&param.0).await;
        self.finish("wlst_list_jms_resources", &param.0, result)
    }

    #[tool(
        name = "wlst_execute_script",
        annotations(
            title = "Execute WLST Script",
            read_only_hint = false,
            destructive_hint = true,
            idempotent_hint = false,
            open_world_hint = true
        ),
        description = "Run arbitrary WLST (Jython) code. Runs connected when credentials resolve, otherwise offline. The script is not sandboxed and can change anything WLST can."
    )]
    async fn execute_script(&self, param: Parameters<ExecuteScriptRequest>) -> Result<CallToolResult, ErrorData> {
        let result = self.services.execute_script(&param.0).await;
        self.finish("wlst_execute_script", &param.0, result)
    }

    fn finish<R: Serialize>(&self, tool_name: &str, request: &R, result: Result<ToolOutput, WlstError>) -> Result<CallToolResult, ErrorData> {
        let request_value = serde_json::to_value(request).ok();
        match result {
            Ok(output) => {
                let response = output.into_call_result();
                self.emit_log(tool_name, request_value, Some(serde_json::to_value(&response).unwrap_or(Value::Null)));
                Ok(response)
            }
            Err(error) => {
                warn!(
                    tool = tool_name,
                    code = error.code(),
                    error = %wlst_util::redact_sensitive(&error.to_string()),
                    "WLST tool call failed"
                );
                self.emit_log(tool_name, request_value, None);
                Err(tool_error(tool_name, &error))
            }
        }
    }

    fn emit_log(&self, tool_name: &str, request: Option<Value>, response: Option<Value>) {
        let Some(payload) = build_log_payload(request, response) else {
            return;
        };
        debug!(tool = tool_name, %payload, "MCP tool call");
    }
}

#[tool_handler]
impl ServerHandler for WlstMcpCore {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: "wlst-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("WebLogic WLST MCP".to_string()),
                ..Default::default()
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        }
    }
}

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use wlst_mcp::response::ToolOutput;
use wlst_mcp::server::schemas::{ExecuteScriptRequest, ListRequest, ShutdownServerRequest, StartServerRequest};
use wlst_mcp::{RawOutput, WlstEnvironment, WlstError, WlstRunner, WlstToolServices};
use wlst_types::ResponseFormat;

/// Records every script it receives and replies with canned output, or
/// times out when no output is configured.
struct FakeRunner {
    reply: Option<RawOutput>,
    scripts: Mutex<Vec<(String, Duration)>>,
}

impl FakeRunner {
    fn replying(exit_code: i32, stdout: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(RawOutput {
                exit_code: Some(exit_code),
                stdout: stdout.to_string(),
                ..RawOutput::default()
            }),
            scripts: Mutex::new(Vec::new()),
        })
    }

    fn timing_out() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            scripts: Mutex::new(Vec::new()),
        })
    }

    fn scripts(&self) -> Vec<(String, Duration)> {
        self.scripts.lock().unwrap().clone()
    }
}

#[async_trait]
impl WlstRunner for FakeRunner {
    async fn run(&self, script: &str, timeout: Duration) -> Result<RawOutput, WlstError> {
        self.scripts.lock().unwrap().push((script.to_string(), timeout));
        self.reply.clone().ok_or_else(|| WlstError::timeout(timeout.as_secs()))
    }
}

fn configured_environment() -> WlstEnvironment {
    WlstEnvironment {
        admin_url: Some("t3://env-host:7001".to_string()),
        username: Some("weblogic".to_string()),
        password: Some("welcome1".to_string()),
        timeout_secs: 120,
        ..WlstEnvironment::default()
    }
}

fn json_list() -> ListRequest {
    ListRequest {
        response_format: Some(ResponseFormat::Json),
        ..ListRequest::default()
    }
}

const TWO_SERVERS: &str = "Initializing WebLogic Scripting Tool (WLST) ...\n\
Connecting to t3://env-host:7001 with userid weblogic ...\n\
SERVER_STATUS:{\"name\": \"AdminServer\", \"state\": \"RUNNING\"}\n\
SERVER_STATUS:{\"name\": \"ManagedServer1\", \"state\": \"SHUTDOWN\"}\n\
SERVERS_DONE\n\
Disconnected from weblogic server: AdminServer\n";

#[tokio::test]
async fn list_servers_json_keeps_entries_in_order() {
    let runner = FakeRunner::replying(0, TWO_SERVERS);
    let services = WlstToolServices::new(configured_environment(), runner.clone());

    let ToolOutput::Json(value) = services.list_servers(&json_list()).await.unwrap() else {
        panic!("expected json output");
    };
    let servers = value["servers"].as_array().expect("servers array");
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0]["name"], "AdminServer");
    assert_eq!(servers[0]["state"], "RUNNING");
    assert_eq!(servers[1]["name"], "ManagedServer1");
    assert_eq!(servers[1]["state"], "SHUTDOWN");
    assert_eq!(value["total"], 2);
}

#[tokio::test]
async fn explicit_connection_overrides_environment() {
    let runner = FakeRunner::replying(0, TWO_SERVERS);
    let services = WlstToolServices::new(configured_environment(), runner.clone());
    let request = ListRequest {
        admin_url: Some("t3s://explicit-host:7002".to_string()),
        ..json_list()
    };

    services.list_servers(&request).await.unwrap();
    let (script, timeout) = runner.scripts().remove(0);
    assert!(script.contains("connect('weblogic', 'welcome1', 't3s://explicit-host:7002')"));
    assert!(!script.contains("env-host"));
    assert_eq!(timeout, Duration::from_secs(120));
}

#[tokio::test]
async fn missing_configuration_fails_before_spawning() {
    let runner = FakeRunner::replying(0, TWO_SERVERS);
    let environment = WlstEnvironment {
        username: None,
        ..configured_environment()
    };
    let services = WlstToolServices::new(environment, runner.clone());

    let error = services.list_servers(&json_list()).await.unwrap_err();
    assert!(matches!(error, WlstError::MissingConfiguration { field: "username", env_var: "WLST_USERNAME" }));
    assert!(runner.scripts().is_empty());
}

#[tokio::test]
async fn identical_calls_generate_identical_scripts() {
    let runner = FakeRunner::replying(0, "SERVER_STOPPED: ms1\n");
    let services = WlstToolServices::new(configured_environment(), runner.clone());
    let request = ShutdownServerRequest {
        server_name: "ms1".to_string(),
        force: Some(true),
        ..ShutdownServerRequest::default()
    };

    services.stop_server(&request).await.unwrap();
    services.stop_server(&request).await.unwrap();
    let scripts = runner.scripts();
    assert_eq!(scripts.len(), 2);
    assert_eq!(scripts[0].0, scripts[1].0);
}

#[tokio::test]
async fn runner_timeout_is_reported_without_partial_result() {
    let runner = FakeRunner::timing_out();
    let services = WlstToolServices::new(configured_environment(), runner.clone());
    let request = StartServerRequest {
        server_name: "ms1".to_string(),
        timeout: Some(30),
        ..StartServerRequest::default()
    };

    let error = services.start_server(&request).await.unwrap_err();
    assert!(matches!(error, WlstError::Timeout { timeout_secs: 30 }));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn error_marker_becomes_tool_reported_error() {
    let runner = FakeRunner::replying(0, "START_ERROR: Server ms9 does not exist in the domain\n");
    let services = WlstToolServices::new(configured_environment(), runner);
    let request = StartServerRequest {
        server_name: "ms9".to_string(),
        ..StartServerRequest::default()
    };

    let error = services.start_server(&request).await.unwrap_err();
    assert!(matches!(
        error,
        WlstError::ToolReported { ref operation, ref message }
            if operation == "start-server" && message.contains("does not exist")
    ));
}

#[tokio::test]
async fn connection_failure_output_hides_password() {
    let runner = FakeRunner::replying(1, "CONNECTION_ERROR: bad credentials weblogic/welcome1\n");
    let services = WlstToolServices::new(configured_environment(), runner);

    let error = services.list_servers(&json_list()).await.unwrap_err();
    let WlstError::ToolReported { operation, message } = error else {
        panic!("expected tool-reported error");
    };
    assert_eq!(operation, "connect");
    assert!(!message.contains("welcome1"));
}

#[tokio::test]
async fn markdown_rendering_is_stable_across_calls() {
    let runner = FakeRunner::replying(0, TWO_SERVERS);
    let services = WlstToolServices::new(configured_environment(), runner);
    let request = ListRequest::default();

    let first = services.list_servers(&request).await.unwrap();
    let second = services.list_servers(&request).await.unwrap();
    assert_eq!(first, second);
    let ToolOutput::Markdown(text) = first else {
        panic!("expected markdown output");
    };
    assert!(text.contains("AdminServer"));
    assert!(text.contains("ManagedServer1"));
}

#[tokio::test]
async fn failing_script_surfaces_exit_status_and_output() {
    let runner = FakeRunner::replying(2, "Traceback (innermost last):\nNameError: cmoo\n");
    let services = WlstToolServices::new(configured_environment(), runner);
    let request = ExecuteScriptRequest {
        script: "print(cmoo)".to_string(),
        timeout: Some(1800),
        ..ExecuteScriptRequest::default()
    };

    let error = services.execute_script(&request).await.unwrap_err();
    assert!(matches!(
        error,
        WlstError::NonZeroExit { exit_code: Some(2), ref diagnostic, .. } if diagnostic.contains("NameError")
    ));
}

#[tokio::test]
async fn script_timeout_above_limit_is_rejected() {
    let runner = FakeRunner::replying(0, "");
    let services = WlstToolServices::new(configured_environment(), runner.clone());
    let request = ExecuteScriptRequest {
        script: "ls()".to_string(),
        timeout: Some(1801),
        ..ExecuteScriptRequest::default()
    };

    let error = services.execute_script(&request).await.unwrap_err();
    assert!(matches!(error, WlstError::InvalidParameter { ref field, .. } if field == "timeout"));
    assert!(runner.scripts().is_empty());
}

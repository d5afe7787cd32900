//! Structured MCP error payloads for WLST failures.

use chrono::Utc;
use rmcp::model::ErrorData;
use serde_json::{Value, json};

use crate::types::WlstError;

const OUTPUT_TAIL_LINES: usize = 20;

fn build_error_data(error_code: &str, category: &str, message: &str, context: Value, retryable: bool, suggested_action: &str) -> Value {
    json!({
        "error_code": error_code,
        "category": category,
        "message": message,
        "context": context,
        "retryable": retryable,
        "suggested_action": suggested_action,
        "correlation_id": format!("wlst-{}", Utc::now().timestamp_millis()),
    })
}

fn category(error: &WlstError) -> &'static str {
    match error {
        WlstError::MissingConfiguration { .. } => "configuration",
        WlstError::InvalidParameter { .. } => "validation",
        WlstError::Timeout { .. } => "timeout",
        WlstError::NonZeroExit { .. } | WlstError::Spawn { .. } => "execution",
        WlstError::ToolReported { .. } => "weblogic",
        WlstError::UnexpectedOutput { .. } => "output",
        WlstError::Io(_) => "internal",
    }
}

fn suggested_action(error: &WlstError) -> String {
    match error {
        WlstError::MissingConfiguration { field, env_var } => {
            format!("Pass `{field}` in the tool arguments or set {env_var} for the server process.")
        }
        WlstError::InvalidParameter { field, .. } => format!("Correct `{field}` and call the tool again."),
        WlstError::Timeout { .. } => "Retry with a larger `timeout`, or check that the admin server is reachable.".to_string(),
        WlstError::NonZeroExit { .. } => "Inspect the WLST output in the error context; check WLST_PATH and WEBLOGIC_HOME.".to_string(),
        WlstError::ToolReported { operation, .. } if operation == "connect" => {
            "Verify admin_url, username and password, and that the admin server is running.".to_string()
        }
        WlstError::ToolReported { .. } => "Review the WebLogic message and the target's current state before retrying.".to_string(),
        WlstError::UnexpectedOutput { .. } => "Run wlst_execute_script to inspect the raw WLST output.".to_string(),
        WlstError::Spawn { .. } => "Set WLST_PATH or WEBLOGIC_HOME so the WLST launcher can be found.".to_string(),
        WlstError::Io(_) => "Check that the server can write temporary files.".to_string(),
    }
}

fn context(tool: &str, error: &WlstError) -> Value {
    let mut context = json!({ "tool": tool });
    match error {
        WlstError::MissingConfiguration { field, env_var } => {
            context["field"] = json!(field);
            context["env_var"] = json!(env_var);
        }
        WlstError::InvalidParameter { field, .. } => {
            context["field"] = json!(field);
        }
        WlstError::Timeout { timeout_secs } => {
            context["timeout_secs"] = json!(timeout_secs);
        }
        WlstError::NonZeroExit {
            exit_code, stdout, stderr, ..
        } => {
            context["exit_code"] = json!(exit_code);
            context["stdout_tail"] = json!(wlst_util::tail_lines(&wlst_util::redact_sensitive(stdout), OUTPUT_TAIL_LINES));
            context["stderr_tail"] = json!(wlst_util::tail_lines(&wlst_util::redact_sensitive(stderr), OUTPUT_TAIL_LINES));
        }
        WlstError::ToolReported { operation, .. } | WlstError::UnexpectedOutput { operation, .. } => {
            context["operation"] = json!(operation);
        }
        WlstError::Spawn { program, .. } => {
            context["program"] = json!(program);
        }
        WlstError::Io(_) => {}
    }
    context
}

/// Convert a failed tool call into MCP error data.
///
/// Caller mistakes become `invalid_params`; everything that went wrong after
/// validation becomes `internal_error`.
pub(crate) fn tool_error(tool: &str, error: &WlstError) -> ErrorData {
    let message = wlst_util::redact_sensitive(&error.to_string());
    let data = build_error_data(
        error.code(),
        category(error),
        &message,
        context(tool, error),
        error.is_retryable(),
        &suggested_action(error),
    );
    if error.is_caller_error() {
        ErrorData::invalid_params(message, Some(data))
    } else {
        ErrorData::internal_error(message, Some(data))
    }
}

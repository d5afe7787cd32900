//! Deciding whether a finished run succeeded.

use tracing::debug;

use super::parser::{has_marker, marker_message};
use crate::runner::RawOutput;
use crate::script::markers::{CONNECTION_ERROR, OperationMarkers};
use crate::types::WlstError;

/// Classify a run, checking in order: connection failure, the operation's
/// error marker, the exit status, then the success or completion marker.
///
/// Custom scripts pass `None` and are judged on connection and exit status
/// only.
pub fn interpret(output: &RawOutput, operation: &str, markers: Option<OperationMarkers>) -> Result<(), WlstError> {
    if let Some(message) = marker_message(&output.stdout, CONNECTION_ERROR) {
        let message = if message.is_empty() {
            "connection failed; check credentials and URL".to_string()
        } else {
            message
        };
        return Err(WlstError::tool_reported("connect", message));
    }

    if let Some(error_marker) = markers.and_then(|markers| markers.error) {
        if let Some(message) = marker_message(&output.stdout, error_marker) {
            return Err(WlstError::tool_reported(operation, message));
        }
    }

    if !output.succeeded() {
        return Err(WlstError::non_zero_exit(output.exit_code, output.stdout.clone(), output.stderr.clone()));
    }

    if let Some(markers) = markers {
        if !has_marker(&output.stdout, markers.success) {
            debug!(operation, marker = markers.success, "Success marker missing from WLST output");
            return Err(WlstError::unexpected_output(
                operation,
                format!("WLST finished without printing {}", markers.success),
            ));
        }
    }

    Ok(())
}

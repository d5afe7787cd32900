//! Error types for WLST tool calls.

use thiserror::Error;

/// Main error type for a single WLST tool call.
///
/// The first two variants describe problems with the caller's input and are
/// detected before any interpreter process is spawned.
#[derive(Debug, Error)]
pub enum WlstError {
    #[error("Missing required configuration: `{field}` was not provided and {env_var} is not set")]
    MissingConfiguration { field: &'static str, env_var: &'static str },

    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("WLST did not finish within {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    #[error("WLST exited with {}: {diagnostic}", describe_exit(.exit_code))]
    NonZeroExit {
        exit_code: Option<i32>,
        diagnostic: String,
        stdout: String,
        stderr: String,
    },

    #[error("{operation} failed: {message}")]
    ToolReported { operation: String, message: String },

    #[error("Unexpected output from {operation}: {reason}")]
    UnexpectedOutput { operation: String, reason: String },

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const DIAGNOSTIC_TAIL_LINES: usize = 20;

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl WlstError {
    /// Create a missing configuration error.
    pub fn missing_configuration(field: &'static str, env_var: &'static str) -> Self {
        Self::MissingConfiguration { field, env_var }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Create a non-zero exit error.
    ///
    /// The diagnostic is stderr when WLST wrote any, otherwise the tail of
    /// stdout, since WLST reports most failures on stdout.
    pub fn non_zero_exit(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        let stdout = stdout.into();
        let stderr = stderr.into();
        let diagnostic = if stderr.trim().is_empty() {
            wlst_util::tail_lines(&stdout, DIAGNOSTIC_TAIL_LINES)
        } else {
            stderr.trim().to_string()
        };
        Self::NonZeroExit {
            exit_code,
            diagnostic,
            stdout,
            stderr,
        }
    }

    /// Create an error for a failure WLST reported through an error marker.
    pub fn tool_reported(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolReported {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected output error.
    pub fn unexpected_output(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnexpectedOutput {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a spawn failure error.
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Replace every occurrence of `secret` in the WLST-provided text of the
    /// error.
    pub fn mask(self, secret: &str) -> Self {
        let mask = |text: String| wlst_util::mask_literal(&text, secret, "[REDACTED]");
        match self {
            Self::NonZeroExit {
                exit_code,
                diagnostic,
                stdout,
                stderr,
            } => Self::NonZeroExit {
                exit_code,
                diagnostic: mask(diagnostic),
                stdout: mask(stdout),
                stderr: mask(stderr),
            },
            Self::ToolReported { operation, message } => Self::ToolReported {
                operation,
                message: mask(message),
            },
            Self::UnexpectedOutput { operation, reason } => Self::UnexpectedOutput {
                operation,
                reason: mask(reason),
            },
            other => other,
        }
    }

    /// Returns true when the error was caused by the caller's input or the
    /// server configuration rather than by WLST or WebLogic.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::MissingConfiguration { .. } | Self::InvalidParameter { .. })
    }

    /// Returns true when repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingConfiguration { .. } => "WLST_MISSING_CONFIGURATION",
            Self::InvalidParameter { .. } => "WLST_INVALID_PARAMETER",
            Self::Timeout { .. } => "WLST_TIMEOUT",
            Self::NonZeroExit { .. } => "WLST_NONZERO_EXIT",
            Self::ToolReported { .. } => "WLST_TOOL_ERROR",
            Self::UnexpectedOutput { .. } => "WLST_UNEXPECTED_OUTPUT",
            Self::Spawn { .. } => "WLST_SPAWN_FAILED",
            Self::Io(_) => "WLST_IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let missing = WlstError::missing_configuration("admin_url", "WLST_ADMIN_URL");
        assert!(matches!(missing, WlstError::MissingConfiguration { field: "admin_url", .. }));
        assert!(missing.is_caller_error());
        assert!(missing.to_string().contains("WLST_ADMIN_URL"));

        let timeout = WlstError::timeout(30);
        assert!(matches!(timeout, WlstError::Timeout { timeout_secs: 30 }));
        assert!(timeout.is_retryable());
        assert!(!timeout.is_caller_error());

        let reported = WlstError::tool_reported("start-server", "Server ms1 not found");
        assert_eq!(reported.to_string(), "start-server failed: Server ms1 not found");
    }

    #[test]
    fn non_zero_exit_prefers_stderr() {
        let error = WlstError::non_zero_exit(Some(1), "line one\nline two", "java.lang.NoClassDefFoundError\n");
        let WlstError::NonZeroExit { diagnostic, .. } = &error else {
            panic!("expected non-zero exit");
        };
        assert_eq!(diagnostic, "java.lang.NoClassDefFoundError");
        assert_eq!(error.to_string(), "WLST exited with status 1: java.lang.NoClassDefFoundError");
    }

    #[test]
    fn mask_hides_secret_in_reported_text() {
        let error = WlstError::non_zero_exit(Some(1), "user weblogic/welcome1", "").mask("welcome1");
        assert!(!error.to_string().contains("welcome1"));
        let WlstError::NonZeroExit { stdout, .. } = &error else {
            panic!("expected non-zero exit");
        };
        assert_eq!(stdout, "user weblogic/[REDACTED]");

        let timeout = WlstError::timeout(30).mask("30");
        assert!(matches!(timeout, WlstError::Timeout { timeout_secs: 30 }));
    }

    #[test]
    fn non_zero_exit_falls_back_to_stdout_tail() {
        let stdout: String = (1..=30).map(|n| format!("line {n}\n")).collect();
        let error = WlstError::non_zero_exit(None, stdout, "  ");
        let WlstError::NonZeroExit { diagnostic, .. } = &error else {
            panic!("expected non-zero exit");
        };
        assert!(diagnostic.starts_with("line 11"));
        assert!(diagnostic.ends_with("line 30"));
        assert!(error.to_string().contains("terminated by signal"));
    }
}

//! Running generated scripts through the WLST interpreter.

mod process;

use std::time::Duration;

use async_trait::async_trait;

use crate::types::WlstError;

pub use process::{DEFAULT_WLST_PROPERTIES, ENV_WLST_PROPERTIES, ProcessRunner};

/// Captured result of one interpreter run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl RawOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Replace every occurrence of `secret` in both streams.
    pub fn mask(mut self, secret: &str) -> Self {
        self.stdout = wlst_util::mask_literal(&self.stdout, secret, "[REDACTED]");
        self.stderr = wlst_util::mask_literal(&self.stderr, secret, "[REDACTED]");
        self
    }
}

/// Executes a script and captures its output.
///
/// Implementations must not return a partial result when the timeout
/// elapses; they return [`WlstError::Timeout`] instead.
#[async_trait]
pub trait WlstRunner: Send + Sync {
    async fn run(&self, script: &str, timeout: Duration) -> Result<RawOutput, WlstError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_replaces_secret_in_both_streams() {
        let output = RawOutput {
            exit_code: Some(1),
            stdout: "connecting as weblogic/welcome1".to_string(),
            stderr: "bad password welcome1".to_string(),
            elapsed: Duration::from_millis(5),
        }
        .mask("welcome1");
        assert!(!output.stdout.contains("welcome1"));
        assert!(!output.stderr.contains("welcome1"));
        assert!(!output.succeeded());
    }
}

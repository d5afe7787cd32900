//! Subprocess-backed runner.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{RawOutput, WlstRunner};
use crate::types::WlstError;

pub const ENV_WLST_PROPERTIES: &str = "WLST_PROPERTIES";
pub const DEFAULT_WLST_PROPERTIES: &str = "-Dweblogic.security.SSL.ignoreHostnameVerification=true";

/// Runs each script as `<program> <script-file>`.
///
/// The script is written to a `.py` temporary file that is removed when the
/// call returns. On unix the interpreter leads its own process group, and a
/// timeout kills the whole group: `wlst.sh` forks the JVM rather than
/// exec-ing it, so killing the launcher alone would leave the JVM running.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: PathBuf,
    wlst_properties: String,
}

impl ProcessRunner {
    /// Create a runner for `program`, keeping any `WLST_PROPERTIES` already
    /// set in the process environment.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let wlst_properties = std::env::var(ENV_WLST_PROPERTIES)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WLST_PROPERTIES.to_string());
        Self {
            program: program.into(),
            wlst_properties,
        }
    }

    /// Override the `WLST_PROPERTIES` passed to the interpreter.
    pub fn with_wlst_properties(mut self, properties: impl Into<String>) -> Self {
        self.wlst_properties = properties.into();
        self
    }

    fn write_script(script: &str) -> Result<NamedTempFile, WlstError> {
        let mut file = tempfile::Builder::new().prefix("wlst-").suffix(".py").tempfile()?;
        file.write_all(script.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

#[async_trait]
impl WlstRunner for ProcessRunner {
    async fn run(&self, script: &str, timeout: Duration) -> Result<RawOutput, WlstError> {
        let script_file = Self::write_script(script)?;
        let program = self.program.display().to_string();

        let mut command = Command::new(&self.program);
        command
            .arg(script_file.path())
            .env(ENV_WLST_PROPERTIES, &self.wlst_properties)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let started = Instant::now();
        let child = command.spawn().map_err(|source| WlstError::spawn(program.clone(), source))?;
        let pid = child.id();
        info!(program = %program, pid = ?pid, timeout_secs = timeout.as_secs(), "Started WLST");

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(program = %program, timeout_secs = timeout.as_secs(), "WLST timed out; killing process group");
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                return Err(WlstError::timeout(timeout.as_secs()));
            }
        };

        let raw = RawOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed: started.elapsed(),
        };
        info!(
            program = %program,
            exit_code = ?raw.exit_code,
            elapsed_ms = raw.elapsed.as_millis() as u64,
            stdout_bytes = raw.stdout.len(),
            stderr_bytes = raw.stderr.len(),
            "WLST finished"
        );
        debug!(script_path = %script_file.path().display(), "Removing script file");
        Ok(raw)
    }
}

/// SIGKILL every process in the group led by `pid`. An already empty group is
/// not an error.
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return;
    };
    match killpg(Pid::from_raw(raw), Signal::SIGKILL) {
        Ok(()) | Err(Errno::ESRCH) => {}
        Err(error) => warn!(pid, %error, "Failed to kill WLST process group"),
    }
}

// Dropping the child future already kills the direct child.
#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

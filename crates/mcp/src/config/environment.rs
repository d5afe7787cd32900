//! Process-wide WLST defaults captured once at startup.

use std::fmt;
use std::path::PathBuf;

use crate::types::WlstError;

pub const ENV_ADMIN_URL: &str = "WLST_ADMIN_URL";
pub const ENV_USERNAME: &str = "WLST_USERNAME";
pub const ENV_PASSWORD: &str = "WLST_PASSWORD";
pub const ENV_TIMEOUT: &str = "WLST_TIMEOUT";
pub const ENV_WLST_PATH: &str = "WLST_PATH";
pub const ENV_WEBLOGIC_HOME: &str = "WEBLOGIC_HOME";

/// Default subprocess timeout when `WLST_TIMEOUT` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[cfg(windows)]
const WLST_EXECUTABLE: &str = "wlst.cmd";
#[cfg(not(windows))]
const WLST_EXECUTABLE: &str = "wlst.sh";

/// Immutable snapshot of the environment defaults used by every tool call.
///
/// Empty or whitespace-only values are treated as absent.
#[derive(Clone, PartialEq, Eq)]
pub struct WlstEnvironment {
    pub admin_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_secs: u64,
    pub wlst_path: Option<String>,
    pub weblogic_home: Option<PathBuf>,
}

impl Default for WlstEnvironment {
    fn default() -> Self {
        Self {
            admin_url: None,
            username: None,
            password: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            wlst_path: None,
            weblogic_home: None,
        }
    }
}

impl fmt::Debug for WlstEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WlstEnvironment")
            .field("admin_url", &self.admin_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("wlst_path", &self.wlst_path)
            .field("weblogic_home", &self.weblogic_home)
            .finish()
    }
}

impl WlstEnvironment {
    /// Capture the defaults from the current process environment.
    pub fn from_env() -> Result<Self, WlstError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the snapshot from an arbitrary key lookup.
    ///
    /// # Errors
    /// Returns [`WlstError::InvalidParameter`] when `WLST_TIMEOUT` is present
    /// but is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WlstError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        let timeout_secs = match read(ENV_TIMEOUT) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            admin_url: read(ENV_ADMIN_URL),
            username: read(ENV_USERNAME),
            password: read(ENV_PASSWORD),
            timeout_secs,
            wlst_path: read(ENV_WLST_PATH),
            weblogic_home: read(ENV_WEBLOGIC_HOME).map(PathBuf::from),
        })
    }

    /// Resolve the WLST launcher.
    ///
    /// `WEBLOGIC_HOME` wins over `WLST_PATH`; with neither set the bare
    /// launcher name is left to `PATH` lookup.
    pub fn wlst_executable(&self) -> PathBuf {
        if let Some(home) = &self.weblogic_home {
            return home.join("oracle_common").join("common").join("bin").join(WLST_EXECUTABLE);
        }
        match &self.wlst_path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(WLST_EXECUTABLE),
        }
    }
}

fn parse_timeout(raw: &str) -> Result<u64, WlstError> {
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(WlstError::invalid_parameter(
            ENV_TIMEOUT,
            format!("expected a positive number of seconds, got '{raw}'"),
        )),
        Ok(seconds) => Ok(seconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let env = WlstEnvironment::from_lookup(|_| None).unwrap();
        assert_eq!(env, WlstEnvironment::default());
        assert_eq!(env.timeout_secs, 120);
        assert_eq!(env.wlst_executable(), PathBuf::from(WLST_EXECUTABLE));
    }

    #[test]
    fn empty_values_count_as_absent() {
        let env = WlstEnvironment::from_lookup(lookup_from(&[(ENV_ADMIN_URL, "   "), (ENV_USERNAME, ""), (ENV_TIMEOUT, "")])).unwrap();
        assert!(env.admin_url.is_none());
        assert!(env.username.is_none());
        assert_eq!(env.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn rejects_unparsable_timeout() {
        let result = WlstEnvironment::from_lookup(lookup_from(&[(ENV_TIMEOUT, "soon")]));
        assert!(matches!(result, Err(WlstError::InvalidParameter { ref field, .. }) if field == ENV_TIMEOUT));

        let zero = WlstEnvironment::from_lookup(lookup_from(&[(ENV_TIMEOUT, "0")]));
        assert!(zero.is_err());
    }

    #[test]
    fn weblogic_home_takes_precedence_over_wlst_path() {
        let env = WlstEnvironment::from_lookup(lookup_from(&[
            (ENV_WEBLOGIC_HOME, "/u01/oracle"),
            (ENV_WLST_PATH, "/opt/custom/wlst.sh"),
        ]))
        .unwrap();
        let expected = Path::new("/u01/oracle")
            .join("oracle_common")
            .join("common")
            .join("bin")
            .join(WLST_EXECUTABLE);
        assert_eq!(env.wlst_executable(), expected);
    }

    #[test]
    fn wlst_path_used_without_weblogic_home() {
        let env = WlstEnvironment::from_lookup(lookup_from(&[(ENV_WLST_PATH, "/opt/custom/wlst.sh")])).unwrap();
        assert_eq!(env.wlst_executable(), PathBuf::from("/opt/custom/wlst.sh"));
    }

    #[test]
    fn debug_output_hides_password() {
        let env = WlstEnvironment::from_lookup(lookup_from(&[(ENV_PASSWORD, "welcome1")])).unwrap();
        let rendered = format!("{env:?}");
        assert!(!rendered.contains("welcome1"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn from_env_reads_process_environment() {
        temp_env::with_vars(
            [
                (ENV_ADMIN_URL, Some("t3://env-host:7001")),
                (ENV_USERNAME, Some("weblogic")),
                (ENV_TIMEOUT, Some("300")),
                (ENV_WEBLOGIC_HOME, None),
                (ENV_WLST_PATH, None),
            ],
            || {
                let env = WlstEnvironment::from_env().expect("environment should parse");
                assert_eq!(env.admin_url.as_deref(), Some("t3://env-host:7001"));
                assert_eq!(env.username.as_deref(), Some("weblogic"));
                assert_eq!(env.timeout_secs, 300);
            },
        );
    }
}

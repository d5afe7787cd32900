//! Per-call connection resolution.

use std::fmt;
use std::time::Duration;

use super::environment::{ENV_ADMIN_URL, ENV_PASSWORD, ENV_USERNAME, WlstEnvironment};
use super::validation::{trimmed, validate_admin_url, validate_username};
use crate::types::WlstError;

/// Connection values supplied explicitly by a tool caller.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionOverrides {
    pub admin_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Option<u64>,
}

impl fmt::Debug for ConnectionOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOverrides")
            .field("admin_url", &self.admin_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Fully resolved connection for one tool call. Never cached.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParameters {
    pub admin_url: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("admin_url", &self.admin_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Timeout bounds and default for one kind of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub min_secs: u64,
    pub max_secs: u64,
    pub default_secs: u64,
}

impl TimeoutPolicy {
    pub const MIN_SECS: u64 = 10;
    pub const STANDARD_MAX_SECS: u64 = 600;
    pub const SCRIPT_MAX_SECS: u64 = 1800;

    /// Bounds for ordinary operations, defaulting to the environment timeout.
    pub fn standard(env: &WlstEnvironment) -> Self {
        Self {
            min_secs: Self::MIN_SECS,
            max_secs: Self::STANDARD_MAX_SECS,
            default_secs: env.timeout_secs,
        }
    }

    /// Deployments get twice the environment default.
    pub fn deployment(env: &WlstEnvironment) -> Self {
        Self {
            default_secs: env.timeout_secs.saturating_mul(2),
            ..Self::standard(env)
        }
    }

    /// Custom scripts may run for up to thirty minutes.
    pub fn script(env: &WlstEnvironment) -> Self {
        Self {
            max_secs: Self::SCRIPT_MAX_SECS,
            ..Self::standard(env)
        }
    }

    /// Validate an explicit timeout or fall back to the default.
    pub fn resolve(&self, explicit: Option<u64>) -> Result<Duration, WlstError> {
        match explicit {
            Some(secs) if (self.min_secs..=self.max_secs).contains(&secs) => Ok(Duration::from_secs(secs)),
            Some(_) => Err(WlstError::invalid_parameter(
                "timeout",
                format!("must be between {} and {} seconds", self.min_secs, self.max_secs),
            )),
            None => Ok(Duration::from_secs(self.default_secs)),
        }
    }
}

/// Resolve the connection for a managed operation.
///
/// Each credential comes from the explicit override when present, otherwise
/// from the environment snapshot; a value missing from both is a
/// configuration error. The admin URL is validated whichever source
/// supplied it.
pub fn resolve_connection(
    overrides: &ConnectionOverrides,
    env: &WlstEnvironment,
    policy: TimeoutPolicy,
) -> Result<ConnectionParameters, WlstError> {
    let admin_url = pick(overrides.admin_url.as_deref(), env.admin_url.as_deref())
        .ok_or_else(|| WlstError::missing_configuration("admin_url", ENV_ADMIN_URL))?;
    let username = pick(overrides.username.as_deref(), env.username.as_deref())
        .ok_or_else(|| WlstError::missing_configuration("username", ENV_USERNAME))?;
    let password = pick(overrides.password.as_deref(), env.password.as_deref())
        .ok_or_else(|| WlstError::missing_configuration("password", ENV_PASSWORD))?;

    Ok(ConnectionParameters {
        admin_url: validate_admin_url(&admin_url)?,
        username: validate_username(&username)?,
        password,
        timeout: policy.resolve(overrides.timeout)?,
    })
}

/// Resolve a connection when one is available, for offline-capable calls.
///
/// Returns `Ok(None)` when any credential is missing from both sources.
/// Values that are present are still validated.
pub fn resolve_optional_connection(
    overrides: &ConnectionOverrides,
    env: &WlstEnvironment,
    policy: TimeoutPolicy,
) -> Result<Option<ConnectionParameters>, WlstError> {
    match resolve_connection(overrides, env, policy) {
        Ok(connection) => Ok(Some(connection)),
        Err(WlstError::MissingConfiguration { .. }) => {
            policy.resolve(overrides.timeout)?;
            if let Some(url) = pick(overrides.admin_url.as_deref(), env.admin_url.as_deref()) {
                validate_admin_url(&url)?;
            }
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

fn pick(explicit: Option<&str>, fallback: Option<&str>) -> Option<String> {
    trimmed(explicit).or_else(|| trimmed(fallback))
}

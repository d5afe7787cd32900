//! Connection configuration for WLST tool calls.
//!
//! The environment snapshot is taken once at startup; every tool call then
//! resolves its own [`ConnectionParameters`] from explicit arguments and that
//! snapshot.

mod connection;
mod environment;
pub mod validation;

pub use connection::{ConnectionOverrides, ConnectionParameters, TimeoutPolicy, resolve_connection, resolve_optional_connection};
pub use environment::{
    DEFAULT_TIMEOUT_SECS, ENV_ADMIN_URL, ENV_PASSWORD, ENV_TIMEOUT, ENV_USERNAME, ENV_WEBLOGIC_HOME, ENV_WLST_PATH, WlstEnvironment,
};

//! Model Context Protocol (MCP) tool server for WebLogic administration.
//!
//! Every tool call resolves its connection, generates a WLST (Jython) script,
//! runs it in a fresh interpreter process and turns the marker lines the
//! script prints into markdown or structured JSON.

pub mod config;
pub mod response;
pub mod runner;
pub mod script;
pub mod server;
pub mod types;

pub use config::{ConnectionOverrides, ConnectionParameters, TimeoutPolicy, WlstEnvironment};
pub use runner::{ProcessRunner, RawOutput, WlstRunner};
pub use server::{McpHttpServer, RunningMcpHttpServer, WlstMcpCore, WlstToolServices, resolve_bind_address, serve_stdio};
pub use types::WlstError;

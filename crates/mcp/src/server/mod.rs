mod core;
mod errors;
mod http;
mod log_payload;
pub mod schemas;
mod services;

pub use core::WlstMcpCore;
pub use http::{DEFAULT_HTTP_BIND_ADDRESS, McpHttpServer, RunningMcpHttpServer, resolve_bind_address, serve_stdio};
pub use services::WlstToolServices;

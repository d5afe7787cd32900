//! MCP transport hosts: streamable HTTP and stdio.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use rmcp::ServiceExt;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::server::core::WlstMcpCore;
use crate::server::services::WlstToolServices;

/// Default address for the HTTP transport.
pub const DEFAULT_HTTP_BIND_ADDRESS: &str = "127.0.0.1:62890";

/// Host configuration for a local MCP HTTP server instance.
#[derive(Debug, Clone)]
pub struct McpHttpServer {
    bind_address: SocketAddr,
    services: Arc<WlstToolServices>,
}

impl McpHttpServer {
    /// Create a new MCP HTTP server bound to the provided address.
    pub fn new(bind_address: SocketAddr, services: Arc<WlstToolServices>) -> Self {
        Self { bind_address, services }
    }

    /// Start the server and return a handle for shutdown.
    pub async fn start(self) -> Result<RunningMcpHttpServer> {
        let cancellation_token = CancellationToken::new();
        let session_manager = Arc::new(LocalSessionManager::default());

        let services = Arc::clone(&self.services);
        let service: StreamableHttpService<WlstMcpCore, LocalSessionManager> = StreamableHttpService::new(
            move || Ok(WlstMcpCore::new(Arc::clone(&services))),
            session_manager,
            StreamableHttpServerConfig {
                stateful_mode: true,
                sse_keep_alive: None,
                cancellation_token: cancellation_token.child_token(),
                ..Default::default()
            },
        );

        let router = Router::new().nest_service("/mcp", service);
        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .with_context(|| format!("failed to bind MCP HTTP server to {}", self.bind_address))?;
        let bound_address = listener.local_addr()?;
        info!(address = %bound_address, "MCP HTTP server listening on /mcp");

        let server_handle = tokio::spawn({
            let shutdown = cancellation_token.child_token();
            async move {
                let _ = axum::serve(listener, router)
                    .with_graceful_shutdown(async move {
                        shutdown.cancelled().await;
                    })
                    .await;
            }
        });

        Ok(RunningMcpHttpServer {
            bind_address: bound_address,
            cancellation_token,
            server_handle,
        })
    }
}

/// Runtime handle for a running MCP HTTP server.
#[derive(Debug)]
pub struct RunningMcpHttpServer {
    bind_address: SocketAddr,
    cancellation_token: CancellationToken,
    server_handle: JoinHandle<()>,
}

impl RunningMcpHttpServer {
    /// Return the bound socket address for the running server.
    pub fn bound_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Stop the server and wait for in-flight requests to drain.
    pub async fn stop(self) -> Result<()> {
        self.cancellation_token.cancel();
        self.server_handle
            .await
            .map_err(|error| anyhow!("MCP HTTP server task failed: {error}"))?;
        info!(address = %self.bind_address, "MCP HTTP server stopped");
        Ok(())
    }
}

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio(services: Arc<WlstToolServices>) -> Result<()> {
    info!("Serving MCP over stdio");
    let running = WlstMcpCore::new(services)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to initialize stdio MCP session")?;
    running.waiting().await.context("stdio MCP session ended with an error")?;
    Ok(())
}

/// Resolve a safe local bind address for the MCP HTTP server.
pub fn resolve_bind_address(bind_address: Option<&str>) -> Result<SocketAddr> {
    let address = bind_address.unwrap_or(DEFAULT_HTTP_BIND_ADDRESS);
    let parsed: SocketAddr = address
        .parse()
        .map_err(|error| anyhow!("invalid MCP HTTP bind address '{address}': {error}"))?;
    if !is_loopback(parsed.ip()) {
        return Err(anyhow!("MCP HTTP server must bind to a loopback address"));
    }
    Ok(parsed)
}

fn is_loopback(address: IpAddr) -> bool {
    match address {
        IpAddr::V4(ip) => ip.is_loopback(),
        IpAddr::V6(ip) => ip.is_loopback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WlstEnvironment;

    #[test]
    fn bind_address_defaults_to_loopback_port() {
        let address = resolve_bind_address(None).unwrap();
        assert!(address.ip().is_loopback());
        assert_eq!(address.port(), 62890);
    }

    #[test]
    fn non_loopback_addresses_are_rejected() {
        assert!(resolve_bind_address(Some("0.0.0.0:8080")).is_err());
        assert!(resolve_bind_address(Some("not an address")).is_err());
        assert!(resolve_bind_address(Some("[::1]:9000")).is_ok());
    }

    #[tokio::test]
    async fn http_server_starts_and_stops() {
        let services = Arc::new(WlstToolServices::with_process_runner(WlstEnvironment::default()));
        let address = resolve_bind_address(Some("127.0.0.1:0")).unwrap();
        let running = McpHttpServer::new(address, services).start().await.unwrap();
        assert_ne!(running.bound_address().port(), 0);
        running.stop().await.unwrap();
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use wlst_mcp::config::{ENV_ADMIN_URL, ENV_PASSWORD, ENV_TIMEOUT, ENV_USERNAME, ENV_WEBLOGIC_HOME, ENV_WLST_PATH};
use wlst_mcp::server::DEFAULT_HTTP_BIND_ADDRESS;
use wlst_mcp::{McpHttpServer, WlstEnvironment, WlstToolServices, resolve_bind_address, serve_stdio};

/// MCP server exposing WebLogic administration through WLST.
#[derive(Debug, Parser)]
#[command(name = "wlst-mcp", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve MCP over stdio (default) or streamable HTTP.
    Serve(ServeArgs),
}

#[derive(Debug, Args, Default)]
struct ServeArgs {
    /// Serve over HTTP at /mcp instead of stdio. Must be a loopback address.
    #[arg(long, value_name = "ADDR", num_args = 0..=1, default_missing_value = DEFAULT_HTTP_BIND_ADDRESS)]
    http: Option<String>,

    /// Default admin server URL.
    #[arg(long, env = ENV_ADMIN_URL)]
    admin_url: Option<String>,

    /// Default admin username.
    #[arg(long, env = ENV_USERNAME)]
    username: Option<String>,

    /// Read only from the environment so it never appears on the command line.
    #[arg(skip = std::env::var(ENV_PASSWORD).ok())]
    password: Option<String>,

    /// Default timeout in seconds.
    #[arg(long, env = ENV_TIMEOUT)]
    timeout: Option<String>,

    /// Path to wlst.sh / wlst.cmd.
    #[arg(long, env = ENV_WLST_PATH)]
    wlst_path: Option<String>,

    /// WebLogic installation home; takes precedence over --wlst-path.
    #[arg(long, env = ENV_WEBLOGIC_HOME)]
    weblogic_home: Option<PathBuf>,
}

impl ServeArgs {
    /// Stdio defaults taken straight from the process environment.
    fn from_process_env() -> Self {
        let env = |key: &str| std::env::var(key).ok();
        Self {
            http: None,
            admin_url: env(ENV_ADMIN_URL),
            username: env(ENV_USERNAME),
            password: env(ENV_PASSWORD),
            timeout: env(ENV_TIMEOUT),
            wlst_path: env(ENV_WLST_PATH),
            weblogic_home: env(ENV_WEBLOGIC_HOME).map(PathBuf::from),
        }
    }

    fn environment(&self) -> Result<WlstEnvironment> {
        let environment = WlstEnvironment::from_lookup(|key| match key {
            ENV_ADMIN_URL => self.admin_url.clone(),
            ENV_USERNAME => self.username.clone(),
            ENV_PASSWORD => self.password.clone(),
            ENV_TIMEOUT => self.timeout.clone(),
            ENV_WLST_PATH => self.wlst_path.clone(),
            ENV_WEBLOGIC_HOME => self.weblogic_home.as_ref().map(|path| path.display().to_string()),
            _ => None,
        })
        .context("invalid WLST configuration")?;
        Ok(environment)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // No subcommand => stdio server with environment defaults
    let args = match cli.command {
        Some(Command::Serve(args)) => args,
        None => ServeArgs::from_process_env(),
    };
    serve(args).await
}

/// Logs go to stderr; stdout carries the stdio transport.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

async fn serve(args: ServeArgs) -> Result<()> {
    let environment = args.environment()?;
    let executable = environment.wlst_executable();
    info!(
        wlst = %executable.display(),
        admin_url = environment.admin_url.as_deref().unwrap_or("<per call>"),
        timeout_secs = environment.timeout_secs,
        "Starting WLST MCP server"
    );
    let services = Arc::new(WlstToolServices::with_process_runner(environment));

    match args.http.as_deref() {
        Some(address) => {
            let bind_address = resolve_bind_address(Some(address))?;
            let running = McpHttpServer::new(bind_address, services).start().await?;
            tokio::signal::ctrl_c().await.context("failed to listen for Ctrl-C")?;
            info!("Shutdown requested");
            running.stop().await
        }
        None => serve_stdio(services).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::try_parse_from(["wlst-mcp", "serve", "--http", "--admin-url", "t3://host:7001", "--timeout", "90"]).unwrap();
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.http.as_deref(), Some(DEFAULT_HTTP_BIND_ADDRESS));
        let environment = args.environment().unwrap();
        assert_eq!(environment.admin_url.as_deref(), Some("t3://host:7001"));
        assert_eq!(environment.timeout_secs, 90);
    }

    #[test]
    fn environment_values_back_the_flags() {
        temp_env::with_vars(
            [(ENV_USERNAME, Some("weblogic")), (ENV_TIMEOUT, Some("45")), (ENV_ADMIN_URL, None::<&str>)],
            || {
                let cli = Cli::try_parse_from(["wlst-mcp", "serve"]).unwrap();
                let Some(Command::Serve(args)) = cli.command else {
                    panic!("expected serve");
                };
                assert!(args.http.is_none());
                let environment = args.environment().unwrap();
                assert_eq!(environment.username.as_deref(), Some("weblogic"));
                assert_eq!(environment.timeout_secs, 45);
                assert!(environment.admin_url.is_none());
            },
        );
    }

    #[test]
    fn password_comes_only_from_the_environment() {
        assert!(Cli::try_parse_from(["wlst-mcp", "serve", "--password", "welcome1"]).is_err());

        temp_env::with_var(ENV_PASSWORD, Some("welcome1"), || {
            let cli = Cli::try_parse_from(["wlst-mcp", "serve"]).unwrap();
            let Some(Command::Serve(args)) = cli.command else {
                panic!("expected serve");
            };
            assert_eq!(args.environment().unwrap().password.as_deref(), Some("welcome1"));
        });
    }

    #[test]
    fn invalid_timeout_is_a_startup_error() {
        let args = ServeArgs {
            timeout: Some("soon".to_string()),
            ..ServeArgs::default()
        };
        assert!(args.environment().is_err());
    }
}

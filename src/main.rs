//! Micro.blog Books MCP server - main entry point.
//!
//! Speaks MCP over stdio and exposes 11 tools:
//! - Bookshelves: list, list books, create, rename
//! - Books: add, move, remove, change cover
//! - Reading goals: list, progress, update

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tokio::io::BufReader;

use micro_books_mcp::client::BooksClient;
use micro_books_mcp::dispatch::ToolRouter;
use micro_books_mcp::mcp::McpServer;
use micro_books_mcp::types::{Credential, DEFAULT_BASE_URL};
use micro_books_mcp::{observability, Config};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// MCP stdio server for the Micro.blog Books API.
#[derive(Debug, Parser)]
#[command(name = "micro-books-mcp", version, about)]
struct Cli {
    /// Micro.blog app token
    #[arg(long, env = "MICRO_BLOG_BEARER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API host (override for staging or local mocks)
    #[arg(long, env = "MICRO_BLOG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "MICRO_BOOKS_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log output format (stderr)
    #[arg(long, env = "MICRO_BOOKS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::default();
        config.api.base_url = self.base_url.clone();
        config.observability.log_level = self.log_level.clone();
        config.observability.json_logs = self.log_format == LogFormat::Json;
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();

    observability::init_tracing(&config.observability);
    observability::install_panic_hook();

    let credential = match Credential::new(cli.token.clone().unwrap_or_default()) {
        Ok(credential) => credential,
        Err(_) => {
            tracing::error!("MICRO_BLOG_BEARER_TOKEN environment variable is required");
            return ExitCode::FAILURE;
        }
    };

    let client = match BooksClient::new(&config.api, credential) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Micro.blog Books MCP server starting (api={})", client.base_url());

    let server = McpServer::new(ToolRouter::new(client), config.transport.clone());

    let cancel = server.cancellation_token();
    tokio::spawn(async move {
        let signal = shutdown_signal().await;
        tracing::info!("Received {}, shutting down gracefully", signal);
        cancel.cancel();
    });

    let code = match server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("stdio transport failed: {}", e);
            ExitCode::FAILURE
        }
    };

    // The runtime cannot cancel tokio's blocking stdin read, so leave
    // without waiting for it.
    std::process::exit(if code == ExitCode::SUCCESS { 0 } else { 1 })
}

async fn shutdown_signal() -> &'static str {
    let interrupt = wait_or_park("SIGINT", tokio::signal::ctrl_c());

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let terminate = async {
            match signal(SignalKind::terminate()) {
                Ok(mut term) => {
                    term.recv().await;
                }
                Err(e) => {
                    tracing::warn!("SIGTERM handler unavailable: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            name = interrupt => name,
            _ = terminate => "SIGTERM",
        }
    }

    #[cfg(not(unix))]
    {
        interrupt.await
    }
}

/// Resolve with `name` once `signal` fires. A handler that failed to
/// register never resolves, so it cannot trigger a shutdown.
async fn wait_or_park<F>(name: &'static str, signal: F) -> &'static str
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::warn!("{} handler unavailable: {}", name, e);
        std::future::pending::<()>().await;
    }
    name
}

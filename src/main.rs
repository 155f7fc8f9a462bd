use clap::Parser;
use phpforge_lsp::Backend;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

/// PHP code generation language server.  Speaks LSP over stdio.
#[derive(Debug, Parser)]
#[command(name = "phpforge-lsp", version, about)]
struct Cli {
    /// Log filter (e.g. `info`, `phpforge_lsp=debug`).  Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    // stdout carries the LSP stream.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("starting phpforge-lsp {}", env!("CARGO_PKG_VERSION"));

    let (service, socket) = LspService::new(Backend::new);
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}

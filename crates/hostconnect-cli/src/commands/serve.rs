// `hostconnect serve`: run the HTTP API.

use std::path::Path;

use clap::Args;

use hostconnect::HostConnectContext;
use hostconnect_axum::HostConnect;

use crate::config::CliConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Override `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Override `server.port`
    #[arg(short, long)]
    port: Option<u16>,

    /// Allow cross-origin requests from any origin
    #[arg(long)]
    cors: bool,
}

pub fn run(config_path: &Path, args: ServeArgs) -> anyhow::Result<()> {
    hostconnect_core::env::init_logger();

    let mut config = CliConfig::load(config_path)?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    super::runtime()?.block_on(serve(config, args.cors))
}

async fn serve(config: CliConfig, cors: bool) -> anyhow::Result<()> {
    let database = if config.is_memory() { "memory" } else { "sql" };
    let store = config.open_store().await?;
    let ctx = HostConnectContext::from_options(config.options, config.stripe, store)?;

    let hostconnect = HostConnect::new(ctx);
    let app = if cors {
        hostconnect.router_with_cors()
    } else {
        hostconnect.router()
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        database,
        "hostconnect listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}

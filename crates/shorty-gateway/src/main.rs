use std::sync::Arc;

use clap::Parser;
use shorty_gateway::cli::CLI;
use shorty_gateway::{startup, telemetry, App, AppState};
use shorty_generator::RandomGenerator;
use shorty_shortener::ShortenerService;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    let subscriber =
        telemetry::build_subscriber(&config.log_level, config.log_format, std::io::stdout)?;
    telemetry::install(subscriber)?;

    info!(
        server_address = %config.server_address,
        base_url = %config.base_url,
        log_format = %config.log_format,
        "starting shorty"
    );

    RandomGenerator::warm_up();

    let storage = startup::init_storage(config.storage()).await?;
    let pinger = storage.pinger();
    let service = ShortenerService::new(storage, RandomGenerator::new());
    let state = AppState::new(Arc::new(service), config.base_url.clone()).with_pinger(pinger);

    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    }
}

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ginko::http::server::Server;
use ginko::http::tls::TlsMaterial;
use ginko::provider::BankProvider;
use ginko::util::cli::Options;
use ginko::util::error::StartupError;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn ginkod(opts: Options) -> Result<(), StartupError> {
    let config = Arc::new(opts.into_config()?);

    let tls = config.tls.as_ref().map(TlsMaterial::load).transpose()?;
    let provider = Arc::new(BankProvider::new(config.clone())?);

    tracing::info!(
        redirect_path = %config.redirect_path,
        token_url = %config.token_url,
        accounts_url = %config.accounts_url,
        "Starting ginkod"
    );

    Server::new(provider, config)
        .serve(tls, shutdown_signal())
        .await
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let opts = Options::parse();
    ginkod(opts).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to start");
        e
    })
}

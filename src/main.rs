//! S3 TMS Relay - relays JPEG images from S3 to McLeod TMS orders.
//!
//! This binary loads configuration, builds the outbound clients and starts
//! the HTTP server.

use std::process::ExitCode;

use aws_sdk_s3::config::Credentials;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use s3_tms_relay::{
    config::Config,
    create_s3_client,
    relay::RelayService,
    server::{create_router, RouterConfig},
    store::S3ObjectStore,
    tms::{BearerCredential, DocumentTarget, McLeodUploader},
};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be populated
    let dotenv = dotenvy::dotenv();

    let config = Config::parse();

    init_logging(config.verbose);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    run(config).await
}

async fn run(config: Config) -> ExitCode {
    info!("S3 TMS Relay v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  S3 bucket: {}", config.s3_bucket);
    if let Some(ref endpoint) = config.s3_endpoint {
        info!("  S3 endpoint: {}", endpoint);
    }
    info!("  S3 region: {}", config.aws_region);
    info!("  McLeod base URL: {}", config.mcleod_base_url);
    info!(
        "  McLeod document path: images/{}/<order_id>/{}",
        config.mcleod_row_type, config.mcleod_document_type
    );
    if config.mcleod_api_key().is_some() {
        info!("  McLeod auth: bearer key");
    } else {
        warn!("  McLeod auth: none (MCLEOD_API_KEY not set)");
    }
    info!("  Upload timeout: {}s", config.upload_timeout);

    // Create S3 client and store
    let credentials = Credentials::new(
        config.aws_access_key.clone(),
        config.aws_secret_key.clone(),
        None,
        None,
        "relay-config",
    );
    let s3_client = create_s3_client(
        config.s3_endpoint.as_deref(),
        &config.aws_region,
        credentials,
        config.s3_timeout(),
    )
    .await;
    let store = S3ObjectStore::new(s3_client, config.s3_bucket.clone());

    // Create McLeod uploader
    let target = DocumentTarget::new(config.mcleod_base_url.clone())
        .with_row_type(config.mcleod_row_type.clone())
        .with_document_type(config.mcleod_document_type.clone());
    let uploader = match McLeodUploader::new(
        target,
        config.mcleod_company_id.clone(),
        BearerCredential::new(config.mcleod_api_key()),
        config.upload_timeout(),
    ) {
        Ok(uploader) => uploader,
        Err(e) => {
            error!("Failed to create McLeod client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let router = create_router(
        RelayService::new(store, uploader),
        build_router_config(&config),
    );

    let addr = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "s3_tms_relay=debug,tower_http=debug"
    } else {
        "s3_tms_relay=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new(config.api_token.clone());

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}

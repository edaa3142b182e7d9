//! CRM lead pipeline service.
//!
//! Two independently running stages composed only through S3 and SQS:
//! - Ingestion: POST /ingest persists the raw lead and enqueues a deferred
//!   work item (600 s delay)
//! - Enrichment: a background worker merges raw leads with lookup records,
//!   writes enriched objects, and sends notification emails via SES

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::signal;
use tracing::info;

use api::{router, AppState};
use mailer::{MailConfig, SesMailer};
use queue::{QueueConfig, SqsQueue};
use storage::{S3Store, StorageConfig};
use telemetry::init_tracing_from_env;
use worker::{EnrichmentWorker, QueueWorker};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    storage: StorageConfig,

    #[serde(default)]
    queue: QueueConfig,

    #[serde(default)]
    mail: MailConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            storage: StorageConfig::default(),
            queue: QueueConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

impl Config {
    /// Fail fast on missing required settings instead of failing the first
    /// S3/SQS/SES call minutes later.
    fn validate(&self) -> Result<()> {
        let required = [
            ("storage.raw_bucket", &self.storage.raw_bucket),
            ("storage.enriched_bucket", &self.storage.enriched_bucket),
            ("storage.lookup_bucket", &self.storage.lookup_bucket),
            ("storage.lookup_region", &self.storage.lookup_region),
            ("queue.queue_url", &self.queue.queue_url),
            ("mail.from_address", &self.mail.from_address),
            ("mail.to_addresses", &self.mail.to_addresses),
        ];

        for (name, value) in required {
            if value.is_empty() {
                bail!("missing required configuration value: {}", name);
            }
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting lead pipeline v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;
    config.validate()?;

    info!(
        raw_bucket = %config.storage.raw_bucket,
        enriched_bucket = %config.storage.enriched_bucket,
        lookup_bucket = %config.storage.lookup_bucket,
        queue_url = %config.queue.queue_url,
        "Loaded configuration"
    );

    // Shared AWS SDK config (credential chain, default region, retries)
    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    // One store handle per bucket; the lookup bucket may live in its own region
    let raw_store = Arc::new(S3Store::new(
        &sdk_config,
        config.storage.raw_bucket.clone(),
        None,
        config.storage.endpoint.clone(),
    ));
    let enriched_store = Arc::new(S3Store::new(
        &sdk_config,
        config.storage.enriched_bucket.clone(),
        None,
        config.storage.endpoint.clone(),
    ));
    let lookup_store = Arc::new(S3Store::new(
        &sdk_config,
        config.storage.lookup_bucket.clone(),
        Some(config.storage.lookup_region.clone()),
        config.storage.endpoint.clone(),
    ));

    let queue = Arc::new(SqsQueue::new(&sdk_config, config.queue.clone()));
    let ses_mailer = Arc::new(SesMailer::new(&sdk_config, &config.mail));

    // Start the enrichment worker
    let enricher = EnrichmentWorker::new(
        raw_store.clone(),
        lookup_store,
        enriched_store,
        ses_mailer,
        config.mail.clone(),
    );
    let queue_worker = QueueWorker::new(queue.clone(), enricher);
    let worker_handle = tokio::spawn(async move { queue_worker.run().await });

    // Create application state and router
    let state = AppState::new(raw_store, queue);
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down...");
    worker_handle.abort();

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("PIPELINE")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested fields; the config crate's nested parsing
    // doesn't work reliably with underscored field names
    if let Ok(bucket) = std::env::var("PIPELINE_RAW_BUCKET") {
        config.storage.raw_bucket = bucket;
    }
    if let Ok(bucket) = std::env::var("PIPELINE_ENRICHED_BUCKET") {
        config.storage.enriched_bucket = bucket;
    }
    if let Ok(bucket) = std::env::var("PIPELINE_LOOKUP_BUCKET") {
        config.storage.lookup_bucket = bucket;
    }
    if let Ok(region) = std::env::var("PIPELINE_LOOKUP_REGION") {
        config.storage.lookup_region = region;
    }
    if let Ok(url) = std::env::var("PIPELINE_QUEUE_URL") {
        config.queue.queue_url = url;
    }
    if let Ok(from) = std::env::var("PIPELINE_MAIL_FROM") {
        config.mail.from_address = from;
    }
    if let Ok(to) = std::env::var("PIPELINE_MAIL_TO") {
        config.mail.to_addresses = to;
    }
    if let Ok(region) = std::env::var("PIPELINE_MAIL_REGION") {
        config.mail.region = region;
    }
    if let Ok(endpoint) = std::env::var("PIPELINE_AWS_ENDPOINT") {
        config.storage.endpoint = Some(endpoint.clone());
        config.queue.endpoint = Some(endpoint.clone());
        config.mail.endpoint = Some(endpoint);
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}

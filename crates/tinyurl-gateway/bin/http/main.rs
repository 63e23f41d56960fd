mod cli;

use crate::cli::{GeneratorArg, LogFormat, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use tinyurl_core::{ShortCode, Store};
use tinyurl_gateway::{App, AppState};
use tinyurl_generator::{Generator, NanoidGenerator, SeqGenerator};
use tinyurl_shortener::TinyUrl;
use tinyurl_storage::{InMemoryStore, MySqlStore, RedisStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

type DynGenerator = Box<dyn Fn() -> ShortCode + Send + Sync>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        generator = %config.generator,
        "starting tinyurl gateway"
    );

    let generator = build_generator(&config)?;

    match config.storage {
        StorageBackendArg::InMemory => run_server(&config, InMemoryStore::new(), generator).await,
        StorageBackendArg::Mysql => {
            let dsn = config
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let store = MySqlStore::connect(dsn, config.mysql_replica_dsn.as_deref()).await?;
            store.ensure_schema().await?;
            run_server(&config, store, generator).await
        }
        StorageBackendArg::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("redis url is required when storage backend is redis")?;
            let store = RedisStore::connect(url, config.redis_replica_url.as_deref())
                .await?
                .with_key_prefix(config.redis_key_prefix.as_str());
            run_server(&config, store, generator).await
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

fn build_generator(config: &CLI) -> anyhow::Result<DynGenerator> {
    let generator: DynGenerator = match config.generator {
        GeneratorArg::Nanoid => {
            let generator = NanoidGenerator::default();
            Box::new(move || generator.generate())
        }
        GeneratorArg::Seq => {
            let generator = SeqGenerator::with_prefix(config.generator_prefix.as_str())
                .context("invalid generator prefix")?;
            Box::new(move || generator.generate())
        }
    };
    Ok(generator)
}

async fn run_server<S: Store>(
    config: &CLI,
    store: S,
    generator: DynGenerator,
) -> anyhow::Result<()> {
    let shortener = TinyUrl::new(store, generator).with_base_url(config.base_url.as_str());
    let app = App::router(AppState::new(shortener));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

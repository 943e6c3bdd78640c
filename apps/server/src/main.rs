use anyhow::{Context, anyhow};
use confhub::domain::config::{ApiConfig, RuntimeConfig};
use confhub::kernel::config::load_config;
use confhub_logger::Logger;
use confhub_server::Server;
use tokio::runtime::{Builder, Runtime};

fn runtime(config: &RuntimeConfig) -> anyhow::Result<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.thread_name(&config.thread_name).enable_all();
    if let Some(threads) = config.worker_threads {
        builder.worker_threads(threads);
    }

    builder.build().map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}

fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level_name(&cfg.logging.level)?
        .filter(cfg.logging.filter.clone())
        .directory(cfg.logging.directory.clone())
        .json(cfg.logging.json)
        .init()?;

    runtime(&cfg.runtime)?.block_on(async move { Server::builder().config(cfg).build().await?.run().await })
}

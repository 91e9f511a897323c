use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use common::{config::AppConfig, logging};
use gh_source::{FileCacheStore, GithubRepoSource, RepoCache, ReqwestExecutor};
use normalizer::OverrideTable;
use showcase::{CycleOutcome, Showcase};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init_logging(&config.observability.log_level);

    let exec = Arc::new(ReqwestExecutor::new(&config.github.user_agent)?);
    let source = Arc::new(GithubRepoSource::new(
        exec,
        &config.github.api_base,
        config.github.user_agent.clone(),
    )?);
    let cache = RepoCache::new(
        Arc::new(FileCacheStore::new(&config.cache.dir)),
        Duration::from_secs(config.cache.expiry_secs),
    );
    let overrides = OverrideTable::from_config(&config.overrides);

    let showcase = Showcase::new(
        config.showcase.clone(),
        config.github.username.clone(),
        source,
        cache,
        overrides,
    )
    .with_metrics_path(config.observability.metrics_path.clone());

    info!(
        user = %config.github.username,
        run_once = config.showcase.run_once,
        interval = config.showcase.interval_secs,
        "repo showcase started"
    );

    if config.showcase.run_once {
        if let CycleOutcome::FetchFailed(err) = showcase.run_once().await? {
            warn!(error = %err, "no showcase rendered");
        }
    } else {
        showcase.run().await?;
    }
    Ok(())
}

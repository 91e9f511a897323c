use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use analysis::{score_all, Presentation};
use chrono::{DateTime, Utc};
use common::config::ShowcaseConfig;
use common::Result;
use gh_source::{CacheLookup, FetchError, RepoCache, RepoSource};
use normalizer::{normalize_all, OverrideTable, RawRepository};
use render::{
    render_presentation, HtmlRenderer, MarkupRenderer, PageFragments, RenderSummary, RenderTarget,
};
use tokio::io::AsyncWriteExt;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoOrigin {
    Cache,
    Network,
}

#[derive(Debug)]
pub enum CycleOutcome {
    Rendered {
        origin: RepoOrigin,
        summary: RenderSummary,
    },
    /// Nothing was rendered and the cache was left as it was.
    FetchFailed(FetchError),
}

impl CycleOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Rendered { .. } => "rendered",
            Self::FetchFailed(_) => "fetch_failed",
        }
    }
}

pub struct Showcase {
    config: ShowcaseConfig,
    username: String,
    source: Arc<dyn RepoSource>,
    cache: RepoCache,
    overrides: OverrideTable,
    renderer: Box<dyn MarkupRenderer + Send + Sync>,
    metrics_path: Option<PathBuf>,
}

impl Showcase {
    pub fn new(
        config: ShowcaseConfig,
        username: impl Into<String>,
        source: Arc<dyn RepoSource>,
        cache: RepoCache,
        overrides: OverrideTable,
    ) -> Self {
        Self {
            config,
            username: username.into(),
            source,
            cache,
            overrides,
            renderer: Box::new(HtmlRenderer),
            metrics_path: None,
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn MarkupRenderer + Send + Sync>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_metrics_path(mut self, path: Option<PathBuf>) -> Self {
        self.metrics_path = path;
        self
    }

    pub async fn run(&self) -> Result<()> {
        loop {
            self.run_once().await?;
            if self.config.run_once {
                break;
            }
            sleep(Duration::from_secs(self.config.interval_secs)).await;
        }
        Ok(())
    }

    /// One cycle rendered into a page section. The page is written only when
    /// the cycle rendered, so a failed fetch leaves previous output in place.
    pub async fn run_once(&self) -> Result<CycleOutcome> {
        let now = Utc::now();
        let mut page = PageFragments::default();
        let outcome = self.run_cycle(now, &mut page).await;

        if outcome.is_rendered() {
            write_output(self.config.output_path.as_deref(), &page.to_html()).await?;
        }
        if let Some(path) = &self.metrics_path {
            tokio::fs::write(path, metrics::encode_text()?).await?;
        }
        Ok(outcome)
    }

    #[instrument(skip(self, target), fields(user = %self.username))]
    pub async fn run_cycle<T>(&self, now: DateTime<Utc>, target: &mut T) -> CycleOutcome
    where
        T: RenderTarget + Send + ?Sized,
    {
        let lookup = self.cache.lookup(now).await;
        metrics::CACHE_LOOKUPS_TOTAL
            .with_label_values(&[lookup.as_str()])
            .inc();

        let (repos, origin) = match lookup {
            CacheLookup::Fresh { repos, saved_at } => {
                debug!(
                    saved_at = %saved_at,
                    count = repos.len(),
                    "serving repositories from cache"
                );
                (repos, RepoOrigin::Cache)
            }
            other => {
                debug!(cache = other.as_str(), "fetching repositories");
                match self.fetch(now).await {
                    Ok(repos) => (repos, RepoOrigin::Network),
                    Err(err) => {
                        warn!(reason = err.reason(), error = %err, "repository fetch failed");
                        let outcome = CycleOutcome::FetchFailed(err);
                        metrics::CYCLES_TOTAL
                            .with_label_values(&[outcome.label()])
                            .inc();
                        return outcome;
                    }
                }
            }
        };

        let summary = self.render_repos(&repos, now, target);
        metrics::GRID_CARDS.set(summary.cards as i64);
        metrics::LAST_RENDER_TIMESTAMP.set(now.timestamp());
        info!(
            origin = ?origin,
            total = summary.total,
            cards = summary.cards,
            overview = summary.overview,
            "rendered repository showcase"
        );

        let outcome = CycleOutcome::Rendered { origin, summary };
        metrics::CYCLES_TOTAL
            .with_label_values(&[outcome.label()])
            .inc();
        outcome
    }

    /// Normalize, score, order and render one collection. Runs to completion
    /// without suspending.
    pub fn render_repos<T>(
        &self,
        raws: &[RawRepository],
        now: DateTime<Utc>,
        target: &mut T,
    ) -> RenderSummary
    where
        T: RenderTarget + ?Sized,
    {
        let ranked = score_all(normalize_all(raws, &self.overrides), now);
        let presentation = Presentation::build(&ranked, &self.overrides);
        render_presentation(&presentation, now, self.renderer.as_ref(), target)
    }

    async fn fetch(
        &self,
        now: DateTime<Utc>,
    ) -> std::result::Result<Vec<RawRepository>, FetchError> {
        let started = Instant::now();
        let result = self.source.fetch_repos(&self.username).await;
        metrics::FETCH_LATENCY_SECONDS.observe(started.elapsed().as_secs_f64());

        match &result {
            Ok(repos) => {
                metrics::FETCH_REQUESTS_TOTAL
                    .with_label_values(&["success"])
                    .inc();
                if let Err(err) = self.cache.save(repos, now).await {
                    warn!(error = %err, "failed to write repository cache");
                }
            }
            Err(err) => {
                metrics::FETCH_REQUESTS_TOTAL
                    .with_label_values(&[err.reason()])
                    .inc();
            }
        }
        result
    }
}

async fn write_output(path: Option<&Path>, html: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, html).await?;
            debug!(path = %path.display(), "wrote showcase markup");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(html.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

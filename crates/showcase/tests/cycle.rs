use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use common::config::ShowcaseConfig;
use gh_source::{CacheLookup, CacheStore, FetchError, MemoryCacheStore, RepoCache, RepoSource};
use http::StatusCode;
use normalizer::{OverrideTable, RawRepository};
use render::{GridCard, MarkupRenderer, OverviewItem, PageFragments};
use showcase::{CycleOutcome, RepoOrigin, Showcase};

struct StubSource {
    repos: Option<Vec<RawRepository>>,
    calls: AtomicUsize,
}

impl StubSource {
    fn ok(repos: Vec<RawRepository>) -> Arc<Self> {
        Arc::new(Self {
            repos: Some(repos),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            repos: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoSource for StubSource {
    async fn fetch_repos(&self, username: &str) -> Result<Vec<RawRepository>, FetchError> {
        assert_eq!(username, "sheabunge");
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.repos {
            Some(repos) => Ok(repos.clone()),
            None => Err(FetchError::status(
                StatusCode::SERVICE_UNAVAILABLE,
                "users/sheabunge/repos",
            )),
        }
    }
}

/// Records names only, so assertions do not depend on markup.
struct NameRenderer;

impl MarkupRenderer for NameRenderer {
    fn card(&self, card: &GridCard) -> String {
        card.name.clone()
    }

    fn overview_item(&self, item: &OverviewItem) -> String {
        format!("{} ({})", item.name, item.pushed)
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn repo(name: &str, watchers: u64, pushed_hours_ago: i64) -> RawRepository {
    RawRepository {
        name: name.into(),
        html_url: format!("https://github.com/sheabunge/{name}"),
        watchers,
        size: 100,
        pushed_at: (now() - chrono::Duration::hours(pushed_hours_ago)).to_rfc3339(),
        created_at: "2012-01-01T00:00:00Z".into(),
        ..Default::default()
    }
}

fn collection() -> Vec<RawRepository> {
    let mut fork = repo("forked-theme", 0, 1);
    fork.fork = true;
    let mut empty = repo("placeholder", 0, 500);
    empty.size = 0;
    vec![
        repo("code-snippets", 300, 48),
        repo("aCmd", 2, 3),
        fork,
        repo("ManageWP-for-Chrome", 50, 2),
        empty,
        repo("fresh-push", 10, 0),
    ]
}

fn overrides() -> OverrideTable {
    OverrideTable::default()
        .exclude("ManageWP-for-Chrome")
        .with_language("aCmd", "Bash")
}

fn build_showcase(source: Arc<StubSource>, store: Arc<MemoryCacheStore>) -> Showcase {
    Showcase::new(
        ShowcaseConfig::default(),
        "sheabunge",
        source,
        RepoCache::new(store, Duration::from_secs(30 * 60)),
        overrides(),
    )
    .with_renderer(Box::new(NameRenderer))
}

#[tokio::test]
async fn cold_cache_fetches_renders_and_saves() {
    let source = StubSource::ok(collection());
    let store = Arc::new(MemoryCacheStore::new());
    let showcase = build_showcase(source.clone(), store.clone());

    let mut page = PageFragments::default();
    let outcome = showcase.run_cycle(now(), &mut page).await;

    match outcome {
        CycleOutcome::Rendered { origin, summary } => {
            assert_eq!(origin, RepoOrigin::Network);
            assert_eq!(summary.total, 6);
            assert_eq!(summary.cards, 3);
            assert_eq!(summary.overview, 3);
        }
        other => panic!("expected a render, got {other:?}"),
    }
    assert_eq!(source.calls(), 1);
    assert_eq!(page.repo_count, Some(6));
    assert_eq!(page.cards, ["fresh-push", "aCmd", "code-snippets"]);
    assert_eq!(
        page.overview,
        [
            "fresh-push (0 seconds ago)",
            "forked-theme (1 hour ago)",
            "ManageWP-for-Chrome (2 hours ago)"
        ]
    );

    let cache = RepoCache::new(store, Duration::from_secs(30 * 60));
    assert!(matches!(cache.lookup(now()).await, CacheLookup::Fresh { .. }));
}

#[tokio::test]
async fn fresh_cache_skips_fetch() {
    let source = StubSource::ok(collection());
    let store = Arc::new(MemoryCacheStore::new());
    let cache = RepoCache::new(store.clone(), Duration::from_secs(30 * 60));
    cache
        .save(&[repo("cached-only", 1, 5)], now() - chrono::Duration::minutes(10))
        .await
        .expect("seed cache");

    let showcase = build_showcase(source.clone(), store);
    let mut page = PageFragments::default();
    let outcome = showcase.run_cycle(now(), &mut page).await;

    assert!(matches!(
        outcome,
        CycleOutcome::Rendered {
            origin: RepoOrigin::Cache,
            ..
        }
    ));
    assert_eq!(source.calls(), 0);
    assert_eq!(page.cards, ["cached-only"]);
    assert_eq!(page.repo_count, Some(1));
}

#[tokio::test]
async fn expired_cache_is_refetched_and_rewritten() {
    let source = StubSource::ok(collection());
    let store = Arc::new(MemoryCacheStore::new());
    let cache = RepoCache::new(store.clone(), Duration::from_secs(30 * 60));
    cache
        .save(&[repo("stale", 1, 5)], now() - chrono::Duration::minutes(45))
        .await
        .expect("seed cache");

    let showcase = build_showcase(source.clone(), store);
    let mut page = PageFragments::default();
    let outcome = showcase.run_cycle(now(), &mut page).await;

    assert!(matches!(
        outcome,
        CycleOutcome::Rendered {
            origin: RepoOrigin::Network,
            ..
        }
    ));
    assert_eq!(source.calls(), 1);
    match cache.lookup(now()).await {
        CacheLookup::Fresh { repos, saved_at } => {
            assert_eq!(repos.len(), 6);
            assert_eq!(saved_at, now());
        }
        other => panic!("expected refreshed cache, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_failure_renders_nothing_and_keeps_cache() {
    let source = StubSource::failing();
    let store = Arc::new(MemoryCacheStore::new());
    let cache = RepoCache::new(store.clone(), Duration::from_secs(30 * 60));
    let stale_at = now() - chrono::Duration::hours(2);
    cache
        .save(&[repo("stale", 1, 5)], stale_at)
        .await
        .expect("seed cache");
    let before = store.get("save_time").await.expect("get");

    let showcase = build_showcase(source.clone(), store.clone());
    let mut page = PageFragments::default();
    let outcome = showcase.run_cycle(now(), &mut page).await;

    match outcome {
        CycleOutcome::FetchFailed(err) => {
            assert_eq!(err.status_code(), Some(StatusCode::SERVICE_UNAVAILABLE));
        }
        other => panic!("expected fetch failure, got {other:?}"),
    }
    assert_eq!(page, PageFragments::default());
    assert_eq!(store.get("save_time").await.expect("get"), before);
}

#[tokio::test]
async fn run_once_writes_page_to_output_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("site").join("repos.html");
    let metrics_file = dir.path().join("showcase.prom");
    let config = ShowcaseConfig {
        output_path: Some(output.clone()),
        ..ShowcaseConfig::default()
    };
    let showcase = Showcase::new(
        config,
        "sheabunge",
        StubSource::ok(vec![repo("code-snippets", 1, 30)]),
        RepoCache::new(
            Arc::new(MemoryCacheStore::new()),
            Duration::from_secs(30 * 60),
        ),
        OverrideTable::default(),
    )
    .with_metrics_path(Some(metrics_file.clone()));

    let outcome = showcase.run_once().await.expect("cycle runs");
    assert!(outcome.is_rendered());

    let html = std::fs::read_to_string(&output).expect("output written");
    assert!(html.contains(r#"<span id="num-repos">1</span>"#));
    assert!(html.contains(r#"<h2 class="repo-name">code-snippets</h2>"#));
    assert!(html.contains("1 stargazer"));

    let metrics = std::fs::read_to_string(&metrics_file).expect("metrics written");
    assert!(metrics.contains("showcase_cycles_total"));
}

#[tokio::test]
async fn run_once_leaves_output_alone_on_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("repos.html");
    std::fs::write(&output, "previous render").expect("seed output");
    let config = ShowcaseConfig {
        output_path: Some(output.clone()),
        ..ShowcaseConfig::default()
    };
    let showcase = Showcase::new(
        config,
        "sheabunge",
        StubSource::failing(),
        RepoCache::new(
            Arc::new(MemoryCacheStore::new()),
            Duration::from_secs(30 * 60),
        ),
        OverrideTable::default(),
    );

    let outcome = showcase.run_once().await.expect("cycle runs");
    assert!(!outcome.is_rendered());
    assert_eq!(
        std::fs::read_to_string(&output).expect("output kept"),
        "previous render"
    );
}

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use normalizer::RawRepository;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::CacheError;

pub const REPOS_KEY: &str = "repos";
pub const SAVE_TIME_KEY: &str = "save_time";

#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;
    async fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// One file per key under `dir`. Writes go through a temporary file and a
/// rename so a reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.cache"))
    }
}

#[async_trait]
impl CacheStore for FileCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = path.with_extension("cache.tmp");
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCacheStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.inner.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.inner
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.inner.lock().await.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Fresh {
        repos: Vec<RawRepository>,
        saved_at: DateTime<Utc>,
    },
    Missing,
    Expired,
    Corrupt,
}

impl CacheLookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh { .. } => "fresh",
            Self::Missing => "missing",
            Self::Expired => "expired",
            Self::Corrupt => "corrupt",
        }
    }
}

/// The repository collection plus the time it was saved, served only while
/// younger than `expiry`.
#[derive(Clone)]
pub struct RepoCache {
    store: Arc<dyn CacheStore>,
    expiry: Duration,
}

impl RepoCache {
    pub fn new(store: Arc<dyn CacheStore>, expiry: Duration) -> Self {
        Self { store, expiry }
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Store failures and undecodable entries read as a miss.
    pub async fn lookup(&self, now: DateTime<Utc>) -> CacheLookup {
        let (repos, save_time) = match self.read_both().await {
            Ok(Some(pair)) => pair,
            Ok(None) => return CacheLookup::Missing,
            Err(err) => {
                warn!(error = %err, "failed to read repository cache");
                return CacheLookup::Corrupt;
            }
        };

        let Some(saved_at) = save_time
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
        else {
            warn!(value = %save_time, "cached save time is not a timestamp");
            return CacheLookup::Corrupt;
        };

        let age = now - saved_at;
        let within_window = age
            .to_std()
            .map(|age| age < self.expiry)
            .unwrap_or(false);
        if !within_window {
            debug!(saved_at = %saved_at, "repository cache expired");
            return CacheLookup::Expired;
        }

        match serde_json::from_str::<Vec<RawRepository>>(&repos) {
            Ok(repos) => CacheLookup::Fresh { repos, saved_at },
            Err(err) => {
                warn!(error = %err, "cached repositories do not decode");
                CacheLookup::Corrupt
            }
        }
    }

    /// The save time is dropped first and written last, so an interrupted
    /// save never pairs a new collection with an old timestamp.
    pub async fn save(&self, repos: &[RawRepository], now: DateTime<Utc>) -> Result<(), CacheError> {
        let encoded = serde_json::to_string(repos)?;
        self.store.remove(SAVE_TIME_KEY).await?;
        self.store.set(REPOS_KEY, &encoded).await?;
        self.store
            .set(SAVE_TIME_KEY, &now.timestamp_millis().to_string())
            .await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), CacheError> {
        self.store.remove(SAVE_TIME_KEY).await?;
        self.store.remove(REPOS_KEY).await?;
        Ok(())
    }

    async fn read_both(&self) -> Result<Option<(String, String)>, CacheError> {
        let repos = self.store.get(REPOS_KEY).await?;
        let save_time = self.store.get(SAVE_TIME_KEY).await?;
        Ok(repos.zip(save_time))
    }
}

pub mod cache;
pub mod client;
pub mod error;

pub use cache::{CacheLookup, CacheStore, FileCacheStore, MemoryCacheStore, RepoCache};
pub use client::{GithubRepoSource, HttpExec, RepoSource, ReqwestExecutor};
pub use error::{CacheError, FetchError};

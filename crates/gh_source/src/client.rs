use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use http::{header, Request, Response};
use normalizer::RawRepository;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

#[async_trait]
pub trait HttpExec: Send + Sync {
    async fn execute(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>>;
}

pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpExec for ReqwestExecutor {
    async fn execute(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        let (parts, body) = req.into_parts();
        let resp = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .send()
            .await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await?;
        let mut response = Response::new(bytes.to_vec());
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

/// Single-shot source of a user's public repositories.
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn fetch_repos(&self, username: &str) -> Result<Vec<RawRepository>, FetchError>;
}

pub struct GithubRepoSource {
    exec: Arc<dyn HttpExec>,
    base: Url,
    user_agent: String,
}

impl GithubRepoSource {
    pub fn new(exec: Arc<dyn HttpExec>, api_base: &str, user_agent: impl Into<String>) -> Result<Self> {
        let base = Url::parse(api_base)?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("api base {api_base} cannot carry a path"));
        }
        Ok(Self {
            exec,
            base,
            user_agent: user_agent.into(),
        })
    }

    fn repos_url(&self, username: &str) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Request(anyhow!("api base cannot carry a path")))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        Ok(url)
    }

    fn build_request(&self, url: &Url) -> Result<Request<Vec<u8>>, FetchError> {
        Request::builder()
            .method("GET")
            .uri(url.as_str())
            .header(header::USER_AGENT, self.user_agent.as_str())
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .body(Vec::new())
            .map_err(|err| FetchError::Request(err.into()))
    }
}

#[async_trait]
impl RepoSource for GithubRepoSource {
    #[instrument(skip(self))]
    async fn fetch_repos(&self, username: &str) -> Result<Vec<RawRepository>, FetchError> {
        let url = self.repos_url(username)?;
        let endpoint = url.path().trim_start_matches('/').to_string();
        debug!(endpoint = %endpoint, url = %url, "Dispatching GitHub request");

        let request = self.build_request(&url)?;
        let response = self
            .exec
            .execute(request)
            .await
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        // Redirects and other 3xx count as success, matching the page's
        // 200..400 check.
        let status = response.status();
        if !(200..400).contains(&status.as_u16()) {
            return Err(FetchError::status(status, endpoint));
        }

        let value: Value =
            serde_json::from_slice(response.body()).map_err(|source| FetchError::Decode {
                endpoint: endpoint.clone(),
                source,
            })?;
        let repos = match value {
            Value::Null => Vec::new(),
            other => serde_json::from_value::<Vec<RawRepository>>(other).map_err(|source| {
                FetchError::Decode {
                    endpoint: endpoint.clone(),
                    source,
                }
            })?,
        };
        debug!(endpoint = %endpoint, count = repos.len(), "fetched repositories");
        Ok(repos)
    }
}

use serde::{Deserialize, Serialize};

/// A repository as returned by `GET /users/{user}/repos`. Only the fields the
/// showcase reads are kept; timestamps stay as the API's strings until
/// normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRepository {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub watchers: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub pushed_at: String,
    #[serde(default)]
    pub created_at: String,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payloads::RawRepository;

/// A repository after override resolution and timestamp parsing.
///
/// `pushed_at` and `created_at` are `None` when the raw string did not parse;
/// consumers rank such repositories after every repository with valid times.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedRepository {
    pub raw: RawRepository,
    pub resolved_url: String,
    pub resolved_description: Option<String>,
    pub resolved_homepage: Option<String>,
    pub resolved_language: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NormalizedRepository {
    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn has_valid_times(&self) -> bool {
        self.pushed_at.is_some() && self.created_at.is_some()
    }
}

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::NormalizedRepository;
use crate::overrides::OverrideTable;
use crate::payloads::RawRepository;

/// Parses an RFC 3339 timestamp. Anything unparseable, including the empty
/// string, yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

pub fn normalize_repository(raw: &RawRepository, overrides: &OverrideTable) -> NormalizedRepository {
    let name = raw.name.as_str();
    let pushed_at = parse_timestamp(&raw.pushed_at);
    let created_at = parse_timestamp(&raw.created_at);
    if pushed_at.is_none() || created_at.is_none() {
        debug!(
            repo = %name,
            pushed_at = %raw.pushed_at,
            created_at = %raw.created_at,
            "repository has an unparseable timestamp"
        );
    }

    NormalizedRepository {
        raw: raw.clone(),
        resolved_url: overrides
            .url(name)
            .map(str::to_string)
            .unwrap_or_else(|| raw.html_url.clone()),
        resolved_description: resolve(overrides.description(name), raw.description.as_deref()),
        resolved_homepage: resolve(overrides.homepage(name), raw.homepage.as_deref()),
        resolved_language: resolve(overrides.language(name), raw.language.as_deref()),
        pushed_at,
        created_at,
    }
}

pub fn normalize_all(raws: &[RawRepository], overrides: &OverrideTable) -> Vec<NormalizedRepository> {
    raws.iter()
        .map(|raw| normalize_repository(raw, overrides))
        .collect()
}

fn resolve(override_value: Option<&str>, raw: Option<&str>) -> Option<String> {
    override_value
        .or(raw)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

use analysis::{relative_time, RankedRepository};
use chrono::{DateTime, Utc};
use common::text::{count_noun, join_path};
use serde::Serialize;

/// Everything a grid card displays, independent of markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCard {
    pub name: String,
    pub url: String,
    pub stargazers: String,
    pub language: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub stargazers_url: String,
    pub network_url: String,
}

impl GridCard {
    pub fn from_ranked(ranked: &RankedRepository) -> Self {
        let repo = &ranked.repository;
        let url = repo.resolved_url.clone();
        Self {
            name: repo.raw.name.clone(),
            stargazers: count_noun(repo.raw.watchers, "stargazer", "stargazers"),
            language: repo.resolved_language.clone(),
            description: repo.resolved_description.clone(),
            homepage: repo.resolved_homepage.clone(),
            stargazers_url: join_path(&url, "stargazers"),
            network_url: join_path(&url, "network"),
            url,
        }
    }
}

/// One line of the "recently updated" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewItem {
    pub name: String,
    pub url: String,
    pub commits_url: String,
    pub pushed: String,
}

impl OverviewItem {
    /// Links point at the repository's GitHub page, not the URL override.
    pub fn from_ranked(ranked: &RankedRepository, now: DateTime<Utc>) -> Self {
        let repo = &ranked.repository;
        Self {
            name: repo.raw.name.clone(),
            url: repo.raw.html_url.clone(),
            commits_url: join_path(&repo.raw.html_url, "commits"),
            pushed: relative_time(repo.pushed_at, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use normalizer::{normalize_repository, OverrideTable, RawRepository};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ranked(watchers: u64, overrides: &OverrideTable) -> RankedRepository {
        let raw = RawRepository {
            name: "code-snippets".into(),
            html_url: "https://github.com/sheabunge/code-snippets".into(),
            description: Some("Manage code snippets".into()),
            language: Some("PHP".into()),
            watchers,
            size: 500,
            pushed_at: (now() - Duration::hours(5)).to_rfc3339(),
            created_at: "2012-07-01T00:00:00Z".into(),
            ..Default::default()
        };
        RankedRepository {
            repository: normalize_repository(&raw, overrides),
            hotness: 1.0,
        }
    }

    #[test]
    fn stargazer_label_is_pluralised() {
        let table = OverrideTable::default();
        assert_eq!(GridCard::from_ranked(&ranked(1, &table)).stargazers, "1 stargazer");
        assert_eq!(GridCard::from_ranked(&ranked(0, &table)).stargazers, "0 stargazers");
        assert_eq!(GridCard::from_ranked(&ranked(2, &table)).stargazers, "2 stargazers");
    }

    #[test]
    fn card_links_derive_from_resolved_url() {
        let table = OverrideTable::default()
            .with_url("code-snippets", "https://example.org/snippets")
            .with_homepage("code-snippets", "https://snippets.example.org");
        let card = GridCard::from_ranked(&ranked(4, &table));
        assert_eq!(card.url, "https://example.org/snippets");
        assert_eq!(card.stargazers_url, "https://example.org/snippets/stargazers");
        assert_eq!(card.network_url, "https://example.org/snippets/network");
        assert_eq!(card.homepage.as_deref(), Some("https://snippets.example.org"));
        assert_eq!(card.language.as_deref(), Some("PHP"));
    }

    #[test]
    fn card_without_homepage_has_none() {
        let card = GridCard::from_ranked(&ranked(4, &OverrideTable::default()));
        assert_eq!(card.homepage, None);
    }

    #[test]
    fn overview_item_formats_push_time() {
        let table = OverrideTable::default().with_url("code-snippets", "https://example.org/snippets");
        let item = OverviewItem::from_ranked(&ranked(4, &table), now());
        assert_eq!(item.name, "code-snippets");
        assert_eq!(item.url, "https://github.com/sheabunge/code-snippets");
        assert_eq!(item.commits_url, "https://github.com/sheabunge/code-snippets/commits");
        assert_eq!(item.pushed, "5 hours ago");
    }
}

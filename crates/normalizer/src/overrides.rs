use std::collections::{HashMap, HashSet};

use common::config::OverridesConfig;

/// Read-only per-repository lookups, built once at startup and shared by
/// reference with the normalizer and the listing filter.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    urls: HashMap<String, String>,
    descriptions: HashMap<String, String>,
    homepages: HashMap<String, String>,
    languages: HashMap<String, String>,
    exclude: HashSet<String>,
    include: HashSet<String>,
}

impl OverrideTable {
    pub fn from_config(config: &OverridesConfig) -> Self {
        let mut table = Self::default();
        for entry in &config.repos {
            insert_present(&mut table.urls, &entry.name, entry.url.as_deref());
            insert_present(
                &mut table.descriptions,
                &entry.name,
                entry.description.as_deref(),
            );
            insert_present(&mut table.homepages, &entry.name, entry.homepage.as_deref());
            insert_present(&mut table.languages, &entry.name, entry.language.as_deref());
        }
        table.exclude = config.exclude.iter().cloned().collect();
        table.include = config.include.iter().cloned().collect();
        table
    }

    pub fn with_url(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.urls.insert(name.into(), url.into());
        self
    }

    pub fn with_description(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.descriptions.insert(name.into(), description.into());
        self
    }

    pub fn with_homepage(mut self, name: impl Into<String>, homepage: impl Into<String>) -> Self {
        self.homepages.insert(name.into(), homepage.into());
        self
    }

    pub fn with_language(mut self, name: impl Into<String>, language: impl Into<String>) -> Self {
        self.languages.insert(name.into(), language.into());
        self
    }

    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.insert(name.into());
        self
    }

    pub fn include(mut self, name: impl Into<String>) -> Self {
        self.include.insert(name.into());
        self
    }

    pub fn url(&self, name: &str) -> Option<&str> {
        lookup(&self.urls, name)
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        lookup(&self.descriptions, name)
    }

    pub fn homepage(&self, name: &str) -> Option<&str> {
        lookup(&self.homepages, name)
    }

    pub fn language(&self, name: &str) -> Option<&str> {
        lookup(&self.languages, name)
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.contains(name)
    }

    pub fn is_included(&self, name: &str) -> bool {
        self.include.contains(name)
    }
}

fn insert_present(map: &mut HashMap<String, String>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        map.insert(name.to_string(), value.to_string());
    }
}

// An empty override falls through to the raw field.
fn lookup<'a>(map: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    map.get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::errors::{AppError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub github: GithubConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub showcase: ShowcaseConfig,
    #[serde(default)]
    pub overrides: OverridesConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config: Self = Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.github.username.trim().is_empty() {
            return Err(AppError::InvalidConfig("github.username must not be empty"));
        }
        if self.cache.expiry_secs == 0 {
            return Err(AppError::InvalidConfig("cache.expiry_secs must be positive"));
        }
        if !self.showcase.run_once && self.showcase.interval_secs == 0 {
            return Err(AppError::InvalidConfig(
                "showcase.interval_secs must be positive when run_once is false",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    pub username: String,
    #[serde(default = "GithubConfig::default_user_agent")]
    pub user_agent: String,
    #[serde(default = "GithubConfig::default_api_base")]
    pub api_base: String,
}

impl GithubConfig {
    fn default_user_agent() -> String {
        "repo-showcase".to_string()
    }

    fn default_api_base() -> String {
        "https://api.github.com/".to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_dir")]
    pub dir: PathBuf,
    #[serde(default = "CacheConfig::default_expiry_secs")]
    pub expiry_secs: u64,
}

impl CacheConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(".cache/repo-showcase")
    }

    const fn default_expiry_secs() -> u64 {
        30 * 60
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            expiry_secs: Self::default_expiry_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShowcaseConfig {
    #[serde(default = "ShowcaseConfig::default_run_once")]
    pub run_once: bool,
    #[serde(default = "ShowcaseConfig::default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

impl ShowcaseConfig {
    const fn default_run_once() -> bool {
        true
    }

    const fn default_interval_secs() -> u64 {
        30 * 60
    }
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            run_once: Self::default_run_once(),
            interval_secs: Self::default_interval_secs(),
            output_path: None,
        }
    }
}

/// Display overrides and listing membership, keyed by repository name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverridesConfig {
    #[serde(default)]
    pub repos: Vec<RepoOverride>,
    /// Repositories hidden from the grid.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Repositories shown in the grid even when forked or empty.
    #[serde(default)]
    pub include: Vec<String>,
}

// Entries are a list rather than a name-keyed table so repository names keep
// their case and may contain dots.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoOverride {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub metrics_path: Option<PathBuf>,
}

impl ObservabilityConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            metrics_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_and_overrides_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_dir = dir.path().join("config");
        std::fs::create_dir_all(&config_dir).expect("config dir");
        std::fs::write(
            config_dir.join("default.toml"),
            r#"
[github]
username = "octocat"

[overrides]
exclude = ["old-fork"]

[[overrides.repos]]
name = "aCmd"
language = "Bash"
"#,
        )
        .expect("write config");

        let config = AppConfig::load_from_path(dir.path()).expect("config loads");
        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.github.api_base, "https://api.github.com/");
        assert_eq!(config.cache.expiry_secs, 1800);
        assert!(config.showcase.run_once);
        assert_eq!(config.overrides.exclude, vec!["old-fork".to_string()]);
        let entry = &config.overrides.repos[0];
        assert_eq!(entry.name, "aCmd");
        assert_eq!(entry.language.as_deref(), Some("Bash"));
        assert!(entry.url.is_none());
    }

    #[test]
    fn rejects_blank_username() {
        let config = AppConfig {
            github: GithubConfig {
                username: "  ".into(),
                user_agent: GithubConfig::default_user_agent(),
                api_base: GithubConfig::default_api_base(),
            },
            cache: CacheConfig::default(),
            showcase: ShowcaseConfig::default(),
            overrides: OverridesConfig::default(),
            observability: ObservabilityConfig::default(),
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidConfig(_))
        ));
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use super::controller::ControllerOptions;
use super::pagination::DEFAULT_NEIGHBOR_RADIUS;
use super::partials::DEFAULT_PARTIALS;
use super::pipeline::DEFAULT_PAGE_SIZE;
use super::platform;
use super::selection::SortMode;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Where the media page lives and which overlay partials go with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Local path or http(s) URL of the media page.
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_load_partials")]
    pub load_partials: bool,
    /// Partial files, relative to the media page.
    #[serde(default = "default_partials")]
    pub partials: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Paginate only when the page ships prev/next/page-number controls.
    #[default]
    Auto,
    Always,
    Never,
}

impl PaginationMode {
    pub fn as_override(self) -> Option<bool> {
        match self {
            Self::Auto => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_neighbor_radius")]
    pub neighbor_radius: usize,
    #[serde(default)]
    pub pagination: PaginationMode,
    #[serde(default)]
    pub default_sort: SortMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            load_partials: default_load_partials(),
            partials: default_partials(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            neighbor_radius: default_neighbor_radius(),
            pagination: PaginationMode::default(),
            default_sort: SortMode::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_source() -> String {
    "media.html".to_string()
}

fn default_load_partials() -> bool {
    true
}

fn default_partials() -> Vec<String> {
    DEFAULT_PARTIALS.iter().map(|p| p.to_string()).collect()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_neighbor_radius() -> usize {
    DEFAULT_NEIGHBOR_RADIUS
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("labsite/{}", env!("CARGO_PKG_VERSION"))
}

impl MediaConfig {
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            page_size: self.page_size.max(1),
            neighbor_radius: self.neighbor_radius,
            paginate: self.pagination.as_override(),
            initial_sort: self.default_sort,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout())
            .build()
    }
}

impl Config {
    /// Load the default config file, writing defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load an explicit file. Nothing is written.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

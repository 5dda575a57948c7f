//! Service configuration: server, document store and search tuning

use super::defaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable pointing at a TOML config file.
pub const CONFIG_PATH_ENV: &str = "COMPETITOR_SCOUT_CONFIG";

/// Config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "competitor_scout.toml";

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),
    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a competitor-scout deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Document store connection
    #[serde(default)]
    pub store: StoreConfig,

    /// Query parameters for family lookup and kNN retrieval
    #[serde(default)]
    pub search: SearchConfig,
}

impl ServiceConfig {
    /// Load configuration using the standard search order, then apply
    /// environment overrides.
    ///
    /// A file that fails to load is logged and skipped; the next source in
    /// the order is tried.
    pub fn load() -> Self {
        let mut config = Self::load_file_or_default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    fn load_file_or_default() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {CONFIG_PATH_ENV}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_PATH_ENV}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_PATH_ENV} points to non-existent file, falling back");
            }
        }

        // 2. Check ./competitor_scout.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No config file found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&contents, path)
    }

    /// Parse and validate TOML contents. `origin` is only used in errors.
    pub fn from_toml(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(origin.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production). Unparseable numeric values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ELASTICSEARCH_URL") {
            self.store.url = url;
        }
        if let Some(index) = lookup("COMPETITOR_SCOUT_INDEX") {
            self.store.index = index;
        }
        if let Some(addr) = lookup("COMPETITOR_SCOUT_BIND") {
            self.server.bind_address = addr;
        }
        if let Some(v) = lookup("COMPETITOR_SCOUT_STORE_TIMEOUT_SECS") {
            match v.parse() {
                Ok(n) => self.store.timeout_secs = n,
                Err(_) => warn!(value = %v, "Ignoring non-numeric COMPETITOR_SCOUT_STORE_TIMEOUT_SECS"),
            }
        }
    }

    /// Validate value ranges.
    ///
    /// Rules:
    /// - url and index must be non-empty
    /// - timeout must be at least one second
    /// - `k >= 1`, `k <= num_candidates <= 10000`
    /// - family page size must be at least 1
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.server.bind_address.trim().is_empty() {
            errors.push("server.bind_address must not be empty".to_string());
        }
        if self.store.url.trim().is_empty() {
            errors.push("store.url must not be empty".to_string());
        } else if !(self.store.url.starts_with("http://") || self.store.url.starts_with("https://")) {
            errors.push(format!("store.url must be an http(s) URL, got '{}'", self.store.url));
        }
        if self.store.index.trim().is_empty() {
            errors.push("store.index must not be empty".to_string());
        }
        if self.store.timeout_secs == 0 {
            errors.push("store.timeout_secs must be at least 1".to_string());
        }

        let s = &self.search;
        if s.k == 0 {
            errors.push("search.k must be at least 1".to_string());
        }
        if s.num_candidates < s.k {
            errors.push(format!(
                "search.num_candidates ({}) must be >= search.k ({})",
                s.num_candidates, s.k
            ));
        }
        if s.num_candidates > defaults::MAX_NUM_CANDIDATES {
            errors.push(format!(
                "search.num_candidates ({}) exceeds the maximum of {}",
                s.num_candidates,
                defaults::MAX_NUM_CANDIDATES
            ));
        }
        if s.family_page_size == 0 {
            errors.push("search.family_page_size must be at least 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Server
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Can be overridden by `COMPETITOR_SCOUT_BIND` or `--bind`.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    defaults::BIND_ADDRESS.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

// ============================================================================
// Store
// ============================================================================

/// Document store connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the search engine
    #[serde(default = "default_store_url")]
    pub url: String,

    /// Index holding the patent families
    #[serde(default = "default_index")]
    pub index: String,

    /// Deadline applied to every store request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Serve from an in-memory store loaded from this JSON file instead of
    /// the search engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures: Option<PathBuf>,
}

fn default_store_url() -> String {
    defaults::STORE_URL.to_string()
}

fn default_index() -> String {
    defaults::FAMILY_INDEX.to_string()
}

const fn default_timeout_secs() -> u64 {
    defaults::STORE_TIMEOUT_SECS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            index: default_index(),
            timeout_secs: default_timeout_secs(),
            fixtures: None,
        }
    }
}

// ============================================================================
// Search
// ============================================================================

/// Query sizing for the two store calls of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Candidate pool before kNN ranking
    #[serde(default = "default_num_candidates")]
    pub num_candidates: usize,

    /// Competitor hits returned by the kNN query
    #[serde(default = "default_k")]
    pub k: usize,

    /// Page size of the exact-match family lookup
    #[serde(default = "default_family_page_size")]
    pub family_page_size: usize,
}

const fn default_num_candidates() -> usize {
    defaults::KNN_NUM_CANDIDATES
}

const fn default_k() -> usize {
    defaults::KNN_RESULT_SIZE
}

const fn default_family_page_size() -> usize {
    defaults::FAMILY_PAGE_SIZE
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_candidates: default_num_candidates(),
            k: default_k(),
            family_page_size: default_family_page_size(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

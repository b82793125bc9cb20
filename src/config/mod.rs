// SPDX-License-Identifier: MPL-2.0
//! This module handles the gallery engine's configuration, including loading
//! and saving settings to a `gallery.toml` file.
//!
//! # Configuration Sections
//!
//! - `[api]` - Gallery API base URL, page size, request timeout
//! - `[grid]` - Responsive breakpoints and infinite-scroll threshold
//! - `[search]` - Debounce window and result cache capacity
//! - `[lightbox]` - Zoom bounds and swipe thresholds
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()` (the CLI `--config-dir` flag)
//! 3. Set `ESTATE_GALLERY_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use estate_gallery::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.api.base_url = "https://estate.example".to_string();
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "gallery.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "EstateGallery";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ESTATE_GALLERY_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Gallery API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the site exposing `/api/projects/...`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Media items requested per page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Media grid settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Viewports narrower than this render two columns.
    #[serde(default = "default_small_breakpoint")]
    pub small_breakpoint_px: f32,

    /// Viewports narrower than this render three columns.
    #[serde(default = "default_medium_breakpoint")]
    pub medium_breakpoint_px: f32,

    /// Intersection ratio for the infinite-scroll sentinel.
    #[serde(default = "default_sentinel_threshold")]
    pub sentinel_threshold: f32,

    /// Intersection ratio at which a grid image starts loading.
    #[serde(default = "default_image_threshold")]
    pub image_threshold: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            small_breakpoint_px: DEFAULT_SMALL_BREAKPOINT_PX,
            medium_breakpoint_px: DEFAULT_MEDIUM_BREAKPOINT_PX,
            sentinel_threshold: DEFAULT_SENTINEL_THRESHOLD,
            image_threshold: DEFAULT_LAZY_IMAGE_THRESHOLD,
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Quiet period before a search is issued, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Number of recent queries kept in the result cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            cache_capacity: DEFAULT_SEARCH_CACHE_CAPACITY,
        }
    }
}

impl SearchConfig {
    /// Debounce window as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Lightbox viewer settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LightboxConfig {
    /// Zoom increment per zoom-in/zoom-out step.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,

    /// Horizontal travel in pixels that qualifies as a swipe.
    #[serde(default = "default_swipe_distance")]
    pub swipe_distance_px: f32,

    /// Horizontal speed in px/ms that qualifies as a swipe.
    #[serde(default = "default_swipe_velocity")]
    pub swipe_velocity_px_per_ms: f32,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            swipe_distance_px: DEFAULT_SWIPE_DISTANCE_PX,
            swipe_velocity_px_per_ms: DEFAULT_SWIPE_VELOCITY_PX_PER_MS,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Gallery engine configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub lightbox: LightboxConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_small_breakpoint() -> f32 {
    DEFAULT_SMALL_BREAKPOINT_PX
}

fn default_medium_breakpoint() -> f32 {
    DEFAULT_MEDIUM_BREAKPOINT_PX
}

fn default_sentinel_threshold() -> f32 {
    DEFAULT_SENTINEL_THRESHOLD
}

fn default_image_threshold() -> f32 {
    DEFAULT_LAZY_IMAGE_THRESHOLD
}

fn default_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_cache_capacity() -> usize {
    DEFAULT_SEARCH_CACHE_CAPACITY
}

fn default_zoom_step() -> f32 {
    DEFAULT_ZOOM_STEP
}

fn default_swipe_distance() -> f32 {
    DEFAULT_SWIPE_DISTANCE_PX
}

fn default_swipe_velocity() -> f32 {
    DEFAULT_SWIPE_VELOCITY_PX_PER_MS
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config directory.
///
/// # Resolution Order
///
/// 1. `override_path` parameter (if `Some`)
/// 2. `ESTATE_GALLERY_CONFIG_DIR` environment variable (if set and non-empty)
/// 3. Platform config directory with the app name appended
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("[Config] Falling back to defaults: {err}");
                    return (
                        Config::default(),
                        Some(format!("Could not read {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined or written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined or written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    let path = config_path_with_override(base_dir)
        .ok_or_else(|| Error::Config("no config directory available".to_string()))?;
    save_to_path(config, &path)
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem operation fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let mut config = Config::default();
        config.api.base_url = "https://estate.example".to_string();
        config.search.debounce_ms = 500;
        config.lightbox.zoom_step = 0.5;

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "[api]\nbase_url = \"http://10.0.0.2\"\n")
            .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("partial config should load");
        assert_eq!(loaded.api.base_url, "http://10.0.0.2");
        assert_eq!(loaded.api.page_limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(loaded.grid, GridConfig::default());
        assert_eq!(loaded.search, SearchConfig::default());
    }

    #[test]
    fn invalid_toml_returns_defaults_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "not = valid = toml")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn absent_file_returns_defaults_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().join("empty")));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_with_override_creates_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let dir = temp_dir.path().join("deep").join("path");
        save_with_override(&Config::default(), Some(dir.clone())).expect("save should work");
        assert!(dir.join(CONFIG_FILE).exists());
    }

    #[test]
    fn durations_are_derived_from_settings() {
        let config = Config::default();
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Site configuration: locale defaults, offers API endpoints, slot animation
//! defaults and promo-terms fallback routes.
//!
//! # Configuration Sections
//!
//! - `[locale]` - Default locale for pages without a `locale` parameter
//! - `[offers]` - Offers API hosts, default query parameters, routing
//! - `[slot]` - Slot animation timings and colors
//! - `[fallback_routes.<product>.<customer>]` - Static terms pages per market
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set `CC_BLOCKS_CONFIG_DIR` environment variable
//! 3. Falls back to the platform config directory
//! 4. Falls back to the configuration embedded in the binary
//!
//! # Examples
//!
//! ```no_run
//! use cc_blocks::config;
//!
//! let mut config = config::load().unwrap_or_default();
//! config.offers.production_hostname = "www.example.com".to_string();
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::offer::FallbackRoutes;
use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "site.toml";
const APP_NAME: &str = "CcBlocks";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "CC_BLOCKS_CONFIG_DIR";

#[derive(RustEmbed)]
#[folder = "assets/config/"]
struct ConfigAsset;

/// Returns the content of a configuration file embedded in the binary.
pub(crate) fn embedded_file(name: &str) -> Option<String> {
    ConfigAsset::get(name).map(|file| String::from_utf8_lossy(file.data.as_ref()).into_owned())
}

// =============================================================================
// Section Structs
// =============================================================================

/// Locale used when the page does not ask for one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    #[serde(default = "default_ietf")]
    pub default_ietf: String,

    /// URL path prefix of the default locale (empty for the root site).
    #[serde(default)]
    pub default_prefix: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_ietf: default_ietf(),
            default_prefix: String::new(),
        }
    }
}

/// Offers API endpoints and request defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OffersConfig {
    pub offer_api_base: String,
    pub selector_api_base: String,
    pub stage_offer_api_base: String,
    pub stage_selector_api_base: String,
    pub api_key: String,
    pub service_providers: String,
    /// Hostname that implies production when no `env` parameter is given.
    pub production_hostname: String,
    pub not_found_path: String,
}

impl Default for OffersConfig {
    fn default() -> Self {
        Self {
            offer_api_base: "https://aos.adobe.io/offers/".to_string(),
            selector_api_base: "https://aos.adobe.io/offers:search.selector".to_string(),
            stage_offer_api_base: "https://aos-stage.adobe.io/offers/".to_string(),
            stage_selector_api_base: "https://aos-stage.adobe.io/offers:search.selector"
                .to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            service_providers: DEFAULT_SERVICE_PROVIDERS.to_string(),
            production_hostname: PRODUCTION_HOSTNAME.to_string(),
            not_found_path: NOT_FOUND_PATH.to_string(),
        }
    }
}

/// Defaults applied when an authored slot table leaves a value out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlotDefaults {
    pub total_duration_ms: u64,
    pub initial_wait_ms: u64,
    pub prefix_color: String,
    pub slot_color: String,
}

impl Default for SlotDefaults {
    fn default() -> Self {
        Self {
            total_duration_ms: DEFAULT_TOTAL_DURATION_MS,
            initial_wait_ms: DEFAULT_INITIAL_WAIT_MS,
            prefix_color: DEFAULT_PREFIX_COLOR.to_string(),
            slot_color: DEFAULT_SLOT_COLOR.to_string(),
        }
    }
}

/// Complete site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub locale: LocaleConfig,

    #[serde(default)]
    pub offers: OffersConfig,

    #[serde(default)]
    pub slot: SlotDefaults,

    #[serde(default)]
    pub fallback_routes: FallbackRoutes,
}

fn default_ietf() -> String {
    DEFAULT_IETF.to_string()
}

// =============================================================================
// Loading and Saving
// =============================================================================

fn get_default_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Returns the configuration embedded in the binary.
pub fn embedded() -> Result<SiteConfig> {
    let content = embedded_file(CONFIG_FILE)
        .ok_or_else(|| Error::Config(format!("embedded {CONFIG_FILE} is missing")))?;
    Ok(toml::from_str(&content)?)
}

/// Loads the user configuration if one exists, otherwise the embedded one.
pub fn load() -> Result<SiteConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    embedded()
}

pub fn save(config: &SiteConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a configuration file.
///
/// Malformed content yields the default configuration rather than an error,
/// so a broken file never takes a page down.
pub fn load_from_path(path: &Path) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_else(|err| {
        log::warn!("ignoring malformed config {}: {err}", path.display());
        SiteConfig::default()
    }))
}

pub fn save_to_path(config: &SiteConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

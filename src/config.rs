use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::SiteError;

/// Site configuration: content source credentials and build settings
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Contentful space identifier (falls back to CONTENTFUL_SPACE_ID)
    pub space_id: Option<String>,
    /// Content Delivery API token (falls back to CONTENTFUL_ACCESS_KEY)
    pub access_token: Option<String>,
    /// Space environment to read from
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Base URL of the Content Delivery API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Content type identifier of recipe entries
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Depth of linked entries/assets the API should include
    #[serde(default = "default_include_depth")]
    pub include_depth: u8,
    /// Seconds after which a generated page may be regenerated
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Directory generated pages are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Factor applied to the featured image's intrinsic dimensions
    #[serde(default = "default_image_scale")]
    pub image_scale: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            space_id: None,
            access_token: None,
            environment: default_environment(),
            base_url: default_base_url(),
            content_type: default_content_type(),
            include_depth: default_include_depth(),
            revalidate_secs: default_revalidate_secs(),
            timeout: default_timeout(),
            output_dir: default_output_dir(),
            image_scale: default_image_scale(),
        }
    }
}

// Default value functions
fn default_environment() -> String {
    "master".to_string()
}

fn default_base_url() -> String {
    "https://cdn.contentful.com".to_string()
}

fn default_content_type() -> String {
    "recipe".to_string()
}

fn default_include_depth() -> u8 {
    2
}

fn default_revalidate_secs() -> u64 {
    1
}

fn default_timeout() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_image_scale() -> u32 {
    4
}

impl SiteConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. recipes.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__ACCESS_TOKEN
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Space id from config, then CONTENTFUL_SPACE_ID
    pub fn resolve_space_id(&self) -> Result<String, SiteError> {
        self.space_id
            .clone()
            .or_else(|| std::env::var("CONTENTFUL_SPACE_ID").ok())
            .filter(|s| !s.is_empty())
            .ok_or(SiteError::MissingCredential("CONTENTFUL_SPACE_ID"))
    }

    /// Access token from config, then CONTENTFUL_ACCESS_KEY
    pub fn resolve_access_token(&self) -> Result<String, SiteError> {
        self.access_token
            .clone()
            .or_else(|| std::env::var("CONTENTFUL_ACCESS_KEY").ok())
            .filter(|s| !s.is_empty())
            .ok_or(SiteError::MissingCredential("CONTENTFUL_ACCESS_KEY"))
    }

    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`SiteConfig::load`] for the layering order.
pub fn load_config() -> Result<SiteConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipes").required(false))
        // Use double underscore for nested: RECIPES__OUTPUT_DIR
        .add_source(
            Environment::with_prefix("RECIPES")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

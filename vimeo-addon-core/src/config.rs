use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use vimeo_addon_client::{VimeoClient, VimeoError, DEFAULT_API_URL, DEFAULT_PLAYER_URL};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub vimeo: VimeoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Which shape channels take in the host's content model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddonVariant {
    /// Channels are browsable directories; items are videos.
    #[default]
    Categories,
    /// Channels are playable items fed by their latest video.
    Channels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VimeoConfig {
    pub api_url: String,
    pub player_url: String,
    pub token: Option<String>,
    pub debug: bool,
    pub connect_timeout_seconds: u64,
    pub timeout_seconds: u64,
    pub variant: AddonVariant,
}

impl Default for VimeoConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            player_url: DEFAULT_PLAYER_URL.to_string(),
            token: None,
            debug: false,
            connect_timeout_seconds: 10,
            timeout_seconds: 30,
            variant: AddonVariant::default(),
        }
    }
}

impl VimeoConfig {
    /// Build the HTTP client described by this section
    pub fn build_client(&self) -> Result<VimeoClient, VimeoError> {
        let mut client = VimeoClient::with_timeouts(
            &self.api_url,
            Duration::from_secs(self.connect_timeout_seconds),
            Duration::from_secs(self.timeout_seconds),
        )?;
        client.set_player_url(&self.player_url)?;
        client.set_debug(self.debug);
        if let Some(ref token) = self.token {
            client.set_token(token.clone());
        }
        Ok(client)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. Config file (if provided)
    /// 3. Defaults (lowest priority)
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::load_layers(config_file)?;
        config.apply_legacy_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_layers(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        // VIMEO_ADDON_SERVER__PORT, VIMEO_ADDON_VIMEO__API_URL, ...
        builder = builder.add_source(
            Environment::with_prefix("VIMEO_ADDON")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Apply the plain `VIMEO_TOKEN` and `DEBUG` variables. An explicitly
    /// configured token takes precedence.
    pub fn apply_legacy_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.vimeo.token.is_none() {
            self.vimeo.token = lookup("VIMEO_TOKEN").filter(|token| !token.is_empty());
        }
        if lookup("DEBUG").is_some_and(|flag| !flag.is_empty()) {
            self.vimeo.debug = true;
        }
    }

    /// Check for misconfigurations that would only surface at request time
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("server.port must be greater than 0".to_string());
        }
        for (name, value) in [
            ("vimeo.api_url", &self.vimeo.api_url),
            ("vimeo.player_url", &self.vimeo.player_url),
        ] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                errors.push(format!("{name} must be an http(s) URL, got {value:?}"));
            }
        }
        if self.vimeo.timeout_seconds == 0 {
            errors.push("vimeo.timeout_seconds must be greater than 0".to_string());
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            errors.push(format!(
                "logging.format must be \"json\" or \"pretty\", got {:?}",
                self.logging.format
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Get HTTP address
    #[must_use]
    pub fn http_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

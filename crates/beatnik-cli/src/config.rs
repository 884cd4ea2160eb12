//! Configuration loading for the beatnik CLI.
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/beatnik/config.toml` (system)
//! 2. `~/.config/beatnik/config.toml` (user)
//! 3. `./beatnik.toml`, or the file given with `--config`
//! 4. Environment variables (`BEATNIK_*`, `RUST_LOG`)
//!
//! ```toml
//! [defaults]
//! bpm = 120
//!
//! [telemetry]
//! log_level = "warn"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use beatnik::{DEFAULT_BPM, MAX_BPM, MIN_BPM};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid config value {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Complete beatnik configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BeatnikConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Values applied to tracks that leave them unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Tempo for tracks without a `bpm:` directive.
    /// Default: 120
    #[serde(default = "DefaultsConfig::default_bpm")]
    pub bpm: u32,
}

impl DefaultsConfig {
    fn default_bpm() -> u32 {
        DEFAULT_BPM
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            bpm: Self::default_bpm(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// tracing-subscriber filter directive.
    /// Default: "warn"
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

impl BeatnikConfig {
    /// Load configuration from all sources, with an optional explicit file.
    ///
    /// If `config_path` is provided, it replaces `./beatnik.toml`. System and
    /// user configs still load first.
    pub fn load_from(config_path: Option<&Path>) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = BeatnikConfig::default();

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::FileRead {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                });
            }
        }

        for path in discover_config_files(config_path) {
            let contents =
                std::fs::read_to_string(&path).map_err(|e| ConfigError::FileRead {
                    path: path.clone(),
                    source: e,
                })?;
            apply_toml(&mut config, &contents, &path)?;
            sources.files.push(path);
        }

        apply_env_overrides(&mut config, &mut sources, |key| env::var(key).ok());
        config.validate()?;

        Ok((config, sources))
    }

    /// Reject values the converter cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BPM..=MAX_BPM).contains(&self.defaults.bpm) {
            return Err(ConfigError::Invalid {
                key: "defaults.bpm".to_string(),
                message: format!(
                    "{} is outside {}..={}",
                    self.defaults.bpm, MIN_BPM, MAX_BPM
                ),
            });
        }
        Ok(())
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        let mut output = String::new();

        output.push_str("# beatnik configuration\n\n");

        output.push_str("[defaults]\n");
        output.push_str(&format!("bpm = {}\n", self.defaults.bpm));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!("log_level = \"{}\"\n", self.telemetry.log_level));

        output
    }
}

/// Discover config files, optionally with a CLI override path.
///
/// Returns paths in load order (system, user, local/cli). Only returns
/// files that exist.
pub fn discover_config_files(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/beatnik/config.toml");
    if system.exists() {
        files.push(system);
    }

    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("beatnik/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    // CLI override takes precedence over local
    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from("beatnik.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Layer the values present in a TOML document over `config`.
///
/// Keys missing from the document keep their current value.
fn apply_toml(config: &mut BeatnikConfig, contents: &str, path: &Path) -> Result<(), ConfigError> {
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(defaults) = table.get("defaults").and_then(|v| v.as_table()) {
        if let Some(v) = defaults.get("bpm") {
            let bpm = v
                .as_integer()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: format!("defaults.bpm must be a positive integer, got {v}"),
                })?;
            config.defaults.bpm = bpm;
        }
    }

    if let Some(telemetry) = table.get("telemetry").and_then(|v| v.as_table()) {
        if let Some(v) = telemetry.get("log_level").and_then(|v| v.as_str()) {
            config.telemetry.log_level = v.to_string();
        }
    }

    Ok(())
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(
    config: &mut BeatnikConfig,
    sources: &mut ConfigSources,
    var: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = var("BEATNIK_DEFAULT_BPM") {
        if let Ok(bpm) = v.parse() {
            config.defaults.bpm = bpm;
            sources.env_overrides.push("BEATNIK_DEFAULT_BPM".to_string());
        }
    }
    if let Some(v) = var("BEATNIK_LOG_LEVEL") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("BEATNIK_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Some(v) = var("RUST_LOG") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}

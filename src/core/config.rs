//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.netbridge/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NetbridgeConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_url: Option<String>,
    pub default_params: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_URL: &str = "https://jsonplaceholder.typicode.com/posts/1";
pub const DEFAULT_PARAMS: &str = r#"{"userId": 1}"#;
pub const DEFAULT_LOG_FILE: &str = "netbridge.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub url: String,
    pub params: String,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub url: Option<String>,
    pub params: Option<String>,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Where the loaded settings came from.
///
/// Loading runs before the file logger exists, so the outcome is returned
/// and logged by the caller once logging is up.
#[derive(Debug, PartialEq)]
pub enum ConfigSource {
    /// Read from an existing file.
    File(PathBuf),
    /// The file was missing and a commented template was written.
    Generated(PathBuf),
    /// The file was missing and the template could not be written.
    TemplateFailed { path: PathBuf, reason: String },
    /// No home directory, so no file was looked up.
    NoHomeDir,
}

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: NetbridgeConfig,
    pub source: ConfigSource,
}

impl LoadedConfig {
    /// Emit the load outcome to the log.
    pub fn log_source(&self) {
        match &self.source {
            ConfigSource::File(path) => info!("Loaded config from {}", path.display()),
            ConfigSource::Generated(path) => {
                info!("No config file found, generated default at {}", path.display())
            }
            ConfigSource::TemplateFailed { path, reason } => {
                warn!("Failed to write default config to {}: {}", path.display(), reason)
            }
            ConfigSource::NoHomeDir => {
                warn!("Could not determine home directory, using default config")
            }
        }
        debug!("Config: {:?}", self.config);
    }
}

/// Returns the path to `~/.netbridge/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".netbridge").join("config.toml"))
}

/// Load config from `~/.netbridge/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NetbridgeConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(LoadedConfig {
            config: NetbridgeConfig::default(),
            source: ConfigSource::NoHomeDir,
        }),
    }
}

/// Load config from an explicit path, generating the template if absent.
pub fn load_config_from(path: &Path) -> Result<LoadedConfig, ConfigError> {
    if !path.exists() {
        let source = match generate_default_config(path) {
            Ok(()) => ConfigSource::Generated(path.to_path_buf()),
            Err(e) => ConfigSource::TemplateFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        };
        return Ok(LoadedConfig {
            config: NetbridgeConfig::default(),
            source,
        });
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NetbridgeConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    Ok(LoadedConfig {
        config,
        source: ConfigSource::File(path.to_path_buf()),
    })
}

/// Writes a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# netbridge configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_url = "https://jsonplaceholder.typicode.com/posts/1"   # Or NETBRIDGE_URL
# default_params = '{"userId": 1}'                               # Or NETBRIDGE_PARAMS
# log_level = "debug"    # "off", "error", "warn", "info", "debug", "trace"
# log_file = "netbridge.log"
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Parse a level name, case-insensitively. Unknown names return `None`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NetbridgeConfig, cli: &CliOverrides) -> ResolvedConfig {
    // URL: CLI → env → config → default
    let url = cli
        .url
        .clone()
        .or_else(|| std::env::var("NETBRIDGE_URL").ok())
        .or_else(|| config.general.default_url.clone())
        .unwrap_or_else(|| DEFAULT_URL.to_string());

    // Params text: CLI → env → config → default
    let params = cli
        .params
        .clone()
        .or_else(|| std::env::var("NETBRIDGE_PARAMS").ok())
        .or_else(|| config.general.default_params.clone())
        .unwrap_or_else(|| DEFAULT_PARAMS.to_string());

    // Log level: CLI → env → config → default. Unknown names fall through.
    let log_level = cli
        .log_level
        .as_deref()
        .and_then(parse_level)
        .or_else(|| {
            std::env::var("NETBRIDGE_LOG_LEVEL")
                .ok()
                .as_deref()
                .and_then(parse_level)
        })
        .or_else(|| config.general.log_level.as_deref().and_then(parse_level))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = config
        .general
        .log_file
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        url,
        params,
        log_level,
        log_file: PathBuf::from(log_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = NetbridgeConfig::default();
        assert!(config.general.default_url.is_none());
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = NetbridgeConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(!resolved.url.is_empty());
        assert!(!resolved.params.is_empty());
    }

    #[test]
    fn test_resolve_cli_wins_over_config() {
        let config = NetbridgeConfig {
            general: GeneralConfig {
                default_url: Some("http://from-config/".to_string()),
                default_params: Some("{}".to_string()),
                log_level: Some("warn".to_string()),
                log_file: Some("other.log".to_string()),
            },
        };
        let cli = CliOverrides {
            url: Some("http://from-cli/".to_string()),
            params: Some(r#"{"a": "1"}"#.to_string()),
            log_level: Some("trace".to_string()),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.url, "http://from-cli/");
        assert_eq!(resolved.params, r#"{"a": "1"}"#);
        assert_eq!(resolved.log_level, LevelFilter::Trace);
        assert_eq!(resolved.log_file, PathBuf::from("other.log"));
    }

    #[test]
    fn test_parse_level_names() {
        assert_eq!(parse_level("OFF"), Some(LevelFilter::Off));
        assert_eq!(parse_level(" info "), Some(LevelFilter::Info));
        assert_eq!(parse_level("Warn"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn test_unknown_cli_level_falls_through_to_config() {
        let config = NetbridgeConfig {
            general: GeneralConfig {
                log_level: Some("error".to_string()),
                ..Default::default()
            },
        };
        let cli = CliOverrides {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        // NETBRIDGE_LOG_LEVEL is not set in the test environment.
        if std::env::var("NETBRIDGE_LOG_LEVEL").is_err() {
            assert_eq!(resolve(&config, &cli).log_level, LevelFilter::Error);
        }
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
default_url = "http://localhost:8080/echo"
"#;
        let config: NetbridgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.default_url.as_deref(),
            Some("http://localhost:8080/echo")
        );
        assert!(config.general.default_params.is_none());
    }

    #[test]
    fn test_empty_toml_parses() {
        let config: NetbridgeConfig = toml::from_str("").unwrap();
        assert!(config.general.default_url.is_none());
    }

    #[test]
    fn test_missing_file_generates_template() {
        let dir = std::env::temp_dir().join(format!("netbridge-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.config.general.default_url.is_none());
        assert_eq!(loaded.source, ConfigSource::Generated(path.clone()));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("# [general]"));
        // The generated template is all comments, so it loads as defaults too.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.config.general.default_url.is_none());
        assert_eq!(reloaded.source, ConfigSource::File(path.clone()));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unwritable_template_is_reported() {
        let dir = std::env::temp_dir().join(format!("netbridge-blocked-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        // A plain file where the config directory should be
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");

        let loaded = load_config_from(&path).unwrap();
        assert!(loaded.config.general.default_url.is_none());
        assert!(matches!(
            loaded.source,
            ConfigSource::TemplateFailed { ref path, .. } if path.ends_with("not-a-dir/config.toml")
        ));
        loaded.log_source();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("netbridge-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\ndefault_url = 1").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let _ = fs::remove_dir_all(&dir);
    }
}

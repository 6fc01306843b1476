//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.internship-assistant/config.toml`. If missing on first
//! run, a commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// URL loaded automatically at startup.
    pub initial_url: Option<String>,
    /// How long a notification stays on screen.
    pub notification_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub scrape_function: Option<String>,
    pub chat_function: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SCRAPE_FUNCTION: &str = "scrape-regulations";
pub const DEFAULT_CHAT_FUNCTION: &str = "chat";
pub const DEFAULT_NOTIFICATION_SECS: u64 = 4;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub scrape_function: String,
    pub chat_function: String,
    pub initial_url: Option<String>,
    pub notification_secs: u64,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub initial_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// No backend URL from any source.
    MissingBaseUrl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::MissingBaseUrl => write!(
                f,
                "no backend URL configured (set [backend] base_url, ASSISTANT_BACKEND_URL, or --backend-url)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.internship-assistant/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".internship-assistant").join("config.toml"))
}

/// Load config from the default location.
///
/// A missing file yields `AssistantConfig::default()` after writing a
/// commented-out template; a malformed file is `ConfigError::Parse`.
pub fn load_config() -> Result<AssistantConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(AssistantConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AssistantConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AssistantConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AssistantConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Internship Assistant configuration
# All settings are optional. Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# base_url = "https://your-project.functions.example"   # Or ASSISTANT_BACKEND_URL
# api_key = "..."                                       # Or ASSISTANT_API_KEY
# scrape_function = "scrape-regulations"
# chat_function = "chat"

# [general]
# initial_url = "https://univ.edu/internship-regulations"
# notification_secs = 4
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Environment overrides, read once so resolution stays testable.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("ASSISTANT_BACKEND_URL").ok(),
            api_key: std::env::var("ASSISTANT_API_KEY").ok(),
        }
    }
}

/// Collapse defaults → config file → env vars → CLI into concrete values.
pub fn resolve(
    config: &AssistantConfig,
    env: &EnvOverrides,
    cli: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    // Base URL: CLI → env → config
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env.base_url.clone())
        .or_else(|| config.backend.base_url.clone())
        .map(|url| url.trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .ok_or(ConfigError::MissingBaseUrl)?;

    let api_key = env
        .api_key
        .clone()
        .or_else(|| config.backend.api_key.clone())
        .filter(|key| !key.is_empty());

    let initial_url = cli
        .initial_url
        .clone()
        .or_else(|| config.general.initial_url.clone());

    Ok(ResolvedConfig {
        base_url,
        api_key,
        scrape_function: config
            .backend
            .scrape_function
            .clone()
            .unwrap_or_else(|| DEFAULT_SCRAPE_FUNCTION.to_string()),
        chat_function: config
            .backend
            .chat_function
            .clone()
            .unwrap_or_else(|| DEFAULT_CHAT_FUNCTION.to_string()),
        initial_url,
        // A zero timeout would dismiss every toast before its first frame
        notification_secs: config
            .general
            .notification_secs
            .unwrap_or(DEFAULT_NOTIFICATION_SECS)
            .max(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_base(url: &str) -> AssistantConfig {
        AssistantConfig {
            backend: BackendConfig {
                base_url: Some(url.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_requires_base_url() {
        let err = resolve(
            &AssistantConfig::default(),
            &EnvOverrides::default(),
            &CliOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseUrl));
    }

    #[test]
    fn test_resolve_uses_defaults() {
        let resolved = resolve(
            &with_base("https://fn.example/"),
            &EnvOverrides::default(),
            &CliOverrides::default(),
        )
        .unwrap();
        assert_eq!(resolved.base_url, "https://fn.example");
        assert_eq!(resolved.scrape_function, DEFAULT_SCRAPE_FUNCTION);
        assert_eq!(resolved.chat_function, DEFAULT_CHAT_FUNCTION);
        assert_eq!(resolved.notification_secs, DEFAULT_NOTIFICATION_SECS);
        assert!(resolved.api_key.is_none());
        assert!(resolved.initial_url.is_none());
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = with_base("https://from-config");
        let env = EnvOverrides {
            base_url: Some("https://from-env".into()),
            api_key: Some("env-key".into()),
        };
        let resolved = resolve(&config, &env, &CliOverrides::default()).unwrap();
        assert_eq!(resolved.base_url, "https://from-env");
        assert_eq!(resolved.api_key.as_deref(), Some("env-key"));

        let cli = CliOverrides {
            base_url: Some("https://from-cli".into()),
            initial_url: Some("https://univ.edu/regs".into()),
        };
        let resolved = resolve(&config, &env, &cli).unwrap();
        assert_eq!(resolved.base_url, "https://from-cli");
        assert_eq!(resolved.initial_url.as_deref(), Some("https://univ.edu/regs"));
    }

    #[test]
    fn test_empty_api_key_treated_as_absent() {
        let mut config = with_base("https://fn.example");
        config.backend.api_key = Some(String::new());
        let resolved =
            resolve(&config, &EnvOverrides::default(), &CliOverrides::default()).unwrap();
        assert!(resolved.api_key.is_none());
    }

    #[test]
    fn test_toml_parses() {
        let toml_str = r#"
[general]
initial_url = "https://univ.edu/regs"
notification_secs = 7

[backend]
base_url = "https://fn.example"
api_key = "anon"
scrape_function = "scrape"
"#;
        let config: AssistantConfig = toml::from_str(toml_str).unwrap();
        let resolved =
            resolve(&config, &EnvOverrides::default(), &CliOverrides::default()).unwrap();
        assert_eq!(resolved.scrape_function, "scrape");
        assert_eq!(resolved.chat_function, DEFAULT_CHAT_FUNCTION);
        assert_eq!(resolved.notification_secs, 7);
        assert_eq!(resolved.initial_url.as_deref(), Some("https://univ.edu/regs"));
    }

    #[test]
    fn test_zero_notification_secs_is_raised_to_one() {
        let mut config = with_base("https://fn.example");
        config.general.notification_secs = Some(0);
        let resolved =
            resolve(&config, &EnvOverrides::default(), &CliOverrides::default()).unwrap();
        assert_eq!(resolved.notification_secs, 1);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: AssistantConfig = toml::from_str("[general]\n").unwrap();
        assert!(config.backend.base_url.is_none());
        assert!(config.general.initial_url.is_none());
    }

    #[test]
    fn test_missing_file_generates_template() {
        let dir = std::env::temp_dir().join(format!(
            "internship-assistant-config-test-{}",
            std::process::id()
        ));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.backend.base_url.is_none());
        assert!(path.exists());

        // The generated template is entirely commented out and parses back to defaults
        let reparsed = load_config_from(&path).unwrap();
        assert!(reparsed.backend.base_url.is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!(
            "internship-assistant-bad-config-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[backend\nbase_url = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}

//! Configuration loader for chatrelay.
//!
//! Resolution order, later wins:
//! 1. [`RelayConfig::default()`]
//! 2. TOML file (`--config <path>`, or `chatrelay.toml` in the working dir)
//! 3. Environment variables (after `.env` has been loaded)

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use chatrelay_types::assistant::AssistantId;
use chatrelay_types::config::{RelayConfig, SessionScope};
use chatrelay_types::error::ConfigError;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "chatrelay.toml";

pub const ENV_PLATFORM_API_KEY: &str = "TASKINGAI_API_KEY";
pub const ENV_PLATFORM_BASE_URL: &str = "TASKINGAI_BASE_URL";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_PRIMARY_ASSISTANT: &str = "ASSISTANT_ID1";
pub const ENV_FALLBACK_ASSISTANT: &str = "ASSISTANT_ID2";
pub const ENV_USE_FALLBACK: &str = "USE_FALLBACK";
pub const ENV_SESSION_SCOPE: &str = "CHATRELAY_SESSION_SCOPE";
pub const ENV_REQUEST_TIMEOUT: &str = "CHATRELAY_REQUEST_TIMEOUT_SECS";

/// Load a `.env` file from the working directory or its parents, if present.
///
/// Variables already set in the process environment are not overridden.
/// Returns the path that was read, or `None` when there is no `.env` file.
/// Called before logging is set up, so the caller reports the outcome.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(ConfigError::Read {
            path: ".env".to_string(),
            message: err.to_string(),
        }),
    }
}

/// Load configuration from the optional file and the process environment.
pub async fn load_relay_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let config = load_config_file(path).await?;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Read and parse the TOML config file.
///
/// An explicitly given path must exist. The default file is optional.
pub async fn load_config_file(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let (config_path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
            tracing::debug!(
                "No {} found, using defaults and environment",
                config_path.display()
            );
            return Ok(RelayConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: config_path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    let config = toml::from_str::<RelayConfig>(&content).map_err(|err| ConfigError::Parse {
        path: config_path.display().to_string(),
        message: err.to_string(),
    })?;

    tracing::debug!("Loaded configuration from {}", config_path.display());
    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` returns the value of a variable, or `None` when unset. Empty
/// values count as unset. `USE_FALLBACK` enables fallback only when it is
/// exactly `"true"`; any other value disables it.
pub fn apply_env_overrides<F>(mut config: RelayConfig, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(key) = get(ENV_PLATFORM_API_KEY) {
        config.platform.api_key = Some(SecretString::from(key));
    }
    if let Some(url) = get(ENV_PLATFORM_BASE_URL) {
        config.platform.base_url = url;
    }
    if let Some(key) = get(ENV_OPENAI_API_KEY) {
        config.provider_keys.openai = Some(SecretString::from(key));
    }
    if let Some(key) = get(ENV_ANTHROPIC_API_KEY) {
        config.provider_keys.anthropic = Some(SecretString::from(key));
    }
    if let Some(id) = get(ENV_PRIMARY_ASSISTANT) {
        config.assistants.primary = Some(AssistantId::from(id));
    }
    if let Some(id) = get(ENV_FALLBACK_ASSISTANT) {
        config.assistants.fallback = Some(AssistantId::from(id));
    }
    if let Some(flag) = get(ENV_USE_FALLBACK) {
        config.use_fallback = flag == "true";
    }
    if let Some(scope) = get(ENV_SESSION_SCOPE) {
        config.session_scope = scope
            .parse::<SessionScope>()
            .map_err(|_| ConfigError::InvalidValue {
                key: ENV_SESSION_SCOPE.to_string(),
                value: scope.clone(),
            })?;
    }
    if let Some(timeout) = get(ENV_REQUEST_TIMEOUT) {
        config.request_timeout_secs = timeout
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_REQUEST_TIMEOUT.to_string(),
                value: timeout.clone(),
            })?;
    }

    Ok(config)
}

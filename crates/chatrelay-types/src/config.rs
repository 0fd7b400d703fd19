//! Configuration types for chatrelay.
//!
//! `RelayConfig` is deserialized from an optional TOML file and then
//! overlaid with environment variables by the infra loader. All fields have
//! defaults, so an empty file (or no file) is valid.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use secrecy::SecretString;

use crate::assistant::AssistantId;

/// Default base URL of the hosted assistant platform.
pub const DEFAULT_PLATFORM_BASE_URL: &str = "https://api.tasking.ai";

/// How cached conversation ids are keyed in the session registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionScope {
    /// One conversation per (assistant, user). The fallback assistant gets its
    /// own conversation instead of reusing the primary's id.
    #[default]
    PerAssistant,
    /// One conversation per user, shared by every assistant.
    Shared,
}

impl fmt::Display for SessionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionScope::PerAssistant => write!(f, "per_assistant"),
            SessionScope::Shared => write!(f, "shared"),
        }
    }
}

impl FromStr for SessionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per_assistant" | "per-assistant" => Ok(SessionScope::PerAssistant),
            "shared" => Ok(SessionScope::Shared),
            other => Err(format!("invalid session scope: '{other}'")),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    /// Retry against the fallback assistant when the primary fails.
    #[serde(default)]
    pub use_fallback: bool,

    #[serde(default)]
    pub session_scope: SessionScope,

    /// Per-request timeout for calls to the assistant platform.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub platform: PlatformConfig,

    #[serde(default)]
    pub assistants: AssistantsConfig,

    #[serde(default)]
    pub provider_keys: ProviderKeys,
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            use_fallback: false,
            session_scope: SessionScope::default(),
            request_timeout_secs: default_request_timeout_secs(),
            platform: PlatformConfig::default(),
            assistants: AssistantsConfig::default(),
            provider_keys: ProviderKeys::default(),
        }
    }
}

/// Connection settings for the hosted assistant platform.
#[derive(Debug, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default, deserialize_with = "deserialize_secret")]
    pub api_key: Option<SecretString>,
}

fn default_base_url() -> String {
    DEFAULT_PLATFORM_BASE_URL.to_string()
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

/// The two assistant configurations used by the dispatch strategy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantsConfig {
    #[serde(default)]
    pub primary: Option<AssistantId>,
    #[serde(default)]
    pub fallback: Option<AssistantId>,
}

/// Model-provider credentials the platform-side assistants rely on.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderKeys {
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub openai: Option<SecretString>,
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub anthropic: Option<SecretString>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| !v.is_empty())
        .map(SecretString::from))
}

impl RelayConfig {
    /// Names of required settings that are unset, as their environment
    /// variable names. The fallback id is only required when fallback is on.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.platform.api_key.is_none() {
            missing.push("TASKINGAI_API_KEY");
        }
        if self.assistants.primary.as_ref().is_none_or(AssistantId::is_empty) {
            missing.push("ASSISTANT_ID1");
        }
        if self.use_fallback
            && self.assistants.fallback.as_ref().is_none_or(AssistantId::is_empty)
        {
            missing.push("ASSISTANT_ID2");
        }
        missing
    }

    /// A printable view with secrets reduced to set/unset.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            platform_base_url: self.platform.base_url.clone(),
            platform_api_key_set: self.platform.api_key.is_some(),
            primary_assistant: self.assistants.primary.clone(),
            fallback_assistant: self.assistants.fallback.clone(),
            use_fallback: self.use_fallback,
            session_scope: self.session_scope,
            request_timeout_secs: self.request_timeout_secs,
            openai_key_set: self.provider_keys.openai.is_some(),
            anthropic_key_set: self.provider_keys.anthropic.is_some(),
        }
    }
}

/// Secret-free snapshot of [`RelayConfig`] for display.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub platform_base_url: String,
    pub platform_api_key_set: bool,
    pub primary_assistant: Option<AssistantId>,
    pub fallback_assistant: Option<AssistantId>,
    pub use_fallback: bool,
    pub session_scope: SessionScope,
    pub request_timeout_secs: u64,
    pub openai_key_set: bool,
    pub anthropic_key_set: bool,
}

//! Application state wiring the chat service together.
//!
//! The core service is generic over its session store; AppState pins it to
//! the in-memory store and the TaskingAI client.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chatrelay_core::assistant::box_client::BoxAssistantClient;
use chatrelay_core::chat::service::ChatService;
use chatrelay_core::chat::strategy::DispatchStrategy;
use chatrelay_core::session::registry::SessionRegistry;
use chatrelay_core::session::store::InMemorySessionStore;
use chatrelay_infra::taskingai::TaskingAiClient;
use chatrelay_types::config::RelayConfig;

pub type ConcreteChatService = ChatService<InMemorySessionStore>;

/// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(chat_service: ConcreteChatService, static_dir: PathBuf) -> Self {
        Self {
            chat_service: Arc::new(chat_service),
            static_dir,
        }
    }

    /// Build the state from resolved configuration.
    ///
    /// Missing settings are reported but do not stop startup; requests that
    /// depend on them fail at the platform instead.
    pub fn init(config: RelayConfig, static_dir: PathBuf) -> anyhow::Result<Self> {
        for name in config.missing_required() {
            tracing::warn!("{name} is not set; chat requests will fail until it is configured");
        }
        if config.provider_keys.openai.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set");
        }
        if config.provider_keys.anthropic.is_none() {
            tracing::warn!("ANTHROPIC_API_KEY is not set");
        }

        let RelayConfig {
            use_fallback,
            session_scope,
            request_timeout_secs,
            platform,
            assistants,
            ..
        } = config;

        let client = TaskingAiClient::new(
            platform.api_key,
            Duration::from_secs(request_timeout_secs),
        )?
        .with_base_url(platform.base_url);

        let strategy = DispatchStrategy::from_flag(
            use_fallback,
            assistants.primary.unwrap_or_default(),
            assistants.fallback.unwrap_or_default(),
        );

        tracing::info!(
            platform = client.base_url(),
            %strategy,
            scope = %session_scope,
            "Chat service ready"
        );

        let service = ChatService::new(
            BoxAssistantClient::new(client),
            SessionRegistry::new(InMemorySessionStore::new(), session_scope),
            strategy,
        );

        Ok(Self::new(service, static_dir))
    }
}

//! Per-module provider resolution

use std::sync::Arc;

use async_trait::async_trait;
use practice_core::Module;
use reqwest::Client;

use super::provider::{
    ChatProvider, OpenAiCompatibleProvider, ProviderConfig, ProviderKind, DEFAULT_TEMPERATURE,
};
use super::AiError;
use crate::config::AiDefaults;
use crate::db::Database;
use crate::models::AiConfig;

/// Key value seeded into config rows that have not been set up yet
const PLACEHOLDER_KEY: &str = "placeholder-key";

/// Chooses the chat provider used for a module
#[async_trait]
pub trait ProviderResolver: Send + Sync {
    async fn provider_for(&self, module: Module) -> Result<Arc<dyn ChatProvider>, AiError>;
}

/// Resolves providers from the `ai_configs` table with environment fallback
pub struct ConfiguredResolver {
    db: Arc<Database>,
    defaults: AiDefaults,
    client: Client,
}

impl ConfiguredResolver {
    pub fn new(db: Arc<Database>, defaults: AiDefaults) -> Result<Self, AiError> {
        let client = Client::builder().timeout(defaults.timeout).build()?;
        Ok(Self {
            db,
            defaults,
            client,
        })
    }
}

#[async_trait]
impl ProviderResolver for ConfiguredResolver {
    async fn provider_for(&self, module: Module) -> Result<Arc<dyn ChatProvider>, AiError> {
        let row = self
            .db
            .get_ai_config(module.as_str())
            .await
            .map_err(|e| AiError::Config(e.to_string()))?;

        let config = resolve_config(module, row.as_ref(), &self.defaults)?;
        tracing::debug!(
            module = %module,
            provider = config.kind.as_str(),
            model = %config.model,
            "resolved AI provider"
        );

        let provider = OpenAiCompatibleProvider::new(self.client.clone(), config)?;
        Ok(Arc::new(provider))
    }
}

fn usable_key(key: &str) -> Option<String> {
    let key = key.trim();
    (!key.is_empty() && key != PLACEHOLDER_KEY).then(|| key.to_string())
}

fn env_key(kind: ProviderKind, defaults: &AiDefaults) -> Option<String> {
    let specific = match kind {
        ProviderKind::DeepSeek => defaults.deepseek_api_key.clone(),
        _ => None,
    };
    specific.or_else(|| defaults.qwen_api_key.clone())
}

/// Combine a module's config row with the environment defaults.
///
/// The row's key wins unless it is empty or the seeded placeholder; without
/// a row the module uses qwen with the environment model and base URL.
pub fn resolve_config(
    module: Module,
    row: Option<&AiConfig>,
    defaults: &AiDefaults,
) -> Result<ProviderConfig, AiError> {
    let missing_key = || AiError::MissingApiKey(module.as_str().to_string());

    let Some(row) = row else {
        let api_key = defaults.qwen_api_key.clone().ok_or_else(missing_key)?;
        return Ok(ProviderConfig {
            kind: ProviderKind::Qwen,
            model: defaults.qwen_model.clone(),
            api_key,
            base_url: defaults.qwen_base_url.clone(),
            temperature: DEFAULT_TEMPERATURE,
        });
    };

    let kind = ProviderKind::parse(&row.provider)
        .ok_or_else(|| AiError::UnsupportedProvider(row.provider.clone()))?;

    let api_key = usable_key(&row.api_key)
        .or_else(|| env_key(kind, defaults))
        .ok_or_else(missing_key)?;

    Ok(ProviderConfig {
        kind,
        model: row.model_name.clone(),
        api_key,
        base_url: row.base_url.clone(),
        temperature: row.temperature,
    })
}

//! AI provider gateway
//!
//! Every model call goes through [`ChatProvider`]. Providers are resolved
//! per module by a [`ProviderResolver`] so the admin can point each module
//! at a different model without a restart.

pub mod prompts;
pub mod provider;
pub mod resolver;

use practice_core::CoreError;
use thiserror::Error;

pub use provider::{
    structured_chat, ChatMessage, ChatOptions, ChatProvider, OpenAiCompatibleProvider,
    ProviderConfig, ProviderKind,
};
pub use resolver::{ConfiguredResolver, ProviderResolver};

/// Gateway failures
#[derive(Debug, Error)]
pub enum AiError {
    #[error("provider '{0}' is not supported")]
    UnsupportedProvider(String),

    #[error("no API key configured for {0}")]
    MissingApiKey(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("provider returned an empty response")]
    EmptyResponse,

    #[error("invalid response: {0}")]
    InvalidResponse(#[from] CoreError),

    #[error("config lookup failed: {0}")]
    Config(String),
}

//! Provider construction from config.

pub mod dummy;
pub mod gemini;
pub mod openai_compatible;

use tracing::warn;

use crate::config::LlmConfig;

use super::{LlmProvider, ProviderError};

/// Build the configured provider.
///
/// Returns `Ok(None)` when the selected provider requires an API key and
/// none is present; the engine then runs the deterministic path only.
/// An unknown provider name is a configuration error.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<Option<LlmProvider>, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(Some(LlmProvider::Dummy(dummy::DummyProvider))),
        "gemini" => match api_key {
            Some(key) => {
                let provider = gemini::GeminiProvider::new(&config.gemini, key)?;
                Ok(Some(LlmProvider::Gemini(provider)))
            }
            None => {
                warn!("LLM_API_KEY not set; external classification disabled");
                Ok(None)
            }
        },
        "openai" => {
            let c = &config.openai;
            let provider = openai_compatible::OpenAiCompatibleProvider::new(
                c.api_base_url.clone(),
                c.model.clone(),
                c.temperature,
                c.timeout_seconds,
                api_key,
            )?;
            Ok(Some(LlmProvider::OpenAiCompatible(provider)))
        }
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}

//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `SOLACE_BIND` and `SOLACE_LOG_LEVEL` env overrides.
//! The LLM API key comes only from the `LLM_API_KEY` env var, never TOML.

use std::{env, fs, path::Path};

use serde::Deserialize;

use crate::error::AppError;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the listener to.
    pub bind: String,
}

/// Gemini provider configuration (`[llm.gemini]` in the TOML).
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, without the model path segment.
    pub api_base_url: String,
    /// Model name inserted into the request path.
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// OpenAI / OpenAI-compatible provider configuration (`[llm.openai]`).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM provider selection and per-provider settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (`"dummy"`, `"gemini"`, `"openai"`).
    /// Maps to `default` in `[llm]` TOML — named `default` there to signal
    /// that other provider sections can coexist without being loaded.
    pub provider: String,
    pub gemini: GeminiConfig,
    pub openai: OpenAiConfig,
}

/// Fully-resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_name: String,
    pub log_level: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    /// API key from `LLM_API_KEY` env var — `None` disables the external
    /// classifier for providers that require a key.
    pub llm_api_key: Option<String>,
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    service: RawService,
    #[serde(default)]
    server: RawServer,
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Deserialize)]
struct RawService {
    name: String,
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Deserialize)]
struct RawServer {
    #[serde(default = "default_bind")]
    bind: String,
}

impl Default for RawServer {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    gemini: RawGeminiConfig,
    #[serde(default)]
    openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            gemini: RawGeminiConfig::default(),
            openai: RawOpenAiConfig::default(),
        }
    }
}

#[derive(Deserialize)]
struct RawGeminiConfig {
    #[serde(default = "default_gemini_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_gemini_model")]
    model: String,
    #[serde(default = "default_gemini_temperature")]
    temperature: f32,
    #[serde(default = "default_gemini_top_p")]
    top_p: f32,
    #[serde(default = "default_gemini_top_k")]
    top_k: u32,
    #[serde(default = "default_gemini_max_output_tokens")]
    max_output_tokens: u32,
    #[serde(default = "default_gemini_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawGeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
            temperature: default_gemini_temperature(),
            top_p: default_gemini_top_p(),
            top_k: default_gemini_top_k(),
            max_output_tokens: default_gemini_max_output_tokens(),
            timeout_seconds: default_gemini_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_openai_model")]
    model: String,
    #[serde(default = "default_openai_temperature")]
    temperature: f32,
    #[serde(default = "default_openai_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            temperature: default_openai_temperature(),
            timeout_seconds: default_openai_timeout_seconds(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_bind() -> String { "127.0.0.1:8080".to_string() }
fn default_llm_provider() -> String { "gemini".to_string() }
fn default_gemini_api_base_url() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_gemini_model() -> String { "gemini-1.5-flash".to_string() }
fn default_gemini_temperature() -> f32 { 0.45 }
fn default_gemini_top_p() -> f32 { 0.9 }
fn default_gemini_top_k() -> u32 { 40 }
fn default_gemini_max_output_tokens() -> u32 { 512 }
fn default_gemini_timeout_seconds() -> u64 { 30 }
fn default_openai_api_base_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-4o-mini".to_string() }
fn default_openai_temperature() -> f32 { 0.2 }
fn default_openai_timeout_seconds() -> u64 { 60 }

/// Load config from `config/default.toml`, then apply env-var overrides.
pub fn load() -> Result<Config, AppError> {
    let bind_override = env::var("SOLACE_BIND").ok();
    let log_level_override = env::var("SOLACE_LOG_LEVEL").ok();
    load_from(
        Path::new("config/default.toml"),
        bind_override.as_deref(),
        log_level_override.as_deref(),
    )
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    bind_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let log_level = log_level_override.unwrap_or(&parsed.service.log_level).to_string();
    let bind = bind_override.unwrap_or(&parsed.server.bind).to_string();

    Ok(Config {
        service_name: parsed.service.name,
        log_level,
        server: ServerConfig { bind },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            gemini: GeminiConfig {
                api_base_url: parsed.llm.gemini.api_base_url,
                model: parsed.llm.gemini.model,
                temperature: parsed.llm.gemini.temperature,
                top_p: parsed.llm.gemini.top_p,
                top_k: parsed.llm.gemini.top_k,
                max_output_tokens: parsed.llm.gemini.max_output_tokens,
                timeout_seconds: parsed.llm.gemini.timeout_seconds,
            },
            openai: OpenAiConfig {
                api_base_url: parsed.llm.openai.api_base_url,
                model: parsed.llm.openai.model,
                temperature: parsed.llm.openai.temperature,
                timeout_seconds: parsed.llm.openai.timeout_seconds,
            },
        },
        llm_api_key: env::var("LLM_API_KEY").ok(),
    })
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for unit tests — dummy LLM, no API keys, no external calls.
#[cfg(test)]
impl Config {
    pub fn test_default() -> Self {
        Self {
            service_name: "test".into(),
            log_level: "info".into(),
            server: ServerConfig { bind: default_bind() },
            llm: LlmConfig {
                provider: "dummy".into(),
                gemini: GeminiConfig {
                    api_base_url: "http://localhost:0".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    top_p: 1.0,
                    top_k: 1,
                    max_output_tokens: 64,
                    timeout_seconds: 1,
                },
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            llm_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL_TOML: &str = r#"
[service]
name = "test-service"
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_minimal_config() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.service_name, "test-service");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.server.bind, "127.0.0.1:8080");
        assert_eq!(cfg.llm.provider, "gemini");
        assert_eq!(cfg.llm.gemini.model, "gemini-1.5-flash");
    }

    #[test]
    fn parse_full_llm_section() {
        let f = write_toml(
            r#"
[service]
name = "test-service"
log_level = "debug"

[server]
bind = "0.0.0.0:3000"

[llm]
default = "openai"

[llm.openai]
model = "local-model"
timeout_seconds = 5
"#,
        );
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.server.bind, "0.0.0.0:3000");
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.llm.openai.model, "local-model");
        assert_eq!(cfg.llm.openai.timeout_seconds, 5);
        // untouched defaults survive alongside the overridden section
        assert_eq!(cfg.llm.gemini.top_k, 40);
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Path::new("/nonexistent/config.toml"), None, None);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn bind_override_applies() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), Some("127.0.0.1:9999"), None).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:9999");
    }

    #[test]
    fn log_level_override_applies() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, Some("trace")).unwrap();
        assert_eq!(cfg.log_level, "trace");
    }
}

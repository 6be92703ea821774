//! Configuration System
//!
//! Layered configuration for the generation service: compiled defaults, an
//! optional TOML file, then `GLITCHLINE_*` environment overrides. The one
//! required secret (the upstream API key) is read from the process
//! environment only and never from a file.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::provider::image::IMAGE_RETRY_POLICY;
use crate::provider::text::TEXT_RETRY_POLICY;
use crate::provider::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlitchlineConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Expose raw prompts and landmark selection in success payloads
    #[serde(default)]
    pub debug: bool,

    /// Upstream model identifiers
    #[serde(default)]
    pub models: ModelsConfig,

    /// Retry budgets and the per-image wall-clock timeout
    #[serde(default)]
    pub retry: RetryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for GlitchlineConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            debug: false,
            models: ModelsConfig::default(),
            retry: RetryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Upstream model identifiers and API base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_text_model")]
    pub text: String,

    #[serde(default = "default_image_model")]
    pub image: String,

    /// Override for the generative-language API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_api_base() -> String {
    crate::provider::DEFAULT_API_BASE.to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            text: default_text_model(),
            image: default_image_model(),
            api_base: default_api_base(),
        }
    }
}

/// Retry budgets for both clients plus the image call timeout.
///
/// Kept deliberately small: a few fast internal retries, then overload
/// escalates to the caller with backoff guidance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_text_retries")]
    pub text_retries: u32,
    #[serde(default = "default_text_base_delay_ms")]
    pub text_base_delay_ms: u64,
    #[serde(default = "default_text_max_delay_ms")]
    pub text_max_delay_ms: u64,

    #[serde(default = "default_image_retries")]
    pub image_retries: u32,
    #[serde(default = "default_image_base_delay_ms")]
    pub image_base_delay_ms: u64,
    #[serde(default = "default_image_max_delay_ms")]
    pub image_max_delay_ms: u64,

    /// Hard wall-clock budget per image call, wrapping the whole retry loop
    #[serde(default = "default_image_timeout_ms")]
    pub image_timeout_ms: u64,
}

fn default_text_retries() -> u32 {
    TEXT_RETRY_POLICY.retries
}

fn default_text_base_delay_ms() -> u64 {
    TEXT_RETRY_POLICY.base_delay_ms
}

fn default_text_max_delay_ms() -> u64 {
    TEXT_RETRY_POLICY.max_delay_ms
}

fn default_image_retries() -> u32 {
    IMAGE_RETRY_POLICY.retries
}

fn default_image_base_delay_ms() -> u64 {
    IMAGE_RETRY_POLICY.base_delay_ms
}

fn default_image_max_delay_ms() -> u64 {
    IMAGE_RETRY_POLICY.max_delay_ms
}

fn default_image_timeout_ms() -> u64 {
    45_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            text_retries: default_text_retries(),
            text_base_delay_ms: default_text_base_delay_ms(),
            text_max_delay_ms: default_text_max_delay_ms(),
            image_retries: default_image_retries(),
            image_base_delay_ms: default_image_base_delay_ms(),
            image_max_delay_ms: default_image_max_delay_ms(),
            image_timeout_ms: default_image_timeout_ms(),
        }
    }
}

impl RetryConfig {
    pub fn text_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.text_retries,
            self.text_base_delay_ms,
            self.text_max_delay_ms,
        )
    }

    pub fn image_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.image_retries,
            self.image_base_delay_ms,
            self.image_max_delay_ms,
        )
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }
}

impl GlitchlineConfig {
    /// Load configuration.
    ///
    /// Priority order (highest to lowest):
    /// 1. `GLITCHLINE_*` environment variables (`__` separates nesting,
    ///    e.g. `GLITCHLINE_RETRY__IMAGE_TIMEOUT_MS`)
    /// 2. The given TOML file (or `glitchline.toml` in the working
    ///    directory when none is given)
    /// 3. Compiled defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ApiError> {
        let mut builder = config::Config::builder();
        builder = match path {
            Some(p) => builder.add_source(config::File::from(p)),
            None => builder.add_source(config::File::with_name("glitchline").required(false)),
        };
        builder = builder.add_source(
            config::Environment::with_prefix("GLITCHLINE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );
        let loaded = builder.build()?;
        Ok(loaded.try_deserialize()?)
    }

    /// The upstream credential, read from the process environment only.
    pub fn api_key() -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

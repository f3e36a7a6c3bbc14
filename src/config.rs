//! Application configuration.
//!
//! Layers, lowest priority first: built-in defaults, an optional
//! `voxmarket.toml` next to the binary, then `VOXMARKET__SECTION__KEY`
//! environment variables (a `.env` file is loaded into the environment first).

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::order_form::{Estimator, SECONDS_PER_CREDIT, WORDS_PER_MINUTE};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub estimator: EstimatorConfig,

    #[serde(default)]
    pub genai: GenAiConfig,

    #[serde(default)]
    pub payment: PaymentConfig,
}

/// Collection actor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Request channel capacity per collection (default: 32)
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_buffer_size() -> usize {
    32
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
    #[serde(default = "default_seconds_per_credit")]
    pub seconds_per_credit: u32,
}

fn default_words_per_minute() -> u32 {
    WORDS_PER_MINUTE
}

fn default_seconds_per_credit() -> u32 {
    SECONDS_PER_CREDIT
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
            seconds_per_credit: default_seconds_per_credit(),
        }
    }
}

impl EstimatorConfig {
    pub fn estimator(&self) -> Estimator {
        Estimator::new(self.words_per_minute, self.seconds_per_credit)
    }
}

/// Text and speech generation provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenAiConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_genai_base_url")]
    pub base_url: String,

    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_speech_model")]
    pub speech_model: String,

    /// Prebuilt voice used when a request names none (default: "Kore")
    #[serde(default = "default_voice")]
    pub default_voice: String,
}

fn default_genai_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_genai_base_url(),
            text_model: default_text_model(),
            speech_model: default_speech_model(),
            default_voice: default_voice(),
        }
    }
}

/// PIX payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Secret credential; charges fail without it
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_payment_base_url")]
    pub base_url: String,

    /// Price of one credit in minor currency units (default: 1000)
    #[serde(default = "default_credit_price_cents")]
    pub credit_price_cents: u64,

    #[serde(default)]
    pub fields: ChargeFieldNames,
}

fn default_payment_base_url() -> String {
    "https://api.pix-provider.example/v1/charges".to_string()
}

fn default_credit_price_cents() -> u64 {
    1000
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_payment_base_url(),
            credit_price_cents: default_credit_price_cents(),
            fields: ChargeFieldNames::default(),
        }
    }
}

/// Provider response keys for the three charge outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeFieldNames {
    #[serde(default = "default_id_field")]
    pub id: String,
    #[serde(default = "default_qr_image_field")]
    pub qr_code_image_url: String,
    #[serde(default = "default_qr_text_field")]
    pub qr_code_text: String,
}

fn default_id_field() -> String {
    "id".to_string()
}

fn default_qr_image_field() -> String {
    "qr_code_image_url".to_string()
}

fn default_qr_text_field() -> String {
    "qr_code_text".to_string()
}

impl Default for ChargeFieldNames {
    fn default() -> Self {
        Self {
            id: default_id_field(),
            qr_code_image_url: default_qr_image_field(),
            qr_code_text: default_qr_text_field(),
        }
    }
}

impl AppConfig {
    /// Loads `.env`, `voxmarket.toml` and `VOXMARKET__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env"),
            Err(e) => debug!(error = %e, "No .env loaded"),
        }
        Self::from_sources(Some("voxmarket"), Environment::with_prefix("VOXMARKET").separator("__").try_parsing(true))
    }

    fn from_sources(file: Option<&str>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(name) = file {
            builder = builder.add_source(File::with_name(name).required(false));
        }
        builder.add_source(env).build()?.try_deserialize()
    }
}

//! Runtime settings read from the environment.
//!
//! Every value has a default, so the app starts with no variables set. The
//! only security-relevant knob, `DOCSUM_INSECURE_TLS`, defaults to keeping
//! certificate verification on.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_API_BASE: &str = "https://router.huggingface.co/hf-inference/models";

#[derive(Debug, Clone, PartialEq)]
pub struct SummarizerConfig {
    pub model: String,
    pub api_base: String,
    pub api_token: Option<String>,
    /// Skip TLS certificate verification on model requests.
    pub insecure_tls: bool,
    pub min_length: usize,
    pub max_length: usize,
    /// How much of the extracted text is sent to the model.
    pub input_chars: usize,
    pub timeout: Duration,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_token: None,
            insecure_tls: false,
            min_length: 500,
            max_length: 1000,
            input_chars: 1000,
            timeout: Duration::from_secs(300),
        }
    }
}

impl SummarizerConfig {
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), self.model)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub summarizer: SummarizerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Build from an explicit variable map (useful for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let defaults = SummarizerConfig::default();
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let summarizer = SummarizerConfig {
            model: get("DOCSUM_MODEL").map(str::to_string).unwrap_or(defaults.model),
            api_base: get("DOCSUM_API_BASE")
                .map(str::to_string)
                .unwrap_or(defaults.api_base),
            api_token: get("HF_API_TOKEN").map(str::to_string),
            insecure_tls: match get("DOCSUM_INSECURE_TLS") {
                Some(v) => parse_bool("DOCSUM_INSECURE_TLS", v)?,
                None => defaults.insecure_tls,
            },
            min_length: parse_or(
                "DOCSUM_MIN_LENGTH",
                get("DOCSUM_MIN_LENGTH"),
                defaults.min_length,
            )?,
            max_length: parse_or(
                "DOCSUM_MAX_LENGTH",
                get("DOCSUM_MAX_LENGTH"),
                defaults.max_length,
            )?,
            input_chars: parse_or(
                "DOCSUM_INPUT_CHARS",
                get("DOCSUM_INPUT_CHARS"),
                defaults.input_chars,
            )?,
            timeout: Duration::from_secs(parse_or(
                "DOCSUM_TIMEOUT_SECS",
                get("DOCSUM_TIMEOUT_SECS"),
                defaults.timeout.as_secs(),
            )?),
        };

        if summarizer.min_length > summarizer.max_length {
            return Err(Error::Config {
                key: "DOCSUM_MIN_LENGTH".to_string(),
                message: format!(
                    "minimum length {} exceeds maximum length {}",
                    summarizer.min_length, summarizer.max_length
                ),
            });
        }
        if summarizer.input_chars == 0 {
            return Err(Error::Config {
                key: "DOCSUM_INPUT_CHARS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self { summarizer })
    }
}

fn parse_or<T>(key: &str, raw: Option<&str>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => v.parse().map_err(|e: T::Err| Error::Config {
            key: key.to_string(),
            message: format!("{v:?}: {e}"),
        }),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config {
            key: key.to_string(),
            message: format!("{raw:?} is not a boolean"),
        }),
    }
}

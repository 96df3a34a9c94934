use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::SummarizerConfig;
use crate::document::count_words;
use crate::error::{Error, Result};
use crate::extractor::preview;

/// Decoding parameters sent with every summarization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub min_length: usize,
    pub max_length: usize,
    pub do_sample: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub model: String,
    pub input_chars: usize,
    pub min_length: usize,
    pub max_length: usize,
}

/// A loaded summarization model: text in, summary out.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    fn name(&self) -> &str;

    async fn summarize(&self, text: &str, params: &GenerationParams) -> Result<String>;
}

/// Produces the model handle on first use.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn SummaryModel>>;
}

/// Owns the lazily loaded model handle and the length policy.
///
/// The handle is created by the first [`Summarizer::summarize`] call and
/// reused until [`Summarizer::shutdown`]. A load that fails is not kept, so
/// the next request tries again.
pub struct Summarizer {
    loader: Box<dyn ModelLoader>,
    model: Mutex<Option<Arc<dyn SummaryModel>>>,
    input_chars: usize,
    min_length: usize,
    max_length: usize,
}

impl Summarizer {
    pub fn new(config: &SummarizerConfig) -> Self {
        Self::with_loader(config, Box::new(HfModelLoader::new(config.clone())))
    }

    pub fn with_loader(config: &SummarizerConfig, loader: Box<dyn ModelLoader>) -> Self {
        Self {
            loader,
            model: Mutex::new(None),
            input_chars: config.input_chars,
            min_length: config.min_length,
            max_length: config.max_length,
        }
    }

    /// Length bounds for a given input.
    ///
    /// The minimum is capped at the input's word count so short documents
    /// do not ask the model for more output than it can ground.
    pub fn generation_params(&self, input: &str) -> GenerationParams {
        let min_length = self.min_length.min(count_words(input));
        GenerationParams {
            min_length,
            max_length: self.max_length.max(min_length),
            do_sample: false,
        }
    }

    pub async fn summarize(&self, text: &str) -> Result<SummaryResult> {
        let input = preview(text, self.input_chars);
        if input.trim().is_empty() {
            return Err(Error::NothingToSummarize);
        }

        let params = self.generation_params(input);
        let model = self.model().await?;

        let start = Instant::now();
        let summary = model.summarize(input, &params).await?;
        info!(
            model = model.name(),
            input_chars = input.chars().count(),
            min_length = params.min_length,
            max_length = params.max_length,
            elapsed = ?start.elapsed(),
            "Generated summary"
        );

        Ok(SummaryResult {
            summary,
            model: model.name().to_string(),
            input_chars: input.chars().count(),
            min_length: params.min_length,
            max_length: params.max_length,
        })
    }

    async fn model(&self) -> Result<Arc<dyn SummaryModel>> {
        let mut slot = self.model.lock().await;
        if let Some(model) = slot.as_ref() {
            return Ok(Arc::clone(model));
        }

        let start = Instant::now();
        let model = self.loader.load().await?;
        info!(
            model = model.name(),
            elapsed = ?start.elapsed(),
            "Loaded summarization model"
        );
        *slot = Some(Arc::clone(&model));
        Ok(model)
    }

    pub async fn is_loaded(&self) -> bool {
        self.model.lock().await.is_some()
    }

    /// Drop the model handle. The next request loads it again.
    pub async fn shutdown(&self) {
        if self.model.lock().await.take().is_some() {
            debug!("Released summarization model");
        }
    }
}

/// Transport settings for model requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub verify_tls: bool,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn from_config(config: &SummarizerConfig) -> Self {
        Self {
            verify_tls: !config.insecure_tls,
            timeout: config.timeout,
        }
    }

    pub fn builder(&self) -> ClientBuilder {
        Client::builder()
            .danger_accept_invalid_certs(!self.verify_tls)
            .timeout(self.timeout)
    }
}

/// Builds an HTTP client for the Hugging Face inference endpoint.
pub struct HfModelLoader {
    config: SummarizerConfig,
}

impl HfModelLoader {
    pub fn new(config: SummarizerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ModelLoader for HfModelLoader {
    async fn load(&self) -> Result<Arc<dyn SummaryModel>> {
        let settings = ClientSettings::from_config(&self.config);
        if !settings.verify_tls {
            warn!(
                endpoint = %self.config.endpoint(),
                "TLS certificate verification is disabled for model requests"
            );
        }

        let client = settings
            .builder()
            .build()
            .map_err(|e| Error::ExternalService(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Arc::new(HfInferenceModel {
            client,
            name: self.config.model.clone(),
            endpoint: self.config.endpoint(),
            api_token: self.config.api_token.clone(),
        }))
    }
}

pub struct HfInferenceModel {
    client: Client,
    name: String,
    endpoint: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: HfOptions,
}

#[derive(Serialize)]
struct HfOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HfResponse {
    Summaries(Vec<HfSummary>),
    Failure { error: String },
}

#[derive(Deserialize)]
struct HfSummary {
    summary_text: String,
}

#[async_trait]
impl SummaryModel for HfInferenceModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn summarize(&self, text: &str, params: &GenerationParams) -> Result<String> {
        let body = HfRequest {
            inputs: text,
            parameters: params,
            options: HfOptions {
                wait_for_model: true,
            },
        };

        debug!(model = %self.name, "Sending summarization request");

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            Error::ExternalService(format!("Request to {} failed: {}", self.endpoint, e))
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::ExternalService(format!("Failed to read response: {}", e)))?;

        match parse_response(&bytes) {
            Ok(summary) if status.is_success() => Ok(summary),
            Ok(_) => Err(Error::ExternalService(format!("Model returned {}", status))),
            Err(e) if status.is_success() => Err(e),
            Err(e) => Err(Error::ExternalService(format!("Model returned {}: {}", status, e))),
        }
    }
}

fn parse_response(body: &[u8]) -> Result<String> {
    let parsed: HfResponse = serde_json::from_slice(body).map_err(|_| {
        Error::ExternalService(format!(
            "Unexpected response: {}",
            String::from_utf8_lossy(body)
        ))
    })?;

    match parsed {
        HfResponse::Summaries(items) => items
            .into_iter()
            .next()
            .map(|s| s.summary_text)
            .ok_or_else(|| Error::ExternalService("Model returned no summary".to_string())),
        HfResponse::Failure { error } => Err(Error::ExternalService(error)),
    }
}

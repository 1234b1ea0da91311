/*!
 * Adapter around the external translation collaborator.
 *
 * The invoker owns the provider client, composes the prompt from the
 * segment text and its surrounding context, repairs edge whitespace the
 * translator may drop, prices each call from the reported token usage, and
 * applies a randomized politeness pause between calls. It never retries: a
 * failed call is surfaced so the enclosing job aborts before any partial
 * write happens.
 */

use std::time::Duration;

use anyhow::Result;
use log::debug;
use rand::Rng;

use crate::app_config::{CooldownConfig, TranslationConfig, TranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::Provider;

use super::gate::repair_edge_whitespace;

/// One translation request handed to the external collaborator
#[derive(Debug, Clone)]
pub struct TranslationRequest<'a> {
    /// Raw segment text, whitespace untouched
    pub text: &'a str,

    /// Source language display name
    pub origin_lang: &'a str,

    /// Target language display name
    pub destiny_lang: &'a str,

    /// What the document is about
    pub domain_context: &'a str,

    /// Document-level features (size, vocabulary) as a short description
    pub doc_features: &'a str,

    /// Text immediately before the segment, empty for non-body parts
    pub preceding_context: &'a str,

    /// Text immediately after the segment, empty for non-body parts
    pub following_context: &'a str,
}

/// Result of one external call
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// Translated text, edge whitespace already repaired
    pub text: String,

    /// Cost of the call in account currency
    pub cost: f64,
}

/// Randomized politeness pause applied after successful calls.
///
/// Roughly `probability` of calls are followed by a pause drawn uniformly
/// from zero up to the bound. Tests construct a disabled policy instead of
/// asserting on randomness.
#[derive(Debug, Clone)]
pub struct CooldownPolicy {
    probability: f64,
    max_pause: Duration,
}

impl CooldownPolicy {
    /// Create a policy with an explicit probability and pause bound
    pub fn new(probability: f64, max_pause: Duration) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            max_pause,
        }
    }

    /// The default politeness policy: half of calls pause up to two seconds
    pub fn polite() -> Self {
        Self::new(0.5, Duration::from_millis(2000))
    }

    /// A policy that never pauses, for tests and local endpoints
    pub fn disabled() -> Self {
        Self::new(0.0, Duration::ZERO)
    }

    /// Build a policy from configuration
    pub fn from_config(config: &CooldownConfig) -> Self {
        Self::new(config.probability, Duration::from_millis(config.max_pause_ms))
    }

    /// Maybe sleep, according to the policy
    pub async fn pause(&self) {
        // The RNG must not be held across the await point
        let pause = {
            let mut rng = rand::rng();
            if self.probability > 0.0 && rng.random_bool(self.probability) {
                let bound_ms = self.max_pause.as_millis() as u64;
                Some(Duration::from_millis(rng.random_range(0..=bound_ms)))
            } else {
                None
            }
        };

        if let Some(delay) = pause {
            debug!("Cooldown pause of {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }
}

/// Translation backend implementation variants
enum BackendImpl {
    /// OpenAI-compatible API service (OpenAI or LM Studio)
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// In-process deterministic provider, for tests
    Mock {
        /// Client instance
        client: MockProvider,
    },
}

/// Adapter driving the external translation collaborator
pub struct TranslationInvoker {
    /// Backend implementation
    backend: BackendImpl,

    /// Model identifier used for requests and pricing
    model: String,

    /// Sampling temperature
    temperature: f32,

    /// Politeness pause policy
    cooldown: CooldownPolicy,
}

impl TranslationInvoker {
    /// Create an invoker from the translation configuration
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let timeout_secs = config.get_timeout_secs();

        let backend = match config.provider {
            TranslationProvider::OpenAI => BackendImpl::OpenAI {
                client: OpenAI::with_timeout(
                    config.get_api_key(),
                    config.get_endpoint(),
                    timeout_secs,
                ),
            },
            TranslationProvider::LMStudio => {
                // LM Studio often doesn't require an API key; use a default if empty
                let api_key = {
                    let k = config.get_api_key();
                    if k.is_empty() { "lm-studio".to_string() } else { k }
                };

                BackendImpl::OpenAI {
                    client: OpenAI::with_timeout(api_key, config.get_endpoint(), timeout_secs),
                }
            }
        };

        Ok(Self {
            backend,
            model: config.get_model(),
            temperature: config.common.temperature,
            cooldown: CooldownPolicy::from_config(&config.common.cooldown),
        })
    }

    /// Create an invoker over a mock provider, for tests
    pub fn with_mock(client: MockProvider, cooldown: CooldownPolicy) -> Self {
        Self {
            backend: BackendImpl::Mock { client },
            model: "mock".to_string(),
            temperature: 0.0,
            cooldown,
        }
    }

    /// Translate one segment with full document context
    pub async fn invoke(
        &self,
        request: &TranslationRequest<'_>,
    ) -> Result<TranslationOutcome, TranslationError> {
        let system_prompt = build_system_prompt(request);

        let (raw_text, cost) = self
            .complete_call(
                &system_prompt,
                request.text,
                request.origin_lang,
                request.destiny_lang,
            )
            .await?;

        if raw_text.trim().is_empty() && !request.text.trim().is_empty() {
            return Err(TranslationError::EmptyTranslation {
                context: preview(request.text),
            });
        }

        let text = repair_edge_whitespace(request.text, &raw_text);

        self.cooldown.pause().await;

        Ok(TranslationOutcome { text, cost })
    }

    /// Translate a bare string with no surrounding context, used for the
    /// document's display filename
    pub async fn translate_plain(
        &self,
        text: &str,
        origin_lang: &str,
        destiny_lang: &str,
    ) -> Result<TranslationOutcome, TranslationError> {
        let request = TranslationRequest {
            text,
            origin_lang,
            destiny_lang,
            domain_context: "",
            doc_features: "",
            preceding_context: "",
            following_context: "",
        };

        self.invoke(&request).await
    }

    /// Ask the collaborator what the document is about, from two sampled
    /// excerpts of its body text
    pub async fn infer_topic(
        &self,
        excerpt_one: &str,
        excerpt_two: &str,
        language_name: &str,
    ) -> Result<(String, f64), TranslationError> {
        let system_prompt = format!(
            "You are an excellent identifier of documents from their excerpts. \
             You will be given two excerpts of a document written in {}. \
             Identify the type and subject of the document they belong to; what matters \
             is the document, not the excerpts themselves. \
             Respond only with a brief description.",
            language_name
        );

        let payload = format!(
            "EXCERPT 1:\n{}\n\nEXCERPT 2:\n{}",
            excerpt_one, excerpt_two
        );

        let (topic, cost) = self
            .complete_call(&system_prompt, &payload, language_name, language_name)
            .await?;

        self.cooldown.pause().await;

        Ok((topic.trim().to_string(), cost))
    }

    /// Test the connection to the backend
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.backend {
            BackendImpl::OpenAI { client } => client.test_connection().await,
            BackendImpl::Mock { client } => client.test_connection().await,
        }
    }

    /// Send one completion call to whichever backend is configured.
    ///
    /// The mock backend models the opaque translate() collaborator and
    /// receives the payload text directly, not the composed prompt.
    async fn complete_call(
        &self,
        system_prompt: &str,
        payload: &str,
        origin_lang: &str,
        destiny_lang: &str,
    ) -> Result<(String, f64), ProviderError> {
        match &self.backend {
            BackendImpl::OpenAI { client } => {
                let request = OpenAIRequest::new(self.model.as_str())
                    .add_message("system", system_prompt)
                    .add_message("user", payload)
                    .temperature(self.temperature)
                    .max_tokens(max_tokens_for_model(&self.model));

                let response = client.complete(request).await?;
                let text = OpenAI::extract_text(&response);

                let cost = response
                    .usage
                    .map(|usage| {
                        usage_cost(
                            &self.model,
                            usage.prompt_tokens as u64,
                            usage.completion_tokens as u64,
                        )
                    })
                    .unwrap_or(0.0);

                Ok((text, cost))
            }
            BackendImpl::Mock { client } => {
                let request = MockRequest {
                    text: payload.to_string(),
                    source_language: origin_lang.to_string(),
                    target_language: destiny_lang.to_string(),
                };

                let response = client.complete(request).await?;

                let cost = match (response.prompt_tokens, response.completion_tokens) {
                    (Some(prompt), Some(completion)) => {
                        usage_cost(&self.model, prompt, completion)
                    }
                    _ => 0.0,
                };

                Ok((response.text, cost))
            }
        }
    }
}

/// Compose the system prompt for a segment translation
fn build_system_prompt(request: &TranslationRequest<'_>) -> String {
    let mut prompt = format!(
        "You are a professional translator. Translate the text from {} to {}. \
         Preserve all formatting, line breaks, and special characters. \
         Only respond with the translated text, without any explanations or notes.",
        request.origin_lang, request.destiny_lang
    );

    if !request.domain_context.is_empty() {
        prompt.push_str(&format!("\nThe document is about: {}.", request.domain_context));
    }

    if !request.doc_features.is_empty() {
        prompt.push_str(&format!("\nDocument features: {}.", request.doc_features));
    }

    if !request.preceding_context.is_empty() {
        prompt.push_str(&format!(
            "\nText immediately before the fragment: {}",
            request.preceding_context
        ));
    }

    if !request.following_context.is_empty() {
        prompt.push_str(&format!(
            "\nText immediately after the fragment: {}",
            request.following_context
        ));
    }

    prompt
}

/// Pick a contiguous excerpt of up to `sample_size` sentences.
///
/// The start offset is drawn from the supplied RNG so callers control
/// determinism: production passes a thread RNG, tests a seeded one.
pub fn sample_excerpt<R: Rng>(sentences: &[&str], sample_size: usize, rng: &mut R) -> String {
    if sentences.is_empty() || sample_size == 0 {
        return String::new();
    }

    let take = sample_size.min(sentences.len());
    let upper = sentences.len() - take;
    let start = if upper == 0 {
        0
    } else {
        rng.random_range(0..=upper)
    };

    sentences[start..start + take].join(" ")
}

/// Price of a call in dollars, from token usage
fn usage_cost(model: &str, prompt_tokens: u64, completion_tokens: u64) -> f64 {
    let (prompt_rate, completion_rate) = model_pricing(model);
    (prompt_tokens as f64 / 1000.0) * prompt_rate
        + (completion_tokens as f64 / 1000.0) * completion_rate
}

/// Per-1K-token pricing (prompt, completion) for known models
fn model_pricing(model: &str) -> (f64, f64) {
    match model {
        "gpt-4o" => (0.0025, 0.01),
        "gpt-4o-mini" => (0.00015, 0.0006),
        "gpt-4-turbo" | "gpt-4-turbo-preview" => (0.01, 0.03),
        "gpt-4" => (0.03, 0.06),
        "gpt-3.5-turbo" => (0.0005, 0.0015),

        // Local and unknown models are billed at a conservative default
        _ => (0.001, 0.002),
    }
}

/// Get the maximum number of completion tokens for a given model
fn max_tokens_for_model(model: &str) -> u32 {
    match model {
        "gpt-4" => 8192,
        "gpt-4-turbo" | "gpt-4-turbo-preview" | "gpt-4o" | "gpt-4o-mini" => 4096,
        "gpt-3.5-turbo" => 4096,

        // Default for unknown models
        _ => 2048,
    }
}

/// Short preview of a segment for error messages
fn preview(text: &str) -> String {
    const MAX: usize = 40;
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}

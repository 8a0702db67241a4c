//! Inference adapter
//!
//! Thin wrapper over a [`CausalModel`]: tokenize the prompt, request a
//! bounded sampled generation, decode the result. The decoded text still
//! contains the echoed prompt prefix; stripping it is the caller's job
//! (see `completion`). No retries, no fallback — a backend failure is the
//! request's failure.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::error::Result;
use crate::model::{CausalModel, GenerationParams};

/// Adapter from text prompts to the token-level model contract
#[derive(Clone)]
pub struct InferenceAdapter {
    model: Arc<dyn CausalModel>,
    max_new_tokens: usize,
    temperature: f32,
    do_sample: bool,
}

impl InferenceAdapter {
    /// Wrap a model backend with the configured generation parameters
    #[must_use]
    pub fn new(model: Arc<dyn CausalModel>, config: &GatewayConfig) -> Self {
        Self {
            model,
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
            do_sample: config.do_sample,
        }
    }

    /// Generate a completion for `prompt`
    ///
    /// The prompt is not length-validated here; keeping it inside the model
    /// context window is the caller's responsibility. The returned text
    /// includes the prompt prefix as echoed by the model.
    ///
    /// # Errors
    ///
    /// Propagates backend failures (`ModelUnavailable`) unchanged.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let input_ids = self.model.encode(prompt)?;
        let params = GenerationParams {
            max_length: input_ids.len() + self.max_new_tokens,
            temperature: self.temperature,
            do_sample: self.do_sample,
            eos_token_id: self.model.eos_token_id(),
        };
        let output_ids = self.model.generate(&input_ids, &params)?;
        self.model.decode(&output_ids)
    }
}

impl std::fmt::Debug for InferenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceAdapter")
            .field("max_new_tokens", &self.max_new_tokens)
            .field("temperature", &self.temperature)
            .field("do_sample", &self.do_sample)
            .finish_non_exhaustive()
    }
}

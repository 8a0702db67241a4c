//! Model backend seam
//!
//! The gateway treats the language model as an opaque collaborator: a
//! tokenizer pair (`encode`/`decode`) and a bounded generation call. Real
//! runtimes implement [`CausalModel`]; the built-in [`EchoModel`] is a
//! deterministic stand-in used by `serve --demo` and by tests that need to
//! pin generation output.

use crate::error::Result;

/// Parameters for one bounded generation call
///
/// These mirror the underlying runtime call shape: an absolute length cap
/// (prompt length plus the configured budget), sampling controls and the
/// end-of-sequence marker to stop on.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Absolute token-length cap, prompt included
    pub max_length: usize,
    /// Sampling temperature
    pub temperature: f32,
    /// Whether to sample (false = greedy decoding)
    pub do_sample: bool,
    /// Token id that terminates generation
    pub eos_token_id: u32,
}

/// A causal language model with its tokenizer
///
/// Implementations may block the calling thread for the duration of
/// generation; the gateway runs them on a blocking worker. Output of
/// `generate` includes the input prefix — callers strip the echo.
/// Backend failures are reported as `ModelUnavailable`.
pub trait CausalModel: Send + Sync {
    /// Tokenize text into ids
    ///
    /// # Errors
    ///
    /// Fails when the tokenizer is unavailable or rejects the input.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Generate a continuation of `input_ids`, input echoed in the output
    ///
    /// # Errors
    ///
    /// Fails when the model runtime is unavailable or the call errors.
    fn generate(&self, input_ids: &[u32], params: &GenerationParams) -> Result<Vec<u32>>;

    /// Decode ids back to text
    ///
    /// # Errors
    ///
    /// Fails when the tokenizer is unavailable.
    fn decode(&self, ids: &[u32]) -> Result<String>;

    /// End-of-sequence token id for this model
    fn eos_token_id(&self) -> u32;
}

/// Canned continuation appended by the demo backend
const DEMO_CONTINUATION: &str = "\n// demo completion";

/// Token id the demo backend uses for end-of-sequence
const ECHO_EOS: u32 = 0;

/// Deterministic demo backend
///
/// Tokens are Unicode scalar values, generation echoes the prompt and
/// appends a fixed continuation capped at `max_length`. Temperature and
/// sampling flags are accepted and ignored; the whole point of this backend
/// is reproducible output.
#[derive(Debug, Clone, Default)]
pub struct EchoModel;

impl EchoModel {
    /// Create a demo backend
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CausalModel for EchoModel {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(text.chars().map(|c| c as u32).collect())
    }

    fn generate(&self, input_ids: &[u32], params: &GenerationParams) -> Result<Vec<u32>> {
        let mut out = input_ids.to_vec();
        for c in DEMO_CONTINUATION.chars() {
            if out.len() >= params.max_length {
                return Ok(out);
            }
            out.push(c as u32);
        }
        if out.len() < params.max_length {
            out.push(params.eos_token_id);
        }
        Ok(out)
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        Ok(ids
            .iter()
            .filter(|&&id| id != ECHO_EOS)
            .filter_map(|&id| char::from_u32(id))
            .collect())
    }

    fn eos_token_id(&self) -> u32 {
        ECHO_EOS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_length: usize) -> GenerationParams {
        GenerationParams {
            max_length,
            temperature: 0.7,
            do_sample: true,
            eos_token_id: ECHO_EOS,
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let model = EchoModel::new();
        let ids = model.encode("héllo").expect("test");
        assert_eq!(ids.len(), 5);
        let text = model.decode(&ids).expect("test");
        assert_eq!(text, "héllo");
    }

    #[test]
    fn test_generate_echoes_prompt() {
        let model = EchoModel::new();
        let ids = model.encode("abc").expect("test");
        let out = model.generate(&ids, &params(256)).expect("test");
        assert_eq!(&out[..3], &ids[..]);
        let text = model.decode(&out).expect("test");
        assert!(text.starts_with("abc"));
        assert!(text.ends_with(DEMO_CONTINUATION));
    }

    #[test]
    fn test_generate_respects_max_length() {
        let model = EchoModel::new();
        let ids = model.encode("abc").expect("test");
        let out = model.generate(&ids, &params(5)).expect("test");
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_generate_terminates_with_eos_when_room() {
        let model = EchoModel::new();
        let ids = model.encode("x").expect("test");
        let out = model.generate(&ids, &params(256)).expect("test");
        assert_eq!(*out.last().expect("test"), ECHO_EOS);
    }

    #[test]
    fn test_decode_skips_eos() {
        let model = EchoModel::new();
        let text = model.decode(&[104, 105, ECHO_EOS]).expect("test");
        assert_eq!(text, "hi");
    }
}

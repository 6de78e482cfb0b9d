use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const DEFAULT_MAX_LENGTH: i64 = 150;
pub const DEFAULT_MIN_LENGTH: i64 = 30;
pub const DEFAULT_BEAM_COUNT: i64 = 4;
pub const DEFAULT_LENGTH_PENALTY: f64 = 2.0;

/// Decoding parameters handed to the generation backend. Beam search with
/// a length penalty favouring longer candidates, stopping once all beams
/// are complete.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub max_length: i64,
    pub min_length: i64,
    pub beam_count: i64,
    pub length_penalty: f64,
    pub early_stopping: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        GenerationParams {
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
            beam_count: DEFAULT_BEAM_COUNT,
            length_penalty: DEFAULT_LENGTH_PENALTY,
            early_stopping: true,
        }
    }
}

/// One summarization request. The length and beam knobs default to the
/// values the BART CNN/DailyMail model is usually run with.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryRequest {
    pub text: String,
    #[serde(default = "default_max_length")]
    pub max_length: i64,
    #[serde(default = "default_min_length")]
    pub min_length: i64,
    #[serde(default = "default_beam_count")]
    pub beam_count: i64,
}

fn default_max_length() -> i64 {
    DEFAULT_MAX_LENGTH
}

fn default_min_length() -> i64 {
    DEFAULT_MIN_LENGTH
}

fn default_beam_count() -> i64 {
    DEFAULT_BEAM_COUNT
}

impl SummaryRequest {
    pub fn new(text: impl Into<String>) -> Self {
        SummaryRequest {
            text: text.into(),
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
            beam_count: DEFAULT_BEAM_COUNT,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub text: String,
}

/// Seam to the external sequence-to-sequence generation capability.
/// Implementations are expected to truncate over-long input to their own
/// token budget rather than reject it.
pub trait SummaryBackend: Send + Sync {
    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String>;
}

/// Validates requests and hands them to the generation backend.
#[derive(Clone)]
pub struct Summarizer {
    backend: Arc<dyn SummaryBackend>,
}

impl Summarizer {
    pub fn new(backend: Arc<dyn SummaryBackend>) -> Self {
        Summarizer { backend }
    }

    /// Rejects degenerate input before the model is ever invoked, then
    /// delegates generation to the backend.
    pub fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult> {
        if request.text.trim().is_empty() {
            return Err(AppError::EmptyInput);
        }
        if request.min_length < 0 || request.max_length < 1 {
            return Err(AppError::InvalidParams(format!(
                "length bounds must be non-negative with max_length >= 1, got min_length {} and max_length {}",
                request.min_length, request.max_length
            )));
        }
        if request.min_length > request.max_length {
            return Err(AppError::InvalidParams(format!(
                "min_length ({}) must not exceed max_length ({})",
                request.min_length, request.max_length
            )));
        }
        if request.beam_count < 1 {
            return Err(AppError::InvalidParams(format!(
                "beam_count must be at least 1, got {}",
                request.beam_count
            )));
        }

        let params = GenerationParams {
            max_length: request.max_length,
            min_length: request.min_length,
            beam_count: request.beam_count,
            ..GenerationParams::default()
        };

        let text = self.backend.generate(&request.text, &params)?;
        Ok(SummaryResult { text })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Backend double that echoes a canned summary and records how it was
    /// called.
    pub struct ScriptedBackend {
        summary: String,
        pub calls: AtomicUsize,
        pub last_params: Mutex<Option<GenerationParams>>,
    }

    impl ScriptedBackend {
        pub fn new(summary: impl Into<String>) -> Self {
            ScriptedBackend {
                summary: summary.into(),
                calls: AtomicUsize::new(0),
                last_params: Mutex::new(None),
            }
        }
    }

    impl SummaryBackend for ScriptedBackend {
        fn generate(&self, _text: &str, params: &GenerationParams) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_params.lock().unwrap() = Some(params.clone());
            Ok(self.summary.clone())
        }
    }
}

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::dataset::Split;
use crate::eval::{EvaluationSample, MeanScores};
use crate::summarizer::SummaryRequest;

#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub max_length: Option<i64>,
    pub min_length: Option<i64>,
    pub beam_count: Option<i64>,
}

impl SummarizeRequest {
    /// Fills unset knobs with the model defaults.
    pub fn into_summary_request(self) -> SummaryRequest {
        let mut request = SummaryRequest::new(self.text);
        if let Some(max_length) = self.max_length {
            request.max_length = max_length;
        }
        if let Some(min_length) = self.min_length {
            request.min_length = min_length;
        }
        if let Some(beam_count) = self.beam_count {
            request.beam_count = beam_count;
        }
        request
    }
}

#[derive(Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub word_count: usize,
    pub generated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct EvaluateRequest {
    #[serde(default = "default_split")]
    pub split: Split,
    pub sample_count: usize,
}

fn default_split() -> Split {
    Split::Test
}

#[derive(Serialize)]
pub struct EvaluateResponse {
    pub split: Split,
    pub sample_count: usize,
    pub mean: Option<MeanScores>,
    pub samples: Vec<EvaluationSample>,
    pub evaluated_at: DateTime<Utc>,
}

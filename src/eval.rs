use serde::Serialize;

use crate::dataset::{DatasetStore, Split};
use crate::error::Result;
use crate::rouge::{RougeScorer, RougeScores};
use crate::summarizer::{Summarizer, SummaryRequest};

/// One evaluated dataset row: the article, both summaries and the overlap
/// scores between them. Held in memory for the duration of a run only.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSample {
    pub index: usize,
    pub article: String,
    pub reference_summary: String,
    pub generated_summary: String,
    pub rouge: RougeScores,
}

/// Mean f-measures across a batch.
#[derive(Debug, Clone, Serialize)]
pub struct MeanScores {
    pub rouge1: f64,
    pub rouge2: f64,
    #[serde(rename = "rougeL")]
    pub rouge_l: f64,
}

/// Summarizes and scores rows `0..sample_count` of a split, in order.
/// Strictly sequential; the first failing sample aborts the whole batch.
pub fn evaluate_split(
    store: &DatasetStore,
    split: Split,
    sample_count: usize,
    summarizer: &Summarizer,
    scorer: &RougeScorer,
) -> Result<Vec<EvaluationSample>> {
    // Bounds-check the requested count before any allocation sized by it;
    // the count comes straight from the request body.
    let len = store.split(split)?.len();
    if sample_count > len {
        return Err(crate::error::AppError::InvalidIndex { index: len, len });
    }

    let mut samples = Vec::with_capacity(sample_count);

    for index in 0..sample_count {
        let story = store.get(split, index)?;
        let generated = summarizer.summarize(&SummaryRequest::new(story.article.clone()))?;
        let rouge = scorer.score(&story.highlights, &generated.text);

        tracing::info!(
            %split,
            index,
            rouge1 = rouge.rouge1.fmeasure,
            rouge2 = rouge.rouge2.fmeasure,
            rouge_l = rouge.rouge_l.fmeasure,
            "scored sample"
        );

        samples.push(EvaluationSample {
            index,
            article: story.article.clone(),
            reference_summary: story.highlights.clone(),
            generated_summary: generated.text,
            rouge,
        });
    }

    Ok(samples)
}

pub fn mean_scores(samples: &[EvaluationSample]) -> Option<MeanScores> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len() as f64;
    Some(MeanScores {
        rouge1: samples.iter().map(|s| s.rouge.rouge1.fmeasure).sum::<f64>() / n,
        rouge2: samples.iter().map(|s| s.rouge.rouge2.fmeasure).sum::<f64>() / n,
        rouge_l: samples.iter().map(|s| s.rouge.rouge_l.fmeasure).sum::<f64>() / n,
    })
}

use std::collections::HashMap;

use rust_stemmers::{Algorithm, Stemmer};
use serde::Serialize;

/// A single precision/recall/f-measure triple, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
}

impl Score {
    fn from_overlap(overlap: usize, reference_len: usize, candidate_len: usize) -> Score {
        let precision = if candidate_len == 0 {
            0.0
        } else {
            overlap as f64 / candidate_len as f64
        };
        let recall = if reference_len == 0 {
            0.0
        } else {
            overlap as f64 / reference_len as f64
        };
        let fmeasure = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Score {
            precision,
            recall,
            fmeasure,
        }
    }
}

/// ROUGE-1, ROUGE-2 and ROUGE-L scores for one reference/candidate pair.
#[derive(Debug, Clone, Serialize)]
pub struct RougeScores {
    pub rouge1: Score,
    pub rouge2: Score,
    #[serde(rename = "rougeL")]
    pub rouge_l: Score,
}

/// Computes ROUGE scores between a reference summary and a generated
/// candidate. Scoring is a pure function of the two inputs; the only
/// configuration is whether tokens are stemmed before overlap counting.
pub struct RougeScorer {
    stemmer: Option<Stemmer>,
}

impl RougeScorer {
    pub fn new(use_stemmer: bool) -> Self {
        let stemmer = use_stemmer.then(|| Stemmer::create(Algorithm::English));
        RougeScorer { stemmer }
    }

    pub fn score(&self, reference: &str, candidate: &str) -> RougeScores {
        let reference = self.tokenize(reference);
        let candidate = self.tokenize(candidate);

        RougeScores {
            rouge1: ngram_score(&reference, &candidate, 1),
            rouge2: ngram_score(&reference, &candidate, 2),
            rouge_l: Score::from_overlap(
                lcs_len(&reference, &candidate),
                reference.len(),
                candidate.len(),
            ),
        }
    }

    /// Lowercases and splits on non-alphanumeric characters. Short tokens
    /// are left unstemmed so that stop words keep their surface form.
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(|token| match &self.stemmer {
                Some(stemmer) if token.len() > 3 => stemmer.stem(token).into_owned(),
                _ => token.to_string(),
            })
            .collect()
    }
}

/// Clipped n-gram overlap: each reference n-gram can only be matched as
/// many times as it occurs in the reference.
fn ngram_score(reference: &[String], candidate: &[String], n: usize) -> Score {
    let reference_ngrams = reference.len().saturating_sub(n - 1);
    let candidate_ngrams = candidate.len().saturating_sub(n - 1);

    let mut reference_counts: HashMap<&[String], usize> = HashMap::new();
    for gram in reference.windows(n) {
        *reference_counts.entry(gram).or_insert(0) += 1;
    }

    let mut candidate_counts: HashMap<&[String], usize> = HashMap::new();
    for gram in candidate.windows(n) {
        *candidate_counts.entry(gram).or_insert(0) += 1;
    }

    let overlap = candidate_counts
        .iter()
        .filter_map(|(gram, count)| {
            reference_counts
                .get(gram)
                .map(|reference_count| (*count).min(*reference_count))
        })
        .sum();

    Score::from_overlap(overlap, reference_ngrams, candidate_ngrams)
}

/// Longest common subsequence length over token sequences, two-row DP.
fn lcs_len(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for token_a in a {
        for (j, token_b) in b.iter().enumerate() {
            curr[j + 1] = if token_a == token_b {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

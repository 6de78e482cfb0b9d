pub mod api;
#[cfg(feature = "bart")]
pub mod bart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod eval;
pub mod rouge;
pub mod summarizer;

use std::sync::Arc;

use dataset::DatasetStore;
use rouge::RougeScorer;
use summarizer::Summarizer;

/// Application state shared across handlers. Everything in here is built
/// once at startup and treated as read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Summarizer,
    /// Absent when no DATA_DIR is configured; evaluation routes then
    /// report the dataset capability as unavailable.
    pub dataset: Option<Arc<DatasetStore>>,
    pub scorer: Arc<RougeScorer>,
}

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Named splits of the CNN/DailyMail corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::Train, Split::Validation, Split::Test];

    fn file_name(&self) -> &'static str {
        match self {
            Split::Train => "train.csv",
            Split::Validation => "validation.csv",
            Split::Test => "test.csv",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Split::Train => write!(f, "train"),
            Split::Validation => write!(f, "validation"),
            Split::Test => write!(f, "test"),
        }
    }
}

/// One dataset record: a news article and its human-written highlights,
/// which serve as the reference summary.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsStory {
    pub article: String,
    pub highlights: String,
}

/// In-memory view of the CNN/DailyMail CSV export. Loaded once at startup
/// and never mutated afterwards.
#[derive(Debug)]
pub struct DatasetStore {
    splits: HashMap<Split, Vec<NewsStory>>,
}

impl DatasetStore {
    /// Reads every split file present under `dir`. At least one of
    /// `train.csv`, `validation.csv`, `test.csv` must exist.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut splits = HashMap::new();

        for split in Split::ALL {
            let path = dir.join(split.file_name());
            if !path.exists() {
                continue;
            }

            let mut reader = csv::Reader::from_path(&path)?;
            let mut stories = Vec::new();
            for record in reader.deserialize() {
                let story: NewsStory = record?;
                stories.push(story);
            }

            tracing::info!(%split, stories = stories.len(), "loaded dataset split");
            splits.insert(split, stories);
        }

        if splits.is_empty() {
            return Err(AppError::Dependency(format!(
                "no dataset splits found in {}",
                dir.display()
            )));
        }

        Ok(DatasetStore { splits })
    }

    /// Builds a store from records already in memory.
    pub fn from_stories(split: Split, stories: Vec<NewsStory>) -> Self {
        let mut splits = HashMap::new();
        splits.insert(split, stories);
        DatasetStore { splits }
    }

    pub fn split(&self, split: Split) -> Result<&[NewsStory]> {
        self.splits
            .get(&split)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::Dependency(format!("dataset split '{split}' is not loaded")))
    }

    /// Returns the story at `index`, or `InvalidIndex` if it is out of
    /// range. Indices are never clamped.
    pub fn get(&self, split: Split, index: usize) -> Result<&NewsStory> {
        let stories = self.split(split)?;
        stories.get(index).ok_or(AppError::InvalidIndex {
            index,
            len: stories.len(),
        })
    }

    pub fn len(&self, split: Split) -> usize {
        self.splits.get(&split).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_test_split(dir: &Path) {
        let mut file = std::fs::File::create(dir.join("test.csv")).unwrap();
        writeln!(file, "id,article,highlights").unwrap();
        writeln!(
            file,
            "a1,\"First article body, with a comma.\",\"First highlight .\""
        )
        .unwrap();
        writeln!(file, "a2,Second article body.,Second highlight .").unwrap();
    }

    #[test]
    fn loads_split_and_returns_stories_by_index() {
        let dir = tempfile::tempdir().unwrap();
        write_test_split(dir.path());

        let store = DatasetStore::load(dir.path()).unwrap();
        assert_eq!(store.len(Split::Test), 2);

        let story = store.get(Split::Test, 0).unwrap();
        assert_eq!(story.article, "First article body, with a comma.");
        assert_eq!(story.highlights, "First highlight .");

        let story = store.get(Split::Test, 1).unwrap();
        assert_eq!(story.article, "Second article body.");
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_test_split(dir.path());

        let store = DatasetStore::load(dir.path()).unwrap();
        let err = store.get(Split::Test, 2).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidIndex { index: 2, len: 2 }
        ));
    }

    #[test]
    fn missing_split_is_a_dependency_error() {
        let dir = tempfile::tempdir().unwrap();
        write_test_split(dir.path());

        let store = DatasetStore::load(dir.path()).unwrap();
        let err = store.get(Split::Train, 0).unwrap_err();
        assert!(matches!(err, AppError::Dependency(_)));
    }

    #[test]
    fn empty_directory_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Dependency(_)));
    }
}

//! Tokenization and stop-word filtering

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::{PipelineError, Result};

/// Split normalized text on whitespace runs.
///
/// Leading and trailing whitespace never produce empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Fixed stop-word set, matched by exact string comparison
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a newline-delimited list (one word per line).
    ///
    /// Lines are trimmed so CRLF files behave like LF files; blank lines are skipped.
    pub fn parse(contents: &str) -> Self {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty()),
        )
    }

    /// Load the list from disk. A missing or unreadable file is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| PipelineError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;
        let stop_words = Self::parse(&contents);
        info!("Loaded {} stop words from {:?}", stop_words.len(), path);
        Ok(stop_words)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop every token in the set, keeping the order of the rest
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !self.contains(token))
            .collect()
    }
}

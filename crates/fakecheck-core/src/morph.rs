//! Morphological analysis for Polish
//!
//! The lemmatizer only needs one operation from an analyzer: given a word
//! form, list its candidate interpretations. [`DictionaryAnalyzer`] answers
//! it from a tab-separated morphological dictionary in the PoliMorf layout:
//!
//! ```text
//! form<TAB>lemma<TAB>tag[<TAB>...]
//! ```
//!
//! Lookup is case-sensitive first: `polska` returns the adjective entries
//! (`polski`) even when a `Polska` proper-noun line precedes them. Only a
//! form with no exact-case entry falls back to case-insensitive matches, so
//! `warszawie` still finds `Warszawa`.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use tracing::info;

use crate::error::{PipelineError, Result};

/// Tag assigned to forms the dictionary does not know
pub const UNKNOWN_TAG: &str = "ign";

/// One candidate analysis of a word form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// The analysed form, as given
    pub orth: String,
    /// Base form, possibly annotated after a `:` (e.g. `zamek:s1`)
    pub lemma: String,
    /// Morphosyntactic tag, `:`-separated
    pub tag: String,
}

impl Interpretation {
    pub fn new(orth: &str, lemma: &str, tag: &str) -> Self {
        Self {
            orth: orth.to_string(),
            lemma: lemma.to_string(),
            tag: tag.to_string(),
        }
    }

    /// Interpretation of an unrecognized form as its own lemma
    pub fn unknown(orth: &str) -> Self {
        Self::new(orth, orth, UNKNOWN_TAG)
    }
}

/// Trait for morphological analyzers
///
/// A dictionary analyzer sees whole forms only. A segmenting analyzer such
/// as Morfeusz splits agglutinated forms (`zrobiłem` into `zrobił` + `em`)
/// and lists the first segment's reading (`zrobić`) first; the dictionary
/// analyzer instead treats such a form as unknown and returns it unchanged.
pub trait MorphAnalyzer: Send + Sync {
    /// Candidate interpretations of `form`, most likely first.
    ///
    /// An empty result is allowed by the trait, but the lemmatizer treats it
    /// as a fatal error.
    fn analyse(&self, form: &str) -> Vec<Interpretation>;

    /// Get the name of this analyzer
    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
struct Entry {
    lemma: String,
    tag: String,
}

/// Analyzer backed by an in-memory form → interpretations dictionary
#[derive(Debug, Clone, Default)]
pub struct DictionaryAnalyzer {
    /// Exact form → interpretations in file order
    entries: HashMap<String, Vec<Entry>>,
    /// Lowercased form → exact forms, in first-seen order
    folded: HashMap<String, Vec<String>>,
}

impl DictionaryAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one interpretation; later insertions for the same form rank lower
    pub fn insert(&mut self, form: &str, lemma: &str, tag: &str) {
        if !self.entries.contains_key(form) {
            self.folded
                .entry(form.to_lowercase())
                .or_default()
                .push(form.to_string());
        }
        self.entries.entry(form.to_string()).or_default().push(Entry {
            lemma: lemma.to_string(),
            tag: tag.to_string(),
        });
    }

    /// Builder-style [`DictionaryAnalyzer::insert`]
    pub fn with_entry(mut self, form: &str, lemma: &str, tag: &str) -> Self {
        self.insert(form, lemma, tag);
        self
    }

    /// Read a dictionary in PoliMorf layout.
    ///
    /// `source` names the input in error messages.
    pub fn from_reader<R: BufRead>(reader: R, source: &Path) -> Result<Self> {
        let mut analyzer = Self::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source_err| PipelineError::ArtifactIo {
                path: source.to_path_buf(),
                source: source_err,
            })?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut columns = line.split('\t');
            match (columns.next(), columns.next(), columns.next()) {
                (Some(form), Some(lemma), Some(tag)) if !form.is_empty() && !lemma.is_empty() => {
                    analyzer.insert(form, lemma, tag);
                }
                _ => {
                    return Err(PipelineError::ArtifactFormat {
                        path: source.to_path_buf(),
                        reason: format!(
                            "line {}: expected form<TAB>lemma<TAB>tag, got {:?}",
                            idx + 1,
                            line
                        ),
                    });
                }
            }
        }

        Ok(analyzer)
    }

    /// Load a dictionary file. A missing file is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| PipelineError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;
        let analyzer = Self::from_reader(std::io::BufReader::new(file), path)?;
        info!(
            "Loaded morphological dictionary from {:?}: {} forms",
            path,
            analyzer.form_count()
        );
        Ok(analyzer)
    }

    /// Number of distinct forms, case-sensitive
    pub fn form_count(&self) -> usize {
        self.entries.len()
    }

    /// Exact-case entries, or every case variant when there are none
    fn lookup(&self, form: &str) -> Vec<&Entry> {
        if let Some(entries) = self.entries.get(form) {
            return entries.iter().collect();
        }
        self.folded
            .get(&form.to_lowercase())
            .into_iter()
            .flatten()
            .filter_map(|variant| self.entries.get(variant))
            .flatten()
            .collect()
    }
}

impl MorphAnalyzer for DictionaryAnalyzer {
    fn analyse(&self, form: &str) -> Vec<Interpretation> {
        let entries = self.lookup(form);
        if entries.is_empty() {
            return vec![Interpretation::unknown(form)];
        }
        entries
            .into_iter()
            .map(|e| Interpretation::new(form, &e.lemma, &e.tag))
            .collect()
    }

    fn name(&self) -> &str {
        "dictionary"
    }
}

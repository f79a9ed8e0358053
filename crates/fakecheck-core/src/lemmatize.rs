//! Lemmatization
//!
//! Every token is replaced by the lemma of the **first** interpretation the
//! analyzer returns. There is no part-of-speech disambiguation: `mamy` maps
//! to whatever the analyzer lists first, even when another reading fits the
//! sentence better. The lemma is cut at its first `:` (dropping homonym and
//! tag annotations) and lowercased.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::morph::MorphAnalyzer;

/// Separator between a lemma and its annotations
pub const TAG_DELIMITER: char = ':';

/// Strip annotations from an analyzer lemma and lowercase it
pub fn strip_lemma(lemma: &str) -> String {
    lemma
        .split(TAG_DELIMITER)
        .next()
        .unwrap_or(lemma)
        .to_lowercase()
}

/// Point in time after which lemmatization gives up
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
    budget_ms: u64,
}

impl Deadline {
    /// Deadline `budget_ms` from now
    pub fn after_ms(budget_ms: u64) -> Self {
        Self {
            at: Instant::now() + Duration::from_millis(budget_ms),
            budget_ms,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// `Err(Timeout)` once the deadline has passed
    pub fn check(&self) -> Result<()> {
        if self.is_expired() {
            return Err(PipelineError::Timeout(self.budget_ms));
        }
        Ok(())
    }
}

/// Maps tokens to base forms using a shared analyzer
#[derive(Clone)]
pub struct Lemmatizer {
    analyzer: Arc<dyn MorphAnalyzer>,
}

impl Lemmatizer {
    pub fn new(analyzer: Arc<dyn MorphAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Lemma of a single token
    pub fn lemma(&self, token: &str) -> Result<String> {
        let interpretations = self.analyzer.analyse(token);
        let first = interpretations
            .first()
            .ok_or_else(|| PipelineError::NoInterpretation(token.to_string()))?;
        Ok(strip_lemma(&first.lemma))
    }

    /// One lemma per token, in token order.
    ///
    /// Fails on the first token the analyzer cannot interpret at all; no
    /// token is ever skipped.
    pub fn lemmas(&self, tokens: &[String]) -> Result<Vec<String>> {
        self.lemmas_within(tokens, None)
    }

    /// [`Lemmatizer::lemmas`] that stops with `Timeout` once `deadline` passes.
    ///
    /// The deadline is checked before every token, so abandoned requests stop
    /// consuming CPU within one analyzer call.
    pub fn lemmas_within(
        &self,
        tokens: &[String],
        deadline: Option<&Deadline>,
    ) -> Result<Vec<String>> {
        let mut lemmas = Vec::with_capacity(tokens.len());
        for token in tokens {
            if let Some(deadline) = deadline {
                deadline.check()?;
            }
            lemmas.push(self.lemma(token)?);
        }
        debug!("Lemmatized {} tokens", lemmas.len());
        Ok(lemmas)
    }

    /// Lemmas joined by single spaces, the shape the vectorizer expects
    pub fn lemmatize(&self, tokens: &[String]) -> Result<String> {
        Ok(self.lemmas(tokens)?.join(" "))
    }
}

impl std::fmt::Debug for Lemmatizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lemmatizer")
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::{DictionaryAnalyzer, Interpretation};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Analyzer that knows nothing and admits it
    struct SilentAnalyzer;

    impl MorphAnalyzer for SilentAnalyzer {
        fn analyse(&self, _form: &str) -> Vec<Interpretation> {
            Vec::new()
        }

        fn name(&self) -> &str {
            "silent"
        }
    }

    fn lemmatizer() -> Lemmatizer {
        let analyzer = DictionaryAnalyzer::new()
            .with_entry("fałszywa", "fałszywy", "adj:sg:nom.voc:f:pos")
            .with_entry("wiadomość", "wiadomość", "subst:sg:nom.acc.voc:f")
            .with_entry("kotów", "kot:Sm1", "subst:pl:gen.acc:m1")
            .with_entry("mamy", "mama", "subst:pl:nom.acc.voc:f")
            .with_entry("mamy", "mieć", "fin:pl:pri:imperf")
            .with_entry("warszawie", "Warszawa", "subst:sg:dat.loc:f");
        Lemmatizer::new(Arc::new(analyzer))
    }

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_reference_tokens() {
        let lemmas = lemmatizer()
            .lemmas(&tokens(&["fałszywa", "wiadomość"]))
            .unwrap();
        assert_eq!(lemmas, vec!["fałszywy", "wiadomość"]);
    }

    #[test]
    fn test_annotations_are_stripped() {
        assert_eq!(lemmatizer().lemma("kotów").unwrap(), "kot");
        assert_eq!(strip_lemma("zamek:s1"), "zamek");
        assert_eq!(strip_lemma("kot"), "kot");
    }

    #[test]
    fn test_proper_noun_lemma_is_lowercased() {
        assert_eq!(lemmatizer().lemma("warszawie").unwrap(), "warszawa");
    }

    /// Known simplification: the first interpretation always wins, even when
    /// the verb reading ("mieć") would be the right one.
    #[test]
    fn test_first_interpretation_wins() {
        assert_eq!(lemmatizer().lemma("mamy").unwrap(), "mama");
    }

    #[test]
    fn test_unknown_token_maps_to_itself() {
        assert_eq!(lemmatizer().lemma("covid").unwrap(), "covid");
    }

    #[test]
    fn test_zero_interpretations_is_fatal_and_names_token() {
        let lemmatizer = Lemmatizer::new(Arc::new(SilentAnalyzer));
        let err = lemmatizer
            .lemmas(&tokens(&["fałszywa", "wiadomość"]))
            .unwrap_err();
        match err {
            PipelineError::NoInterpretation(token) => assert_eq!(token, "fałszywa"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lemmatize_joins_with_spaces() {
        let joined = lemmatizer()
            .lemmatize(&tokens(&["kotów", "mamy", "fałszywa"]))
            .unwrap();
        assert_eq!(joined, "kot mama fałszywy");
        assert_eq!(lemmatizer().lemmatize(&[]).unwrap(), "");
    }

    #[test]
    fn test_expired_deadline_stops_lemmatization() {
        let deadline = Deadline::after_ms(0);
        let err = lemmatizer()
            .lemmas_within(&tokens(&["fałszywa", "wiadomość"]), Some(&deadline))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Timeout(0)));
    }

    #[test]
    fn test_deadline_is_not_checked_without_tokens() {
        let deadline = Deadline::after_ms(0);
        assert!(lemmatizer().lemmas_within(&[], Some(&deadline)).unwrap().is_empty());
    }

    #[test]
    fn test_generous_deadline_lets_lemmas_through() {
        let deadline = Deadline::after_ms(60_000);
        assert!(!deadline.is_expired());
        let lemmas = lemmatizer()
            .lemmas_within(&tokens(&["kotów", "mamy"]), Some(&deadline))
            .unwrap();
        assert_eq!(lemmas, vec!["kot", "mama"]);
    }

    proptest! {
        /// Property: one lemma per token
        #[test]
        fn lemma_count_matches_token_count(
            words in proptest::collection::vec("[a-ząćęłńóśźż]{1,10}", 0..40)
        ) {
            let lemmas = lemmatizer().lemmas(&words).unwrap();
            prop_assert_eq!(lemmas.len(), words.len());
        }
    }
}

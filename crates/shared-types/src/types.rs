use std::fmt;

/// Output of a single classifier as shown to the reader.
///
/// `Unknown` is the placeholder used before anything has been submitted.
/// It is never produced by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Label {
    True,
    False,
    Unknown,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::True => "True",
            Label::False => "False",
            Label::Unknown => "?",
        }
    }
}

impl From<bool> for Label {
    fn from(value: bool) -> Self {
        if value {
            Label::True
        } else {
            Label::False
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate verdict for an article
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Verdict {
    ProbablyTrue,
    ProbablyFake,
    Unknown,
}

impl Verdict {
    /// Human-readable verdict sentence (Polish)
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::ProbablyTrue => "To prawdopodobnie prawdziwa informacja",
            Verdict::ProbablyFake => "To prawdopodobnie fałszywa informacja",
            Verdict::Unknown => "?",
        }
    }
}

impl From<bool> for Verdict {
    fn from(value: bool) -> Self {
        if value {
            Verdict::ProbablyTrue
        } else {
            Verdict::ProbablyFake
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerdictReport {
    pub verdict: Verdict,
    pub naive_bayes: Label, // Multinomial naive Bayes
    pub linear_svc: Label,  // Linear support vector machine
    pub random_forest: Label,
}

impl VerdictReport {
    /// Report shown before any article has been submitted
    pub fn pending() -> Self {
        Self {
            verdict: Verdict::Unknown,
            naive_bayes: Label::Unknown,
            linear_svc: Label::Unknown,
            random_forest: Label::Unknown,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.verdict == Verdict::Unknown
    }

    /// The four display strings in output order: verdict, NB, SVC, RF
    pub fn display_values(&self) -> [String; 4] {
        [
            self.verdict.to_string(),
            self.naive_bayes.to_string(),
            self.linear_svc.to_string(),
            self.random_forest.to_string(),
        ]
    }
}

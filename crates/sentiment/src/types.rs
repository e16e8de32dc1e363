use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical sentiment band derived from a clamped score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 5] = [
        SentimentLabel::VeryNegative,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
        SentimentLabel::VeryPositive,
    ];

    /// Map a score onto its band.
    ///
    /// Bands: `(-inf, -2]`, `(-2, 0)`, `[0, 0]`, `(0, 2]`, `(2, +inf)`.
    /// NaN never reaches this from the scorer; it falls into `Neutral`.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score <= -2.0 {
            Self::VeryNegative
        } else if score < 0.0 {
            Self::Negative
        } else if score > 2.0 {
            Self::VeryPositive
        } else if score > 0.0 {
            Self::Positive
        } else {
            Self::Neutral
        }
    }

    /// Human-readable band name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryNegative => "Very Negative",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Positive => "Positive",
            Self::VeryPositive => "Very Positive",
        }
    }

    /// Advisory text shown next to the review, completing "This review ...".
    #[must_use]
    pub const fn feedback(self) -> &'static str {
        match self {
            Self::VeryNegative => {
                "expresses significant concerns; immediate attention may be required"
            }
            Self::Negative => "has a negative sentiment; consider addressing the concerns raised",
            Self::Neutral => {
                "has a neutral sentiment; consider finding ways to improve satisfaction"
            }
            Self::Positive => "has a positive sentiment; keep up the good work",
            Self::VeryPositive => "is extremely positive; excellent job",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    /// Clamped score in `[-5, 5]`
    pub score: f64,
    pub label: SentimentLabel,
    pub feedback: &'static str,
}

impl SentimentResult {
    pub(crate) fn from_score(score: f64) -> Self {
        let label = SentimentLabel::from_score(score);
        Self {
            score,
            label,
            feedback: label.feedback(),
        }
    }
}

/// A token that carried lexicon weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMatch {
    pub token: String,
    pub weight: i32,
}

/// Scoring result together with the intermediate values that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentAnalysis {
    #[serde(flatten)]
    pub result: SentimentResult,
    pub tokens: usize,
    /// Sum of lexicon weights before curated adjustments
    pub lexicon_score: i32,
    /// Adjusted and rescaled score before clamping
    pub raw_score: f64,
    pub matches: Vec<TokenMatch>,
    pub boosted: Vec<String>,
    pub penalized: Vec<String>,
}

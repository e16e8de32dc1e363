use thiserror::Error;

/// Result type for scorer construction
pub type Result<T> = std::result::Result<T, SentimentError>;

/// Errors raised while building a [`Scorer`](crate::Scorer).
///
/// Scoring itself is total; only tuning overrides can be rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SentimentError {
    /// A numeric tuning knob is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A lexicon override weight falls outside the AFINN range
    #[error("Lexicon weight for '{word}' is {weight}, expected -5..=5")]
    WeightOutOfRange { word: String, weight: i32 },

    /// A configured word would never match a normalized token
    #[error("Word '{0}' is not a single lowercase token")]
    UnmatchableWord(String),
}

impl SentimentError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

//! # Engage Sentiment
//!
//! Lexicon-based sentiment scoring for business reviews.
//!
//! ## Pipeline
//!
//! ```text
//! Review text
//!     │
//!     ├──> Normalization (lowercase + Unicode word segmentation)
//!     │
//!     ├──> Base score: sum of AFINN weights (unknown words = 0)
//!     │
//!     ├──> Curated adjustments
//!     │    ├─> +bonus per boost-word hit
//!     │    └─> -penalty per penalty-word hit
//!     │
//!     ├──> Linear rescale (×scale, not normalized by length)
//!     │
//!     └──> Clamp to [-5, 5] → label + feedback
//! ```
//!
//! The scorer is a bag-of-words heuristic: it has no notion of negation,
//! context or grammar, and it never fails.
//!
//! ## Example
//!
//! ```rust
//! use engage_sentiment::{score, SentimentLabel};
//!
//! let result = score("Excellent tacos, friendly staff!");
//! assert_eq!(result.label, SentimentLabel::VeryPositive);
//! assert!(result.score <= 5.0);
//!
//! let neutral = score("");
//! assert_eq!(neutral.score, 0.0);
//! assert_eq!(neutral.label, SentimentLabel::Neutral);
//! ```

mod config;
mod error;
mod lexicon;
mod scorer;
mod tokenizer;
mod types;

pub use config::ScorerConfig;
pub use error::{Result, SentimentError};
pub use lexicon::{afinn_len, afinn_weight, BOOST_WORDS, PENALTY_WORDS};
pub use scorer::{score, Scorer, SCORE_BOUND};
pub use tokenizer::tokenize;
pub use types::{SentimentAnalysis, SentimentLabel, SentimentResult, TokenMatch};

use crate::error::{Result, SentimentError};
use crate::lexicon::{BOOST_WORDS, PENALTY_WORDS};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tuning knobs for the scorer.
///
/// Defaults reproduce the production heuristic exactly. There is no clamp
/// knob: scores stay within `[-5, 5]` for any configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScorerConfig {
    /// Added once per boost-word token
    pub bonus: f64,

    /// Subtracted once per penalty-word token
    pub penalty: f64,

    /// Linear multiplier applied to the adjusted sum
    pub scale: f64,

    /// Words earning `bonus`
    pub boost_words: Vec<String>,

    /// Words incurring `penalty`
    pub penalty_words: Vec<String>,

    /// Extra or replacement lexicon weights, consulted before AFINN (0 silences a word)
    pub lexicon: BTreeMap<String, i32>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            bonus: 0.5,
            penalty: 0.5,
            scale: 5.0,
            boost_words: BOOST_WORDS.iter().map(|w| (*w).to_string()).collect(),
            penalty_words: PENALTY_WORDS.iter().map(|w| (*w).to_string()).collect(),
            lexicon: BTreeMap::new(),
        }
    }
}

impl ScorerConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.bonus.is_finite() || self.bonus < 0.0 {
            return Err(SentimentError::invalid_config(format!(
                "bonus must be a finite non-negative number (got {})",
                self.bonus
            )));
        }

        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(SentimentError::invalid_config(format!(
                "penalty must be a finite non-negative number (got {})",
                self.penalty
            )));
        }

        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SentimentError::invalid_config(format!(
                "scale must be a finite positive number (got {})",
                self.scale
            )));
        }

        for word in self.boost_words.iter().chain(&self.penalty_words) {
            ensure_single_token(word)?;
        }

        for (word, weight) in &self.lexicon {
            ensure_single_token(word)?;
            if !(-5..=5).contains(weight) {
                return Err(SentimentError::WeightOutOfRange {
                    word: word.clone(),
                    weight: *weight,
                });
            }
        }

        Ok(())
    }
}

fn ensure_single_token(word: &str) -> Result<()> {
    match tokenize(word).as_slice() {
        [only] if only == word => Ok(()),
        _ => Err(SentimentError::UnmatchableWord(word.to_string())),
    }
}

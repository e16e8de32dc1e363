use crate::config::ScorerConfig;
use crate::error::Result;
use crate::lexicon::afinn_weight;
use crate::tokenizer::tokenize;
use crate::types::{SentimentAnalysis, SentimentResult, TokenMatch};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Scores are clamped to `[-SCORE_BOUND, SCORE_BOUND]`.
pub const SCORE_BOUND: f64 = 5.0;

static DEFAULT_SCORER: Lazy<Scorer> = Lazy::new(Scorer::default);

/// Score `text` with the default tuning.
///
/// ```rust
/// use engage_sentiment::{score, SentimentLabel};
///
/// assert_eq!(score("The worst, most disappointing visit").label, SentimentLabel::VeryNegative);
/// ```
#[must_use]
pub fn score(text: &str) -> SentimentResult {
    DEFAULT_SCORER.score(text)
}

/// Lexicon scorer with immutable tuning.
///
/// Cheap to share: it holds no interior mutability and is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct Scorer {
    bonus: f64,
    penalty: f64,
    scale: f64,
    boost_words: HashSet<String>,
    penalty_words: HashSet<String>,
    overrides: HashMap<String, i32>,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::from_config(ScorerConfig::default())
    }
}

impl Scorer {
    /// Build a scorer from validated tuning overrides.
    pub fn new(config: ScorerConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "sentiment scorer: bonus={} penalty={} scale={} boost={} penalty_words={} overrides={}",
            config.bonus,
            config.penalty,
            config.scale,
            config.boost_words.len(),
            config.penalty_words.len(),
            config.lexicon.len()
        );
        Ok(Self::from_config(config))
    }

    fn from_config(config: ScorerConfig) -> Self {
        Self {
            bonus: config.bonus,
            penalty: config.penalty,
            scale: config.scale,
            boost_words: config.boost_words.into_iter().collect(),
            penalty_words: config.penalty_words.into_iter().collect(),
            overrides: config.lexicon.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn score(&self, text: &str) -> SentimentResult {
        self.analyze(text).result
    }

    /// Score `text` and keep the per-token evidence.
    #[must_use]
    pub fn analyze(&self, text: &str) -> SentimentAnalysis {
        let tokens = tokenize(text);

        let mut lexicon_score = 0i32;
        let mut adjustment = 0.0f64;
        let mut matches = Vec::new();
        let mut boosted = Vec::new();
        let mut penalized = Vec::new();

        for token in &tokens {
            if let Some(weight) = self.weight(token) {
                lexicon_score = lexicon_score.saturating_add(weight);
                matches.push(TokenMatch {
                    token: token.clone(),
                    weight,
                });
            }
            if self.boost_words.contains(token) {
                adjustment += self.bonus;
                boosted.push(token.clone());
            }
            if self.penalty_words.contains(token) {
                adjustment -= self.penalty;
                penalized.push(token.clone());
            }
        }

        let raw_score = if tokens.is_empty() {
            0.0
        } else {
            (f64::from(lexicon_score) + adjustment) * self.scale
        };

        SentimentAnalysis {
            result: SentimentResult::from_score(clamp_score(raw_score)),
            tokens: tokens.len(),
            lexicon_score,
            raw_score,
            matches,
            boosted,
            penalized,
        }
    }

    fn weight(&self, token: &str) -> Option<i32> {
        match self.overrides.get(token) {
            Some(weight) => Some(*weight).filter(|w| *w != 0),
            None => afinn_weight(token).map(i32::from),
        }
    }
}

fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    let clamped = raw.clamp(-SCORE_BOUND, SCORE_BOUND);
    // Collapse -0.0 so equal inputs never differ only by sign bit.
    if clamped == 0.0 {
        0.0
    } else {
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SentimentLabel;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_text_is_neutral() {
        let result = score("");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert_eq!(
            result.feedback,
            "has a neutral sentiment; consider finding ways to improve satisfaction"
        );
    }

    #[test]
    fn text_without_known_words_is_neutral() {
        let result = score("We arrived on Tuesday around noon.");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn everyday_complaint_words_count() {
        // unfortunately(-2) + wasted(-2) = -4 -> -20 -> -5
        let analysis = Scorer::default().analyze("Unfortunately our evening was wasted");
        assert_eq!(analysis.lexicon_score, -4);
        assert_eq!(analysis.result.score, -5.0);
        assert_eq!(analysis.result.label, SentimentLabel::VeryNegative);
    }

    #[test]
    fn single_positive_word_saturates() {
        // good = 3, no bonus: 3 * 5 = 15 -> 5
        let analysis = Scorer::default().analyze("Good coffee");
        assert_eq!(analysis.lexicon_score, 3);
        assert_eq!(analysis.raw_score, 15.0);
        assert_eq!(analysis.result.score, 5.0);
        assert_eq!(analysis.result.label, SentimentLabel::VeryPositive);
    }

    #[test]
    fn bonus_and_penalty_are_applied_per_token() {
        // great(3)+0.5, terrible(-3)-0.5, terrible(-3)-0.5 => -3.5 * 5
        let analysis = Scorer::default().analyze("Great view, terrible food, TERRIBLE service");
        assert_eq!(analysis.lexicon_score, -3);
        assert_eq!(analysis.boosted, vec!["great"]);
        assert_eq!(analysis.penalized, vec!["terrible", "terrible"]);
        assert_eq!(analysis.raw_score, -17.5);
        assert_eq!(analysis.result.score, -5.0);
        assert_eq!(analysis.result.label, SentimentLabel::VeryNegative);
    }

    #[test]
    fn balanced_review_cancels_out() {
        // great(3.5) + terrible(-3.5) = 0
        let result = score("great location but terrible parking");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn half_point_imbalance_lands_beyond_two() {
        // great(3.5) + angry(-3) = 0.5 -> 2.5
        let result = score("great burgers, angry cashier");
        assert_eq!(result.score, 2.5);
        assert_eq!(result.label, SentimentLabel::VeryPositive);
    }

    #[test]
    fn custom_scale_reaches_the_inner_bands() {
        let scorer = Scorer::new(ScorerConfig {
            scale: 1.0,
            ..Default::default()
        })
        .unwrap();

        let positive = scorer.score("great burgers, angry cashier");
        assert_eq!(positive.score, 0.5);
        assert_eq!(positive.label, SentimentLabel::Positive);

        let negative = scorer.score("bad fries, good shake");
        assert_eq!(negative.score, -0.5);
        assert_eq!(negative.label, SentimentLabel::Negative);
    }

    #[test]
    fn overrides_take_precedence_over_afinn() {
        let mut config = ScorerConfig::default();
        config.lexicon.insert("walkable".to_string(), 1);
        config.lexicon.insert("no".to_string(), 0);
        config.scale = 1.0;
        let scorer = Scorer::new(config).unwrap();

        let analysis = scorer.analyze("no parking, very walkable");
        assert_eq!(analysis.lexicon_score, 1);
        assert_eq!(
            analysis.matches,
            vec![TokenMatch {
                token: "walkable".to_string(),
                weight: 1
            }]
        );
        assert_eq!(analysis.result.label, SentimentLabel::Positive);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ScorerConfig {
            scale: -1.0,
            ..Default::default()
        };
        assert!(Scorer::new(config).is_err());
    }

    #[test]
    fn clamp_normalizes_signed_zero() {
        assert_eq!(clamp_score(-0.0).to_bits(), 0.0f64.to_bits());
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(1e300), SCORE_BOUND);
        assert_eq!(clamp_score(f64::NEG_INFINITY), -SCORE_BOUND);
    }

    #[test]
    fn scorer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Scorer>();
    }
}

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Strongly positive words that earn a bonus on top of their AFINN weight.
pub const BOOST_WORDS: [&str; 10] = [
    "excellent",
    "amazing",
    "outstanding",
    "fantastic",
    "wonderful",
    "great",
    "awesome",
    "perfect",
    "love",
    "best",
];

/// Strongly negative words that incur a penalty on top of their AFINN weight.
pub const PENALTY_WORDS: [&str; 8] = [
    "terrible",
    "awful",
    "horrible",
    "worst",
    "disappointing",
    "poor",
    "bad",
    "hate",
];

// AFINN-165 word list: one `word<TAB>weight` pair per line, weights in
// -5..=5. Multi-word and hyphenated entries never match a single token.
const AFINN_165: &str = include_str!("../data/AFINN-165.txt");

static AFINN: Lazy<HashMap<&'static str, i8>> = Lazy::new(|| afinn_entries().collect());

fn afinn_entries() -> impl Iterator<Item = (&'static str, i8)> {
    AFINN_165.lines().filter_map(|line| {
        let (word, weight) = line.split_once('\t')?;
        Some((word, weight.trim().parse().ok()?))
    })
}

/// AFINN weight for an already-normalized token.
#[must_use]
pub fn afinn_weight(token: &str) -> Option<i8> {
    AFINN.get(token).copied()
}

/// Number of words in the built-in lexicon.
#[must_use]
pub fn afinn_len() -> usize {
    AFINN.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    #[test]
    fn every_line_parses() {
        let lines = AFINN_165.lines().filter(|line| !line.is_empty()).count();
        assert_eq!(afinn_entries().count(), lines);
        assert!(lines > 3000, "only {lines} AFINN entries");
    }

    #[test]
    fn entries_are_sorted_and_unique() {
        let words: Vec<&str> = afinn_entries().map(|(word, _)| word).collect();
        for pair in words.windows(2) {
            assert!(
                pair[0] < pair[1],
                "lexicon out of order: {} >= {}",
                pair[0],
                pair[1]
            );
        }
        assert_eq!(afinn_len(), words.len());
    }

    #[test]
    fn weights_stay_in_afinn_range() {
        for (word, weight) in afinn_entries() {
            assert!(
                (-5..=5).contains(&weight) && weight != 0,
                "{word} has weight {weight}"
            );
        }
    }

    #[test]
    fn single_word_entries_survive_tokenization() {
        for (word, _) in afinn_entries().filter(|(word, _)| !word.contains([' ', '-'])) {
            assert_eq!(tokenize(word), vec![word.to_string()]);
        }
    }

    #[test]
    fn common_review_words_are_weighted() {
        assert_eq!(afinn_weight("unfortunately"), Some(-2));
        assert_eq!(afinn_weight("wasted"), Some(-2));
        assert_eq!(afinn_weight("ok"), Some(2));
        assert_eq!(afinn_weight("yes"), Some(1));
        assert_eq!(afinn_weight("superb"), Some(5));
        assert_eq!(afinn_weight("bastard"), Some(-5));
    }

    #[test]
    fn phrases_are_loaded_but_unreachable_by_tokens() {
        assert_eq!(afinn_weight("can't stand"), Some(-3));
        assert!(tokenize("can't stand").iter().all(|t| t != "can't stand"));
    }

    #[test]
    fn curated_words_are_polarized_in_the_lexicon() {
        for word in BOOST_WORDS {
            assert!(afinn_weight(word).is_some_and(|w| w > 0), "{word}");
        }
        for word in PENALTY_WORDS {
            assert!(afinn_weight(word).is_some_and(|w| w < 0), "{word}");
        }
    }

    #[test]
    fn unknown_words_have_no_weight() {
        assert_eq!(afinn_weight("tuesday"), None);
        assert_eq!(afinn_weight("Great"), None);
        assert_eq!(afinn_weight("great"), Some(3));
    }
}

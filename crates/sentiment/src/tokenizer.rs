use unicode_segmentation::UnicodeSegmentation;

/// Lowercase `text` and split it into UAX #29 words.
///
/// Whitespace, punctuation and symbol-only segments (emoji included) are
/// dropped, so `"Great!!!"` yields `["great"]`.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let lowered = text.to_lowercase();
    lowered.unicode_words().map(str::to_owned).collect()
}

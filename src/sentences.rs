//! Sentence splitting for the abstract sentence picker.

use regex::Regex;
use std::sync::OnceLock;

const MIN_SENTENCE_CHARS: usize = 5;
const MAX_LABEL_CHARS: usize = 60;
const TRUNCATED_LABEL_CHARS: usize = 57;

fn boundary() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]\s+").expect("valid sentence boundary regex"))
}

/// Split `text` after terminal punctuation followed by whitespace. Very short
/// fragments (abbreviations, stray numbering) are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last = 0;

    for m in boundary().find_iter(text) {
        // Keep the punctuation with its sentence.
        let cut = m.start() + 1;
        sentences.push(&text[last..cut]);
        last = m.end();
    }
    sentences.push(&text[last..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

/// Short label for a sentence in the picker.
pub fn display_label(sentence: &str) -> String {
    if sentence.chars().count() > MAX_LABEL_CHARS {
        let cut: String = sentence.chars().take(TRUNCATED_LABEL_CHARS).collect();
        format!("{}...", cut)
    } else {
        sentence.to_string()
    }
}

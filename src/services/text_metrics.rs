// Lexical Metrics
// Counting primitives shared by the human-likeness and readability scorers

use regex::Regex;
use std::sync::OnceLock;

fn sentence_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").expect("sentence break regex"))
}

fn vowel_group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[aeiouy]+").expect("vowel group regex"))
}

/// Tokens and counts derived from one text sample.
/// Rebuilt on every scoring call and never shared.
#[derive(Debug, Clone)]
pub struct TokenSet<'a> {
    pub words: Vec<&'a str>,
    pub sentences: usize,
    pub syllables: usize,
}

impl<'a> TokenSet<'a> {
    pub fn from_text(text: &'a str) -> Self {
        let words = word_tokens(text);
        let syllables = words.iter().map(|w| syllable_count(w)).sum();
        Self {
            words,
            sentences: sentence_count(text),
            syllables,
        }
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Whitespace-delimited word tokens. Whitespace-only text yields no tokens.
pub fn word_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of fragments between runs of `.`, `!` and `?`.
/// Only zero-length fragments are dropped, so whitespace between spaced
/// punctuation (`"! ! !"`) still counts. The result is floored at 1.
pub fn sentence_count(text: &str) -> usize {
    let count = sentence_break_re()
        .split(text)
        .filter(|frag| !frag.is_empty())
        .count();
    count.max(1)
}

/// Syllable proxy: number of maximal vowel runs (`y` counts as a vowel).
pub fn syllable_count(word: &str) -> usize {
    let lower = word.to_lowercase();
    vowel_group_re().find_iter(&lower).count()
}

//! Display-text assembly.
//!
//! A phrase's words are joined with single spaces, except where the
//! preceding word sets `join_with_next` — the flag marks syllable splits
//! that must concatenate directly ("shine" + "on" → "shineon"). The sung
//! prefix is reported as a byte offset rather than baked-in markup, so each
//! renderer picks its own highlight representation.

use crate::types::LyricWord;

/// Rendered text for one phrase plus the byte offset where the sung
/// (highlighted) prefix ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayText {
    pub text: String,
    pub highlight_end: usize,
}

/// Join `words` into display text, highlighting the first `sung` words.
///
/// The separator between the last sung word and the first unsung word is
/// left outside the highlight range. `sung == 0` produces the fully
/// unhighlighted form; `sung >= words.len()` highlights everything.
pub fn assemble(words: &[LyricWord], sung: usize) -> DisplayText {
    let mut text = String::new();
    let mut highlight_end = 0;

    for (i, word) in words.iter().enumerate() {
        if i > 0 && !words[i - 1].join_with_next {
            text.push(' ');
        }
        text.push_str(&word.text);
        if i < sung {
            highlight_end = text.len();
        }
    }

    DisplayText {
        text,
        highlight_end,
    }
}

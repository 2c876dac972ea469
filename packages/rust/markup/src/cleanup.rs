//! Final passes over the flattened markup string.
//!
//! Each pass is a function `&str -> String` applied in sequence.

use crate::PARAGRAPH;

/// Run the cleanup pipeline on flattened markup.
pub(crate) fn run_pipeline(markup: &str) -> String {
    let mut result = markup.trim().to_string();

    result = strip_stray_hashes(&result);
    result = strip_trailing_separator(&result);

    result
}

// ---------------------------------------------------------------------------
// Pass 1: Stray hash characters
// ---------------------------------------------------------------------------

/// Drop every `#` that is not part of a run of two or more.
fn strip_stray_hashes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == '#' {
            let prev = i > 0 && chars[i - 1] == '#';
            let next = chars.get(i + 1) == Some(&'#');
            if !prev && !next {
                continue;
            }
        }
        out.push(c);
    }

    out
}

// ---------------------------------------------------------------------------
// Pass 2: Trailing paragraph separator
// ---------------------------------------------------------------------------

/// Remove one trailing paragraph separator, if present.
fn strip_trailing_separator(text: &str) -> String {
    text.strip_suffix(PARAGRAPH).unwrap_or(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stray_hashes_removed_doubles_kept() {
        assert_eq!(strip_stray_hashes("a # b"), "a  b");
        assert_eq!(strip_stray_hashes("#x"), "x");
        assert_eq!(strip_stray_hashes("a ## b"), "a ## b");
        assert_eq!(strip_stray_hashes("###"), "###");
    }

    #[test]
    fn only_one_separator_trimmed() {
        assert_eq!(strip_trailing_separator("__a____"), "__a__");
        assert_eq!(strip_trailing_separator("a"), "a");
    }

    #[test]
    fn pipeline_trims_first() {
        assert_eq!(run_pipeline("  __a__  "), "__a");
    }
}

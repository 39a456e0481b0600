//! Text processing utilities.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::TextNormalizationMode;

static RE_HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid horizontal whitespace pattern"));
static RE_SPACE_AROUND_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\n ?").expect("valid newline padding pattern"));

/// Canonicalize whitespace before chunking.
///
/// In [`TextNormalizationMode::PreserveParagraphs`] line endings are unified
/// to `\n`, runs of other whitespace become a single space, spaces touching a
/// line break are removed and the result is trimmed. Line breaks survive so
/// they can delimit paragraphs. [`TextNormalizationMode::CollapseAll`] joins
/// every word with a single space.
pub fn normalize_text(text: &str, mode: TextNormalizationMode) -> String {
    match mode {
        TextNormalizationMode::PreserveParagraphs => {
            let unified = text.replace("\r\n", "\n").replace('\r', "\n");
            let collapsed = RE_HORIZONTAL_SPACE.replace_all(&unified, " ");
            let tightened = RE_SPACE_AROUND_NEWLINE.replace_all(&collapsed, "\n");
            tightened.trim().to_string()
        }
        TextNormalizationMode::CollapseAll => split_words(text).join(" "),
    }
}

/// Split normalized text into paragraphs on runs of line breaks.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Count non-overlapping occurrences of `word` in `haystack` that are not
/// glued to other word characters on either side.
///
/// A hit rejected at the boundary only advances the search by one character,
/// so a whole-word occurrence overlapping it is still found.
pub fn count_whole_word(haystack: &str, word: &str) -> usize {
    if word.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut from = 0;
    while let Some(offset) = haystack[from..].find(word) {
        let start = from + offset;
        let end = start + word.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();

        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            count += 1;
            from = end;
        } else {
            from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_preserves_line_breaks() {
        let text = "  First\t\tline  \r\n   second   line \n\n\n third  ";
        let normalized = normalize_text(text, TextNormalizationMode::PreserveParagraphs);
        assert_eq!(normalized, "First line\nsecond line\n\n\nthird");
    }

    #[test]
    fn test_normalize_collapse_all() {
        let text = "First\nsecond\r\n\r\nthird \t fourth";
        let normalized = normalize_text(text, TextNormalizationMode::CollapseAll);
        assert_eq!(normalized, "First second third fourth");
    }

    #[test]
    fn test_normalize_whitespace_only() {
        assert_eq!(
            normalize_text(" \n\t\r\n ", TextNormalizationMode::PreserveParagraphs),
            ""
        );
        assert_eq!(normalize_text("   ", TextNormalizationMode::CollapseAll), "");
    }

    #[test]
    fn test_split_paragraphs_discards_empty() {
        let paragraphs = split_paragraphs("one\n\n\ntwo\nthree");
        assert_eq!(paragraphs, vec!["one", "two", "three"]);
        assert!(split_paragraphs("").is_empty());
    }

    #[test]
    fn test_count_whole_word() {
        assert_eq!(count_whole_word("learn learning learn.", "learn"), 2);
        assert_eq!(count_whole_word("machine-learning", "learning"), 1);
        assert_eq!(count_whole_word("relearn", "learn"), 0);
        assert_eq!(count_whole_word("learn_more", "learn"), 0);
        assert_eq!(count_whole_word("", "learn"), 0);
        assert_eq!(count_whole_word("anything", ""), 0);
    }

    #[test]
    fn test_count_whole_word_unicode() {
        assert_eq!(count_whole_word("célula, células e célula", "célula"), 2);
        assert_eq!(count_whole_word("microcélula", "célula"), 0);
    }

    #[test]
    fn test_count_whole_word_after_rejected_overlap() {
        assert_eq!(count_whole_word("cab-ab-ab", "ab-ab"), 1);
        assert_eq!(count_whole_word("xab-ab-ab ab-ab", "ab-ab"), 2);
        assert_eq!(count_whole_word("ab-ab-ab", "ab-ab"), 1);
        assert_eq!(count_whole_word("éab-ab-ab", "ab-ab"), 1);
    }
}

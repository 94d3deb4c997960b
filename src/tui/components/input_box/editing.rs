//! Pure editing helpers for the InputBox: character and word boundaries
//! over UTF-8 byte offsets, and display width for cursor placement.

use unicode_width::UnicodeWidthStr;

/// Border consumed on each side by the bordered block
pub(super) const BORDER_OFFSET: u16 = 1;

/// Inner content width after the left and right borders.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(2 * BORDER_OFFSET)
}

/// Terminal columns taken by `text[..pos]`. Vietnamese diacritics are
/// combining-free in NFC and take one column; CJK takes two.
pub(super) fn display_width(text: &str, pos: usize) -> usize {
    text[..pos].width()
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `pos`, skipping separators first
/// (readline `backward-word`).
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut boundary = pos;
    let mut seen_word = false;
    for (i, c) in text[..pos].char_indices().rev() {
        if is_word_char(c) {
            seen_word = true;
        } else if seen_word {
            break;
        }
        boundary = i;
    }
    boundary
}

/// End of the word after `pos`, skipping separators first
/// (readline `forward-word`).
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut seen_word = false;
    for (i, c) in text[pos..].char_indices() {
        if is_word_char(c) {
            seen_word = true;
        } else if seen_word {
            return pos + i;
        }
    }
    text.len()
}

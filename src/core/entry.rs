//! # Vocabulary Entries
//!
//! A raw entry line looks like `word /phonetic/: meaning`. The phonetic block
//! is optional, the meaning may be empty, and the tag travels separately.
//!
//! ```text
//! "apple /ˈæp.əl/: quả táo"
//!  ├── word:     "apple"
//!  ├── phonetic: Some("ˈæp.əl")
//!  └── meaning:  "quả táo"
//! ```
//!
//! Two constructors exist:
//! - [`parse`] is what users go through. It requires the `:` delimiter.
//! - [`VocabEntry::from_text`] is for text that was already accepted once
//!   (storage, import files). A missing `:` just means an empty meaning.
//!
//! `|` and line breaks are reserved by the `entry|tag` export format, so
//! [`parse`] refuses them in entry text and [`validate_tag`] refuses line
//! breaks in tags.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Tag given to entries added without one.
pub const DEFAULT_TAG: &str = "General";

static PHONETIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*/([^/]+)/$").expect("phonetic pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing ':' delimiter (format: word:meaning)")]
    MissingDelimiter,
    #[error("word is empty (format: word:meaning)")]
    EmptyWord,
    #[error("{0:?} is reserved ('|' and line breaks cannot be stored)")]
    ReservedCharacter(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    /// Entry text as stored and exported, trimmed.
    pub text: String,
    pub word: String,
    pub phonetic: Option<String>,
    pub meaning: String,
    pub tag: String,
}

impl VocabEntry {
    /// Builds an entry from previously stored text without enforcing the
    /// delimiter. Returns `None` if there is no word at all.
    pub fn from_text(text: &str, tag: &str) -> Option<Self> {
        let text = text.trim();
        let (word_part, meaning) = text.split_once(':').unwrap_or((text, ""));
        let (word, phonetic) = split_phonetic(word_part);
        if word.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            word,
            phonetic,
            meaning: meaning.trim().to_string(),
            tag: normalize_tag(tag),
        })
    }

    /// The prompt shown during a quiz, with phonetics when present.
    pub fn prompt(&self) -> String {
        match &self.phonetic {
            Some(phonetic) => format!("{} /{}/", self.word, phonetic),
            None => self.word.clone(),
        }
    }
}

/// Parses a user-typed line into an entry.
pub fn parse(raw: &str, tag: &str) -> Result<VocabEntry, ParseError> {
    let raw = raw.trim();
    if let Some(c) = raw.chars().find(|c| matches!(c, '|' | '\n' | '\r')) {
        return Err(ParseError::ReservedCharacter(c));
    }
    let tag = validate_tag(tag)?;
    let (word_part, meaning) = raw.split_once(':').ok_or(ParseError::MissingDelimiter)?;
    let (word, phonetic) = split_phonetic(word_part);
    if word.is_empty() {
        return Err(ParseError::EmptyWord);
    }
    Ok(VocabEntry {
        text: raw.to_string(),
        word,
        phonetic,
        meaning: meaning.trim().to_string(),
        tag,
    })
}

/// Normalizes a user-supplied tag, rejecting line breaks.
pub fn validate_tag(tag: &str) -> Result<String, ParseError> {
    match tag.chars().find(|c| matches!(c, '\n' | '\r')) {
        Some(c) => Err(ParseError::ReservedCharacter(c)),
        None => Ok(normalize_tag(tag)),
    }
}

/// Blank tags collapse to [`DEFAULT_TAG`].
pub fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    if tag.is_empty() {
        DEFAULT_TAG.to_string()
    } else {
        tag.to_string()
    }
}

fn split_phonetic(segment: &str) -> (String, Option<String>) {
    let segment = segment.trim();
    match PHONETIC.captures(segment) {
        Some(caps) => (caps[1].trim().to_string(), Some(caps[2].to_string())),
        None => (segment.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_and_meaning() {
        let entry = parse("  apple : quả táo ", "").unwrap();
        assert_eq!(entry.word, "apple");
        assert_eq!(entry.meaning, "quả táo");
        assert_eq!(entry.phonetic, None);
        assert_eq!(entry.tag, DEFAULT_TAG);
        assert_eq!(entry.text, "apple : quả táo");
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let entry = parse("ratio: 3:4", "Math").unwrap();
        assert_eq!(entry.word, "ratio");
        assert_eq!(entry.meaning, "3:4");
        assert_eq!(entry.tag, "Math");
    }

    #[test]
    fn test_parse_extracts_phonetic() {
        let entry = parse("apple /ˈæp.əl/: quả táo", "Fruit").unwrap();
        assert_eq!(entry.word, "apple");
        assert_eq!(entry.phonetic.as_deref(), Some("ˈæp.əl"));
        assert_eq!(entry.meaning, "quả táo");
    }

    #[test]
    fn test_parse_phonetic_without_space() {
        let entry = parse("dog/dɒɡ/:con chó", "").unwrap();
        assert_eq!(entry.word, "dog");
        assert_eq!(entry.phonetic.as_deref(), Some("dɒɡ"));
    }

    #[test]
    fn test_parse_slash_inside_word_keeps_prefix() {
        let entry = parse("and/or /ænd ɔːr/: và/hoặc", "").unwrap();
        assert_eq!(entry.word, "and/or");
        assert_eq!(entry.phonetic.as_deref(), Some("ænd ɔːr"));
        assert_eq!(entry.meaning, "và/hoặc");
    }

    #[test]
    fn test_parse_unclosed_phonetic_is_part_of_word() {
        let entry = parse("cat /kæt: con mèo", "").unwrap();
        assert_eq!(entry.word, "cat /kæt");
        assert_eq!(entry.phonetic, None);
    }

    #[test]
    fn test_parse_empty_meaning_is_allowed() {
        let entry = parse("hello:", "").unwrap();
        assert_eq!(entry.word, "hello");
        assert_eq!(entry.meaning, "");
    }

    #[test]
    fn test_parse_missing_delimiter() {
        assert_eq!(parse("apple quả táo", ""), Err(ParseError::MissingDelimiter));
    }

    #[test]
    fn test_parse_empty_word() {
        assert_eq!(parse("  : quả táo", ""), Err(ParseError::EmptyWord));
        assert_eq!(parse("/ə/: schwa", ""), Ok(VocabEntry {
            text: "/ə/: schwa".to_string(),
            word: "/ə/".to_string(),
            phonetic: None,
            meaning: "schwa".to_string(),
            tag: DEFAULT_TAG.to_string(),
        }));
    }

    #[test]
    fn test_parse_keeps_case() {
        let entry = parse("Berlin: Thủ đô Đức", "").unwrap();
        assert_eq!(entry.word, "Berlin");
        assert_eq!(entry.meaning, "Thủ đô Đức");
    }

    #[test]
    fn test_parse_rejects_export_separators() {
        assert_eq!(
            parse("either|or: hoặc", ""),
            Err(ParseError::ReservedCharacter('|'))
        );
        assert_eq!(
            parse("dog: con\nchó", ""),
            Err(ParseError::ReservedCharacter('\n'))
        );
        assert_eq!(
            parse("dog: con\r\nchó", ""),
            Err(ParseError::ReservedCharacter('\r'))
        );
        // Surrounding whitespace is trimmed before the check
        assert!(parse("dog: con chó\n", "").is_ok());
    }

    #[test]
    fn test_tag_rejects_line_breaks() {
        assert_eq!(validate_tag("Ani\nmals"), Err(ParseError::ReservedCharacter('\n')));
        assert_eq!(
            parse("dog: con chó", "Ani\rmals"),
            Err(ParseError::ReservedCharacter('\r'))
        );
        assert_eq!(validate_tag("  "), Ok(DEFAULT_TAG.to_string()));
        assert_eq!(validate_tag(" Verbs "), Ok("Verbs".to_string()));
    }

    #[test]
    fn test_blank_tag_defaults() {
        assert_eq!(normalize_tag("   "), DEFAULT_TAG);
        assert_eq!(normalize_tag(" Verbs "), "Verbs");
    }

    #[test]
    fn test_from_text_accepts_word_only() {
        let entry = VocabEntry::from_text("serendipity", "").unwrap();
        assert_eq!(entry.word, "serendipity");
        assert_eq!(entry.meaning, "");
        assert!(VocabEntry::from_text("   ", "").is_none());
        assert!(VocabEntry::from_text(": orphan meaning", "").is_none());
    }

    #[test]
    fn test_from_text_matches_parse_when_delimited() {
        let text = "apple /ˈæp.əl/: quả táo";
        assert_eq!(VocabEntry::from_text(text, "Fruit"), parse(text, "Fruit").ok());
    }

    #[test]
    fn test_prompt_includes_phonetic() {
        let entry = parse("apple /ˈæp.əl/: quả táo", "").unwrap();
        assert_eq!(entry.prompt(), "apple /ˈæp.əl/");
        let plain = parse("dog: con chó", "").unwrap();
        assert_eq!(plain.prompt(), "dog");
    }
}

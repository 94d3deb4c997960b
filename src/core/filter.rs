//! # Tag Filter
//!
//! The quiz runs over a filtered view of the list: entries whose tag equals
//! the selected one, or everything for `All`. The view is recomputed on each
//! read and never stored.

use crate::core::entry::VocabEntry;

/// Label used for the "no filter" choice, in config and on screen.
pub const ALL_LABEL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    /// `None`, blanks and `"All"` mean no filter.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None | Some("") | Some(ALL_LABEL) => TagFilter::All,
            Some(tag) => TagFilter::Tag(tag.to_string()),
        }
    }

    pub fn matches(&self, entry: &VocabEntry) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => entry.tag == *tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TagFilter::All => ALL_LABEL,
            TagFilter::Tag(tag) => tag,
        }
    }

    /// Cycles All → each known tag → All. A filter whose tag disappeared
    /// moves back to All.
    pub fn next(&self, tags: &[String]) -> TagFilter {
        let position = match self {
            TagFilter::All => None,
            TagFilter::Tag(tag) => match tags.iter().position(|t| t == tag) {
                Some(i) => Some(i),
                None => return TagFilter::All,
            },
        };
        let next = position.map_or(0, |i| i + 1);
        tags.get(next)
            .map(|tag| TagFilter::Tag(tag.clone()))
            .unwrap_or(TagFilter::All)
    }
}

/// Entries visible under `filter`, in list order.
pub fn filtered<'a>(entries: &'a [VocabEntry], filter: &TagFilter) -> Vec<&'a VocabEntry> {
    entries.iter().filter(|entry| filter.matches(entry)).collect()
}

/// List indices of the entries visible under `filter`.
pub fn filtered_indices(entries: &[VocabEntry], filter: &TagFilter) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| filter.matches(entry))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::parse;

    fn sample() -> Vec<VocabEntry> {
        vec![
            parse("run: chạy", "Verbs").unwrap(),
            parse("cat: con mèo", "Animals").unwrap(),
            parse("eat: ăn", "Verbs").unwrap(),
        ]
    }

    #[test]
    fn test_all_returns_everything() {
        let entries = sample();
        assert_eq!(filtered(&entries, &TagFilter::All).len(), 3);
    }

    #[test]
    fn test_tag_filter_keeps_order() {
        let entries = sample();
        let view = filtered(&entries, &TagFilter::Tag("Verbs".into()));
        let words: Vec<&str> = view.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["run", "eat"]);
        assert_eq!(filtered_indices(&entries, &TagFilter::Tag("Verbs".into())), vec![0, 2]);
    }

    #[test]
    fn test_unknown_tag_is_empty() {
        let entries = sample();
        assert!(filtered(&entries, &TagFilter::Tag("Food".into())).is_empty());
    }

    #[test]
    fn test_from_label() {
        assert_eq!(TagFilter::from_label(None), TagFilter::All);
        assert_eq!(TagFilter::from_label(Some("All")), TagFilter::All);
        assert_eq!(TagFilter::from_label(Some("  ")), TagFilter::All);
        assert_eq!(TagFilter::from_label(Some("Verbs")), TagFilter::Tag("Verbs".into()));
    }

    #[test]
    fn test_next_cycles_through_tags() {
        let tags = vec!["Verbs".to_string(), "Animals".to_string()];
        let first = TagFilter::All.next(&tags);
        assert_eq!(first, TagFilter::Tag("Verbs".into()));
        let second = first.next(&tags);
        assert_eq!(second, TagFilter::Tag("Animals".into()));
        assert_eq!(second.next(&tags), TagFilter::All);
    }

    #[test]
    fn test_next_from_vanished_tag() {
        let tags = vec!["Verbs".to_string()];
        assert_eq!(TagFilter::Tag("Gone".into()).next(&tags), TagFilter::All);
        assert_eq!(TagFilter::All.next(&[]), TagFilter::All);
    }
}

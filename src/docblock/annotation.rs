//! Tagged fields of a documentation comment

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([a-zA-Z0-9_\\-]+)").expect("tag name pattern is valid"));

/// An `@tag` and the lines it owns.
///
/// `start` is the line holding the tag; `end` is the last continuation line (inclusive).
/// Annotations are snapshots: they are derived from the lines on request and go stale once the
/// block is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub tag: String,
    pub start: usize,
    pub end: usize,
    pub body: String,
}

impl Annotation {
    pub fn lines(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Name of the first tag in `text`, without the `@`.
pub(crate) fn tag_name(text: &str) -> Option<&str> {
    TAG_NAME
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name(" * @return void"), Some("return"));
        assert_eq!(tag_name(" *@throws Exception"), Some("throws"));
        assert_eq!(tag_name(" * @psalm-return int"), Some("psalm-return"));
        assert_eq!(tag_name(" * no tag"), None);
    }
}

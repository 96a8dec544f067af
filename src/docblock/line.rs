//! One line of a documentation comment
//!
//!     A line is split into three parts that concatenate back to the exact source:
//!
//!         decoration  leading whitespace, then `/**` or a single `*`, then at most one space
//!         content     everything up to the line break
//!         ending      the line break run (blank source lines glue onto the previous line)
//!
//!     Predicates look at the whole line text, the way the classification patterns were written.

use once_cell::sync::Lazy;
use regex::Regex;

static USEFUL_CONTENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\s*\S").expect("useful content pattern is valid"));

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\s*@").expect("tag pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    decoration: String,
    content: String,
    ending: String,
}

impl Line {
    pub fn parse(raw: &str) -> Self {
        let body_end = raw.trim_end_matches(['\n', '\r']).len();
        let (text, ending) = raw.split_at(body_end);

        let mut split = text.len() - text.trim_start_matches([' ', '\t']).len();
        let rest = &text[split..];
        if rest.starts_with("/**") {
            split += 3;
        } else if rest.starts_with('*') && !rest.starts_with("*/") {
            split += 1;
        }
        if text[split..].starts_with([' ', '\t']) {
            split += 1;
        }

        Self {
            decoration: text[..split].to_string(),
            content: text[split..].to_string(),
            ending: ending.to_string(),
        }
    }

    pub fn decoration(&self) -> &str {
        &self.decoration
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn ending(&self) -> &str {
        &self.ending
    }

    /// Full text of the line, line break included.
    pub fn text(&self) -> String {
        format!("{}{}{}", self.decoration, self.content, self.ending)
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Removes the line entirely, line break included.
    pub fn remove(&mut self) {
        self.decoration.clear();
        self.content.clear();
        self.ending.clear();
    }

    pub fn is_removed(&self) -> bool {
        self.decoration.is_empty() && self.content.is_empty() && self.ending.is_empty()
    }

    /// A star followed by text, on a line that is neither the opening nor the closing line.
    pub fn contains_useful_content(&self) -> bool {
        let text = self.text();
        USEFUL_CONTENT.is_match(&text) && !self.is_the_start() && !self.is_the_end()
    }

    pub fn contains_a_tag(&self) -> bool {
        TAG.is_match(&self.text())
    }

    pub fn is_the_start(&self) -> bool {
        self.text().contains("/**")
    }

    pub fn is_the_end(&self) -> bool {
        self.text().contains("*/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_round_trip() {
        for raw in ["    /**\n", "     * @param string $foo\n", "     */", "  *\n\n", "*/"] {
            let line = Line::parse(raw);
            assert_eq!(line.text(), raw);
        }
    }

    #[test]
    fn test_decoration_split() {
        let line = Line::parse("     *  @return bool\n");
        assert_eq!(line.decoration(), "     * ");
        assert_eq!(line.content(), " @return bool");
        assert_eq!(line.ending(), "\n");

        let end = Line::parse("     */");
        assert_eq!(end.decoration(), "     ");
        assert_eq!(end.content(), "*/");
    }

    #[test]
    fn test_classification() {
        let start = Line::parse("/**\n");
        assert!(start.is_the_start());
        assert!(!start.contains_useful_content());

        let blank = Line::parse("     *\n");
        assert!(!blank.contains_useful_content());
        assert!(!blank.contains_a_tag());

        let text = Line::parse("     * Hello there!\n");
        assert!(text.contains_useful_content());
        assert!(!text.contains_a_tag());

        let tag = Line::parse("     *@throws Exception\n");
        assert!(tag.contains_useful_content());
        assert!(tag.contains_a_tag());

        let end = Line::parse("     */");
        assert!(end.is_the_end());
        assert!(!end.contains_useful_content());
    }

    #[test]
    fn test_remove() {
        let mut line = Line::parse("     * gone\n");
        line.remove();
        assert!(line.is_removed());
        assert_eq!(line.text(), "");
    }
}

//! Structured view over a documentation comment
//!
//!     A [`DocBlock`] is built from the text of one documentation-comment token when a fixer
//!     needs line or annotation level access, edited in memory, and written back into the token
//!     with [`DocBlock::content`] before the fixer returns.
//!
//! Lines and Annotations
//!
//!     The text is split into [`Line`]s, each keeping its own line break, so untouched lines
//!     serialize byte for byte. An [`Annotation`] starts at a line containing `@tag` and owns the
//!     continuation lines after it. A continuation ends at the next tag, or at a line without
//!     useful content unless the line after that continues the description.
//!
//!     Text patterns are only ever applied to the lines of a single annotation, never to the
//!     whole comment.

pub mod annotation;
pub mod line;

pub use annotation::Annotation;
pub use line::Line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    lines: Vec<Line>,
}

impl DocBlock {
    pub fn new(text: &str) -> Self {
        Self {
            lines: split_lines(text).into_iter().map(Line::parse).collect(),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.lines.get_mut(index)
    }

    pub fn annotations(&self) -> Vec<Annotation> {
        let mut annotations = Vec::new();
        let mut index = 0;
        while index < self.lines.len() {
            if !self.lines[index].contains_a_tag() {
                index += 1;
                continue;
            }
            let end = self.annotation_end(index);
            let tag = annotation::tag_name(&self.lines[index].text())
                .unwrap_or_default()
                .to_string();
            let body = self.lines[index..=end]
                .iter()
                .map(Line::content)
                .collect::<Vec<_>>()
                .join("\n");
            annotations.push(Annotation {
                tag,
                start: index,
                end,
                body,
            });
            index = end + 1;
        }
        annotations
    }

    pub fn annotations_of_type(&self, tag: &str) -> Vec<Annotation> {
        self.annotations()
            .into_iter()
            .filter(|a| a.tag == tag)
            .collect()
    }

    fn annotation_end(&self, start: usize) -> usize {
        let mut index = start;
        loop {
            index += 1;
            let Some(line) = self.lines.get(index) else {
                break;
            };
            if line.contains_a_tag() {
                break;
            }
            if !line.contains_useful_content() {
                // A single blank line inside a description does not end it
                let continues = self
                    .lines
                    .get(index + 1)
                    .is_some_and(|next| next.contains_useful_content() && !next.contains_a_tag());
                if !continues {
                    break;
                }
            }
        }
        index - 1
    }

    /// Deletes the lines owned by `annotation`.
    ///
    /// Returns false, leaving the block untouched, when the annotation shares a line with the
    /// opening or closing delimiter.
    pub fn remove_annotation(&mut self, annotation: &Annotation) -> bool {
        let Some(owned) = self.lines.get(annotation.lines()) else {
            return false;
        };
        if owned.iter().any(|l| l.is_the_start() || l.is_the_end()) {
            return false;
        }
        for line in &mut self.lines[annotation.lines()] {
            line.remove();
        }
        true
    }

    /// Rewrites the content of the lines owned by `annotation`, keeping their decoration.
    ///
    /// Surplus owned lines are removed; extra body lines are added after the last owned line
    /// with its decoration and line break.
    pub fn set_annotation_body(&mut self, annotation: &Annotation, body: &[&str]) {
        if annotation.end >= self.lines.len() {
            return;
        }
        let owned = annotation.line_count();
        for (k, index) in annotation.lines().enumerate() {
            match body.get(k) {
                Some(content) => self.lines[index].set_content(*content),
                None => self.lines[index].remove(),
            }
        }
        if body.len() > owned {
            let template = self.lines[annotation.end].clone();
            for (k, content) in body[owned..].iter().enumerate() {
                let mut line = template.clone();
                line.set_content(*content);
                self.lines.insert(annotation.end + 1 + k, line);
            }
        }
    }

    /// Full comment text rebuilt from the lines.
    pub fn content(&self) -> String {
        self.lines.iter().map(Line::text).collect()
    }
}

/// Turns documentation-comment text into a plain block comment.
///
/// Only the opening delimiter changes; the rest of the text is kept verbatim.
pub fn to_plain_comment(text: &str) -> String {
    format!("/*{}", text.trim_start_matches(['/', '*']))
}

/// Splits after each run of line breaks, so every piece keeps its own terminator.
fn split_lines(text: &str) -> Vec<&str> {
    let is_break = |b: u8| b == b'\n' || b == b'\r';
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        while i < bytes.len() && !is_break(bytes[i]) {
            i += 1;
        }
        while i < bytes.len() && is_break(bytes[i]) {
            i += 1;
        }
        lines.push(&text[start..i]);
        start = i;
    }
    lines
}

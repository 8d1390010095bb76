/// `TemplateLine` - One physical line of a template document
///
/// Splits a line into the leading whitespace the author wrote (kept as the
/// markup-level indent) and the trimmed content the reformatter inspects.

/// Line terminator used by a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix line endings (`\n`)
    #[default]
    Lf,
    /// Windows line endings (`\r\n`)
    CrLf,
}

impl LineEnding {
    /// Detect the line ending of a document
    ///
    /// Any `\r\n` in the content selects [`LineEnding::CrLf`]; mixed documents
    /// are normalized to it on output.
    #[must_use]
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    /// The terminator as a string slice
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// A single source line with its indentation separated out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateLine<'a> {
    /// The line exactly as written, minus its terminator
    pub raw: &'a str,
    /// Leading whitespace of the line
    pub indent: &'a str,
    /// The line with leading and trailing whitespace removed
    pub content: &'a str,
}

impl<'a> TemplateLine<'a> {
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        let content_start = raw.len() - raw.trim_start().len();
        Self {
            raw,
            indent: &raw[..content_start],
            content: raw.trim(),
        }
    }

    /// Check if the line is empty or whitespace only
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.is_empty()
    }
}

/// Split a document into lines
///
/// A trailing newline yields a final empty line, so joining the result with
/// the document's [`LineEnding`] reproduces the terminator layout.
pub fn split_lines(content: &str) -> impl Iterator<Item = TemplateLine<'_>> {
    content
        .split('\n')
        .map(|line| TemplateLine::new(line.strip_suffix('\r').unwrap_or(line)))
}

//! Line expansion into Allman-style output.
//!
//! A control-flow line such as `} @else if (x) { <b>` is walked once, left to
//! right, and re-emitted so that every directive head, opening brace and
//! closing brace sits alone on its own line:
//!
//! ```text
//! }
//! @else if (x)
//! {
//!     <b>
//! ```
//!
//! Interpolations and single-line comments are copied through verbatim as part
//! of the surrounding text and never contribute structural braces.

use crate::format::indenter::BlockIndenter;
use crate::parser::directive::{extract_directive, is_control_flow_directive};
use crate::parser::spans::{comment_end, interpolation_end, COMMENT_OPEN, INTERPOLATION_OPEN};

/// Expand one trimmed control-flow line
///
/// # Arguments
/// * `content` - The line with surrounding whitespace removed
/// * `original_indent` - The line's leading whitespace, reapplied to every output line
/// * `indenter` - Depth in effect at line start; left at the depth after the line
///
/// # Returns
/// The fully indented output lines, in order. Never empty: a line that yields
/// nothing is emitted unchanged at the starting depth.
pub fn expand_line(
    content: &str,
    original_indent: &str,
    indenter: &mut BlockIndenter,
) -> Vec<String> {
    let mut expander = LineExpander {
        original_indent,
        indenter,
        pending: String::new(),
        output: Vec::new(),
    };
    expander.scan(content);

    if expander.output.is_empty() {
        expander.emit(content);
    }
    expander.output
}

/// Per-line scan state
struct LineExpander<'a> {
    original_indent: &'a str,
    indenter: &'a mut BlockIndenter,
    /// Text seen since the last structural token
    pending: String,
    output: Vec<String>,
}

impl LineExpander<'_> {
    fn scan(&mut self, line: &str) {
        let mut pos = 0;
        while let Some(c) = line[pos..].chars().next() {
            let rest = &line[pos..];

            if rest.starts_with(INTERPOLATION_OPEN) {
                let end = interpolation_end(line, pos);
                self.pending.push_str(&line[pos..end]);
                pos = end;
                continue;
            }
            if rest.starts_with(COMMENT_OPEN) {
                let end = comment_end(line, pos);
                self.pending.push_str(&line[pos..end]);
                pos = end;
                continue;
            }
            if c == '@' && is_control_flow_directive(rest) {
                self.flush();
                let (directive, next) = extract_directive(line, pos);
                self.emit(&directive);
                pos = self.open_attached_block(line, next);
                continue;
            }

            match c {
                '}' => {
                    self.flush();
                    self.indenter.close_block();
                    self.emit("}");
                }
                '{' => {
                    self.flush();
                    self.emit("{");
                    self.indenter.open_block();
                }
                _ => self.pending.push(c),
            }
            pos += c.len_utf8();
        }
        self.flush();
    }

    /// Emit the `{` directly following a directive head, if there is one
    ///
    /// Returns the offset to resume scanning from.
    fn open_attached_block(&mut self, line: &str, from: usize) -> usize {
        let tail = &line[from..];
        let brace = from + (tail.len() - tail.trim_start().len());
        let rest = &line[brace..];
        if rest.starts_with('{') && !rest.starts_with(INTERPOLATION_OPEN) {
            self.emit("{");
            self.indenter.open_block();
            brace + 1
        } else {
            from
        }
    }

    /// Emit buffered text as its own line
    fn flush(&mut self) {
        let text = self.pending.trim();
        if !text.is_empty() {
            let line = self.indenter.render(self.original_indent, text);
            self.output.push(line);
        }
        self.pending.clear();
    }

    fn emit(&mut self, text: &str) {
        let line = self.indenter.render(self.original_indent, text);
        self.output.push(line);
    }
}

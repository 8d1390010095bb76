/// `BlockIndenter` - Directive-block depth tracker
///
/// Keeps a running count of open directive blocks and renders output lines
/// as one indent unit per open block followed by the line's original
/// leading whitespace, so markup-level nesting survives underneath the
/// directive-level nesting.
use tracing::trace;

/// Default indent unit width in spaces
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Whitespace string added once per open block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentUnit(String);

impl IndentUnit {
    /// An indent unit of `width` spaces
    #[must_use]
    pub fn spaces(width: usize) -> Self {
        Self(" ".repeat(width))
    }

    /// An indent unit of a single tab
    #[must_use]
    pub fn tab() -> Self {
        Self("\t".to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for IndentUnit {
    fn default() -> Self {
        Self::spaces(DEFAULT_INDENT_WIDTH)
    }
}

/// `BlockIndenter` tracks block depth and renders indented lines
#[derive(Debug, Clone, Default)]
pub struct BlockIndenter {
    /// Whitespace added per open block
    unit: IndentUnit,
    /// Number of currently open blocks
    depth: usize,
}

impl BlockIndenter {
    /// Create a new `BlockIndenter` at depth zero
    #[must_use]
    pub fn new(unit: IndentUnit) -> Self {
        Self { unit, depth: 0 }
    }

    /// Create a `BlockIndenter` resuming at `depth`
    #[must_use]
    pub fn with_depth(unit: IndentUnit, depth: usize) -> Self {
        Self { unit, depth }
    }

    /// Current block depth
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a block
    pub fn open_block(&mut self) {
        self.depth += 1;
    }

    /// Leave a block
    ///
    /// Unbalanced input never drives the depth below zero: a close with no
    /// open block is absorbed and reported by returning `false`.
    pub fn close_block(&mut self) -> bool {
        if let Some(depth) = self.depth.checked_sub(1) {
            self.depth = depth;
            true
        } else {
            trace!("closing brace without an open block; depth stays at 0");
            false
        }
    }

    /// Leading whitespace for a line at the current depth
    #[must_use]
    pub fn prefix(&self, original_indent: &str) -> String {
        let mut prefix =
            String::with_capacity(self.unit.0.len() * self.depth + original_indent.len());
        for _ in 0..self.depth {
            prefix.push_str(&self.unit.0);
        }
        prefix.push_str(original_indent);
        prefix
    }

    /// Render `text` at the current depth on top of its original indent
    #[must_use]
    pub fn render(&self, original_indent: &str, text: &str) -> String {
        let mut line = self.prefix(original_indent);
        line.push_str(text);
        line
    }
}

//! Control-flow directive recognition.
//!
//! A directive is one of the fixed keywords below, optionally followed by a
//! parenthesized condition. Its textual extent ends after the condition's
//! matching `)` or at the first `{` outside parentheses, whichever comes
//! first; the brace itself is never part of the directive.

/// Recognized directive keywords, longest first so `@else if` wins over `@else`
pub const DIRECTIVE_KEYWORDS: &[&str] = &[
    "@else if", "@else", "@if", "@switch", "@case", "@default", "@for", "@empty",
];

/// Characters that may follow a keyword for it to count as a directive
fn is_keyword_boundary(c: char) -> bool {
    matches!(c, ' ' | '\t' | '(' | '{')
}

/// Return the directive keyword `text` starts with, if any
///
/// The keyword must be followed by a space, tab, `(`, `{` or the end of the
/// text, so `@ifSomethingElse` and `@for_each` are plain text.
#[must_use]
pub fn directive_keyword(text: &str) -> Option<&'static str> {
    DIRECTIVE_KEYWORDS.iter().copied().find(|keyword| {
        text.strip_prefix(keyword)
            .is_some_and(|rest| rest.chars().next().map_or(true, is_keyword_boundary))
    })
}

/// Check if `text` starts with a control-flow directive
#[must_use]
pub fn is_control_flow_directive(text: &str) -> bool {
    directive_keyword(text).is_some()
}

/// Extract the directive starting at byte offset `start` of `line`
///
/// Scans forward tracking parenthesis depth. Once a `(` has been seen the
/// directive closes on its matching `)`; a `{` reached at depth zero ends the
/// directive without being consumed. Without either, the directive runs to
/// the end of the line.
///
/// # Returns
/// The trimmed directive text and the byte offset immediately after it.
#[must_use]
pub fn extract_directive(line: &str, start: usize) -> (String, usize) {
    let mut paren_depth = 0usize;
    let mut end = line.len();

    for (offset, c) in line[start..].char_indices() {
        match c {
            '(' => paren_depth += 1,
            ')' if paren_depth > 0 => {
                paren_depth -= 1;
                if paren_depth == 0 {
                    end = start + offset + 1;
                    break;
                }
            }
            '{' if paren_depth == 0 => {
                end = start + offset;
                break;
            }
            _ => {}
        }
    }

    (line[start..end].trim().to_string(), end)
}

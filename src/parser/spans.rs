/// Interpolation and comment span scanning
///
/// Interpolations (`{{ expr }}`) and comments (`<!-- text -->`) are opaque to
/// the reformatter: braces, parentheses and `@` inside them are never
/// structural. Unterminated spans run to the end of the line.

pub const INTERPOLATION_OPEN: &str = "{{";
pub const INTERPOLATION_CLOSE: &str = "}}";
pub const COMMENT_OPEN: &str = "<!--";
pub const COMMENT_CLOSE: &str = "-->";

/// Find the end of the span opened by `open` at byte offset `start`
fn span_end(line: &str, start: usize, open: &str, close: &str) -> usize {
    let body = start + open.len();
    line.get(body..)
        .and_then(|rest| rest.find(close))
        .map_or(line.len(), |offset| body + offset + close.len())
}

/// Byte offset just past the `}}` closing the interpolation at `start`
///
/// Returns `line.len()` for an unterminated interpolation.
#[must_use]
pub fn interpolation_end(line: &str, start: usize) -> usize {
    span_end(line, start, INTERPOLATION_OPEN, INTERPOLATION_CLOSE)
}

/// Byte offset just past the `-->` closing the comment at `start`
///
/// Returns `line.len()` for a comment that continues on later lines.
#[must_use]
pub fn comment_end(line: &str, start: usize) -> usize {
    span_end(line, start, COMMENT_OPEN, COMMENT_CLOSE)
}

/// Comment state after reading `line`
///
/// Walks the line alternating between looking for `<!--` (outside a comment)
/// and `-->` (inside one), so `--> text <!--` keeps a comment open and
/// `<!-- a --> b` does not.
#[must_use]
pub fn comment_state_after(line: &str, in_comment: bool) -> bool {
    let mut in_comment = in_comment;
    let mut rest = line;
    loop {
        let (marker, next_state) = if in_comment {
            (COMMENT_CLOSE, false)
        } else {
            (COMMENT_OPEN, true)
        };
        match rest.find(marker) {
            Some(pos) => {
                rest = &rest[pos + marker.len()..];
                in_comment = next_state;
            }
            None => return in_comment,
        }
    }
}

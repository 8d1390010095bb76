//! Template reformatting pipeline
//!
//! Threads the block depth through the document one line at a time. The
//! transformation is a pure function of the input text and configuration.

use std::io::{BufRead, Write};

use tracing::trace;

use crate::config::Config;
use crate::format::{expand_line, BlockIndenter};
use crate::parser::{
    comment_state_after, is_control_flow_line, split_lines, LineEnding, TemplateLine,
};
use crate::Result;

/// Scanner mode carried from one line to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LineMode {
    /// Ordinary markup and directives
    #[default]
    Markup,
    /// Inside a `<!-- ... -->` comment spanning several lines
    Comment,
}

/// Reformat a whole template document
///
/// Returns the input unchanged when `config.impose_allman` is false. The line
/// terminator style and a trailing newline are preserved.
#[must_use]
pub fn format_template(content: &str, config: &Config) -> String {
    if !config.impose_allman {
        return content.to_string();
    }

    let ending = LineEnding::detect(content);
    let mut indenter = BlockIndenter::new(config.indent_unit());
    let mut mode = LineMode::default();
    let mut output: Vec<String> = Vec::new();

    for (index, line) in split_lines(content).enumerate() {
        match mode {
            LineMode::Comment => {
                output.push(line.raw.to_string());
                if !comment_state_after(line.raw, true) {
                    mode = LineMode::Markup;
                }
            }
            LineMode::Markup => {
                if line.is_blank() {
                    output.push(String::new());
                } else if comment_state_after(line.raw, false) {
                    trace!(line = index + 1, "entering multi-line comment");
                    output.push(line.raw.to_string());
                    mode = LineMode::Comment;
                } else {
                    reformat_markup_line(&line, index, &mut indenter, &mut output);
                }
            }
        }
    }

    output.join(ending.as_str())
}

/// Reformat one non-blank line outside a comment
fn reformat_markup_line(
    line: &TemplateLine<'_>,
    index: usize,
    indenter: &mut BlockIndenter,
    output: &mut Vec<String>,
) {
    if is_control_flow_line(line.content) {
        output.extend(expand_line(line.content, line.indent, indenter));
        trace!(line = index + 1, depth = indenter.depth(), "expanded control-flow line");
        return;
    }

    if line.content == "}" && !indenter.close_block() {
        trace!(line = index + 1, "unbalanced closing brace");
    }
    output.push(indenter.render(line.indent, line.content));
}

/// Reformat `content`, returning `None` when the result is identical
///
/// Callers use this to skip rewriting files that are already formatted.
#[must_use]
pub fn format_if_changed(content: &str, config: &Config) -> Option<String> {
    let formatted = format_template(content, config);
    (formatted != content).then_some(formatted)
}

/// Reformat a template read from `input` and write the result to `output`
pub fn format_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
) -> Result<()> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;
    output.write_all(format_template(&content, config).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn format(content: &str) -> String {
        format_template(content, &Config::default())
    }

    #[test]
    fn test_if_else_block() {
        let input = "@if (x) {\n  <p>hi</p>\n} @else {\n  <p>bye</p>\n}";
        let expected = "@if (x)\n{\n      <p>hi</p>\n}\n@else\n{\n      <p>bye</p>\n}";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_plain_line_untouched_at_depth_zero() {
        let input = "  <div>{{ user.name }}</div>";
        assert_eq!(format(input), input);
    }

    #[test]
    fn test_plain_line_indented_inside_block() {
        let input = "@if (user) {\n<div>{{ user.name }}</div>\n}";
        let expected = "@if (user)\n{\n    <div>{{ user.name }}</div>\n}";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_blank_lines_preserved_as_empty() {
        let input = "<a></a>\n   \n<b></b>\n";
        assert_eq!(format(input), "<a></a>\n\n<b></b>\n");
    }

    #[test]
    fn test_multiline_comment_verbatim() {
        let input = "@if (x) {\n<!-- note\n  @if (y) {  \n} -->\n<p></p>\n}";
        let expected = "@if (x)\n{\n<!-- note\n  @if (y) {  \n} -->\n    <p></p>\n}";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_lone_closing_brace_clamps() {
        let input = "}\n}\n<p></p>";
        assert_eq!(format(input), "}\n}\n<p></p>");
    }

    #[test]
    fn test_crlf_preserved() {
        let input = "@if (x) {\r\n<p></p>\r\n}\r\n";
        let expected = "@if (x)\r\n{\r\n    <p></p>\r\n}\r\n";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn test_disabled_returns_input() {
        let config = Config {
            impose_allman: false,
            ..Default::default()
        };
        let input = "@if (x) {\n}";
        assert_eq!(format_template(input, &config), input);
    }

    #[test]
    fn test_tab_indent_unit() {
        let config = Config {
            use_tabs: true,
            ..Default::default()
        };
        let input = "@for (i of list; track i) {\n<li>{{ i }}</li>\n}";
        let expected = "@for (i of list; track i)\n{\n\t<li>{{ i }}</li>\n}";
        assert_eq!(format_template(input, &config), expected);
    }

    #[test]
    fn test_format_if_changed() {
        let config = Config::default();
        assert!(format_if_changed("<p></p>\n", &config).is_none());
        assert_eq!(
            format_if_changed("@if (a) {\n}\n", &config).as_deref(),
            Some("@if (a)\n{\n}\n")
        );
    }

    #[test]
    fn test_format_file() {
        let input = Cursor::new("@switch (k) {\n@case (1) {\n<one/>\n}\n}\n");
        let mut output = Vec::new();
        format_file(input, &mut output, &Config::default()).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "@switch (k)\n{\n    @case (1)\n    {\n        <one/>\n    }\n}\n"
        );
    }
}

//! Integration tests for allman-fmt
//!
//! These tests verify that the scanner, expander and pipeline work together
//! correctly on whole documents

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use allman_fmt::format::{expand_line, BlockIndenter, IndentUnit};
use allman_fmt::parser::{extract_directive, is_control_flow_line};
use allman_fmt::{format_template, Config};

fn format(content: &str) -> String {
    format_template(content, &Config::default())
}

#[test]
fn test_if_else_scenario() {
    let input = "@if (x) {\n<p>hi</p>\n} @else {\n<p>bye</p>\n}";
    let output = format(input);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "@if (x)",
            "{",
            "    <p>hi</p>",
            "}",
            "@else",
            "{",
            "    <p>bye</p>",
            "}",
        ]
    );
}

#[test]
fn test_original_indent_kept_under_block_indent() {
    let input = "@if (x) {\n  <div>\n    <p>hi</p>\n  </div>\n}";
    let expected = "@if (x)\n{\n      <div>\n        <p>hi</p>\n      </div>\n}";
    assert_eq!(format(input), expected);
}

#[test]
fn test_stacked_closers_dedent_one_level_each() {
    let input = "@if (a) {\n@if (b) {\n<p></p>\n} }\n<after/>";
    let expected = "@if (a)\n{\n    @if (b)\n    {\n        <p></p>\n    }\n}\n<after/>";
    assert_eq!(format(input), expected);
}

#[test]
fn test_interpolation_line_passes_through() {
    let input = "<div>{{ user.name }}</div>";
    assert_eq!(format(input), input);

    let nested = "@if (user) {\n<div>{{ user.name }}</div>\n}";
    assert!(format(nested).contains("    <div>{{ user.name }}</div>"));
}

#[test]
fn test_nested_condition_extraction() {
    let line = "@if (isValid(a, (b+c)))  {";
    let (directive, next) = extract_directive(line, 0);
    assert_eq!(directive, "@if (isValid(a, (b+c)))");
    assert_eq!(line[next..].trim(), "{");

    assert_eq!(format(line), "@if (isValid(a, (b+c)))\n{");
}

#[test]
fn test_for_with_empty_block() {
    let input = "@for (item of items; track item.id) {\n<li>{{ item }}</li>\n} @empty {\n<li>none</li>\n}";
    let expected = "@for (item of items; track item.id)\n{\n    <li>{{ item }}</li>\n}\n@empty\n{\n    <li>none</li>\n}";
    assert_eq!(format(input), expected);
}

#[test]
fn test_switch_case_default() {
    let input = "@switch (mode) {\n@case ('a') {\n<a/>\n}\n@default {\n<z/>\n}\n}";
    let expected = "@switch (mode)\n{\n    @case ('a')\n    {\n        <a/>\n    }\n    @default\n    {\n        <z/>\n    }\n}";
    assert_eq!(format(input), expected);
}

#[test]
fn test_unbalanced_closers_do_not_panic() {
    let input = "} } }\n}\n<p></p>\n@if (x) {\n<b></b>";
    let expected = "}\n}\n}\n}\n<p></p>\n@if (x)\n{\n    <b></b>";
    assert_eq!(format(input), expected);
}

#[test]
fn test_directive_lookalikes_are_text() {
    let input = "@ifSomethingElse (x)\n<a href=\"mailto:me@if.org\">mail</a>";
    assert_eq!(format(input), input);
    assert!(!is_control_flow_line("@ifSomethingElse (x) {{ y }}"));
}

#[test]
fn test_multiline_comment_suspends_depth() {
    let input = "<!--\n@if (x) {\n-->\n<p></p>";
    assert_eq!(format(input), input);
}

#[test]
fn test_trailing_newline_preserved() {
    assert_eq!(format("@if (a) {\n}\n"), "@if (a)\n{\n}\n");
    assert_eq!(format("@if (a) {\n}"), "@if (a)\n{\n}");
}

#[test]
fn test_custom_indent_width() {
    let config = Config {
        indent: 2,
        ..Default::default()
    };
    let output = format_template("@if (a) {\n<p></p>\n}", &config);
    assert_eq!(output, "@if (a)\n{\n  <p></p>\n}");
}

#[test]
fn test_expand_line_threads_depth() {
    let mut indenter = BlockIndenter::new(IndentUnit::spaces(4));

    let first = expand_line("@if (a) {", "", &mut indenter);
    assert_eq!(first, vec!["@if (a)", "{"]);
    assert_eq!(indenter.depth(), 1);

    let second = expand_line("} @else if (b) {", "", &mut indenter);
    assert_eq!(second, vec!["}", "@else if (b)", "{"]);
    assert_eq!(indenter.depth(), 1);

    let third = expand_line("} }", "", &mut indenter);
    assert_eq!(third, vec!["}", "}"]);
    assert_eq!(indenter.depth(), 0);
}

#[test]
fn test_formatting_is_idempotent_on_scenarios() {
    let inputs = [
        "@if (x) {\n  <p>hi</p>\n} @else {\n  <p>bye</p>\n}",
        "<ul>\n  @for (i of xs; track i) { <li>{{ i }}</li> }\n</ul>\n",
        "@switch (s) {\n  @case (1) {\n    <one/>\n  } }\n",
        "<!-- open\n@if (x) {\n-->\n} }\n",
    ];
    for input in inputs {
        let once = format(input);
        assert_eq!(format(&once), once, "not idempotent for {input:?}");
    }
}

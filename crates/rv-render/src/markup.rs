//! Structured-text to markup conversion.
//!
//! The report format is a small markdown-like subset. Conversion is an
//! ordered pipeline of context-free regex rewrites, each applied globally to
//! the whole output of the previous pass. It is not a parser: later passes
//! see (and may match) markup produced by earlier ones, so [`RULES`] order
//! is part of the observable behaviour.
//!
//! | # | Rule          | Rewrite                                          |
//! |---|---------------|--------------------------------------------------|
//! | 1 | `h6` .. `h1`  | `###### x` .. `# x` lines to `<h6>x</h6>` .. `<h1>x</h1>` |
//! | 2 | `strong`      | `**x**` then `__x__` to `<strong>x</strong>` (non-greedy) |
//! | 3 | `hr`          | a line of three or more `-` to `<hr>`            |
//! | 4 | `br`          | every `\n` to `<br>\n`                           |
//! | 5 | `li`, `ul`    | `- x` / `* x` lines to `<li>x</li>`, then each line's item run wrapped in `<ul>` |
//!
//! Line handling matches the browser runtime the format was designed for:
//! `.` never matches `\r` or `\n`, and `^`/`$` accept `\r\n` line ends.
//! Unlike that runtime, U+2028 and U+2029 are ordinary characters here: they
//! neither start a new line for `^` nor stop `.`.
//!
//! Nothing here sanitizes input. Use [`render_report`] for untrusted text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::escape::escape_html;

/// One rewrite pass of the conversion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Short name of the pass.
    pub name: &'static str,
    /// Regex searched globally.
    pub pattern: &'static str,
    /// Replacement, with `${1}` standing for the first capture group.
    pub replacement: &'static str,
}

/// The conversion pipeline, in application order.
pub const RULES: &[Rule] = &[
    // Longest prefix first so a `##` line is never taken for `#`.
    Rule { name: "h6", pattern: r"(?mR)^###### (.*)$", replacement: "<h6>${1}</h6>" },
    Rule { name: "h5", pattern: r"(?mR)^##### (.*)$", replacement: "<h5>${1}</h5>" },
    Rule { name: "h4", pattern: r"(?mR)^#### (.*)$", replacement: "<h4>${1}</h4>" },
    Rule { name: "h3", pattern: r"(?mR)^### (.*)$", replacement: "<h3>${1}</h3>" },
    Rule { name: "h2", pattern: r"(?mR)^## (.*)$", replacement: "<h2>${1}</h2>" },
    Rule { name: "h1", pattern: r"(?mR)^# (.*)$", replacement: "<h1>${1}</h1>" },
    Rule { name: "strong", pattern: r"(?R)\*\*(.*?)\*\*", replacement: "<strong>${1}</strong>" },
    Rule { name: "strong_underscore", pattern: r"(?R)__(.*?)__", replacement: "<strong>${1}</strong>" },
    Rule { name: "hr", pattern: r"(?mR)^-{3,}$", replacement: "<hr>" },
    Rule { name: "br", pattern: r"\n", replacement: "<br>\n" },
    Rule { name: "li", pattern: r"(?mR)^\s*[-*]\s+(.*)$", replacement: "<li>${1}</li>" },
    // One greedy match per line: separated item runs get separate containers.
    Rule { name: "ul", pattern: r"(?R)(<li>.*</li>)", replacement: "<ul>${1}</ul>" },
];

static COMPILED: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    RULES
        .iter()
        .map(|rule| (Regex::new(rule.pattern).unwrap(), rule.replacement))
        .collect()
});

/// Convert structured text to markup.
///
/// Total: every input, including the empty string, yields a string.
pub fn convert(text: &str) -> String {
    let mut html = text.to_string();
    for (re, replacement) in COMPILED.iter() {
        if let std::borrow::Cow::Owned(rewritten) = re.replace_all(&html, *replacement) {
            html = rewritten;
        }
    }
    html
}

/// Render report text for the report pane: escape first, then convert.
///
/// The structured-text markers (`#`, `*`, `_`, `-`) survive escaping, so the
/// result carries the converter's markup and no markup from the input.
pub fn render_report(text: &str) -> String {
    convert(&escape_html(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_compile_in_order() {
        assert_eq!(COMPILED.len(), RULES.len());
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(&names[..6], ["h6", "h5", "h4", "h3", "h2", "h1"]);
        assert_eq!(names.last(), Some(&"ul"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert(""), "");
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=6 {
            let input = format!("{} X", "#".repeat(level));
            assert_eq!(convert(&input), format!("<h{level}>X</h{level}>"));
        }
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        assert_eq!(convert("####### X"), "####### X");
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(convert("#X"), "#X");
    }

    #[test]
    fn test_heading_mid_text() {
        assert_eq!(
            convert("intro\n## Findings\nbody"),
            "intro<br>\n<h2>Findings</h2><br>\nbody"
        );
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            convert("**a** b **c**"),
            "<strong>a</strong> b <strong>c</strong>"
        );
    }

    #[test]
    fn test_bold_underscore() {
        assert_eq!(convert("__warn__ now"), "<strong>warn</strong> now");
    }

    #[test]
    fn test_bold_does_not_cross_lines() {
        assert_eq!(convert("**a\nb**"), "**a<br>\nb**");
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(convert("---"), "<hr>");
        assert_eq!(convert("-----"), "<hr>");
        assert_eq!(convert("a\n---\nb"), "a<br>\n<hr><br>\nb");
    }

    #[test]
    fn test_two_dashes_is_not_a_rule() {
        assert_eq!(convert("--"), "--");
    }

    #[test]
    fn test_plain_text_only_gains_breaks() {
        assert_eq!(convert("hello\nworld\n"), "hello<br>\nworld<br>\n");
    }

    #[test]
    fn test_list_items_wrapped_per_line() {
        assert_eq!(
            convert("- a\n* b"),
            "<ul><li>a<br></li></ul>\n<ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_indented_list_item() {
        assert_eq!(convert("   - nested"), "<ul><li>nested</li></ul>");
    }

    #[test]
    fn test_list_item_with_bold() {
        assert_eq!(
            convert("- **disk** full"),
            "<ul><li><strong>disk</strong> full</li></ul>"
        );
    }

    #[test]
    fn test_heading_inside_list_is_not_special_cased() {
        assert_eq!(convert("- # x"), "<ul><li># x</li></ul>");
    }

    #[test]
    fn test_crlf_line_ends() {
        assert_eq!(convert("# T\r\nx"), "<h1>T</h1>\r<br>\nx");
    }

    #[test]
    fn test_unicode_separators_are_not_line_ends() {
        assert_eq!(convert("x\u{2028}# y"), "x\u{2028}# y");
        assert_eq!(convert("# a\u{2029}b"), "<h1>a\u{2029}b</h1>");
    }

    #[test]
    fn test_render_report_escapes_before_converting() {
        assert_eq!(
            render_report("# <b>x</b> & y"),
            "<h1>&lt;b&gt;x&lt;/b&gt; &amp; y</h1>"
        );
    }

    #[test]
    fn test_render_report_keeps_quotes_out_of_markup() {
        assert_eq!(render_report("**it's**"), "<strong>it&#039;s</strong>");
    }
}

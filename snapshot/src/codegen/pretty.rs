//! Re-indents generated source by brace depth
//!
//! Generated fragments are emitted without indentation and may embed already-formatted nested
//! snapshots; `format_source` trims every line and indents it again, so formatting is idempotent.

use crate::context::FormatOptions;

/// Net brace balance of one line, ignoring braces inside string and char literals
fn brace_balance(line: &str) -> isize {
    let mut balance = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in line.chars() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '{' => balance += 1,
            '}' => balance -= 1,
            _ => {}
        }
    }
    balance
}

/// Re-indent `source` by brace depth using the configured indent width
#[must_use]
pub fn format_source(source: &str, options: &FormatOptions) -> String {
    let unit = options.indent_unit();
    let mut depth: usize = 0;
    let mut lines = Vec::new();

    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        let balance = brace_balance(line);
        let level = if line.starts_with('}') {
            depth.saturating_sub(1)
        } else {
            depth
        };
        lines.push(format!("{}{line}", unit.repeat(level)));
        depth = depth.saturating_add_signed(balance);
    }

    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_blocks_are_indented() {
        let source = "new a.B() {\npublic int getX() {\nreturn 1;\n}\n}";
        let formatted = format_source(source, &FormatOptions::default());
        assert_eq!(
            formatted,
            "new a.B() {\n  public int getX() {\n    return 1;\n  }\n}"
        );
    }

    #[test]
    fn test_braces_in_literals_are_ignored() {
        let source = "x() {\nreturn \"}{ \\\" }\";\nchar c = '{';\n}";
        let formatted = format_source(source, &FormatOptions::default());
        assert_eq!(
            formatted,
            "x() {\n  return \"}{ \\\" }\";\n  char c = '{';\n}"
        );
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let source = "new a.B() {\n{\nadd(new a.C() {\n});\n}\n}";
        let options = FormatOptions { indent_width: 4 };
        let once = format_source(source, &options);
        assert_eq!(format_source(&once, &options), once);
        assert!(once.contains("\n        add(new a.C() {\n        });"));
    }

    #[test]
    fn test_else_style_lines_dedent_without_changing_depth() {
        let source = "if (a) {\nx();\n} else {\ny();\n}";
        assert_eq!(
            format_source(source, &FormatOptions::default()),
            "if (a) {\n  x();\n} else {\n  y();\n}"
        );
    }
}

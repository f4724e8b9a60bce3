//! Text helpers shared by the schema and test code writers.

/// Join non-empty groups of lines, separating groups with one blank line.
///
/// # Examples
///
/// ```ignore
/// let lines = paddle(vec![vec!["a".into()], vec![], vec!["b".into(), "c".into()]]);
/// assert_eq!(lines, vec!["a", "", "b", "c"]);
/// ```
pub fn paddle(groups: Vec<Vec<String>>) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups.into_iter().filter(|g| !g.is_empty()) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(group);
    }
    lines
}

/// Prefix every non-empty line with `depth` levels of two-space indentation.
pub fn indent_lines(lines: &[String], depth: usize) -> Vec<String> {
    let prefix = "  ".repeat(depth);
    lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect()
}

/// Render `text` as triple-slash comment lines (`/// ...`).
///
/// Blank lines become a bare `///`. Empty or whitespace-only text yields no lines.
pub fn triple_slash_comment(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.trim_end()
        .lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                "///".to_string()
            } else {
                format!("/// {}", line)
            }
        })
        .collect()
}

/// Render `text` as a JSDoc block (`/** ... */`).
///
/// `*/` inside the text is escaped so the comment cannot be closed early.
pub fn jsdoc_comment(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut lines = vec!["/**".to_string()];
    for line in text.trim_end().lines() {
        let line = line.trim_end().replace("*/", "*\\/");
        if line.is_empty() {
            lines.push(" *".to_string());
        } else {
            lines.push(format!(" * {}", line));
        }
    }
    lines.push(" */".to_string());
    lines
}

/// Quote `value` as a double-quoted string literal with JSON-style escapes.
pub fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

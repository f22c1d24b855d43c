//! Indentation helpers for doc-comment text.

/// Unindent every line by the indent of the first non-blank line.
///
/// Leading and trailing blank lines are dropped and inner blank lines are
/// emptied. Lines indented less than the first line lose all of their
/// leading whitespace.
pub fn unindent(text: &str) -> String {
    unindent_lines(&text.split('\n').collect::<Vec<_>>())
}

/// Left-trim the first line and unindent the rest by their own indent.
///
/// Parameter prose starts on the marker line and continues on lines that
/// are indented deeper than the marker, so the two parts need different
/// treatment.
pub fn unindent_hanging(text: &str) -> String {
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default().trim_start_matches([' ', '\t']);
    let rest: Vec<&str> = lines.collect();
    format!("{}\n{}", first, unindent_lines(&rest))
}

fn unindent_lines(lines: &[&str]) -> String {
    let start = match lines.iter().position(|line| !is_blank(line)) {
        Some(i) => i,
        None => return String::new(),
    };
    let lines = &lines[start..];

    let width = indent_width(lines[0]);
    let mut out: Vec<&str> = lines.iter().map(|line| strip_indent(line, width)).collect();

    while out.last().is_some_and(|line| is_blank(line)) {
        out.pop();
    }
    out.join("\n")
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}

fn indent_width(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}

fn strip_indent(line: &str, width: usize) -> &str {
    if is_blank(line) {
        return "";
    }
    let n = indent_width(line).min(width);
    &line[n..]
}

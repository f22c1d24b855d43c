//! Marker parsers.
//!
//! Each parser looks for one marker in a block and returns the captured value
//! together with the block text that remains once the marker is cut out. The
//! input is never modified, so parsers can be chained in any order.

use crate::model::Visibility;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@class[ \t]+(.+)").unwrap());

static RE_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(?:method|function)[ \t]+(.+)").unwrap());

static RE_VISIBILITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(public|protected|private)\b").unwrap());

static RE_UJS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@ujs\b").unwrap());

static RE_TYPES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\{([^}]+)\}").unwrap());

static RE_TYPES_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\|[ \t]*").unwrap());

// `[name]` or `[name=default]`. The default may hold one level of balanced
// brackets, as in `[selector='a[href]']`.
static RE_OPTIONAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[ \t]*\[[ \t]*([^ \t\n=\[\]]+)(?:[ \t]*=[ \t]*((?:[^\[\]\n]|\[[^\[\]\n]*\])*?))?[ \t]*\]",
    )
    .unwrap()
});

static RE_REQUIRED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*([^ \t\n\[\]]+)").unwrap());

const PARAM_MARKER: &str = "@param";

// -- Parsers ------------------------------------------------------------------

/// `@class <name>`: the class name and the block without the marker.
///
/// Only the marker and its name are removed; the line break stays.
pub fn class_name(block: &str) -> Option<(String, String)> {
    named_marker(&RE_CLASS, block)
}

/// `@method <name>` (or `@function <name>`).
pub fn function_name(block: &str) -> Option<(String, String)> {
    named_marker(&RE_FUNCTION, block)
}

/// First `@public`, `@protected` or `@private` keyword anywhere in the block.
pub fn visibility(block: &str) -> Option<(Visibility, String)> {
    let (caps, rest) = cut(&RE_VISIBILITY, block)?;
    let visibility = caps[1].parse().ok()?;
    Some((visibility, rest))
}

/// `@ujs` flag. Absence is `false`, and the block comes back unchanged.
pub fn ujs_flag(block: &str) -> (bool, String) {
    match cut(&RE_UJS, block) {
        Some((_, rest)) => (true, rest),
        None => (false, block.to_string()),
    }
}

/// Brace-delimited, pipe-separated type list at the front of `text`.
pub fn types(text: &str) -> (Vec<String>, String) {
    match cut(&RE_TYPES, text) {
        Some((caps, rest)) => {
            let types = RE_TYPES_SEPARATOR
                .split(caps[1].trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            (types, rest)
        }
        None => (Vec::new(), text.to_string()),
    }
}

/// Name, optionality and default of a parameter, at the front of `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamName {
    pub name: String,
    pub optional: bool,
    pub default: Option<String>,
}

/// Either `[name]`, `[name=default]` or a bare `name`.
pub fn param_name(text: &str) -> Option<(ParamName, String)> {
    if let Some((caps, rest)) = cut(&RE_OPTIONAL_NAME, text) {
        let name = ParamName {
            name: caps[1].to_string(),
            optional: true,
            default: caps.get(2).map(|m| m.as_str().to_string()),
        };
        return Some((name, rest));
    }
    let (caps, rest) = cut(&RE_REQUIRED_NAME, text)?;
    let name = ParamName {
        name: caps[1].to_string(),
        optional: false,
        default: None,
    };
    Some((name, rest))
}

/// First `@param` line plus its hanging continuation.
///
/// Continuation lines are the lines right after the marker line whose
/// indent starts with the marker line's indent and goes at least one
/// space or tab deeper. The captured text is the rest of the marker line
/// followed by the continuation lines. The marker line and continuation
/// lines, line breaks included, are removed from the block.
pub fn param(block: &str) -> Option<(String, String)> {
    let lines = line_spans(block);

    let (index, indent) = lines.iter().enumerate().find_map(|(i, &(start, end))| {
        let line = &block[start..end];
        let trimmed = line.trim_start_matches([' ', '\t']);
        let after = trimmed.strip_prefix(PARAM_MARKER)?;
        if after.is_empty() || after.starts_with([' ', '\t']) {
            Some((i, &line[..line.len() - trimmed.len()]))
        } else {
            None
        }
    })?;

    let (start, first_end) = lines[index];
    let first_line = &block[start..first_end];
    let mut captured = first_line[indent.len() + PARAM_MARKER.len()..].to_string();

    let mut last_end = first_end;
    for &(line_start, line_end) in &lines[index + 1..] {
        let line = &block[line_start..line_end];
        let deeper = line
            .strip_prefix(indent)
            .is_some_and(|rest| rest.starts_with([' ', '\t']));
        if !deeper {
            break;
        }
        captured.push('\n');
        captured.push_str(line);
        last_end = line_end;
    }

    // Swallow the line break after the last captured line.
    let cut_end = if block[last_end..].starts_with('\n') {
        last_end + 1
    } else {
        last_end
    };
    let rest = format!("{}{}", &block[..start], &block[cut_end..]);
    Some((captured, rest))
}

// -- Helpers ------------------------------------------------------------------

fn named_marker(re: &Regex, block: &str) -> Option<(String, String)> {
    let (caps, rest) = cut(re, block)?;
    let name = caps[1].trim().to_string();
    if name.is_empty() {
        return None;
    }
    Some((name, rest))
}

/// Match `re` once and return the captures plus `text` without the match.
fn cut<'t>(re: &Regex, text: &'t str) -> Option<(Captures<'t>, String)> {
    let caps = re.captures(text)?;
    let m = caps.get(0)?;
    let rest = format!("{}{}", &text[..m.start()], &text[m.end()..]);
    Some((caps, rest))
}

/// Byte spans of each line, without the line break.
fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            spans.push((start, i));
            start = i + 1;
        }
    }
    if start < text.len() {
        spans.push((start, text.len()));
    }
    spans
}

//! Stack trace position parsing and hyperlink annotation.
//!
//! Engine stack traces reference project sources in two shapes:
//!
//! - compiler style: `Assets/Scripts/Player.cs(12,5): error CS1002`
//! - runtime style:  `Player:Update () (at Assets/Scripts/Player.cs:42)`
//!
//! Lines containing such a reference get the path wrapped in an `<a>` tag that
//! carries the line and column, so a rendering layer can make it clickable and
//! [`find_source_link`] can recover it later.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;

// ─────────────────────────────────────────────────────────────────────────────
// Regex Patterns
// ─────────────────────────────────────────────────────────────────────────────

/// Matches the hyperlink markup produced by [`annotate_line`]
/// Captures: 1=path, 2=line, 3=column
pub static HYPERLINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="([^"]*)" line="([^"]*)" column="([^"]*)">"#)
        .expect("Invalid HYPERLINK_REGEX")
});

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// What a project source reference looks like.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TracePattern {
    /// Substring where project-relative paths start
    #[serde(default = "default_root_marker")]
    pub root_marker: String,

    /// Recognized source file extensions, including the dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for TracePattern {
    fn default() -> Self {
        Self {
            root_marker: default_root_marker(),
            extensions: default_extensions(),
        }
    }
}

fn default_root_marker() -> String {
    "Assets".to_string()
}

fn default_extensions() -> Vec<String> {
    vec![".cs".to_string()]
}

/// A source reference found in a stack trace line.
///
/// `line` and `column` are `None` when the digits could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    /// Project-relative path, extension included
    pub path: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl SourcePosition {
    pub fn new(path: impl Into<String>, line: Option<u32>, column: Option<u32>) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// Line for editors, 0 when unknown
    pub fn line_or_zero(&self) -> u32 {
        self.line.unwrap_or(0)
    }

    /// Column for editors, 0 when unknown
    pub fn column_or_zero(&self) -> u32 {
        self.column.unwrap_or(0)
    }

    /// Hyperlink markup for this position
    pub fn hyperlink(&self) -> String {
        format!(
            r#"<a href="{path}" line="{line}" column="{column}">{path}</a>"#,
            path = self.path,
            line = self.line_or_zero(),
            column = self.column_or_zero(),
        )
    }

    /// Returns formatted location string: "path:line:column"
    pub fn display_location(&self) -> String {
        format!(
            "{}:{}:{}",
            self.path,
            self.line_or_zero(),
            self.column_or_zero()
        )
    }
}

/// One line of a stack trace with its detected source position, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub text: String,
    pub position: Option<SourcePosition>,
    /// Byte offset of the path within `text`
    path_offset: usize,
}

impl TraceLine {
    /// Line text with the path wrapped in hyperlink markup
    pub fn annotated(&self) -> Cow<'_, str> {
        match &self.position {
            Some(pos) => {
                let end = self.path_offset + pos.path.len();
                Cow::Owned(format!(
                    "{}{}{}",
                    &self.text[..self.path_offset],
                    pos.hyperlink(),
                    &self.text[end..]
                ))
            }
            None => Cow::Borrowed(&self.text),
        }
    }
}

/// A stack trace split into lines with detected source positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStackTrace {
    pub lines: Vec<TraceLine>,
}

impl ParsedStackTrace {
    /// Parse every line of `raw`. Lines without a recognized position are kept
    /// verbatim.
    pub fn parse(raw: &str, pattern: &TracePattern) -> Self {
        let lines = raw
            .lines()
            .map(|text| match locate(text, pattern) {
                Some((path_offset, position)) => TraceLine {
                    text: text.to_string(),
                    position: Some(position),
                    path_offset,
                },
                None => TraceLine {
                    text: text.to_string(),
                    position: None,
                    path_offset: 0,
                },
            })
            .collect();
        Self { lines }
    }

    /// Positions detected in the trace, in line order
    pub fn positions(&self) -> impl Iterator<Item = &SourcePosition> {
        self.lines.iter().filter_map(|l| l.position.as_ref())
    }

    pub fn first_position(&self) -> Option<&SourcePosition> {
        self.positions().next()
    }

    /// The trace re-joined with `\n`, paths wrapped in hyperlink markup
    pub fn annotated(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.annotated())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a `path(line,column)` or `path:line` source reference from one line.
///
/// Returns `None` when the line has no project path, or when the path is not
/// directly followed by `(` or `:`. Digits that fail to parse become `None`
/// in the returned position rather than an error.
pub fn parse_position(line: &str, pattern: &TracePattern) -> Option<SourcePosition> {
    locate(line, pattern).map(|(_, position)| position)
}

/// Wrap the source path of a single line in hyperlink markup
pub fn annotate_line<'a>(line: &'a str, pattern: &TracePattern) -> Cow<'a, str> {
    match locate(line, pattern) {
        Some((path_offset, position)) => {
            let traced = TraceLine {
                text: line.to_string(),
                position: Some(position),
                path_offset,
            };
            Cow::Owned(traced.annotated().into_owned())
        }
        None => Cow::Borrowed(line),
    }
}

/// Annotate every line of a trace, re-joined with `\n`
pub fn annotate_stack_trace(trace: &str, pattern: &TracePattern) -> String {
    ParsedStackTrace::parse(trace, pattern).annotated()
}

/// Find the first hyperlink in annotated text
pub fn find_source_link(annotated: &str) -> Option<SourcePosition> {
    let caps = HYPERLINK_REGEX.captures(annotated)?;
    Some(SourcePosition::new(
        &caps[1],
        parse_number(&caps[2]),
        parse_number(&caps[3]),
    ))
}

/// Returns the byte offset of the path together with the parsed position.
fn locate(line: &str, pattern: &TracePattern) -> Option<(usize, SourcePosition)> {
    if pattern.root_marker.is_empty() {
        return None;
    }
    let start = line.find(&pattern.root_marker)?;
    let after_marker = &line[start..];

    let path_len = pattern
        .extensions
        .iter()
        .filter(|ext| !ext.is_empty())
        .filter_map(|ext| after_marker.find(ext.as_str()).map(|idx| idx + ext.len()))
        .min()?;
    let end = start + path_len;
    let path = &line[start..end];

    let rest = &line[end..];
    let (line_no, column) = match rest.chars().next()? {
        '(' => read_paren_position(&rest[1..]),
        ':' => (read_colon_line(&rest[1..]), Some(0)),
        _ => return None,
    };

    Some((start, SourcePosition::new(path, line_no, column)))
}

/// `12,5)` -> (12, 5)
fn read_paren_position(rest: &str) -> (Option<u32>, Option<u32>) {
    let Some(comma) = rest.find(',') else {
        return (None, None);
    };
    let line = parse_number(&rest[..comma]);

    let after = &rest[comma + 1..];
    let column = after.find(')').and_then(|close| parse_number(&after[..close]));
    (line, column)
}

/// Leading digit run: `42)`, `42:` or `42 via ...` -> 42
fn read_colon_line(rest: &str) -> Option<u32> {
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse().ok()
}

fn parse_number(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! View composition pipeline.
//!
//! Maps [`ViewerState`] to a displayed projection through a fixed-order chain
//! of optional transforms:
//!
//! 1. **Pretty-print** — selects the active source ([`ViewerState::active_source`]);
//!    the parse itself runs once per toggle/text change via [`pretty_print`]
//!    and is cached in `ViewerState::pretty_text`.
//! 2. **Line filter** — keeps lines of the active source matching a
//!    case-insensitive regex. An invalid pattern makes the transform a
//!    pass-through with a reported line count of zero; an empty pattern is a
//!    no-op.
//! 3. **Highlight scan** — records every match of a case-insensitive regex in
//!    the line-filter output. It never alters the displayed text; matches are
//!    annotation for rendering and navigation only.
//!
//! Filtering before highlighting lets a user narrow to relevant lines and
//! then locate substrings inside that narrowed set. All offsets are character
//! offsets (Unicode scalar values), not bytes.

use regex::{Regex, RegexBuilder};
use serde_json::Value;
use thiserror::Error;

use crate::literal::{self, LiteralError};
use crate::state::ViewerState;

/// Pretty-print failures.
///
/// These are the only errors the pipeline can surface; invalid regex patterns
/// and empty patterns are handled inside their transforms and never escape.
#[derive(Debug, Error)]
pub enum PrettyPrintError {
    /// The source text is empty (or whitespace only); there is nothing to
    /// format.
    #[error("no text to format")]
    EmptyInput,
    /// The text is neither strict JSON nor a permissive object literal.
    #[error("text is not valid JSON or an object literal: {0}")]
    Parse(#[from] LiteralError),
    /// Re-serialization of the parsed value failed.
    #[error("failed to serialize formatted JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One highlight match in the displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPos {
    /// Start offset of the match, in characters from the start of the
    /// displayed text.
    pub offset: usize,
    /// Match length in characters (never zero; empty matches are skipped).
    pub len: usize,
    /// Zero-based line the match starts on (count of newlines before it).
    pub line: usize,
}

/// The result of a full pipeline recompute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    /// The text to display (and to export/copy). Highlighting never
    /// decorates this string.
    pub displayed_text: String,
    /// Every highlight match in `displayed_text`, in document order. Empty
    /// when highlighting is off, the pattern is empty, or the pattern is
    /// invalid.
    pub matches: Vec<MatchPos>,
    /// Number of lines kept by the line filter; zero when the filter is off,
    /// its pattern is empty, or its pattern is invalid.
    pub line_match_count: usize,
}

/// Pretty-print a source text with two-space indentation.
///
/// Tries a strict JSON parse of the trimmed input first, then the permissive
/// structured-literal parser. Callers flip `pretty_mode` off when this
/// returns an error; the failure is explicit, never a silent revert.
pub fn pretty_print(text: &str) -> Result<String, PrettyPrintError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PrettyPrintError::EmptyInput);
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => literal::parse(trimmed)?,
    };

    Ok(serde_json::to_string_pretty(&value)?)
}

/// Recompute the displayed projection from the current state.
///
/// Pure: the same state always produces the same projection. With all modes
/// off this is the identity on `original_text`.
pub fn recompute(state: &ViewerState) -> Projection {
    let source = state.active_source();

    let (displayed_text, line_match_count) = apply_line_filter(
        source,
        state.line_filter_mode,
        &state.line_filter_pattern,
    );

    let matches = scan_matches(
        &displayed_text,
        state.highlight_mode,
        &state.highlight_pattern,
    );

    Projection {
        displayed_text,
        matches,
        line_match_count,
    }
}

/// Compile a user pattern with the pipeline's fixed semantics:
/// case-insensitive, single-line (`.` does not cross newlines).
fn compile_pattern(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern).case_insensitive(true).build().ok()
}

fn apply_line_filter(source: &str, active: bool, pattern: &str) -> (String, usize) {
    if !active || pattern.is_empty() {
        return (source.to_string(), 0);
    }
    let Some(re) = compile_pattern(pattern) else {
        // Invalid pattern: pass-through, and the reported count resets.
        return (source.to_string(), 0);
    };

    let kept: Vec<&str> = source.split('\n').filter(|line| re.is_match(line)).collect();
    let count = kept.len();
    (kept.join("\n"), count)
}

fn scan_matches(displayed: &str, active: bool, pattern: &str) -> Vec<MatchPos> {
    if !active || pattern.is_empty() {
        return Vec::new();
    }
    let Some(re) = compile_pattern(pattern) else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    let mut cursor_byte = 0usize;
    let mut cursor_char = 0usize;
    let mut cursor_line = 0usize;

    for m in re.find_iter(displayed) {
        if m.is_empty() {
            continue;
        }
        for c in displayed[cursor_byte..m.start()].chars() {
            cursor_char += 1;
            if c == '\n' {
                cursor_line += 1;
            }
        }
        cursor_byte = m.start();
        matches.push(MatchPos {
            offset: cursor_char,
            len: m.as_str().chars().count(),
            line: cursor_line,
        });
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_text(text: &str) -> ViewerState {
        let mut state = ViewerState::new();
        state.set_text(text);
        state
    }

    #[test]
    fn test_identity_with_all_modes_off() {
        let state = state_with_text("line one\nline two\n");
        let projection = recompute(&state);
        assert_eq!(projection.displayed_text, "line one\nline two\n");
        assert!(projection.matches.is_empty());
        assert_eq!(projection.line_match_count, 0);
    }

    #[test]
    fn test_line_filter_keeps_matching_lines() {
        let mut state = state_with_text("a\nbb\nccc");
        state.line_filter_mode = true;
        state.line_filter_pattern = "b".to_string();

        let projection = recompute(&state);
        assert_eq!(projection.displayed_text, "bb");
        assert_eq!(projection.line_match_count, 1);
    }

    #[test]
    fn test_line_filter_is_case_insensitive() {
        let mut state = state_with_text("Alpha\nbeta\nGAMMA");
        state.line_filter_mode = true;
        state.line_filter_pattern = "a$".to_string();

        let projection = recompute(&state);
        assert_eq!(projection.displayed_text, "Alpha\nbeta\nGAMMA");
        assert_eq!(projection.line_match_count, 3);
    }

    #[test]
    fn test_invalid_filter_pattern_is_pass_through() {
        let mut state = state_with_text("a\nbb");
        state.line_filter_mode = true;
        state.line_filter_pattern = "[unclosed".to_string();

        let projection = recompute(&state);
        assert_eq!(projection.displayed_text, "a\nbb");
        assert_eq!(projection.line_match_count, 0);
    }

    #[test]
    fn test_empty_filter_pattern_is_noop() {
        let mut state = state_with_text("a\nbb");
        state.line_filter_mode = true;

        let projection = recompute(&state);
        assert_eq!(projection.displayed_text, "a\nbb");
        assert_eq!(projection.line_match_count, 0);
    }

    #[test]
    fn test_highlight_records_offsets_without_altering_text() {
        let mut state = state_with_text("foo bar foo");
        state.highlight_mode = true;
        state.highlight_pattern = "foo".to_string();

        let projection = recompute(&state);
        assert_eq!(projection.displayed_text, "foo bar foo");
        assert_eq!(
            projection.matches,
            vec![
                MatchPos { offset: 0, len: 3, line: 0 },
                MatchPos { offset: 8, len: 3, line: 0 },
            ]
        );
    }

    #[test]
    fn test_highlight_tracks_line_numbers() {
        let mut state = state_with_text("x\nyy\nx");
        state.highlight_mode = true;
        state.highlight_pattern = "x".to_string();

        let projection = recompute(&state);
        assert_eq!(projection.matches[0].line, 0);
        assert_eq!(projection.matches[1].line, 2);
    }

    #[test]
    fn test_highlight_runs_after_line_filter() {
        let mut state = state_with_text("keep foo\ndrop bar\nkeep foo");
        state.line_filter_mode = true;
        state.line_filter_pattern = "keep".to_string();
        state.highlight_mode = true;
        state.highlight_pattern = "foo".to_string();

        let projection = recompute(&state);
        assert_eq!(projection.displayed_text, "keep foo\nkeep foo");
        assert_eq!(projection.line_match_count, 2);
        // Offsets are relative to the filtered text, not the source.
        assert_eq!(projection.matches.len(), 2);
        assert_eq!(projection.matches[0].offset, 5);
        assert_eq!(projection.matches[1].offset, 14);
        assert_eq!(projection.matches[1].line, 1);
    }

    #[test]
    fn test_invalid_highlight_pattern_clears_matches() {
        let mut state = state_with_text("foo");
        state.highlight_mode = true;
        state.highlight_pattern = "(".to_string();

        let projection = recompute(&state);
        assert_eq!(projection.displayed_text, "foo");
        assert!(projection.matches.is_empty());
    }

    #[test]
    fn test_empty_highlight_matches_are_skipped() {
        let mut state = state_with_text("aaa");
        state.highlight_mode = true;
        state.highlight_pattern = "b*".to_string();

        let projection = recompute(&state);
        assert!(projection.matches.is_empty());
    }

    #[test]
    fn test_match_offsets_are_char_offsets() {
        let mut state = state_with_text("héllo foo");
        state.highlight_mode = true;
        state.highlight_pattern = "foo".to_string();

        let projection = recompute(&state);
        assert_eq!(projection.matches[0].offset, 6);
    }

    #[test]
    fn test_pretty_print_strict_json() {
        let pretty = pretty_print("{\"a\":1,\"b\":[2,3]}").unwrap();
        assert_eq!(pretty, "{\n  \"a\": 1,\n  \"b\": [\n    2,\n    3\n  ]\n}");
    }

    #[test]
    fn test_pretty_print_permissive_fallback() {
        let pretty = pretty_print("{a: 1, b: 'two'}").unwrap();
        assert!(pretty.contains("\"a\": 1"));
        assert!(pretty.contains("\"b\": \"two\""));
    }

    #[test]
    fn test_pretty_print_rejects_empty_and_garbage() {
        assert!(matches!(pretty_print("   "), Err(PrettyPrintError::EmptyInput)));
        assert!(matches!(
            pretty_print("not json at all"),
            Err(PrettyPrintError::Parse(_))
        ));
    }

    #[test]
    fn test_pretty_mode_uses_cached_pretty_text() {
        let mut state = state_with_text("{\"a\":1}");
        state.pretty_text = pretty_print(&state.original_text).unwrap();
        state.pretty_mode = true;

        let projection = recompute(&state);
        assert_eq!(projection.displayed_text, "{\n  \"a\": 1\n}");
    }
}

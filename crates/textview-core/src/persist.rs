//! Property-bag persistence.
//!
//! Maps [`ViewerState`] to and from the host's opaque per-node property bag
//! (a JSON object). Capture writes every field by value — including the
//! cached `pretty_text` while pretty mode is off, and both pattern strings
//! regardless of their mode flags — so no toggle loses its configuration
//! across a save/load cycle. Restore reads each field independently,
//! default-filling absent or ill-typed entries, and is idempotent.
//!
//! The displayed text is never persisted; callers replay the view pipeline
//! after restoring.

use serde_json::{Map, Value};

use crate::state::{FONT_SIZE_DEFAULT, FONT_SIZE_MAX, FONT_SIZE_MIN, ViewerState};

/// The host's per-node property bag.
pub type PropertyBag = Map<String, Value>;

/// Capture the full viewer state into a property bag.
pub fn capture(state: &ViewerState) -> PropertyBag {
    match serde_json::to_value(state) {
        Ok(Value::Object(map)) => map,
        // ViewerState is a plain struct of strings, booleans, and an
        // integer; it always serializes to a JSON object. Degrade to an
        // empty bag (restore reads it as creation defaults) instead of
        // panicking inside a host save hook.
        other => {
            debug_assert!(false, "viewer state serialized to a non-object: {other:?}");
            PropertyBag::new()
        }
    }
}

fn text_field(bag: &PropertyBag, key: &str) -> String {
    bag.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn flag_field(bag: &PropertyBag, key: &str) -> bool {
    bag.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Restore a viewer state from a property bag.
///
/// Every field is read independently and falls back to its creation default
/// when absent *or* ill-typed, so one corrupt entry in a hand-edited bag
/// cannot discard the rest of the state. Unknown fields are ignored. A
/// persisted font size outside the accepted range falls back to the default
/// rather than clamping (there is no caller to reject it to).
pub fn restore(bag: &PropertyBag) -> ViewerState {
    let theme = bag
        .get("theme")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    let font_size = bag
        .get("font_size")
        .and_then(Value::as_u64)
        .filter(|s| (u64::from(FONT_SIZE_MIN)..=u64::from(FONT_SIZE_MAX)).contains(s))
        .map_or(FONT_SIZE_DEFAULT, |s| s as u32);

    ViewerState {
        original_text: text_field(bag, "original_text"),
        pretty_text: text_field(bag, "pretty_text"),
        pretty_mode: flag_field(bag, "pretty_mode"),
        word_wrap: flag_field(bag, "word_wrap"),
        theme,
        font_size,
        highlight_mode: flag_field(bag, "highlight_mode"),
        highlight_pattern: text_field(bag, "highlight_pattern"),
        line_filter_mode: flag_field(bag, "line_filter_mode"),
        line_filter_pattern: text_field(bag, "line_filter_pattern"),
    }
}

//! Host-facing widget layer for the text viewer engine.
//!
//! `textview-core` is the headless engine; this crate is the thin layer a
//! node-canvas host embeds. It defines the [`NodeWidget`] lifecycle contract,
//! the concrete widgets ([`TextViewerWidget`], [`ImageOverlay`],
//! [`VideoOverlay`]), and the presentation helpers the engine stays agnostic
//! of: theme palettes, highlight render spans, chrome measurements, export
//! filenames, and cancellable value polling.
//!
//! Everything here is host-neutral. Nothing draws; widgets produce positioned
//! lines, render spans, and sizes, and the host renders them however it
//! likes.

#![warn(missing_docs)]

pub mod export;
pub mod host;
pub mod overlay;
pub mod poll;
pub mod text_viewer;
pub mod theme;

pub use export::{EXPORT_MIME, ExportStamp, export_file_name};
pub use host::NodeWidget;
pub use overlay::{
    ImageOverlay, OVERLAY_LINE_HEIGHT, OVERLAY_START_Y, OVERLAY_TEXT_X, OverlayLine, SECTION_GAP,
    ShowMode, VideoOverlay,
};
pub use poll::{POLL_INTERVAL_MS, ValueWatcher};
pub use text_viewer::{
    CHROME_HEIGHT, CONTROL_ROW_HEIGHT, Span, SpanKind, TextViewerWidget, highlight_spans,
    pattern_input_width,
};
pub use theme::{DARK, LIGHT, Palette, palette};

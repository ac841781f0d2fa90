#![warn(missing_docs)]
//! Headless text-viewer engine for node-canvas widgets.
//!
//! # Overview
//!
//! `textview-core` is the view-composition engine behind an embedded
//! text-viewer control in a visual node editor. It owns a single source text
//! buffer and produces a displayed projection of it under any combination of
//! three independent view transforms, plus content-driven sizing and a
//! persistence contract that survives serialize/deserialize round trips.
//! It performs no I/O and knows nothing about the host's DOM or canvas.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  TextViewer (controller + notifications)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Persistence Adapter (property bag)         │  ← Host save/load
//! ├─────────────────────────────────────────────┤
//! │  Match Navigator (cyclic next/prev/goto)    │  ← Navigation
//! ├─────────────────────────────────────────────┤
//! │  View Pipeline (pretty → filter → highlight)│  ← Projection
//! ├─────────────────────────────────────────────┤
//! │  ViewerState (canonical source + toggles)   │  ← Text Store
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Transforms compose in a fixed order: pretty-print selects the active
//! source, the line filter narrows it, and the highlight scan annotates the
//! result. Each transform is independently optional, and recoverable failures
//! (invalid regex, empty pattern) degrade that transform to a no-op without
//! crossing its boundary.
//!
//! # Quick Start
//!
//! ```rust
//! use textview_core::TextViewer;
//!
//! let mut viewer = TextViewer::new();
//! viewer.set_text("alpha\nbeta foo\ngamma foo");
//!
//! viewer.set_line_filter_mode(true);
//! viewer.set_line_filter_pattern("foo");
//! assert_eq!(viewer.displayed_text(), "beta foo\ngamma foo");
//! assert_eq!(viewer.line_match_count(), 2);
//!
//! viewer.set_highlight_mode(true);
//! viewer.set_highlight_pattern("foo");
//! assert_eq!(viewer.match_counter(), (0, 2));
//! let target = viewer.next_match().unwrap();
//! assert_eq!(target.line, 0);
//! ```
//!
//! # Module Description
//!
//! - [`state`] - the persisted viewer state (the single source of truth)
//! - [`pipeline`] - view transforms and the displayed projection
//! - [`literal`] - permissive structured-literal parser (pretty-print fallback)
//! - [`navigator`] - cyclic match navigation and scroll targets
//! - [`sizer`] - content-driven advisory node sizing
//! - [`persist`] - property-bag capture/restore
//! - [`stats`] - chars/words/lines counters
//! - [`viewer`] - the controller tying it all together
//!
//! # Concurrency
//!
//! Single-threaded by contract: every mutation runs synchronously to
//! completion within the triggering event, so no locking is needed and a
//! host never observes a half-applied change.

pub mod literal;
pub mod navigator;
pub mod persist;
pub mod pipeline;
pub mod sizer;
pub mod state;
pub mod stats;
pub mod viewer;

pub use literal::LiteralError;
pub use navigator::{MatchNavigator, ScrollTarget};
pub use persist::PropertyBag;
pub use pipeline::{MatchPos, PrettyPrintError, Projection};
pub use sizer::{DEFAULT_SIZE, MIN_NODE_WIDTH, NodeSize};
pub use state::{
    FONT_SIZE_DEFAULT, FONT_SIZE_MAX, FONT_SIZE_MIN, StateError, Theme, ViewerState,
};
pub use stats::TextStats;
pub use viewer::{ChangeCallback, TextViewer, ViewerChange, ViewerChangeType};

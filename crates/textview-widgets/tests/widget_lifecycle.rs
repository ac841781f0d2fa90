//! End-to-end widget lifecycle tests: the hooks a host fires over a node's
//! life, driven in order against the concrete widgets.

use pretty_assertions::assert_eq;
use textview_core::{DEFAULT_SIZE, MIN_NODE_WIDTH, NodeSize, Theme};
use textview_widgets::{
    ImageOverlay, NodeWidget, ShowMode, SpanKind, TextViewerWidget, VideoOverlay, highlight_spans,
    palette,
};

#[test]
fn test_viewer_full_lifecycle() {
    let mut widget = TextViewerWidget::new();

    // Create: initial size honors the node width floor.
    let initial = widget.on_create();
    assert_eq!(initial, DEFAULT_SIZE);
    assert!(initial.width >= MIN_NODE_WIDTH);

    // Execute: backend text arrives as a one-element list.
    widget.on_backend_result(&["one foo\ntwo\nthree foo".to_string()]);
    widget.viewer_mut().set_highlight_mode(true);
    widget.viewer_mut().set_highlight_pattern("foo");
    widget.viewer_mut().next_match();
    assert_eq!(widget.viewer().match_counter(), (1, 2));

    // Resize: the text surface shrinks with the node.
    widget.on_resize(NodeSize::new(600.0, 400.0));
    let area = widget.text_area();
    assert_eq!(area, NodeSize::new(580.0, 350.0));

    // Save, rebuild, load: display settings and text survive; the match
    // selection is transient and resets.
    let bag = widget.on_serialize();
    let mut reloaded = TextViewerWidget::new();
    reloaded.on_create();
    reloaded.on_configure(&bag);

    assert_eq!(reloaded.viewer().displayed_text(), "one foo\ntwo\nthree foo");
    assert_eq!(reloaded.viewer().match_counter(), (0, 2));

    reloaded.on_remove();
}

#[test]
fn test_viewer_render_spans_track_navigation() {
    let mut widget = TextViewerWidget::new();
    widget.on_create();
    widget.on_backend_result(&["foo bar foo".to_string()]);
    widget.viewer_mut().set_highlight_mode(true);
    widget.viewer_mut().set_highlight_pattern("foo");
    widget.viewer_mut().next_match();

    let displayed = widget.viewer().displayed_text().to_string();
    let matches = widget.viewer().projection().matches.clone();
    let current = {
        let (pos, _) = widget.viewer().match_counter();
        if pos == 0 { None } else { Some(pos - 1) }
    };
    let spans = highlight_spans(&displayed, &matches, current);

    assert_eq!(spans.len(), 3);
    assert_eq!(spans[0].kind, SpanKind::CurrentMatch);
    assert_eq!(spans[2].kind, SpanKind::Match);
}

#[test]
fn test_viewer_theme_drives_palette() {
    let mut widget = TextViewerWidget::new();
    widget.on_create();
    assert_eq!(widget.viewer().state().theme, Theme::Dark);
    assert_eq!(palette(widget.viewer().state().theme).background, "#1e1e1e");

    widget.viewer_mut().toggle_theme();
    assert_eq!(palette(widget.viewer().state().theme).background, "#ffffff");
}

#[test]
fn test_image_overlay_lifecycle() {
    let mut overlay = ImageOverlay::new();
    let size = overlay.on_create();
    assert_eq!(size.width, MIN_NODE_WIDTH);

    overlay.on_backend_result(&[
        "Resolution: 512x768 | 0.39MP".to_string(),
        "Ratio: 2:3".to_string(),
        "File Size: 1.2 MB".to_string(),
        String::new(),
        "Model: test-model".to_string(),
    ]);

    let bag = overlay.on_serialize();
    let mut reloaded = ImageOverlay::new();
    reloaded.on_create();
    reloaded.on_configure(&bag);

    let lines = reloaded.layout(ShowMode::Both);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].text, "Resolution: 512x768 | 0.39MP");
    assert_eq!(lines[3].text, "Model: test-model");
}

#[test]
fn test_video_overlay_poll_cycle() {
    let mut overlay = VideoOverlay::new();
    overlay.on_create();

    // Ticks with the same selection do nothing; a change triggers a preview.
    assert!(overlay.poll_video_value("clip.mp4"));
    assert!(!overlay.poll_video_value("clip.mp4"));
    overlay.set_preview(1280, 720);
    assert_eq!(overlay.params()[0], "1280x720 | 0.92MP");

    // Execution output replaces the preview.
    overlay.on_backend_result(&["Duration: 12.5s".to_string()]);
    assert_eq!(overlay.params(), ["Duration: 12.5s"]);

    // After removal the poll is dead.
    overlay.on_remove();
    assert!(!overlay.poll_video_value("other.mp4"));
}

//! Host bridge contract.
//!
//! The host graph editor drives widgets through a fixed capability interface:
//! a widget implements [`NodeWidget`] and the host calls the hooks at the
//! appropriate lifecycle points. This replaces runtime method patching with
//! ordinary polymorphism — the host holds a `dyn NodeWidget` (or a concrete
//! widget) and dispatches through it.
//!
//! Hook order over a node's life:
//!
//! 1. [`on_create`](NodeWidget::on_create) — once, when the node is added.
//! 2. [`on_configure`](NodeWidget::on_configure) — when loading a saved graph.
//! 3. [`on_backend_result`](NodeWidget::on_backend_result) — after each
//!    backend execution that produced text for this node.
//! 4. [`on_resize`](NodeWidget::on_resize) — whenever the node's size changes.
//! 5. [`on_serialize`](NodeWidget::on_serialize) — when the graph is saved.
//! 6. [`on_remove`](NodeWidget::on_remove) — once, on teardown; widgets
//!    cancel any scheduled tasks here.

use textview_core::{NodeSize, PropertyBag};

/// Lifecycle capability interface implemented by every canvas widget.
pub trait NodeWidget {
    /// Initialize the widget and return its initial node size.
    fn on_create(&mut self) -> NodeSize;

    /// Receive the text lines produced by a backend execution.
    fn on_backend_result(&mut self, lines: &[String]);

    /// React to the node being resized by the user or the host.
    fn on_resize(&mut self, size: NodeSize);

    /// Capture widget state into the node's property bag.
    fn on_serialize(&self) -> PropertyBag;

    /// Restore widget state from the node's property bag.
    fn on_configure(&mut self, bag: &PropertyBag);

    /// Release owned resources (scheduled tasks, in particular).
    fn on_remove(&mut self);
}

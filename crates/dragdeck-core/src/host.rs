//! Collaborator traits the host UI implements.
//!
//! The controller never touches a UI toolkit directly. It asks the host to:
//! - attach and detach pointer listeners ([`EventSource`])
//! - resolve elements under the pointer and their bound ids ([`HitTest`])
//! - show, move and hide the floating ghost ([`GhostLayer`])

use crate::input::{ListenerKind, ListenerSet};
use kurbo::Point;

/// Pointer listener registration owned by the host view.
pub trait EventSource {
    /// Start delivering events of this kind to the controller.
    fn listen(&mut self, kind: ListenerKind);

    /// Stop delivering events of this kind.
    fn unlisten(&mut self, kind: ListenerKind);

    /// Check if events of this kind are being delivered.
    fn is_listening(&self, kind: ListenerKind) -> bool;
}

impl EventSource for ListenerSet {
    fn listen(&mut self, kind: ListenerKind) {
        self.attach(kind);
    }

    fn unlisten(&mut self, kind: ListenerKind) {
        self.detach(kind);
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        self.is_attached(kind)
    }
}

/// Element lookup over whatever the host last rendered.
pub trait HitTest {
    /// Handle to a rendered element.
    type Element: Clone + PartialEq + std::fmt::Debug;

    /// Topmost interactive element at a viewport point. The ghost must never
    /// be returned.
    fn element_at(&self, point: Point) -> Option<Self::Element>;

    /// Nearest self-or-ancestor tagged as a drag handle inside a drag zone.
    fn closest_drag_handle(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Nearest self-or-ancestor tagged as drop-eligible.
    fn closest_drop_target(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Item identifier bound on the element, as a string.
    fn bound_id(&self, element: &Self::Element) -> Option<String>;

    /// Top-left corner of the element, used to anchor the ghost.
    fn element_origin(&self, element: &Self::Element) -> Option<Point>;

    /// List index when the element is a list body rather than an item.
    fn container_list(&self, _element: &Self::Element) -> Option<usize> {
        None
    }
}

/// The floating clone shown under the pointer during a drag.
pub trait GhostLayer: HitTest {
    /// Create the ghost as a copy of `source` with its top-left at `origin`.
    fn show_ghost(&mut self, source: &Self::Element, origin: Point);

    /// Move the ghost's top-left to `origin`.
    fn move_ghost(&mut self, origin: Point);

    /// Remove the ghost.
    fn hide_ghost(&mut self);

    /// Set an element's opacity (0.0 to 1.0).
    fn set_opacity(&mut self, element: &Self::Element, opacity: f64);
}

/// Everything a controller needs from its host.
pub trait DragHost: EventSource + HitTest + GhostLayer {}

impl<H: EventSource + HitTest + GhostLayer> DragHost for H {}

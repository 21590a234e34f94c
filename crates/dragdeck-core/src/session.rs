//! State of a single drag gesture.

use crate::collection::{CollectionError, Position, Snapshot};
use kurbo::{Point, Vec2};
use thiserror::Error;

/// Why a pointer-down did not start a drag.
///
/// None of these reach the user; the controller logs them and stays idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Controller is not started")]
    Stopped,
    #[error("A drag is already in progress")]
    SessionActive,
    #[error("Only the primary button starts a drag")]
    NotPrimaryButton,
    #[error("No drag handle under the pointer")]
    NoDragHandle,
    #[error("Drag handle carries no item id")]
    MissingId,
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Item id is not unique: {0}")]
    DuplicateId(String),
    #[error("List {0} is not a drag zone")]
    ZoneNotDraggable(usize),
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// Why the pointer is not over a valid drop slot this frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("Nothing under the pointer")]
    NoElement,
    #[error("Element is not drop-eligible")]
    NotDroppable,
    #[error("Element carries no item id")]
    MissingId,
    #[error("Item not found: {0}")]
    Stale(String),
    #[error("Item id is not unique: {0}")]
    DuplicateId(String),
    #[error("List {0} is not a drop zone")]
    ZoneNotDroppable(usize),
}

/// Where a hovered element says the dragged item should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSlot {
    /// Take the slot of the item at this position.
    Item(Position),
    /// Append to the end of a list.
    Append(usize),
}

/// A live drag gesture, from capture to release.
///
/// Created fresh on every capture, so nothing from a previous gesture
/// (target, preview, anchor) can leak into the next one.
#[derive(Debug, Clone)]
pub struct DragSession<T, E> {
    /// The detached item.
    item: T,
    /// Its id as bound on elements.
    item_id: String,
    /// Where the item sat at capture.
    source: Position,
    /// The drag handle that was pressed.
    source_element: E,
    /// Last resolved drop slot, `None` while the pointer is off-target.
    target: Option<Position>,
    /// Where the item currently sits as a preview, if anywhere.
    preview: Option<Position>,
    /// Pointer position minus ghost origin at capture.
    anchor: Vec2,
    /// Every list as it was before capture.
    snapshot: Snapshot<T>,
}

impl<T, E> DragSession<T, E> {
    pub(crate) fn new(
        item: T,
        item_id: String,
        source: Position,
        source_element: E,
        anchor: Vec2,
        snapshot: Snapshot<T>,
    ) -> Self {
        Self {
            item,
            item_id,
            source,
            source_element,
            target: None,
            preview: None,
            anchor,
            snapshot,
        }
    }

    /// The detached item.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// The dragged item's id.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Position of the item when the drag started.
    pub fn source(&self) -> Position {
        self.source
    }

    /// The pressed drag handle.
    pub fn source_element(&self) -> &E {
        &self.source_element
    }

    /// Currently resolved target, if the pointer is over a valid slot.
    pub fn target(&self) -> Option<Position> {
        self.target
    }

    /// Where the preview insertion lives.
    pub fn preview(&self) -> Option<Position> {
        self.preview
    }

    /// Ghost origin that keeps the grab point under `pointer`.
    pub fn ghost_origin(&self, pointer: Point) -> Point {
        pointer - self.anchor
    }

    pub(crate) fn set_target(&mut self, target: Option<Position>) {
        self.target = target;
    }

    pub(crate) fn set_preview(&mut self, preview: Option<Position>) {
        self.preview = preview;
    }

    pub(crate) fn take_preview(&mut self) -> Option<Position> {
        self.preview.take()
    }

    pub(crate) fn into_parts(self) -> (String, Position, Option<Position>, E, Snapshot<T>) {
        (self.item_id, self.source, self.target, self.source_element, self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ListCollection;
    use crate::item::Card;

    #[test]
    fn test_new_session_starts_without_target() {
        let lists = ListCollection::new(vec![vec![Card::new(1, "one")]]);
        let session = DragSession::new(
            Card::new(1, "one"),
            "1".to_string(),
            Position::new(0, 0),
            "handle",
            Vec2::new(4.0, 6.0),
            lists.snapshot(),
        );
        assert_eq!(session.target(), None);
        assert_eq!(session.preview(), None);
        assert_eq!(session.item_id(), "1");
        assert_eq!(*session.source_element(), "handle");
    }

    #[test]
    fn test_ghost_origin_keeps_anchor() {
        let lists: ListCollection<Card> = ListCollection::default();
        let session = DragSession::new(
            Card::new(1, "one"),
            "1".to_string(),
            Position::new(0, 0),
            (),
            Vec2::new(10.0, 5.0),
            lists.snapshot(),
        );
        let origin = session.ghost_origin(Point::new(110.0, 45.0));
        assert!((origin.x - 100.0).abs() < f64::EPSILON);
        assert!((origin.y - 40.0).abs() < f64::EPSILON);
    }
}

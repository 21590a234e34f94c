//! Pointer events and listener bookkeeping.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event delivered by the UI runtime.
///
/// `E` is the host's element handle. Only pointer-down carries one: it is the
/// element the press landed on, before any drag-handle narrowing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent<E> {
    Down {
        position: Point,
        button: MouseButton,
        target: Option<E>,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
}

impl<E> PointerEvent<E> {
    /// Absolute pointer position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            Self::Down { position, .. } | Self::Move { position } | Self::Up { position, .. } => {
                *position
            }
        }
    }

    /// The listener slot this event is delivered through.
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::Down { .. } => ListenerKind::Down,
            Self::Move { .. } => ListenerKind::Move,
            Self::Up { .. } => ListenerKind::Up,
        }
    }
}

/// Kinds of pointer listener a controller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerKind {
    Down,
    Move,
    Up,
}

/// Tracks which pointer listeners are attached.
///
/// Hosts embed one and consult [`accepts`](Self::accepts) before forwarding
/// an event, so move/up events only reach the controller mid-gesture.
#[derive(Debug, Clone, Default)]
pub struct ListenerSet {
    attached: HashSet<ListenerKind>,
}

impl ListenerSet {
    /// Create an empty listener set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. Attaching twice is a no-op.
    pub fn attach(&mut self, kind: ListenerKind) {
        self.attached.insert(kind);
    }

    /// Detach a listener. Detaching a missing one is a no-op.
    pub fn detach(&mut self, kind: ListenerKind) {
        self.attached.remove(&kind);
    }

    /// Check if a listener is attached.
    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.attached.contains(&kind)
    }

    /// Whether an event should be forwarded to the controller.
    pub fn accepts<E>(&self, event: &PointerEvent<E>) -> bool {
        self.is_attached(event.kind())
    }

    /// Check if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Number of listeners currently attached.
    pub fn len(&self) -> usize {
        self.attached.len()
    }
}

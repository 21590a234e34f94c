//! DragDeck Core Library
//!
//! Platform-agnostic drag-and-drop reordering across ordered lists: the drag
//! session state machine, the live preview splice, and commit/rollback.

pub mod collection;
pub mod config;
pub mod controller;
pub mod grid;
pub mod host;
pub mod input;
pub mod item;
pub mod session;

pub use collection::{CollectionError, CollectionResult, ListCollection, Position, Snapshot};
pub use config::{ConfigError, DragConfig, DuplicatePolicy, ZoneFilter};
pub use controller::{DragController, DragOutcome, DragPhase};
pub use grid::{Ghost, GridElement, GridHost, GridLayout};
pub use host::{DragHost, EventSource, GhostLayer, HitTest};
pub use input::{ListenerKind, ListenerSet, MouseButton, PointerEvent};
pub use item::{Card, DragItem, ItemId};
pub use session::{CaptureError, DragSession, DropSlot, TargetError};

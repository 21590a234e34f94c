//! Item identity and the stock card item.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an item, unique across every list of a collection.
///
/// Elements in the UI expose identifiers as strings, so matching always goes
/// through the [`fmt::Display`] coercion: `Int(7)` matches the bound id `"7"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl ItemId {
    /// Whether this identifier matches a string bound on a UI element.
    pub fn matches(&self, bound: &str) -> bool {
        match self {
            Self::Str(s) => s == bound,
            Self::Int(n) => n.to_string() == bound,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Anything that can live in a draggable list.
///
/// `Clone` must be a deep copy: the session detaches the dragged item by
/// cloning it and snapshots are whole-collection clones.
pub trait DragItem: Clone {
    /// The item's identifier. Must be stable for the duration of a gesture.
    fn item_id(&self) -> ItemId;
}

/// A simple titled card, the item type used by the demo board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: ItemId,
    pub title: String,
    /// Optional secondary line shown under the title.
    #[serde(default)]
    pub note: Option<String>,
}

impl Card {
    /// Create a card without a note.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            note: None,
        }
    }

    /// Attach a note line.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl DragItem for Card {
    fn item_id(&self) -> ItemId {
        self.id.clone()
    }
}

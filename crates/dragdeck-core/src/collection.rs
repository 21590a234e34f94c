//! The shared list collection and its snapshots.

use crate::item::DragItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Address of a slot in a [`ListCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Index of the list.
    pub list: usize,
    /// Index of the item inside that list.
    pub index: usize,
}

impl Position {
    pub fn new(list: usize, index: usize) -> Self {
        Self { list, index }
    }
}

/// Collection errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("List {list} out of range ({lists} lists)")]
    ListOutOfRange { list: usize, lists: usize },
    #[error("Index {index} out of range for list {list} (len {len})")]
    IndexOutOfRange { list: usize, index: usize, len: usize },
    #[error("Duplicate item id: {0}")]
    DuplicateId(String),
}

/// Result type for collection operations.
pub type CollectionResult<T> = Result<T, CollectionError>;

/// A deep copy of every list, used to roll a gesture back.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    lists: Vec<Vec<T>>,
}

impl<T> Snapshot<T> {
    /// The lists as they were when the snapshot was taken.
    pub fn lists(&self) -> &[Vec<T>] {
        &self.lists
    }
}

/// An ordered sequence of ordered item lists.
///
/// Every mutation bumps [`revision`](Self::revision) so renderers can tell
/// when to redraw. When indexing is enabled, an id -> slot map is kept per
/// list and rebuilt for whichever list a mutation touched; lookups walk the
/// maps in list order, which resolves exactly like the plain scan.
#[derive(Debug, Clone)]
pub struct ListCollection<T> {
    lists: Vec<Vec<T>>,
    index: Option<Vec<HashMap<String, usize>>>,
    revision: u64,
}

impl<T: DragItem> Default for ListCollection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: DragItem> ListCollection<T> {
    /// Create a collection from existing lists.
    pub fn new(lists: Vec<Vec<T>>) -> Self {
        Self {
            lists,
            index: None,
            revision: 0,
        }
    }

    /// Turn the identifier index on or off.
    pub fn set_indexing(&mut self, enabled: bool) {
        if enabled {
            self.rebuild_index();
        } else {
            self.index = None;
        }
    }

    /// Builder-style variant of [`set_indexing`](Self::set_indexing).
    pub fn with_indexing(mut self, enabled: bool) -> Self {
        self.set_indexing(enabled);
        self
    }

    /// Whether the identifier index is active.
    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    /// All lists, in order.
    pub fn lists(&self) -> &[Vec<T>] {
        &self.lists
    }

    /// A single list.
    pub fn list(&self, list: usize) -> Option<&[T]> {
        self.lists.get(list).map(Vec::as_slice)
    }

    /// Number of lists.
    pub fn list_count(&self) -> usize {
        self.lists.len()
    }

    /// Total number of items across all lists.
    pub fn total_items(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Check if no list holds any item.
    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// Get the item at a position.
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.lists.get(pos.list).and_then(|l| l.get(pos.index))
    }

    /// Mutation counter, incremented by every change to the lists.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Identifiers as strings, shaped like the lists. This is what a
    /// renderer binds onto its elements.
    pub fn ids(&self) -> Vec<Vec<String>> {
        self.lists
            .iter()
            .map(|l| l.iter().map(|item| item.item_id().to_string()).collect())
            .collect()
    }

    /// Find the first item whose id matches `id`, scanning lists in order.
    pub fn find(&self, id: &str) -> Option<Position> {
        if let Some(index) = &self.index {
            return index
                .iter()
                .enumerate()
                .find_map(|(list, map)| map.get(id).map(|&i| Position::new(list, i)));
        }
        self.lists.iter().enumerate().find_map(|(list, items)| {
            items
                .iter()
                .position(|item| item.item_id().matches(id))
                .map(|i| Position::new(list, i))
        })
    }

    /// Every position holding an item with this id.
    pub fn find_all(&self, id: &str) -> Vec<Position> {
        let mut found = Vec::new();
        for (list, items) in self.lists.iter().enumerate() {
            for (i, item) in items.iter().enumerate() {
                if item.item_id().matches(id) {
                    found.push(Position::new(list, i));
                }
            }
        }
        found
    }

    /// Check that no identifier appears twice across the whole collection.
    pub fn validate_unique_ids(&self) -> CollectionResult<()> {
        let mut seen = std::collections::HashSet::new();
        for item in self.lists.iter().flatten() {
            let id = item.item_id().to_string();
            if !seen.insert(id.clone()) {
                return Err(CollectionError::DuplicateId(id));
            }
        }
        Ok(())
    }

    /// Remove and return the item at `pos`, shifting later items up.
    pub fn remove(&mut self, pos: Position) -> CollectionResult<T> {
        let lists = self.lists.len();
        let items = self
            .lists
            .get_mut(pos.list)
            .ok_or(CollectionError::ListOutOfRange { list: pos.list, lists })?;
        if pos.index >= items.len() {
            return Err(CollectionError::IndexOutOfRange {
                list: pos.list,
                index: pos.index,
                len: items.len(),
            });
        }
        let item = items.remove(pos.index);
        self.touched(pos.list);
        Ok(item)
    }

    /// Insert `item` at `pos`, shifting the occupant and later items down.
    /// `pos.index` may equal the list length (append).
    pub fn insert(&mut self, pos: Position, item: T) -> CollectionResult<()> {
        let lists = self.lists.len();
        let items = self
            .lists
            .get_mut(pos.list)
            .ok_or(CollectionError::ListOutOfRange { list: pos.list, lists })?;
        if pos.index > items.len() {
            return Err(CollectionError::IndexOutOfRange {
                list: pos.list,
                index: pos.index,
                len: items.len(),
            });
        }
        items.insert(pos.index, item);
        self.touched(pos.list);
        Ok(())
    }

    /// Append a new list.
    pub fn push_list(&mut self, items: Vec<T>) {
        self.lists.push(items);
        self.revision += 1;
        if let Some(index) = &mut self.index {
            index.push(HashMap::new());
            let last = self.lists.len() - 1;
            self.reindex_list(last);
        }
    }

    /// Replace every list at once.
    pub fn replace(&mut self, lists: Vec<Vec<T>>) {
        self.lists = lists;
        self.revision += 1;
        self.refresh_index();
    }

    /// Take a deep copy of every list.
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            lists: self.lists.clone(),
        }
    }

    /// Restore the lists from a snapshot.
    pub fn restore(&mut self, snapshot: Snapshot<T>) {
        self.lists = snapshot.lists;
        self.revision += 1;
        self.refresh_index();
    }

    fn touched(&mut self, list: usize) {
        self.revision += 1;
        self.reindex_list(list);
    }

    fn refresh_index(&mut self) {
        if self.index.is_some() {
            self.rebuild_index();
        }
    }

    fn rebuild_index(&mut self) {
        self.index = Some(vec![HashMap::new(); self.lists.len()]);
        for list in 0..self.lists.len() {
            self.reindex_list(list);
        }
    }

    fn reindex_list(&mut self, list: usize) {
        let (Some(index), Some(items)) = (self.index.as_mut(), self.lists.get(list)) else {
            return;
        };
        let Some(map) = index.get_mut(list) else {
            return;
        };
        map.clear();
        for (i, item) in items.iter().enumerate() {
            // First occurrence wins, same as the linear scan.
            map.entry(item.item_id().to_string()).or_insert(i);
        }
    }
}

impl<T: DragItem> From<Vec<Vec<T>>> for ListCollection<T> {
    fn from(lists: Vec<Vec<T>>) -> Self {
        Self::new(lists)
    }
}

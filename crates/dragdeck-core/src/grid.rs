//! A fixed-row column board host.
//!
//! Lays lists out as side-by-side columns of equally tall rows and answers
//! hit-tests arithmetically from that layout. It keeps its own copy of the
//! ids it last rendered, the same way a UI tree lags the data model until the
//! next render; call [`GridHost::sync`] after every controller call.

use crate::collection::ListCollection;
use crate::host::{EventSource, GhostLayer, HitTest};
use crate::input::{ListenerKind, ListenerSet};
use crate::item::DragItem;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Geometry of the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Top-left corner of the first column.
    pub origin: Point,
    pub column_width: f64,
    /// Horizontal space between columns. Not part of any column.
    pub column_gap: f64,
    pub row_height: f64,
    /// Height of every column body.
    pub column_height: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin: Point::new(16.0, 48.0),
            column_width: 220.0,
            column_gap: 24.0,
            row_height: 56.0,
            column_height: 560.0,
        }
    }
}

impl GridLayout {
    fn stride(&self) -> f64 {
        self.column_width + self.column_gap
    }

    /// Rect of a whole column body.
    pub fn column_rect(&self, list: usize) -> Rect {
        let x0 = self.origin.x + list as f64 * self.stride();
        Rect::from_origin_size(
            Point::new(x0, self.origin.y),
            Size::new(self.column_width, self.column_height),
        )
    }

    /// Rect of the row slot `row` in column `list`.
    pub fn card_rect(&self, list: usize, row: usize) -> Rect {
        let column = self.column_rect(list);
        Rect::from_origin_size(
            Point::new(column.x0, column.y0 + row as f64 * self.row_height),
            Size::new(self.column_width, self.row_height),
        )
    }

    /// Column and row under a point, ignoring what is rendered there.
    pub fn slot_at(&self, point: Point) -> Option<(usize, usize)> {
        let rel = point - self.origin;
        if rel.x < 0.0 || rel.y < 0.0 || rel.y >= self.column_height {
            return None;
        }
        let column = (rel.x / self.stride()).floor();
        if rel.x - column * self.stride() >= self.column_width {
            return None;
        }
        let row = (rel.y / self.row_height).floor();
        Some((column as usize, row as usize))
    }
}

/// An element of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridElement {
    /// A rendered card. Cards are both drag handles and drop targets.
    Card { list: usize, row: usize },
    /// The empty part of a column body.
    Column(usize),
}

/// The floating copy of a card.
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    /// Id of the card being dragged.
    pub id: String,
    /// Top-left corner.
    pub origin: Point,
    pub size: Size,
}

impl Ghost {
    /// Rect covered by the ghost.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// Host over a [`GridLayout`].
#[derive(Debug, Clone, Default)]
pub struct GridHost {
    layout: GridLayout,
    rendered: Vec<Vec<String>>,
    listeners: ListenerSet,
    ghost: Option<Ghost>,
    /// Opacity overrides keyed by card id.
    opacity: HashMap<String, f64>,
}

impl GridHost {
    /// Create a host with nothing rendered yet.
    pub fn new(layout: GridLayout) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }

    /// Re-render from the collection.
    pub fn sync<T: DragItem>(&mut self, lists: &ListCollection<T>) {
        self.rendered = lists.ids();
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Change the geometry, e.g. after a window resize.
    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
    }

    /// Ids as last rendered.
    pub fn rendered(&self) -> &[Vec<String>] {
        &self.rendered
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    /// The ghost, while one is shown.
    pub fn ghost(&self) -> Option<&Ghost> {
        self.ghost.as_ref()
    }

    /// Opacity a card should be painted with.
    pub fn opacity_of(&self, id: &str) -> f64 {
        self.opacity.get(id).copied().unwrap_or(1.0)
    }

    /// Center of a card slot, handy for scripting pointer paths.
    pub fn card_center(&self, list: usize, row: usize) -> Point {
        self.layout.card_rect(list, row).center()
    }
}

impl EventSource for GridHost {
    fn listen(&mut self, kind: ListenerKind) {
        self.listeners.attach(kind);
    }

    fn unlisten(&mut self, kind: ListenerKind) {
        self.listeners.detach(kind);
    }

    fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.is_attached(kind)
    }
}

impl HitTest for GridHost {
    type Element = GridElement;

    fn element_at(&self, point: Point) -> Option<GridElement> {
        let (list, row) = self.layout.slot_at(point)?;
        let column = self.rendered.get(list)?;
        if row < column.len() {
            Some(GridElement::Card { list, row })
        } else {
            Some(GridElement::Column(list))
        }
    }

    fn closest_drag_handle(&self, element: &GridElement) -> Option<GridElement> {
        match element {
            GridElement::Card { .. } => Some(*element),
            GridElement::Column(_) => None,
        }
    }

    fn closest_drop_target(&self, element: &GridElement) -> Option<GridElement> {
        Some(*element)
    }

    fn bound_id(&self, element: &GridElement) -> Option<String> {
        match *element {
            GridElement::Card { list, row } => self.rendered.get(list)?.get(row).cloned(),
            GridElement::Column(_) => None,
        }
    }

    fn element_origin(&self, element: &GridElement) -> Option<Point> {
        match *element {
            GridElement::Card { list, row } => Some(self.layout.card_rect(list, row).origin()),
            GridElement::Column(list) => Some(self.layout.column_rect(list).origin()),
        }
    }

    fn container_list(&self, element: &GridElement) -> Option<usize> {
        match *element {
            GridElement::Column(list) => Some(list),
            GridElement::Card { .. } => None,
        }
    }
}

impl GhostLayer for GridHost {
    fn show_ghost(&mut self, source: &GridElement, origin: Point) {
        let Some(id) = self.bound_id(source) else {
            log::warn!("Ghost requested for unbound element {:?}", source);
            return;
        };
        self.ghost = Some(Ghost {
            id,
            origin,
            size: Size::new(self.layout.column_width, self.layout.row_height),
        });
    }

    fn move_ghost(&mut self, origin: Point) {
        if let Some(ghost) = &mut self.ghost {
            ghost.origin = origin;
        }
    }

    fn hide_ghost(&mut self) {
        self.ghost = None;
    }

    fn set_opacity(&mut self, element: &GridElement, opacity: f64) {
        // Keyed by id: the slot may show a different card after the next sync.
        let id = match (self.bound_id(element), &self.ghost) {
            (_, Some(ghost)) => ghost.id.clone(),
            (Some(id), None) => id,
            (None, None) => return,
        };
        if opacity >= 1.0 {
            self.opacity.remove(&id);
        } else {
            self.opacity.insert(id, opacity);
        }
    }
}

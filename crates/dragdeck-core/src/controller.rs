//! The drag controller: capture, tracking, preview, commit and rollback.
//!
//! ```text
//! Idle --pointer-down on a handle--> Tracking --pointer-move--> Tracking
//! Tracking --pointer-up, target valid--> commit --> Idle
//! Tracking --pointer-up, no target----> rollback --> Idle
//! ```
//!
//! While tracking, the collection holds the dragged item at most once: at
//! the last resolved target, or nowhere if no target has resolved yet.

use crate::collection::{ListCollection, Position, Snapshot};
use crate::config::{DragConfig, DuplicatePolicy};
use crate::host::DragHost;
use crate::input::{ListenerKind, MouseButton, PointerEvent};
use crate::item::DragItem;
use crate::session::{CaptureError, DragSession, DropSlot, TargetError};
use kurbo::Point;

/// Lifecycle phase of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Not attached to a host view.
    Stopped,
    /// Waiting for a pointer-down.
    Idle,
    /// A drag session is active.
    Tracking,
}

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing happened.
    Ignored,
    /// A drag started; the item was removed from `source`.
    Started { id: String, source: Position },
    /// The preview now sits at `at`.
    Previewed { at: Position },
    /// The pointer is not over a valid slot; the preview stays put.
    TargetLost,
    /// The drop was accepted.
    Committed { id: String, from: Position, to: Position },
    /// The drop was discarded and the lists restored.
    RolledBack { id: String },
}

impl DragOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Drives drag-and-drop reordering over a [`ListCollection`].
///
/// The controller owns the collection; renderers read it through
/// [`lists`](Self::lists) between events.
#[derive(Debug, Clone)]
pub struct DragController<T, E> {
    config: DragConfig,
    lists: ListCollection<T>,
    session: Option<DragSession<T, E>>,
    /// Arrangement before the last committed gesture.
    last_commit: Option<Snapshot<T>>,
    running: bool,
}

impl<T, E> DragController<T, E>
where
    T: DragItem,
    E: Clone + PartialEq + std::fmt::Debug,
{
    /// Create a stopped controller over `lists`.
    pub fn new(lists: impl Into<ListCollection<T>>, config: DragConfig) -> Self {
        let mut lists = lists.into();
        lists.set_indexing(config.index_ids);
        if let Err(e) = lists.validate_unique_ids() {
            log::warn!("List collection violates id uniqueness: {}", e);
        }
        Self {
            config,
            lists,
            session: None,
            last_commit: None,
            running: false,
        }
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// The live collection.
    pub fn lists(&self) -> &ListCollection<T> {
        &self.lists
    }

    /// Mutable access for the host, refused while a drag is in progress.
    ///
    /// Host edits are not undoable, so the recorded commit is dropped.
    pub fn lists_mut(&mut self) -> Option<&mut ListCollection<T>> {
        if self.session.is_some() {
            return None;
        }
        if self.last_commit.take().is_some() {
            log::debug!("Host edit discards the undoable commit");
        }
        Some(&mut self.lists)
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession<T, E>> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> DragPhase {
        match (self.running, self.session.is_some()) {
            (_, true) => DragPhase::Tracking,
            (true, false) => DragPhase::Idle,
            (false, false) => DragPhase::Stopped,
        }
    }

    /// Attach to a host view. Subscribes to pointer-down only.
    pub fn start<H: DragHost<Element = E>>(&mut self, host: &mut H) {
        if self.running {
            return;
        }
        self.running = true;
        host.listen(ListenerKind::Down);
        log::debug!("Drag controller started");
    }

    /// Detach from the host view. A gesture in flight is rolled back.
    pub fn stop<H: DragHost<Element = E>>(&mut self, host: &mut H) -> DragOutcome {
        let outcome = match self.session.take() {
            Some(session) => self.finish(session, host, false),
            None => DragOutcome::Ignored,
        };
        host.unlisten(ListenerKind::Move);
        host.unlisten(ListenerKind::Up);
        host.unlisten(ListenerKind::Down);
        self.running = false;
        log::debug!("Drag controller stopped");
        outcome
    }

    /// Dispatch a pointer event. Events on listeners that are not attached
    /// are ignored, as are releases of any button but the primary one.
    pub fn handle_event<H: DragHost<Element = E>>(
        &mut self,
        event: PointerEvent<E>,
        host: &mut H,
    ) -> DragOutcome {
        if !host.is_listening(event.kind()) {
            return DragOutcome::Ignored;
        }
        match event {
            PointerEvent::Down {
                position,
                button,
                target,
            } => self.pointer_down(position, button, target, host),
            PointerEvent::Move { position } => self.pointer_move(position, host),
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => self.pointer_up(position, host),
            PointerEvent::Up { button, .. } => {
                log::trace!("Ignoring {:?} button release", button);
                DragOutcome::Ignored
            }
        }
    }

    /// Try to start a drag on the element under the pointer.
    pub fn pointer_down<H: DragHost<Element = E>>(
        &mut self,
        position: Point,
        button: MouseButton,
        target: Option<E>,
        host: &mut H,
    ) -> DragOutcome {
        match self.capture(position, button, target, host) {
            Ok(session) => {
                let handle = session.source_element().clone();
                host.show_ghost(&handle, session.ghost_origin(position));
                host.set_opacity(&handle, self.config.source_opacity);
                host.listen(ListenerKind::Move);
                host.listen(ListenerKind::Up);

                let outcome = DragOutcome::Started {
                    id: session.item_id().to_string(),
                    source: session.source(),
                };
                log::debug!("Drag started: {} from {:?}", session.item_id(), session.source());
                self.session = Some(session);
                outcome
            }
            Err(e) => {
                log::debug!("Pointer-down ignored: {}", e);
                DragOutcome::Ignored
            }
        }
    }

    /// Follow the pointer and move the preview to whatever it hovers.
    pub fn pointer_move<H: DragHost<Element = E>>(
        &mut self,
        position: Point,
        host: &mut H,
    ) -> DragOutcome {
        let Some(session) = &self.session else {
            return DragOutcome::Ignored;
        };
        host.move_ghost(session.ghost_origin(position));

        let slot = match self.resolve_target(position, host) {
            Ok(slot) => slot,
            Err(e) => {
                log::trace!("No drop target at {:?}: {}", position, e);
                if let Some(session) = &mut self.session {
                    session.set_target(None);
                }
                return DragOutcome::TargetLost;
            }
        };

        match self.apply_preview(slot) {
            Some(at) => DragOutcome::Previewed { at },
            None => DragOutcome::TargetLost,
        }
    }

    /// End the gesture: commit onto the current target or roll back.
    pub fn pointer_up<H: DragHost<Element = E>>(
        &mut self,
        _position: Point,
        host: &mut H,
    ) -> DragOutcome {
        match self.session.take() {
            Some(session) => self.finish(session, host, true),
            None => DragOutcome::Ignored,
        }
    }

    /// Restore the arrangement from before the last committed drag.
    /// Only one gesture deep; returns false when there is nothing to undo or
    /// a drag is in progress.
    pub fn undo_last_commit(&mut self) -> bool {
        if self.session.is_some() {
            return false;
        }
        match self.last_commit.take() {
            Some(snapshot) => {
                self.lists.restore(snapshot);
                log::debug!("Undid last drag");
                true
            }
            None => false,
        }
    }

    /// Check if [`undo_last_commit`](Self::undo_last_commit) would do anything.
    pub fn can_undo(&self) -> bool {
        self.session.is_none() && self.last_commit.is_some()
    }

    fn capture<H: DragHost<Element = E>>(
        &mut self,
        position: Point,
        button: MouseButton,
        target: Option<E>,
        host: &H,
    ) -> Result<DragSession<T, E>, CaptureError> {
        if !self.running {
            return Err(CaptureError::Stopped);
        }
        if self.session.is_some() {
            return Err(CaptureError::SessionActive);
        }
        if button != MouseButton::Left {
            return Err(CaptureError::NotPrimaryButton);
        }

        let handle = target
            .and_then(|t| host.closest_drag_handle(&t))
            .ok_or(CaptureError::NoDragHandle)?;
        let id = host.bound_id(&handle).ok_or(CaptureError::MissingId)?;

        if self.config.duplicate_policy == DuplicatePolicy::Reject
            && self.lists.find_all(&id).len() > 1
        {
            return Err(CaptureError::DuplicateId(id));
        }
        let source = self
            .lists
            .find(&id)
            .ok_or_else(|| CaptureError::ItemNotFound(id.clone()))?;
        if !self.config.drag_lists.contains(source.list) {
            return Err(CaptureError::ZoneNotDraggable(source.list));
        }

        // Snapshot before the item leaves its list.
        let snapshot = self.lists.snapshot();
        let item = self.lists.remove(source)?;
        let origin = host.element_origin(&handle).unwrap_or(position);

        Ok(DragSession::new(item, id, source, handle, position - origin, snapshot))
    }

    fn resolve_target<H: DragHost<Element = E>>(
        &self,
        position: Point,
        host: &H,
    ) -> Result<DropSlot, TargetError> {
        let element = host.element_at(position).ok_or(TargetError::NoElement)?;
        let element = host
            .closest_drop_target(&element)
            .ok_or(TargetError::NotDroppable)?;

        let slot = match host.bound_id(&element) {
            Some(id) => {
                if self.config.duplicate_policy == DuplicatePolicy::Reject
                    && self.lists.find_all(&id).len() > 1
                {
                    return Err(TargetError::DuplicateId(id));
                }
                let pos = self.lists.find(&id).ok_or(TargetError::Stale(id))?;
                DropSlot::Item(pos)
            }
            None if self.config.drop_on_container => {
                let list = host
                    .container_list(&element)
                    .filter(|&l| l < self.lists.list_count())
                    .ok_or(TargetError::MissingId)?;
                DropSlot::Append(list)
            }
            None => return Err(TargetError::MissingId),
        };

        let list = match slot {
            DropSlot::Item(pos) => pos.list,
            DropSlot::Append(list) => list,
        };
        if !self.config.drop_lists.contains(list) {
            return Err(TargetError::ZoneNotDroppable(list));
        }
        Ok(slot)
    }

    /// Move the preview to `slot`. Returns the new preview position, or
    /// `None` if the splice failed and the frame counts as off-target.
    fn apply_preview(&mut self, slot: DropSlot) -> Option<Position> {
        let session = self.session.as_mut()?;

        if let DropSlot::Item(pos) = slot {
            if session.preview() == Some(pos) {
                session.set_target(Some(pos));
                return Some(pos);
            }
        }

        // The hovered index was read with the preview still in place.
        if let Some(previous) = session.take_preview() {
            if let Err(e) = self.lists.remove(previous) {
                log::warn!("Failed to remove preview at {:?}: {}", previous, e);
                session.set_target(None);
                return None;
            }
        }

        let at = match slot {
            DropSlot::Item(pos) => pos,
            DropSlot::Append(list) => {
                Position::new(list, self.lists.list(list).map(<[T]>::len).unwrap_or(0))
            }
        };
        if let Err(e) = self.lists.insert(at, session.item().clone()) {
            log::warn!("Failed to insert preview at {:?}: {}", at, e);
            session.set_target(None);
            return None;
        }

        log::trace!("Preview moved to {:?}", at);
        session.set_preview(Some(at));
        session.set_target(Some(at));
        Some(at)
    }

    fn finish<H: DragHost<Element = E>>(
        &mut self,
        session: DragSession<T, E>,
        host: &mut H,
        allow_commit: bool,
    ) -> DragOutcome {
        let (id, source, target, handle, snapshot) = session.into_parts();

        host.set_opacity(&handle, 1.0);
        host.hide_ghost();
        host.unlisten(ListenerKind::Move);
        host.unlisten(ListenerKind::Up);

        match target {
            Some(to) if allow_commit => {
                log::debug!("Drag committed: {} {:?} -> {:?}", id, source, to);
                self.last_commit = Some(snapshot);
                DragOutcome::Committed { id, from: source, to }
            }
            _ => {
                log::debug!("Drag rolled back: {}", id);
                self.lists.restore(snapshot);
                DragOutcome::RolledBack { id }
            }
        }
    }
}

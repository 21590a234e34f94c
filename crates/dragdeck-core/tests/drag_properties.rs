//! Property tests for the drag controller invariants.
//!
//! Random boards and random pointer paths, driven through the grid host so
//! every frame goes through real hit-testing.

use dragdeck_core::{
    Card, DragConfig, DragController, DragOutcome, GridElement, GridHost, GridLayout, HitTest,
    MouseButton, PointerEvent,
};
use kurbo::Point;
use proptest::prelude::*;

const LAYOUT: GridLayout = GridLayout {
    origin: Point::new(0.0, 0.0),
    column_width: 100.0,
    column_gap: 10.0,
    row_height: 20.0,
    column_height: 200.0,
};

#[derive(Debug, Clone)]
enum Step {
    Over { list: usize, row: usize },
    Away,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0usize..5, 0usize..10).prop_map(|(list, row)| Step::Over { list, row }),
        1 => Just(Step::Away),
    ]
}

fn board(sizes: &[usize]) -> Vec<Vec<Card>> {
    let mut next: i64 = 0;
    sizes
        .iter()
        .map(|&len| {
            (0..len)
                .map(|_| {
                    next += 1;
                    Card::new(next, format!("card {}", next))
                })
                .collect()
        })
        .collect()
}

struct Harness {
    controller: DragController<Card, GridElement>,
    host: GridHost,
}

impl Harness {
    fn new(sizes: &[usize], index_ids: bool) -> Self {
        let config = DragConfig {
            index_ids,
            ..Default::default()
        };
        let mut controller = DragController::new(board(sizes), config);
        let mut host = GridHost::new(LAYOUT);
        controller.start(&mut host);
        host.sync(controller.lists());
        Self { controller, host }
    }

    fn send(&mut self, event: PointerEvent<GridElement>) -> DragOutcome {
        let outcome = self.controller.handle_event(event, &mut self.host);
        self.host.sync(self.controller.lists());
        outcome
    }

    fn point(&self, step: &Step) -> Point {
        match *step {
            Step::Over { list, row } => self.host.card_center(list, row),
            Step::Away => Point::new(-50.0, -50.0),
        }
    }

    fn down(&mut self, list: usize, row: usize) -> DragOutcome {
        let position = self.host.card_center(list, row);
        let target = self.host.element_at(position);
        self.send(PointerEvent::Down {
            position,
            button: MouseButton::Left,
            target,
        })
    }

    fn occurrences(&self, id: &str) -> usize {
        self.controller.lists().find_all(id).len()
    }
}

proptest! {
    #[test]
    fn failed_drags_leave_lists_untouched(
        sizes in prop::collection::vec(0usize..6, 1..4),
        grab in (0usize..4, 0usize..6),
        path in prop::collection::vec(step(), 0..12),
    ) {
        let mut h = Harness::new(&sizes, false);
        let before = h.controller.lists().snapshot();

        h.down(grab.0, grab.1);
        for step in &path {
            let at = h.point(step);
            h.send(PointerEvent::Move { position: at });
        }
        // Always finish off-target.
        h.send(PointerEvent::Move { position: Point::new(-50.0, -50.0) });
        h.send(PointerEvent::Up { position: Point::new(-50.0, -50.0), button: MouseButton::Left });

        prop_assert_eq!(h.controller.lists().lists(), before.lists());
        prop_assert!(!h.controller.is_dragging());
    }

    #[test]
    fn dragged_item_is_never_duplicated(
        sizes in prop::collection::vec(1usize..6, 1..4),
        grab in (0usize..3, 0usize..5),
        path in prop::collection::vec(step(), 1..16),
    ) {
        let mut h = Harness::new(&sizes, false);
        let total = h.controller.lists().total_items();

        let DragOutcome::Started { id, .. } = h.down(grab.0, grab.1) else {
            return Ok(());
        };
        prop_assert_eq!(h.occurrences(&id), 0);
        prop_assert_eq!(h.controller.lists().total_items(), total - 1);

        let mut previewed = false;
        for step in &path {
            let at = h.point(step);
            if let DragOutcome::Previewed { .. } = h.send(PointerEvent::Move { position: at }) {
                previewed = true;
            }
            let count = h.controller.lists().total_items();
            prop_assert!(h.occurrences(&id) <= 1);
            if previewed {
                prop_assert_eq!(count, total);
                prop_assert_eq!(h.occurrences(&id), 1);
                let preview = h.controller.session().and_then(|s| s.preview());
                prop_assert_eq!(preview, h.controller.lists().find(&id));
            } else {
                prop_assert_eq!(count, total - 1);
            }
        }

        h.send(PointerEvent::Up { position: Point::ZERO, button: MouseButton::Left });
        prop_assert_eq!(h.controller.lists().total_items(), total);
        prop_assert_eq!(h.occurrences(&id), 1);
    }

    #[test]
    fn index_does_not_change_resolution(
        sizes in prop::collection::vec(0usize..6, 1..4),
        gestures in prop::collection::vec(
            ((0usize..3, 0usize..5), prop::collection::vec(step(), 0..8)),
            1..4,
        ),
    ) {
        let mut plain = Harness::new(&sizes, false);
        let mut indexed = Harness::new(&sizes, true);

        for (grab, path) in &gestures {
            for h in [&mut plain, &mut indexed] {
                h.down(grab.0, grab.1);
                for step in path {
                    let at = h.point(step);
                    h.send(PointerEvent::Move { position: at });
                }
                h.send(PointerEvent::Up { position: Point::ZERO, button: MouseButton::Left });
            }
            prop_assert_eq!(plain.controller.lists().lists(), indexed.controller.lists().lists());
        }
    }

    #[test]
    fn failed_drag_after_commit_restores_commit(
        sizes in prop::collection::vec(1usize..5, 2..4),
        to in (0usize..3, 0usize..4),
        path in prop::collection::vec(step(), 0..8),
    ) {
        let mut h = Harness::new(&sizes, false);

        h.down(0, 0);
        let at = h.host.card_center(to.0, to.1);
        h.send(PointerEvent::Move { position: at });
        h.send(PointerEvent::Up { position: at, button: MouseButton::Left });
        let committed = h.controller.lists().snapshot();

        h.down(0, 0);
        for step in &path {
            let at = h.point(step);
            h.send(PointerEvent::Move { position: at });
        }
        h.send(PointerEvent::Move { position: Point::new(-50.0, -50.0) });
        h.send(PointerEvent::Up { position: Point::ZERO, button: MouseButton::Left });

        prop_assert_eq!(h.controller.lists().lists(), committed.lists());
    }
}

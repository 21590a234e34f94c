//! Board painting and toolbar using egui.

use crate::theme;
use dragdeck_core::{Card, DragPhase, Ghost, GridHost, ListCollection};
use egui::{Align2, Color32, Context, CornerRadius, FontId, Painter, Rect, Stroke, StrokeKind, pos2};

/// Actions requested from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Undo the last committed move.
    Undo,
    /// Put every card back where the board started.
    Reset,
}

/// Convert a kurbo rect to an egui rect.
pub fn to_egui_rect(rect: kurbo::Rect) -> Rect {
    Rect::from_min_max(
        pos2(rect.x0 as f32, rect.y0 as f32),
        pos2(rect.x1 as f32, rect.y1 as f32),
    )
}

/// Render the toolbar. Returns an action if a button was clicked.
pub fn toolbar(ctx: &Context, can_undo: bool, dragging: bool) -> Option<UiAction> {
    let mut action = None;
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("DragDeck");
            ui.separator();
            if ui
                .add_enabled(can_undo, egui::Button::new("Undo last move"))
                .clicked()
            {
                action = Some(UiAction::Undo);
            }
            if ui
                .add_enabled(!dragging, egui::Button::new("Reset board"))
                .clicked()
            {
                action = Some(UiAction::Reset);
            }
        });
    });
    action
}

/// Render the status line.
pub fn status_bar(ctx: &Context, phase: DragPhase, message: &str) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let phase = match phase {
                DragPhase::Stopped => "stopped",
                DragPhase::Idle => "idle",
                DragPhase::Tracking => "dragging",
            };
            ui.label(egui::RichText::new(phase).color(theme::ACCENT));
            ui.separator();
            ui.label(egui::RichText::new(message).color(theme::TEXT_MUTED));
        });
    });
}

/// Paint every column and its cards as the host last rendered them.
pub fn paint_board(
    painter: &Painter,
    host: &GridHost,
    lists: &ListCollection<Card>,
    titles: &[String],
) {
    let layout = host.layout();
    let radius = CornerRadius::same(theme::CORNER_RADIUS);

    for (list, items) in lists.lists().iter().enumerate() {
        let column = to_egui_rect(layout.column_rect(list));
        painter.rect_filled(column, radius, theme::COLUMN_BG);
        let border = Stroke::new(1.0, theme::COLUMN_BORDER);
        painter.rect_stroke(column, radius, border, StrokeKind::Inside);

        let title = titles.get(list).map(String::as_str).unwrap_or("Untitled");
        painter.text(
            pos2(column.left() + 4.0, column.top() - theme::HEADER_HEIGHT / 2.0),
            Align2::LEFT_CENTER,
            format!("{} ({})", title, items.len()),
            FontId::proportional(15.0),
            theme::TEXT,
        );

        for (row, card) in items.iter().enumerate() {
            let slot = to_egui_rect(layout.card_rect(list, row)).shrink(theme::CARD_INSET);
            if !column.contains_rect(slot) {
                break;
            }
            let opacity = host.opacity_of(&card.id.to_string()) as f32;
            paint_card(painter, slot, card, opacity, theme::CARD_BORDER);
        }
    }
}

/// Paint the ghost on top of everything.
pub fn paint_ghost(painter: &Painter, ghost: &Ghost, card: &Card) {
    let rect = to_egui_rect(ghost.rect()).shrink(theme::CARD_INSET);
    paint_card(painter, rect, card, 0.9, theme::ACCENT);
}

fn paint_card(painter: &Painter, rect: Rect, card: &Card, opacity: f32, border: Color32) {
    let radius = CornerRadius::same(theme::CORNER_RADIUS);
    painter.rect_filled(rect, radius, theme::CARD_BG.gamma_multiply(opacity));
    painter.rect_stroke(
        rect,
        radius,
        Stroke::new(1.0, border.gamma_multiply(opacity)),
        StrokeKind::Inside,
    );

    let title_y = if card.note.is_some() { rect.top() + 14.0 } else { rect.center().y };
    painter.text(
        pos2(rect.left() + 10.0, title_y),
        Align2::LEFT_CENTER,
        &card.title,
        FontId::proportional(14.0),
        theme::TEXT.gamma_multiply(opacity),
    );
    if let Some(note) = &card.note {
        painter.text(
            pos2(rect.left() + 10.0, rect.bottom() - 12.0),
            Align2::LEFT_CENTER,
            note,
            FontId::proportional(11.0),
            theme::TEXT_MUTED.gamma_multiply(opacity),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_egui_rect() {
        let rect = to_egui_rect(kurbo::Rect::new(1.0, 2.0, 11.0, 22.0));
        assert_eq!(rect.min, pos2(1.0, 2.0));
        assert_eq!(rect.max, pos2(11.0, 22.0));
    }
}

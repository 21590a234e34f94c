//! Board colors and sizing.

use egui::Color32;

/// Board background.
pub const BACKGROUND: Color32 = Color32::from_rgb(248, 250, 252);
/// Column body fill.
pub const COLUMN_BG: Color32 = Color32::from_rgb(241, 245, 249);
/// Column border.
pub const COLUMN_BORDER: Color32 = Color32::from_rgb(226, 232, 240);
/// Card fill.
pub const CARD_BG: Color32 = Color32::WHITE;
/// Card border.
pub const CARD_BORDER: Color32 = Color32::from_rgb(203, 213, 225);
/// Ghost border (blue-500).
pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
/// Primary text.
pub const TEXT: Color32 = Color32::from_rgb(30, 41, 59);
/// Secondary text.
pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 116, 139);

/// Corner radius for cards and columns.
pub const CORNER_RADIUS: u8 = 6;
/// Space between a card and its row slot.
pub const CARD_INSET: f32 = 4.0;
/// Height reserved above each column for its title.
pub const HEADER_HEIGHT: f32 = 32.0;

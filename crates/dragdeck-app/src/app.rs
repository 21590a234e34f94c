//! Application state and the egui frame loop.

use crate::theme;
use crate::ui::{self, UiAction};
use dragdeck_core::{
    Card, ConfigError, DragConfig, DragController, DragOutcome, GridElement, GridHost, GridLayout,
    HitTest, MouseButton, PointerEvent,
};
use kurbo::Point;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("UI error: {0}")]
    Ui(String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub drag: DragConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "DragDeck".to_string(),
            width: 1024.0,
            height: 720.0,
            drag: DragConfig {
                drop_on_container: true,
                ..Default::default()
            },
        }
    }
}

impl AppConfig {
    /// Load the drag settings from a JSON file.
    pub fn with_drag_config_file(mut self, path: &str) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        self.drag = DragConfig::from_json(&json)?;
        Ok(self)
    }
}

/// Pointer state sampled once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct PointerFrame {
    pub position: Option<Point>,
    pub primary_pressed: bool,
    pub secondary_pressed: bool,
    pub primary_released: bool,
    pub moved: bool,
}

impl PointerFrame {
    fn sample(ctx: &egui::Context) -> Self {
        ctx.input(|i| Self {
            position: i
                .pointer
                .interact_pos()
                .or(i.pointer.hover_pos())
                .map(|p| Point::new(p.x as f64, p.y as f64)),
            primary_pressed: i.pointer.primary_pressed(),
            secondary_pressed: i.pointer.button_pressed(egui::PointerButton::Secondary),
            primary_released: i.pointer.primary_released(),
            moved: i.pointer.is_moving(),
        })
    }
}

/// Turn one frame of pointer state into controller events, in order.
pub(crate) fn pointer_events(
    frame: PointerFrame,
    host: &GridHost,
) -> Vec<PointerEvent<GridElement>> {
    let Some(position) = frame.position else {
        return Vec::new();
    };
    let mut events = Vec::new();
    let press = [
        (frame.primary_pressed, MouseButton::Left),
        (frame.secondary_pressed, MouseButton::Right),
    ];
    for (pressed, button) in press {
        if pressed {
            events.push(PointerEvent::Down {
                position,
                button,
                target: host.element_at(position),
            });
        }
    }
    if frame.moved {
        events.push(PointerEvent::Move { position });
    }
    if frame.primary_released {
        events.push(PointerEvent::Up {
            position,
            button: MouseButton::Left,
        });
    }
    events
}

/// Starting board shown on launch and restored by "Reset board".
fn demo_board() -> (Vec<String>, Vec<Vec<Card>>) {
    let titles = ["Backlog", "In progress", "Review", "Done"]
        .iter()
        .map(|t| t.to_string())
        .collect();
    let lists = vec![
        vec![
            Card::new(1, "Sketch onboarding flow").with_note("design"),
            Card::new(2, "Audit log retention"),
            Card::new(3, "Flaky upload test").with_note("ci"),
            Card::new(4, "Dark mode tokens"),
        ],
        vec![
            Card::new(5, "Pagination for search").with_note("api"),
            Card::new(6, "Import from CSV"),
        ],
        vec![Card::new(7, "Rate limiter").with_note("needs second reviewer")],
        vec![],
    ];
    (titles, lists)
}

/// Main application struct.
pub struct App {
    titles: Vec<String>,
    controller: DragController<Card, GridElement>,
    host: GridHost,
    /// Collection revision the host last rendered.
    synced_revision: u64,
    /// Last thing worth telling the user.
    status: String,
}

impl App {
    /// Build the board and attach the controller.
    pub fn new(config: AppConfig) -> Self {
        let (titles, lists) = demo_board();
        let mut controller = DragController::new(lists, config.drag.clone());
        let mut host = GridHost::new(GridLayout::default());
        controller.start(&mut host);
        host.sync(controller.lists());
        let synced_revision = controller.lists().revision();
        Self {
            titles,
            controller,
            host,
            synced_revision,
            status: "Drag a card onto another card or an empty column".to_string(),
        }
    }

    /// Open the window and run until it is closed.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([config.width, config.height])
                .with_min_inner_size([640.0, 400.0]),
            ..Default::default()
        };
        let title = config.title.clone();
        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| Ok(Box::new(App::new(config)))),
        )
        .map_err(|e| AppError::Ui(e.to_string()))
    }

    fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::Undo => {
                if self.controller.undo_last_commit() {
                    self.status = "Undid last move".to_string();
                }
            }
            UiAction::Reset => {
                let (_, lists) = demo_board();
                if let Some(current) = self.controller.lists_mut() {
                    current.replace(lists);
                    self.status = "Board reset".to_string();
                }
            }
        }
        self.sync_host();
    }

    /// Re-render the host if the collection changed since the last sync.
    fn sync_host(&mut self) {
        let revision = self.controller.lists().revision();
        if revision != self.synced_revision {
            self.host.sync(self.controller.lists());
            self.synced_revision = revision;
        }
    }

    /// Fit the grid into the central panel.
    fn fit_layout(&mut self, area: egui::Rect) {
        let columns = self.controller.lists().list_count().max(1) as f64;
        let gap = 16.0;
        let width = ((area.width() as f64 - gap * (columns + 1.0)) / columns).clamp(140.0, 280.0);
        let top = area.top() as f64 + theme::HEADER_HEIGHT as f64 + 8.0;
        let layout = GridLayout {
            origin: Point::new(area.left() as f64 + gap, top),
            column_width: width,
            column_gap: gap,
            row_height: 56.0,
            column_height: (area.bottom() as f64 - top - gap).max(56.0),
        };
        if *self.host.layout() != layout {
            self.host.set_layout(layout);
        }
    }

    fn pump_pointer(&mut self, ctx: &egui::Context) {
        let frame = PointerFrame::sample(ctx);
        for event in pointer_events(frame, &self.host) {
            if !self.host.listeners().accepts(&event) {
                continue;
            }
            let outcome = self.controller.handle_event(event, &mut self.host);
            self.sync_host();
            self.describe(&outcome);
        }
    }

    fn describe(&mut self, outcome: &DragOutcome) {
        let card_title = |id: &str| {
            self.controller
                .lists()
                .find(id)
                .and_then(|pos| self.controller.lists().get(pos))
                .map(|card| card.title.clone())
                .unwrap_or_else(|| id.to_string())
        };
        let status = match outcome {
            DragOutcome::Committed { id, to, .. } => {
                let list = self.titles.get(to.list).map(String::as_str).unwrap_or("?");
                format!("Moved \"{}\" to {} #{}", card_title(id), list, to.index + 1)
            }
            DragOutcome::RolledBack { id } => {
                format!("Dropped \"{}\" outside the board; reverted", card_title(id))
            }
            DragOutcome::Started { .. } => "Dragging...".to_string(),
            _ => return,
        };
        self.status = status;
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let action = ui::toolbar(ctx, self.controller.can_undo(), self.controller.is_dragging());
        if let Some(action) = action {
            self.handle_action(action);
        }
        ui::status_bar(ctx, self.controller.phase(), &self.status);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(theme::BACKGROUND))
            .show(ctx, |ui| {
                self.fit_layout(ui.max_rect());
                self.pump_pointer(ctx);
                ui::paint_board(ui.painter(), &self.host, self.controller.lists(), &self.titles);
            });

        if let (Some(ghost), Some(session)) = (self.host.ghost(), self.controller.session()) {
            let layer = egui::LayerId::new(egui::Order::Tooltip, egui::Id::new("drag_ghost"));
            let painter = ctx.layer_painter(layer);
            ui::paint_ghost(&painter, ghost, session.item());
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            ctx.request_repaint();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // View teardown: roll back and detach anything left mid-gesture.
        self.controller.stop(&mut self.host);
    }
}

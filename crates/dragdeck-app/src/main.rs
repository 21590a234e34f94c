//! Main application entry point (native).

use dragdeck_app::{App, AppConfig};

fn main() {
    env_logger::init();
    log::info!("Starting DragDeck");

    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::default().with_drag_config_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load drag config from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    if let Err(e) = App::run(config) {
        log::error!("DragDeck exited with an error: {}", e);
        std::process::exit(1);
    }
}

use log::{error, info};

mod booking;
mod config;
mod dom;
mod page;
mod platform;
mod theme;
mod util;

mod components {
    pub mod scroll_top;
}
mod effects {
    pub mod loader;
    pub mod motion;
    pub mod reveal;
    pub mod scroll;
}
mod input {
    pub mod anchors;
    pub mod feedback;
    pub mod keyboard;
}

use page::PageController;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page controller");
    if let Err(err) = PageController::new().and_then(PageController::start_when_ready) {
        error!("Page setup failed: {}", err);
    }
}

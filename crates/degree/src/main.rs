use degree::config;
use degree::gui::app::AppModel;
use degree::sys::runtime;
use parking_lot::RwLock;
use relm4::prelude::*;
use std::sync::Arc;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let mut dial = match config::build_dial(&config) {
        Ok(dial) => dial,
        Err(e) => {
            log::error!("Cannot build dial: {}", e);
            std::process::exit(1);
        }
    };

    let current = Arc::new(RwLock::new(dial.value()));
    {
        let current = current.clone();
        dial.on_value_changed(move |value| *current.write() = value);
    }

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, current);

    let app = RelmApp::new("org.degree.dial");

    app.run::<AppModel>((dial, rx, config.window));
}

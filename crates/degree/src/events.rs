use dialcore::protocol::Command;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    ConfigReload,
}

/// Last value the dial reported, readable from the socket server without
/// touching the GUI thread.
pub type SharedValue = Arc<RwLock<i32>>;

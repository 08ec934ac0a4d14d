// Small browser helpers shared by main and the web host.

use web_sys::Window;

use crate::model::Viewport;

pub fn viewport_of(window: &Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0);
    Viewport::new(width.max(0.0), height.max(0.0))
}

pub fn init_logging(level: log::Level) {
    // a second init (hot reload) keeps the first logger
    console_log::init_with_level(level).ok();
}

use pick_wheel::WheelConfig;
use pick_wheel::components::{App, AppProps};
use pick_wheel::error::WheelError;
use pick_wheel::util::init_logging;

fn main() {
    console_error_panic_hook::set_once();

    let config = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| WheelError::MissingElement("document".to_string()))
        .and_then(|d| WheelConfig::from_document(&d));
    init_logging(config.as_ref().map(WheelConfig::level).unwrap_or(log::Level::Info));
    if let Err(e) = &config {
        log::error!("wheel config rejected: {e}");
    }

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}

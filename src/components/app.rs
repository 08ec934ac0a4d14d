use super::wheel_view::WheelView;
use crate::config::WheelConfig;
use crate::error::WheelError;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    /// A rejected config block is shown instead of the wheel.
    #[prop_or_else(default_config)]
    pub config: Result<WheelConfig, WheelError>,
}

fn default_config() -> Result<WheelConfig, WheelError> {
    Ok(WheelConfig::default())
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    html! {
        <div id="root" style="position:relative; width:100vw; height:100vh; background:#0e1116; color:#c9d1d9;">
            <WheelView config={props.config.clone()} />
        </div>
    }
}

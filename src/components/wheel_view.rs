use web_sys::{HtmlButtonElement, HtmlCanvasElement};
use yew::prelude::*;

use super::mount_error::MountErrorOverlay;
use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::web::{self, WheelHandle};

#[derive(Properties, PartialEq, Clone)]
pub struct WheelViewProps {
    pub config: Result<WheelConfig, WheelError>,
}

#[function_component(WheelView)]
pub fn wheel_view(props: &WheelViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let button_ref = use_node_ref();
    let handle = use_mut_ref(|| None::<WheelHandle>);
    let mount_error = use_state(|| None::<String>);

    // Mount once; the engine drives canvas and button directly from then on.
    {
        let canvas_ref = canvas_ref.clone();
        let button_ref = button_ref.clone();
        let handle = handle.clone();
        let mount_error = mount_error.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let mounted = config.and_then(|config| {
                let canvas = canvas_ref
                    .cast::<HtmlCanvasElement>()
                    .ok_or_else(|| WheelError::MissingElement("wheel canvas".to_string()))?;
                let button = button_ref
                    .cast::<HtmlButtonElement>()
                    .ok_or_else(|| WheelError::MissingElement("spin button".to_string()))?;
                web::mount(canvas, button, &config)
            });
            match mounted {
                Ok(h) => *handle.borrow_mut() = Some(h),
                Err(e) => {
                    log::error!("wheel mount failed: {e}");
                    mount_error.set(Some(e.to_string()));
                }
            }
            move || {
                handle.borrow_mut().take();
            }
        });
    }

    let on_spin = {
        let handle = handle.clone();
        Callback::from(move |_| {
            if let Some(h) = &*handle.borrow() {
                h.start();
            }
        })
    };

    html! {
        <div style="display:flex; flex-direction:column; align-items:center; gap:12px; padding-top:4vh;">
            <canvas ref={canvas_ref} style="display:block;"></canvas>
            <button ref={button_ref} onclick={on_spin} style="padding:8px 0; font-size:18px;">{"Spin"}</button>
            <MountErrorOverlay message={(*mount_error).clone()} />
        </div>
    }
}

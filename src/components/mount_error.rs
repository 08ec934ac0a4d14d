use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MountErrorOverlayProps {
    pub message: Option<String>,
}

#[function_component]
pub fn MountErrorOverlay(props: &MountErrorOverlayProps) -> Html {
    let Some(message) = &props.message else {
        return html! {};
    };
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid #f85149; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px;">
            <h2 style="margin:0 0 12px 0; color:#f85149;">{"Wheel unavailable"}</h2>
            <p style="margin:4px 0;">{ message.clone() }</p>
        </div>
    }
}

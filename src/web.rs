// Browser host: canvas surface, button control, requestAnimationFrame/setTimeout
// scheduler, and the wiring that ties them to one engine instance.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlButtonElement, HtmlCanvasElement, HtmlImageElement,
    Window,
};

use crate::config::WheelConfig;
use crate::engine::WheelEngine;
use crate::error::WheelError;
use crate::host::{Scheduler, Surface, TriggerControl};
use crate::util::viewport_of;

pub type WebEngine = WheelEngine<CanvasSurface, ButtonControl, BrowserScheduler>;
type EngineSlot = Rc<RefCell<Option<WebEngine>>>;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, WheelError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(WheelError::render)?
            .ok_or(WheelError::NoRenderingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| WheelError::NoRenderingContext)?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    type Tile = HtmlImageElement;

    fn set_size(&mut self, size: f64) {
        let px = size.max(0.0) as u32;
        self.canvas.set_width(px);
        self.canvas.set_height(px);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), WheelError> {
        self.ctx.translate(x, y).map_err(WheelError::render)
    }

    fn set_opacity(&mut self, opacity: f64) -> Result<(), WheelError> {
        self.canvas
            .style()
            .set_property("opacity", &opacity.to_string())
            .map_err(WheelError::render)
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn rotate(&mut self, radians: f64) -> Result<(), WheelError> {
        self.ctx.rotate(radians).map_err(WheelError::render)
    }

    fn draw_tile(
        &mut self,
        tile: &HtmlImageElement,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), WheelError> {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(tile, x, y, width, height)
            .map_err(WheelError::render)
    }
}

pub struct ButtonControl {
    button: HtmlButtonElement,
}

impl ButtonControl {
    pub fn new(button: HtmlButtonElement) -> Self {
        Self { button }
    }
}

impl TriggerControl for ButtonControl {
    fn set_enabled(&mut self, enabled: bool) {
        self.button.set_disabled(!enabled);
    }

    fn set_width(&mut self, px: f64) -> Result<(), WheelError> {
        self.button
            .style()
            .set_property("width", &format!("{}px", px))
            .map_err(WheelError::render)
    }
}

/// Frame and timer callbacks are installed after the engine slot exists,
/// so both are held in shared cells.
pub struct BrowserScheduler {
    window: Window,
    on_frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    on_timer: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending_frame: Rc<Cell<Option<i32>>>,
    armed_timer: Rc<Cell<Option<i32>>>,
}

impl BrowserScheduler {
    fn new(window: Window) -> Self {
        Self {
            window,
            on_frame: Rc::new(RefCell::new(None)),
            on_timer: Rc::new(RefCell::new(None)),
            pending_frame: Rc::new(Cell::new(None)),
            armed_timer: Rc::new(Cell::new(None)),
        }
    }

    /// Id of the animation frame currently in flight.
    pub fn pending_frame(&self) -> Option<i32> {
        self.pending_frame.get()
    }

    fn install(&self, slot: Weak<RefCell<Option<WebEngine>>>) {
        let pending = self.pending_frame.clone();
        let frame_slot = slot.clone();
        *self.on_frame.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            pending.set(None);
            let Some(slot) = frame_slot.upgrade() else { return };
            if let Some(engine) = slot.borrow_mut().as_mut() {
                if let Err(e) = engine.tick(timestamp) {
                    log::error!("wheel frame at {timestamp:.0}ms failed: {e}");
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let armed = self.armed_timer.clone();
        *self.on_timer.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            armed.set(None);
            let Some(slot) = slot.upgrade() else { return };
            if let Some(engine) = slot.borrow_mut().as_mut() {
                engine.on_timer();
            }
        }) as Box<dyn FnMut()>));
    }
}

impl Scheduler for BrowserScheduler {
    type Timer = i32;

    fn request_frame(&mut self) -> Result<(), WheelError> {
        // one frame in flight at a time, extra requests ride along with it
        if self.pending_frame.get().is_some() {
            return Ok(());
        }
        let cb = self.on_frame.borrow();
        let cb = cb
            .as_ref()
            .ok_or_else(|| WheelError::Scheduling("frame callback not installed".to_string()))?;
        let id = self
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(WheelError::scheduling)?;
        self.pending_frame.set(Some(id));
        Ok(())
    }

    fn arm_timer(&mut self, delay_ms: u32) -> Result<i32, WheelError> {
        let cb = self.on_timer.borrow();
        let cb = cb
            .as_ref()
            .ok_or_else(|| WheelError::Scheduling("timer callback not installed".to_string()))?;
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms.min(i32::MAX as u32) as i32,
            )
            .map_err(WheelError::scheduling)?;
        self.armed_timer.set(Some(id));
        Ok(id)
    }

    fn cancel_timer(&mut self, timer: i32) {
        self.window.clear_timeout_with_handle(timer);
        if self.armed_timer.get() == Some(timer) {
            self.armed_timer.set(None);
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        // callbacks die with us, so nothing may still be queued against them
        if let Some(id) = self.pending_frame.take() {
            self.window.cancel_animation_frame(id).ok();
        }
        if let Some(id) = self.armed_timer.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

/// A mounted wheel. Dropping it detaches the resize listener and stops the
/// animation.
pub struct WheelHandle {
    window: Window,
    engine: EngineSlot,
    on_resize: Closure<dyn FnMut()>,
}

impl WheelHandle {
    pub fn pending_frame(&self) -> Option<i32> {
        self.engine
            .borrow()
            .as_ref()
            .and_then(|engine| engine.scheduler().pending_frame())
    }

    pub fn start(&self) {
        if let Some(engine) = self.engine.borrow_mut().as_mut() {
            match engine.start() {
                Ok(true) => log::debug!(
                    "wheel: spin started {}",
                    serde_json::to_string(&engine.snapshot()).unwrap_or_default()
                ),
                Ok(false) => {}
                Err(e) => log::error!("wheel start failed: {e}"),
            }
        }
    }
}

impl Drop for WheelHandle {
    fn drop(&mut self) {
        self.window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
            .ok();
        self.engine.borrow_mut().take();
    }
}

/// Tile images in document order.
pub fn collect_tiles(
    document: &Document,
    selector: &str,
) -> Result<Vec<HtmlImageElement>, WheelError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|e| WheelError::InvalidConfig(format!("tile selector {selector:?}: {e:?}")))?;
    let mut tiles = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let img = node.dyn_into::<HtmlImageElement>().map_err(|_| {
            WheelError::MissingElement(format!("{selector} matched a non-image element"))
        })?;
        tiles.push(img);
    }
    Ok(tiles)
}

/// Build an engine on `canvas` and `button` and start listening for resizes.
/// Resource problems are reported here rather than from inside the
/// animation loop.
pub fn mount(
    canvas: HtmlCanvasElement,
    button: HtmlButtonElement,
    config: &WheelConfig,
) -> Result<WheelHandle, WheelError> {
    let window =
        web_sys::window().ok_or_else(|| WheelError::MissingElement("window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| WheelError::MissingElement("document".to_string()))?;

    let tiles = collect_tiles(&document, &config.tile_selector)?;
    if tiles.is_empty() {
        log::warn!("wheel: no tiles match {:?}", config.tile_selector);
    }

    let slot: EngineSlot = Rc::new(RefCell::new(None));
    let scheduler = BrowserScheduler::new(window.clone());
    scheduler.install(Rc::downgrade(&slot));

    let engine = WheelEngine::new(
        CanvasSurface::new(canvas)?,
        ButtonControl::new(button),
        scheduler,
        tiles,
        config.policy.into_policy(),
        config.timing(),
        viewport_of(&window),
    )?;
    *slot.borrow_mut() = Some(engine);

    let on_resize = {
        let slot = Rc::downgrade(&slot);
        let window = window.clone();
        Closure::wrap(Box::new(move || {
            let Some(slot) = slot.upgrade() else { return };
            if let Some(engine) = slot.borrow_mut().as_mut() {
                if let Err(e) = engine.resize(viewport_of(&window)) {
                    log::error!("wheel resize failed: {e}");
                }
            }
        }) as Box<dyn FnMut()>)
    };
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(WheelError::scheduling)?;

    log::info!("wheel mounted, {:?} policy", config.policy);
    Ok(WheelHandle {
        window,
        engine: slot,
        on_resize,
    })
}

//! Capabilities the engine needs from whatever is hosting it. The browser
//! implementations live in `crate::web`; tests supply recording fakes.

use crate::error::WheelError;

/// A 2d drawing surface whose origin the engine moves to its centre.
pub trait Surface {
    /// Drawable tile handle.
    type Tile;

    /// Resize to `size` x `size`. Resizing clears the surface and resets
    /// any transform.
    fn set_size(&mut self, size: f64);
    fn translate(&mut self, x: f64, y: f64) -> Result<(), WheelError>;
    /// Whole-surface opacity, independent of what is drawn on it.
    fn set_opacity(&mut self, opacity: f64) -> Result<(), WheelError>;
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn rotate(&mut self, radians: f64) -> Result<(), WheelError>;
    fn draw_tile(
        &mut self,
        tile: &Self::Tile,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), WheelError>;
}

/// The "spin" button.
pub trait TriggerControl {
    fn set_enabled(&mut self, enabled: bool);
    fn set_width(&mut self, px: f64) -> Result<(), WheelError>;
}

pub trait Scheduler {
    type Timer;

    /// Ask for one `tick` before the next repaint.
    fn request_frame(&mut self) -> Result<(), WheelError>;
    /// Ask for one `on_timer` call after `delay_ms`.
    fn arm_timer(&mut self, delay_ms: u32) -> Result<Self::Timer, WheelError>;
    fn cancel_timer(&mut self, timer: Self::Timer);
}

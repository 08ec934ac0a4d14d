//! The wheel state machine.
//!
//! `tick` is called once per display frame with the frame timestamp. Each
//! state either draws and waits for an outside trigger (`Start`, `Stopped`),
//! or draws and asks the scheduler for another frame. The only transition
//! driven from outside a tick is the spin timer (`on_timer`), which just
//! flips `Spinning` to `StartFade` and leaves the drawing to the next tick.

use std::f64::consts::TAU;

use crate::config::Timing;
use crate::error::WheelError;
use crate::host::{Scheduler, Surface, TriggerControl};
use crate::model::{
    FadeLevel, Geometry, Viewport, WheelSnapshot, WheelState, ring_offset_degrees,
    trigger_enabled,
};
use crate::policy::PickPolicy;

/// Spins a ring of tiles, fades it out, then removes one tile from the pool
/// and shows it as the victim.
pub struct WheelEngine<S: Surface, C: TriggerControl, K: Scheduler> {
    surface: S,
    control: C,
    scheduler: K,
    policy: Box<dyn PickPolicy>,
    timing: Timing,
    state: WheelState,
    /// Tiles not yet picked, in their original order.
    pool: Vec<S::Tile>,
    victim: Option<S::Tile>,
    fade: FadeLevel,
    viewport: Viewport,
    spin_timer: Option<K::Timer>,
}

impl<S: Surface, C: TriggerControl, K: Scheduler> WheelEngine<S, C, K> {
    pub fn new(
        surface: S,
        control: C,
        scheduler: K,
        tiles: Vec<S::Tile>,
        policy: Box<dyn PickPolicy>,
        timing: Timing,
        viewport: Viewport,
    ) -> Result<Self, WheelError> {
        log::debug!(
            "wheel: {} tiles, {} policy, spin {}ms",
            tiles.len(),
            policy.name(),
            timing.spin_duration_ms
        );
        let mut engine = Self {
            surface,
            control,
            scheduler,
            policy,
            timing,
            state: WheelState::Start,
            pool: tiles,
            victim: None,
            fade: FadeLevel::OPAQUE,
            viewport,
            spin_timer: None,
        };
        engine.resize(viewport)?;
        Ok(engine)
    }

    pub fn state(&self) -> WheelState {
        self.state
    }

    pub fn pool(&self) -> &[S::Tile] {
        &self.pool
    }

    pub fn victim(&self) -> Option<&S::Tile> {
        self.victim.as_ref()
    }

    pub fn fade(&self) -> FadeLevel {
        self.fade
    }

    pub fn geometry(&self) -> Geometry {
        self.viewport.geometry()
    }

    pub fn trigger_enabled(&self) -> bool {
        trigger_enabled(self.pool.len(), self.state)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn scheduler(&self) -> &K {
        &self.scheduler
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        WheelSnapshot {
            state: self.state,
            pool_len: self.pool.len(),
            has_victim: self.victim.is_some(),
            fade: self.fade.value(),
        }
    }

    /// Begin a spin cycle. Returns `false` and does nothing unless the wheel
    /// is idle with tiles left.
    pub fn start(&mut self) -> Result<bool, WheelError> {
        if !self.trigger_enabled() {
            log::debug!(
                "wheel: start ignored in {:?} with {} tiles",
                self.state,
                self.pool.len()
            );
            return Ok(false);
        }
        if let Some(stale) = self.spin_timer.take() {
            self.scheduler.cancel_timer(stale);
        }
        self.spin_timer = Some(self.scheduler.arm_timer(self.timing.spin_duration_ms)?);
        self.transition(WheelState::Spinning);
        self.control.set_enabled(false);
        self.scheduler.request_frame()?;
        Ok(true)
    }

    /// Spin timer expiry. Only moves the state; the pending tick draws.
    pub fn on_timer(&mut self) {
        self.spin_timer = None;
        if self.state == WheelState::Spinning {
            self.transition(WheelState::StartFade);
        } else {
            log::debug!("wheel: spin timer fired in {:?}, ignored", self.state);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) -> Result<(), WheelError> {
        self.viewport = viewport;
        let g = self.geometry();
        self.surface.set_size(g.size);
        self.surface.translate(g.half(), g.half())?;
        self.control.set_width(g.size)?;
        self.scheduler.request_frame()
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> Result<(), WheelError> {
        self.control.set_enabled(self.trigger_enabled());
        let offset = ring_offset_degrees(timestamp_ms);

        // Bookkeeping and rescheduling come before drawing so a failed draw
        // does not stall the loop.
        match self.state {
            WheelState::Start => {
                self.clear();
                self.draw_ring(offset)
            }
            WheelState::Spinning => {
                self.scheduler.request_frame()?;
                self.clear();
                self.draw_ring(offset)
            }
            WheelState::StartFade => {
                self.fade = FadeLevel::OPAQUE;
                self.transition(WheelState::Fading);
                self.scheduler.request_frame()?;
                self.surface.set_opacity(self.fade.value())
            }
            WheelState::Fading => {
                self.fade.step_down(self.timing.fade_step);
                if self.fade.is_exhausted() {
                    self.transition(WheelState::PickVictim);
                }
                self.scheduler.request_frame()?;
                self.surface.set_opacity(self.fade.value())?;
                self.clear();
                self.draw_ring(offset)
            }
            WheelState::PickVictim => {
                self.pick_victim();
                self.transition(WheelState::Stopped);
                self.scheduler.request_frame()
            }
            WheelState::Stopped => {
                self.fade = FadeLevel::OPAQUE;
                self.surface.set_opacity(self.fade.value())?;
                self.clear();
                self.draw_victim()
            }
        }
    }

    fn transition(&mut self, next: WheelState) {
        log::debug!("wheel: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn pick_victim(&mut self) {
        let len = self.pool.len();
        if len == 0 {
            log::warn!("wheel: no tiles left to pick");
            return;
        }
        let idx = self.policy.pick(len).min(len - 1);
        self.victim = Some(self.pool.remove(idx));
        log::info!(
            "wheel: picked tile {} of {} ({}), {} left",
            idx + 1,
            len,
            self.policy.name(),
            self.pool.len()
        );
    }

    fn clear(&mut self) {
        let g = self.geometry();
        self.surface.clear(-g.half(), -g.half(), g.size, g.size);
    }

    fn draw_ring(&mut self, offset_degrees: f64) -> Result<(), WheelError> {
        if self.pool.is_empty() {
            return Ok(());
        }
        let g = self.geometry();
        let side = g.tile_side();
        let distance = g.ring_distance();
        let increment = TAU / self.pool.len() as f64;
        let first = offset_degrees.to_radians();

        for (i, tile) in self.pool.iter().enumerate() {
            self.surface.save();
            let drawn = self
                .surface
                .rotate(first + increment * i as f64)
                .and_then(|()| {
                    self.surface
                        .draw_tile(tile, -(g.size * 0.075), distance, side, side)
                });
            // restore even on failure so rotations never pile up
            self.surface.restore();
            drawn?;
        }
        Ok(())
    }

    fn draw_victim(&mut self) -> Result<(), WheelError> {
        let g = self.geometry();
        match &self.victim {
            Some(victim) => self
                .surface
                .draw_tile(victim, -g.half(), -g.half(), g.size, g.size),
            None => Ok(()),
        }
    }
}

impl<S: Surface, C: TriggerControl, K: Scheduler> std::fmt::Debug for WheelEngine<S, C, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelEngine")
            .field("state", &self.state)
            .field("pool_len", &self.pool.len())
            .field("has_victim", &self.victim.is_some())
            .field("fade", &self.fade)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

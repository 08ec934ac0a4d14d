// Recording fakes for driving the engine without a browser.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pick_wheel::host::{Scheduler, Surface, TriggerControl};
use pick_wheel::{PickPolicy, Timing, Viewport, WheelEngine, WheelError};

pub const FRAME_MS: f64 = 16.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    SetSize(f64),
    Translate(f64, f64),
    Opacity(f64),
    Clear(f64, f64, f64, f64),
    Save,
    Restore,
    Rotate(f64),
    Draw {
        tile: char,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
}

#[derive(Default)]
pub struct FakeSurface {
    pub ops: Vec<Op>,
    pub fail_draws: Rc<Cell<bool>>,
}

impl FakeSurface {
    pub fn draws(&self) -> Vec<&Op> {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Draw { .. }))
            .collect()
    }
}

impl Surface for FakeSurface {
    type Tile = char;

    fn set_size(&mut self, size: f64) {
        self.ops.push(Op::SetSize(size));
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), WheelError> {
        self.ops.push(Op::Translate(x, y));
        Ok(())
    }

    fn set_opacity(&mut self, opacity: f64) -> Result<(), WheelError> {
        self.ops.push(Op::Opacity(opacity));
        Ok(())
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::Clear(x, y, width, height));
    }

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn rotate(&mut self, radians: f64) -> Result<(), WheelError> {
        self.ops.push(Op::Rotate(radians));
        Ok(())
    }

    fn draw_tile(
        &mut self,
        tile: &char,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<(), WheelError> {
        if self.fail_draws.get() {
            return Err(WheelError::Render("image not decoded".to_string()));
        }
        self.ops.push(Op::Draw {
            tile: *tile,
            x,
            y,
            w,
            h,
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeControl {
    pub enabled: Option<bool>,
    pub width: Option<f64>,
    pub fail_width: Rc<Cell<bool>>,
}

impl TriggerControl for FakeControl {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = Some(enabled);
    }

    fn set_width(&mut self, px: f64) -> Result<(), WheelError> {
        if self.fail_width.get() {
            return Err(WheelError::Render("style is read-only".to_string()));
        }
        self.width = Some(px);
        Ok(())
    }
}

#[derive(Default, Debug)]
pub struct Clock {
    pub now: f64,
    /// Coalesced like requestAnimationFrame: at most one pending frame.
    pub frame_pending: bool,
    pub frame_requests: usize,
    /// (id, due time)
    pub timers: Vec<(u32, f64)>,
    pub cancelled: Vec<u32>,
    pub armed_total: usize,
    next_id: u32,
}

#[derive(Clone, Default)]
pub struct FakeScheduler(pub Rc<RefCell<Clock>>);

impl Scheduler for FakeScheduler {
    type Timer = u32;

    fn request_frame(&mut self) -> Result<(), WheelError> {
        let mut clock = self.0.borrow_mut();
        clock.frame_requests += 1;
        clock.frame_pending = true;
        Ok(())
    }

    fn arm_timer(&mut self, delay_ms: u32) -> Result<u32, WheelError> {
        let mut clock = self.0.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now + f64::from(delay_ms);
        clock.timers.push((id, due));
        clock.armed_total += 1;
        Ok(id)
    }

    fn cancel_timer(&mut self, timer: u32) {
        let mut clock = self.0.borrow_mut();
        clock.timers.retain(|(id, _)| *id != timer);
        clock.cancelled.push(timer);
    }
}

pub type TestEngine = WheelEngine<FakeSurface, FakeControl, FakeScheduler>;

/// An engine plus the fake clock that feeds it frames and timer expiries.
pub struct Harness {
    pub engine: TestEngine,
    pub clock: Rc<RefCell<Clock>>,
    pub fail_draws: Rc<Cell<bool>>,
    pub fail_width: Rc<Cell<bool>>,
}

impl Harness {
    pub fn new(tiles: &[char], policy: Box<dyn PickPolicy>) -> Self {
        Self::with_viewport(tiles, policy, Viewport::new(800.0, 800.0))
    }

    pub fn with_viewport(tiles: &[char], policy: Box<dyn PickPolicy>, viewport: Viewport) -> Self {
        let scheduler = FakeScheduler::default();
        let clock = scheduler.0.clone();
        let surface = FakeSurface::default();
        let fail_draws = surface.fail_draws.clone();
        let control = FakeControl::default();
        let fail_width = control.fail_width.clone();
        let engine = WheelEngine::new(
            surface,
            control,
            scheduler,
            tiles.to_vec(),
            policy,
            Timing::default(),
            viewport,
        )
        .expect("fake host never fails");
        Self {
            engine,
            clock,
            fail_draws,
            fail_width,
        }
    }

    pub fn now(&self) -> f64 {
        self.clock.borrow().now
    }

    pub fn frame_pending(&self) -> bool {
        self.clock.borrow().frame_pending
    }

    /// Advance one frame: fire due timers, then deliver the pending tick if any.
    /// Returns whether a tick was delivered.
    pub fn frame(&mut self) -> Result<bool, WheelError> {
        let now = {
            let mut clock = self.clock.borrow_mut();
            clock.now += FRAME_MS;
            clock.now
        };
        let due: Vec<u32> = {
            let mut clock = self.clock.borrow_mut();
            let due = clock
                .timers
                .iter()
                .filter(|(_, at)| *at <= now)
                .map(|(id, _)| *id)
                .collect();
            clock.timers.retain(|(_, at)| *at > now);
            due
        };
        for _ in due {
            self.engine.on_timer();
        }
        let pending = std::mem::take(&mut self.clock.borrow_mut().frame_pending);
        if pending {
            self.engine.tick(now)?;
        }
        Ok(pending)
    }

    /// Deliver frames until the engine stops asking for them.
    pub fn settle(&mut self) -> usize {
        let mut ticks = 0;
        for _ in 0..10_000 {
            let timers_left = !self.clock.borrow().timers.is_empty();
            if !self.frame_pending() && !timers_left {
                return ticks;
            }
            if self.frame().expect("fake host never fails") {
                ticks += 1;
            }
        }
        panic!("engine never settled, stuck in {:?}", self.engine.state());
    }

    /// One full spin: start, then run frames until idle again.
    pub fn spin(&mut self) -> usize {
        assert!(self.engine.start().expect("start"), "start refused");
        self.settle()
    }
}

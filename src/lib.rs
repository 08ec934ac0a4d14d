//! Pick wheel: a ring of tiles that spins, fades out and reveals one victim,
//! which then leaves the pool for later spins.
//!
//! The state machine in [`engine`] only talks to the outside through the
//! traits in [`host`]; [`web`] provides the browser implementations and
//! [`components`] the Yew shell around them.

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod model;
pub mod policy;
pub mod util;
pub mod web;

pub use config::{Timing, WheelConfig};
pub use engine::WheelEngine;
pub use error::WheelError;
pub use model::{FadeLevel, Geometry, Viewport, WheelSnapshot, WheelState};
pub use policy::{PickPolicy, PolicyKind, RandomPick, SequentialPick};

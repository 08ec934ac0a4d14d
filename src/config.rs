//! Page-level configuration, read from an optional JSON block:
//!
//! ```html
//! <script type="application/json" id="wheel-config">{ "policy": "sequential" }</script>
//! ```

use serde::{Deserialize, Serialize};
use web_sys::Document;

use crate::error::WheelError;
use crate::model::{FADE_STEP, SPIN_DURATION_MS};
use crate::policy::PolicyKind;

pub const CONFIG_ELEMENT_ID: &str = "wheel-config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WheelConfig {
    pub policy: PolicyKind,
    pub spin_duration_ms: u32,
    pub fade_step: f64,
    /// CSS selector for the tile images, in document order.
    pub tile_selector: String,
    pub log_level: String,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            spin_duration_ms: SPIN_DURATION_MS,
            fade_step: FADE_STEP,
            tile_selector: "img.wheel-tile".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// The engine-facing part of the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub spin_duration_ms: u32,
    pub fade_step: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            fade_step: FADE_STEP,
        }
    }
}

impl WheelConfig {
    pub fn from_json(raw: &str) -> Result<Self, WheelError> {
        let config: WheelConfig = serde_json::from_str(raw)?;
        if !(config.fade_step > 0.0 && config.fade_step <= 1.0) {
            return Err(WheelError::InvalidConfig(format!(
                "fade_step must be in (0, 1], got {}",
                config.fade_step
            )));
        }
        if config.tile_selector.trim().is_empty() {
            return Err(WheelError::InvalidConfig("tile_selector is empty".to_string()));
        }
        Ok(config)
    }

    /// Defaults when the page carries no config block.
    pub fn from_document(document: &Document) -> Result<Self, WheelError> {
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn timing(&self) -> Timing {
        Timing {
            spin_duration_ms: self.spin_duration_ms,
            fade_step: self.fade_step,
        }
    }

    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

// Typed errors for the wheel. Browser failures arrive as JsValue and are
// rendered with {:?} since they carry no stable structure.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Canvas has no 2d rendering context")]
    NoRenderingContext,

    #[error("Render call failed: {0}")]
    Render(String),

    #[error("Scheduling failed: {0}")]
    Scheduling(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for WheelError {
    fn from(err: serde_json::Error) -> Self {
        WheelError::InvalidConfig(err.to_string())
    }
}

impl WheelError {
    pub fn render(err: impl std::fmt::Debug) -> Self {
        WheelError::Render(format!("{:?}", err))
    }

    pub fn scheduling(err: impl std::fmt::Debug) -> Self {
        WheelError::Scheduling(format!("{:?}", err))
    }
}

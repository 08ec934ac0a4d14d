pub mod app;
pub mod mount_error;
pub mod wheel_view;

pub use app::{App, AppProps};

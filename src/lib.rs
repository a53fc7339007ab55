#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod animation;
pub mod bar;
pub mod config;
pub mod error;
pub mod headless;
pub mod host;
pub mod operation;
pub mod telemetry;
pub mod types;

pub use bar::{ActionableToastBar, ShowRequest};

pub type Result<T> = std::result::Result<T, error::Error>;

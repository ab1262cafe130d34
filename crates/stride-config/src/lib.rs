//! Configuration system for the Stride character controller.
//!
//! Provides tuning settings that persist to disk as RON files. Supports CLI
//! overrides via clap, hot-reload detection, validation, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, ControllerConfig, DebugConfig, OrbitZoomConfig, ParkourConfig, VisibilityConfig,
};
pub use error::ConfigError;

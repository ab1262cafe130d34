//! Polled control input: per-tick snapshots, edge detection, and scripted replay.

pub mod action_map;
pub mod control;
pub mod script;

pub use action_map::{ActionHistory, ControlAction};
pub use control::{ControlInput, InputSource, InputTracker, RawInput, SCROLL_THRESHOLD};
pub use script::{InputScript, ScriptError, ScriptStep, ScriptedInput};

//! Scripted input replay.
//!
//! An [`InputScript`] is a RON-serializable list of steps, each holding a
//! [`RawInput`] for a number of ticks. [`ScriptedInput`] replays it through the
//! [`InputSource`] trait and yields idle input once exhausted.

use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::control::{InputSource, RawInput};

/// Errors raised while loading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Failed to read the script file.
    #[error("failed to read input script: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse input script: {0}")]
    ParseError(#[source] ron::error::SpannedError),
}

/// One held input sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// How many consecutive ticks this sample is held.
    pub ticks: u32,
    /// The sample.
    #[serde(default)]
    pub input: RawInput,
}

impl ScriptStep {
    /// Hold `input` for `ticks` ticks.
    #[must_use]
    pub fn hold(ticks: u32, input: RawInput) -> Self {
        Self { ticks, input }
    }

    /// `ticks` ticks of no input at all.
    #[must_use]
    pub fn idle(ticks: u32) -> Self {
        Self::hold(ticks, RawInput::default())
    }
}

/// A sequence of input steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    /// Steps in playback order.
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    /// Total number of ticks the script covers.
    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.ticks)).sum()
    }

    /// Serialize to RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Load a script from a RON file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path).map_err(ScriptError::ReadError)?;
        let script = Self::from_ron(&contents).map_err(ScriptError::ParseError)?;
        tracing::debug!(
            path = %path.display(),
            steps = script.steps.len(),
            ticks = script.total_ticks(),
            "loaded input script"
        );
        Ok(script)
    }
}

/// Replays raw input samples one per poll.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<RawInput>,
}

impl ScriptedInput {
    /// Create an empty source (always idle).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one tick of input.
    pub fn push(&mut self, input: RawInput) {
        self.queue.push_back(input);
    }

    /// Append `ticks` copies of `input`.
    pub fn push_held(&mut self, ticks: u32, input: RawInput) {
        for _ in 0..ticks {
            self.queue.push_back(input);
        }
    }

    /// Samples not yet polled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl From<&InputScript> for ScriptedInput {
    fn from(script: &InputScript) -> Self {
        let mut source = ScriptedInput::new();
        for step in &script.steps {
            source.push_held(step.ticks, step.input);
        }
        source
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> RawInput {
        self.queue.pop_front().unwrap_or_default()
    }
}

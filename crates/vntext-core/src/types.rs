//! Core data types for the normalization pipeline.

use serde::{Deserialize, Serialize};

/// One recorded intermediate result from a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTrace {
    /// Name of the stage that produced this intermediate text.
    pub stage: String,
    /// The full text as it left the stage.
    pub output: String,
}

impl StageTrace {
    /// Create a new trace record.
    pub fn new(stage: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            output: output.into(),
        }
    }
}

/// Normalized text with an optional per-stage trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanedText {
    /// The normalized text content.
    pub text: String,
    /// Intermediate outputs, one per applied stage. Empty unless tracing
    /// was requested in [`ProcessOptions`].
    pub trace: Vec<StageTrace>,
}

impl CleanedText {
    /// Create a new CleanedText without trace records.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            trace: Vec::new(),
        }
    }

    /// Create a CleanedText carrying a stage trace.
    pub fn with_trace(text: impl Into<String>, trace: Vec<StageTrace>) -> Self {
        Self {
            text: text.into(),
            trace,
        }
    }
}

/// Options for a single normalization call.
///
/// The trace is a side channel: enabling it never changes the returned
/// text, only whether intermediate stage outputs are recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Strip Vietnamese diacritics as the final transformation.
    #[serde(default)]
    pub strip_diacritics: bool,
    /// Record each stage's intermediate output in the returned trace.
    #[serde(default)]
    pub trace_stages: bool,
}

impl ProcessOptions {
    /// Create options with all flags off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable diacritics stripping.
    pub fn with_strip_diacritics(mut self, strip: bool) -> Self {
        self.strip_diacritics = strip;
        self
    }

    /// Enable or disable per-stage tracing.
    pub fn with_trace_stages(mut self, trace: bool) -> Self {
        self.trace_stages = trace;
        self
    }
}

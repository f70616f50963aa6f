//! Status report returned to the form after a merge

use std::fmt;
use std::path::PathBuf;

/// Separator line between report sections
pub(crate) const RULE: &str = "--------------------";

/// Terminal marker closing every report past validation
pub const COMPLETED_MARKER: &str = "Process completed.";

/// Where a merge invocation is, or where it ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStage {
    Idle,
    Validating,
    Enumerating,
    Merging,
    /// Output written
    Completed,
    /// Nothing to merge, no output written
    CompletedEmpty,
    Failed,
}

impl MergeStage {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MergeStage::Completed | MergeStage::CompletedEmpty | MergeStage::Failed
        )
    }
}

impl fmt::Display for MergeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MergeStage::Idle => "idle",
            MergeStage::Validating => "validating",
            MergeStage::Enumerating => "enumerating",
            MergeStage::Merging => "merging",
            MergeStage::Completed => "completed",
            MergeStage::CompletedEmpty => "completed (nothing to merge)",
            MergeStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Human-readable outcome of one merge invocation
///
/// Messages are collected in order while the merge runs and handed back
/// once at the end. `Display` renders them one per line.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Report lines, in the order they were produced
    pub messages: Vec<String>,
    /// False only when the merge ended in [`MergeStage::Failed`]
    pub succeeded: bool,
    /// Files appended to the merged document
    pub added_count: usize,
    /// Candidate files considered
    pub total_count: usize,
    /// Absolute path of the written file, if one was written
    pub output_path: Option<PathBuf>,
    /// Current or terminal stage
    pub stage: MergeStage,
}

impl Default for MergeReport {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeReport {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            succeeded: false,
            added_count: 0,
            total_count: 0,
            output_path: None,
            stage: MergeStage::Idle,
        }
    }

    /// Report for an invocation stopped before any work: one error line
    pub fn failed(error: impl fmt::Display) -> Self {
        let mut report = Self::new();
        report.push(format!("Error: {error}"));
        report.enter(MergeStage::Failed);
        report
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub(crate) fn blank(&mut self) {
        self.messages.push(String::new());
    }

    /// Move to `stage`, logging the transition
    pub(crate) fn enter(&mut self, stage: MergeStage) {
        log::debug!("Merge stage: {} -> {}", self.stage, stage);
        self.stage = stage;
    }

    /// Enter a terminal stage and close the report with the completion marker
    pub(crate) fn finish(&mut self, stage: MergeStage) {
        debug_assert!(stage.is_terminal());
        self.enter(stage);
        self.succeeded = stage != MergeStage::Failed;
        self.push(COMPLETED_MARKER);
    }

    /// Whether an output file was written
    pub fn wrote_output(&self) -> bool {
        self.output_path.is_some()
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("\n"))
    }
}

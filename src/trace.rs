//! Per-run step records.
//!
//! Every traced workflow run gets a [`RunId`] and a [`StepRecord`] for each
//! step it started. Steps skipped by a short-circuit have no record; the
//! trace only counts them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Get the current Unix timestamp in milliseconds.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Unique identifier for a workflow run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a step finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// The step produced a value for its successor.
    Succeeded,
    /// The step failed and stopped the run.
    Failed,
}

/// Timing and outcome of a single step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Position of the step in execution order.
    pub index: usize,
    /// Step name.
    pub name: String,
    /// When the step started (Unix timestamp ms).
    pub started_at: u64,
    /// When the step finished (Unix timestamp ms), if it did.
    pub completed_at: Option<u64>,
    /// How the step finished, if it did.
    pub status: Option<StepStatus>,
}

impl StepRecord {
    fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            started_at: now_millis(),
            completed_at: None,
            status: None,
        }
    }

    fn complete(&mut self, status: StepStatus) {
        self.completed_at = Some(now_millis());
        self.status = Some(status);
    }

    /// Get the duration in milliseconds, if completed.
    pub fn duration_ms(&self) -> Option<u64> {
        self.completed_at
            .map(|end| end.saturating_sub(self.started_at))
    }
}

/// The record of one workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    id: RunId,
    started_at: u64,
    records: Vec<StepRecord>,
    skipped: usize,
}

impl Trace {
    /// Start a trace with a fresh run ID.
    pub fn new() -> Self {
        Self {
            id: RunId::new(),
            started_at: now_millis(),
            records: Vec::new(),
            skipped: 0,
        }
    }

    /// Get the run ID.
    pub fn id(&self) -> RunId {
        self.id
    }

    /// Get when the run started (Unix timestamp ms).
    pub fn started_at(&self) -> u64 {
        self.started_at
    }

    /// Record the start of a step and return its index.
    pub(crate) fn begin(&mut self, name: &str) -> usize {
        let index = self.records.len();
        self.records.push(StepRecord::new(index, name.to_owned()));
        index
    }

    /// Record the end of the most recently started step.
    pub(crate) fn end(&mut self, status: StepStatus) {
        if let Some(record) = self.records.last_mut() {
            record.complete(status);
        }
    }

    /// Note that `count` steps were short-circuited.
    pub(crate) fn skip(&mut self, count: usize) {
        self.skipped += count;
    }

    /// Get all step records, in execution order.
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Get the record of the step that failed, if any.
    pub fn failed_step(&self) -> Option<&StepRecord> {
        self.records
            .iter()
            .find(|r| r.status == Some(StepStatus::Failed))
    }

    /// Number of steps that never ran because an earlier step failed.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns `true` if every step ran and succeeded.
    pub fn is_success(&self) -> bool {
        self.skipped == 0
            && self
                .records
                .iter()
                .all(|r| r.status == Some(StepStatus::Succeeded))
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::new()
    }
}

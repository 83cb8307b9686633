//! Batch result types.
//!
//! Contains types for representing the outcome of folder processing.

use std::path::PathBuf;
use std::time::Duration;

/// Status of a single processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// File converted
    Success,
    /// Conversion failed with error
    Failed(String),
}

impl ItemStatus {
    /// Check if the status indicates success.
    pub fn is_success(&self) -> bool {
        matches!(self, ItemStatus::Success)
    }

    /// Check if the status indicates failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, ItemStatus::Failed(_))
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemStatus::Success => write!(f, "success"),
            ItemStatus::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Result of processing a single file.
#[derive(Debug, Clone)]
pub struct ItemResult {
    /// Input file
    pub input: PathBuf,
    /// Processing status
    pub status: ItemStatus,
    /// Output files produced
    pub outputs: Vec<PathBuf>,
    /// Processing duration
    pub duration: Duration,
}

impl ItemResult {
    /// Create a successful result.
    pub fn success(input: PathBuf, outputs: Vec<PathBuf>, duration: Duration) -> Self {
        Self { input, status: ItemStatus::Success, outputs, duration }
    }

    /// Create a failed result.
    pub fn failed(input: PathBuf, error: String, duration: Duration) -> Self {
        Self { input, status: ItemStatus::Failed(error), outputs: vec![], duration }
    }
}

/// Result of processing a whole folder.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Per-file results, in discovery order
    pub items: Vec<ItemResult>,
    /// Total wall time
    pub total_duration: Duration,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: ItemResult) {
        self.items.push(result);
    }

    pub fn success_count(&self) -> usize {
        self.items.iter().filter(|r| r.status.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.items.iter().filter(|r| r.status.is_failure()).count()
    }

    /// True when no file failed (an empty batch counts as success).
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// All output files, in item order.
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.items.iter().flat_map(|r| r.outputs.iter().cloned()).collect()
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        format!(
            "{} processed, {} failed in {:.2?}",
            self.success_count(),
            self.failure_count(),
            self.total_duration
        )
    }
}

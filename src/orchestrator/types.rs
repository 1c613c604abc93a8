//! Orchestrator types for the three-step upload workflow
//!
//! Defines the progress reporting surface and the terminal result value.

use serde::{Deserialize, Serialize};

use crate::services::{ClassificationResult, DuplicateMatch, FolderRecommendation};

// ============================================================================
// Progress Reporting
// ============================================================================

/// One progress checkpoint emitted while a workflow runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Workflow step (1 analysis, 2 folder reading, 3 recommendation)
    pub step: u8,
    /// Overall completion, 0-100
    pub percent: u8,
    /// Display message, shown verbatim in the upload UI
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(step: u8, percent: u8, message: impl Into<String>) -> Self {
        Self {
            step,
            percent,
            message: message.into(),
        }
    }
}

/// Observer invoked at every checkpoint. The workflow result is identical
/// with or without one.
pub type ProgressCallback = dyn Fn(ProgressUpdate) + Send + Sync;

// ============================================================================
// Workflow Result
// ============================================================================

/// Terminal value of one upload analysis. The text blocks are pre-rendered
/// for the web layer; the typed fields stay available for further handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// Analysis overview block
    pub summary: String,
    /// Confidence / engine block
    pub details: String,
    /// Destination folder block
    pub destination: String,
    /// Full content analysis
    pub classification: ClassificationResult,
    /// Folder choice with reasoning
    pub folder: FolderRecommendation,
    /// Convention-formatted filename (the original name for duplicates)
    pub suggested_filename: String,
    /// Whether the workflow short-circuited on an existing copy
    pub is_duplicate: bool,
    /// The existing copy, when one was found
    pub duplicate: Option<DuplicateMatch>,
}

//! Upload workflow orchestrator
//!
//! Drives the three-step analysis for one file:
//! 1. Model content analysis (with naming rules in the prompt)
//! 2. Marketing Hub folder structure read
//! 3. Model folder recommendation over the real hierarchy
//!
//! A pre-flight duplicate check can short-circuit the whole pipeline.
//! Every stage degrades instead of failing, so `execute` always produces a
//! usable result.

mod types;

pub use types::*;

use std::sync::Arc;

use tracing::{info, warn};

use crate::services::{
    ClassificationResult, ContentClassifier, DuplicateChecker, DuplicateMatch,
    FolderRecommendation, FolderRecommender, FolderService, NamingService, format_filename,
};
use crate::types::FileDescriptor;

/// Central driver for the upload analysis workflow
pub struct UploadOrchestrator {
    classifier: Arc<ContentClassifier>,
    folders: Arc<FolderService>,
    recommender: Arc<FolderRecommender>,
    naming: Arc<NamingService>,
    duplicates: Arc<DuplicateChecker>,
}

impl UploadOrchestrator {
    pub fn new(
        classifier: Arc<ContentClassifier>,
        folders: Arc<FolderService>,
        recommender: Arc<FolderRecommender>,
        naming: Arc<NamingService>,
        duplicates: Arc<DuplicateChecker>,
    ) -> Self {
        Self {
            classifier,
            folders,
            recommender,
            naming,
            duplicates,
        }
    }

    /// Run the workflow without a progress observer.
    pub async fn execute(&self, file: &FileDescriptor, root_id: &str) -> WorkflowResult {
        self.execute_with_progress(file, root_id, None).await
    }

    /// Run the workflow, reporting each checkpoint to `progress` when given.
    pub async fn execute_with_progress(
        &self,
        file: &FileDescriptor,
        root_id: &str,
        progress: Option<&ProgressCallback>,
    ) -> WorkflowResult {
        let report = |step: u8, percent: u8, message: &str| {
            if let Some(callback) = progress {
                callback(ProgressUpdate::new(step, percent, message));
            }
            info!("📊 Step {}: {}% - {}", step, percent, message);
        };

        info!("🚀 Starting 3-step workflow for: {}", file.name);
        report(1, 0, "Initializing content analysis...");

        report(1, 5, "🔍 Checking for duplicate files...");
        match self
            .duplicates
            .find_duplicate(&file.name, file.size_bytes, Some(root_id))
            .await
        {
            Ok(Some(duplicate)) => {
                warn!("⚠️ Duplicate file detected: {}", duplicate.name);
                return duplicate_result(file, duplicate);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("⚠️ Duplicate check failed, continuing with analysis: {}", e);
            }
        }

        report(1, 10, "Loading naming convention rules...");
        let naming_rules = self.naming.get_rules().await;

        report(1, 15, "Starting Gemini content analysis...");
        let classification = self.classifier.classify(file, &naming_rules).await;
        report(1, 33, "✅ Content analysis complete");

        report(2, 40, "📁 Reading Marketing Hub structure...");
        let tree = self.folders.get_tree(root_id).await;
        report(2, 66, "✅ Folder structure loaded");

        report(3, 75, "🎯 Generating intelligent recommendation...");
        let folder = self.recommender.recommend(file, &classification, &tree).await;
        report(3, 90, "✅ Recommendation complete");

        report(3, 95, "📝 Applying naming convention...");
        let suggested_filename = format_filename(&file.name, &classification);

        report(3, 100, "✅ Analysis complete");
        assemble_result(classification, folder, suggested_filename)
    }
}

fn assemble_result(
    classification: ClassificationResult,
    folder: FolderRecommendation,
    suggested_filename: String,
) -> WorkflowResult {
    let summary = format!(
        "🧠 Gemini Analysis Complete\n\n\
         Document Type: {}\n\
         Content Category: {}\n\
         Product Line: {}\n\
         Industry: {}\n\
         Target Audience: {}\n\
         Business Impact: {}\n\
         Technical Complexity: {}\n\n\
         Content: {}\n\n\
         3-step AI workflow: Content Analysis → Folder Reading → Intelligent Recommendation",
        classification.document_type,
        classification.content_category,
        classification.product_line,
        classification.industry,
        classification.target_audience,
        classification.business_impact,
        classification.technical_complexity,
        classification.content_description,
    );

    let details = format!(
        "Confidence: {}%\nAnalysis: Gemini 2.5 Pro",
        classification.confidence_score
    );

    let destination = format!(
        "📁 {}\n💡 {}\n📝 Suggested: {}",
        folder.recommended_folder, folder.reasoning, suggested_filename
    );

    WorkflowResult {
        summary,
        details,
        destination,
        classification,
        folder,
        suggested_filename,
        is_duplicate: false,
        duplicate: None,
    }
}

fn duplicate_result(file: &FileDescriptor, duplicate: DuplicateMatch) -> WorkflowResult {
    let size_mb = duplicate.size_bytes as f64 / (1024.0 * 1024.0);
    let created = format_created_time(&duplicate.created_time);
    let web_link = if duplicate.web_link.is_empty() {
        "#"
    } else {
        duplicate.web_link.as_str()
    };

    let summary = format!(
        "⚠️ Duplicate File Detected\n\n\
         A file with the same name and similar size already exists in your Marketing Hub.\n\n\
         Status: Duplicate\n\
         Size: {size_mb:.1} MB\n\
         Created: {created}"
    );

    let details = format!(
        "Existing File: {}\n\
         File Size: {size_mb:.1} MB\n\
         Created: {created}\n\
         Size Difference: {} bytes",
        duplicate.name, duplicate.size_difference
    );

    let destination = format!(
        "📁 File Already Exists\n\
         💡 This file appears to be a duplicate of an existing file in your Marketing Hub\n\
         👁️ View Existing: {web_link}"
    );

    WorkflowResult {
        summary,
        details,
        destination,
        classification: ClassificationResult {
            content_category: "DUPLICATE".to_string(),
            product_line: "DUP".to_string(),
            industry: "Duplicate".to_string(),
            ..Default::default()
        },
        folder: FolderRecommendation {
            recommended_folder: "File Already Exists".to_string(),
            reasoning: "This file appears to be a duplicate of an existing file in your Marketing Hub"
                .to_string(),
            confidence: 100,
            alternative: None,
        },
        suggested_filename: file.name.clone(),
        is_duplicate: true,
        duplicate: Some(duplicate),
    }
}

/// RFC 3339 → "January 26, 2024 at 10:30 AM", or "Unknown" when unparseable.
fn format_created_time(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%B %d, %Y at %I:%M %p").to_string())
        .unwrap_or_else(|_| "Unknown".to_string())
}

// src/services/recommend.rs
// Step 3: folder recommendation from analysis plus the real hierarchy

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::classify::ClassificationResult;
use super::folders::FolderTree;
use crate::llm::{ModelProvider, parse};
use crate::types::FileDescriptor;

const DEFAULT_FOLDER: &str = "Marketing Hub → General → Uploads";

/// Where a file should land, and why.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderRecommendation {
    pub recommended_folder: String,
    pub reasoning: String,
    pub confidence: u8,
    pub alternative: Option<String>,
}

/// Picks a destination folder. Model-backed when possible, otherwise a
/// fixed decision table over the classification.
pub struct FolderRecommender {
    model: Arc<dyn ModelProvider>,
    timeout: Duration,
}

impl FolderRecommender {
    pub fn new(model: Arc<dyn ModelProvider>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Never fails; one model attempt under an explicit timeout.
    pub async fn recommend(
        &self,
        file: &FileDescriptor,
        classification: &ClassificationResult,
        tree: &FolderTree,
    ) -> FolderRecommendation {
        if !self.model.is_available() {
            info!("🔄 Model not configured, using fallback folder recommendation");
            return recommend_fallback(&file.name, classification);
        }

        let prompt =
            build_recommendation_prompt(file, classification, &tree.serialize_for_prompt());

        match tokio::time::timeout(self.timeout, self.model.generate(&prompt)).await {
            Ok(Ok(reply)) => parse_recommendation(&reply),
            Ok(Err(e)) => {
                warn!("⚠️ Folder recommendation failed: {}, using fallback", e);
                recommend_fallback(&file.name, classification)
            }
            Err(_) => {
                warn!(
                    "⚠️ Folder recommendation timed out after {}s, using fallback",
                    self.timeout.as_secs()
                );
                recommend_fallback(&file.name, classification)
            }
        }
    }
}

fn build_recommendation_prompt(
    file: &FileDescriptor,
    classification: &ClassificationResult,
    folder_structure: &str,
) -> String {
    format!(
        r#"Based on the file analysis and the actual Marketing Hub folder structure, recommend the BEST folder for this file:

FILE: {name}

CONTENT ANALYSIS:
- Document Type: {document_type}
- Content Category: {content_category}
- Product Line: {product_line}
- Industry: {industry}
- Target Audience: {target_audience}
- Business Impact: {business_impact}
- Content Description: {content_description}

ACTUAL MARKETING HUB FOLDER STRUCTURE:
{folder_structure}

Please analyze the content and recommend the MOST APPROPRIATE folder path from the actual structure above.

Consider:
- Content type and purpose
- Target audience and use case
- Product line relevance
- Industry specificity
- Business context

Respond with:
RECOMMENDED_FOLDER: [exact folder path from the structure above]
REASONING: [why this folder is the best match]
CONFIDENCE: [0-100% confidence in recommendation]
ALTERNATIVE: [second-best option if applicable]"#,
        name = file.name,
        document_type = classification.document_type,
        content_category = classification.content_category,
        product_line = classification.product_line,
        industry = classification.industry,
        target_audience = classification.target_audience,
        business_impact = classification.business_impact,
        content_description = classification.content_description,
        folder_structure = folder_structure,
    )
}

fn parse_recommendation(reply: &str) -> FolderRecommendation {
    let text = parse::strip_code_fences(reply);

    FolderRecommendation {
        recommended_folder: parse::extract_field(text, "RECOMMENDED_FOLDER")
            .unwrap_or_else(|| DEFAULT_FOLDER.to_string()),
        reasoning: parse::extract_field(text, "REASONING")
            .unwrap_or_else(|| "Default recommendation based on content analysis".to_string()),
        confidence: parse::extract_number(text, "CONFIDENCE").unwrap_or(85),
        alternative: parse::extract_field(text, "ALTERNATIVE"),
    }
}

/// Decision table over category, filename patterns and product line,
/// checked in that order.
fn recommend_fallback(filename: &str, classification: &ClassificationResult) -> FolderRecommendation {
    let name = filename.to_lowercase();
    let category = classification.content_category.as_str();
    let product_line = classification.product_line.as_str();

    let folder = if category == "BRAND" || name.contains("profile") {
        "Marketing Hub → 01_Brand Assets → Company Profiles"
    } else if category == "MARK" || name.contains("brochure") {
        "Marketing Hub → 03_Marketing Campaigns → Product Brochures"
    } else if category == "TECH" {
        "Marketing Hub → 05_Technical Documentation"
    } else if category == "SALES" {
        "Marketing Hub → 04_Sales Enablement → Presentations"
    } else if product_line == "SP" {
        "Marketing Hub → 02_Product Lines & Sub-Brands → Spectra"
    } else if product_line == "BS" {
        "Marketing Hub → 02_Product Lines & Sub-Brands → Bharat Series"
    } else if product_line == "DMO" {
        "Marketing Hub → 02_Product Lines & Sub-Brands → Software Platform"
    } else {
        DEFAULT_FOLDER
    };

    FolderRecommendation {
        recommended_folder: folder.to_string(),
        reasoning: "Fallback recommendation based on content patterns".to_string(),
        confidence: 70,
        alternative: None,
    }
}

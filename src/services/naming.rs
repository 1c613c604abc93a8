// src/services/naming.rs
// Naming convention rules: live Google Doc fetch with a cached copy, offline fallback

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::classify::ClassificationResult;
use crate::drive::DriveProvider;

/// Built-in ruleset used whenever the convention document cannot be read.
const FALLBACK_NAMING_RULES: &str = "\
Skylark Drones File Naming Convention:

Format: PREFIX-CATEGORY_description_YYYYMMDD_vNN.ext

PREFIXES:
- SP: Spectra Series (Mining & Infrastructure)
- BS: Bharat Series (Agriculture & General)
- DMO: Software Platform (Data Management & Operations)
- MA: Marketing Materials
- SE: Sales Enablement
- TD: Technical Documentation

CATEGORIES:
- MIN: Mining applications
- AGR: Agriculture applications
- SOL: Solar & Renewable Energy
- SEC: Security applications
- INF: Infrastructure applications
- TECH: Technical documentation
- PRES: Presentations
- BRAND: Brand materials
- MARK: Marketing materials

EXAMPLES:
- SP-MIN_coal_mining_analysis_20240126_v01.pdf
- BS-AGR_crop_monitoring_20240126_v02.pptx
- DMO-TECH_software_platform_guide_20240126_v01.pdf
- MA-BRAND_corporate_profile_20240126_v01.pdf";

static DESCRIPTION_CLEANUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid regex"));

/// Provides the naming convention rules text for classification prompts.
///
/// The convention lives in a Google Doc so the marketing team can edit it
/// without a deploy. A successful export is cached for the life of the
/// service; the fallback text is never cached, so a later call can still
/// pick up the live document.
pub struct NamingService {
    drive: Arc<dyn DriveProvider>,
    document_id: String,
    cached_rules: RwLock<Option<String>>,
}

impl NamingService {
    pub fn new(drive: Arc<dyn DriveProvider>, document_id: impl Into<String>) -> Self {
        Self {
            drive,
            document_id: document_id.into(),
            cached_rules: RwLock::new(None),
        }
    }

    /// Current ruleset text. Never fails; degraded paths log and fall back.
    pub async fn get_rules(&self) -> String {
        if let Some(rules) = self.cached_rules.read().await.clone() {
            return rules;
        }

        match self.drive.export_text(&self.document_id).await {
            Ok(text) if !text.trim().is_empty() => {
                info!("✅ Naming convention rules loaded from document");
                let mut cache = self.cached_rules.write().await;
                *cache = Some(text.clone());
                text
            }
            Ok(_) => {
                warn!("⚠️ Naming convention document is empty, using fallback rules");
                FALLBACK_NAMING_RULES.to_string()
            }
            Err(e) => {
                warn!("⚠️ Could not read naming convention document: {}, using fallback rules", e);
                FALLBACK_NAMING_RULES.to_string()
            }
        }
    }
}

/// Render the convention filename for an analyzed file.
///
/// Deterministic apart from the embedded current date. The version token is
/// always `v01`; collision handling belongs to the duplicate check, not the
/// formatter.
pub fn format_filename(original_name: &str, classification: &ClassificationResult) -> String {
    let extension = match original_name.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "pdf",
    };
    let base_name = match original_name.split_once('.') {
        Some((base, _)) => base,
        None => original_name,
    };

    let prefix = classification.product_line.to_uppercase();
    let category = match classification.content_category.to_uppercase().as_str() {
        "TECH" | "TECHNICAL" => "TECH",
        "SALES" | "PRES" => "PRES",
        "BRAND" => "BRAND",
        "MARK" | "MARKETING" => "MARK",
        _ => "GEN",
    };

    let description: String = DESCRIPTION_CLEANUP
        .replace_all(&base_name.to_lowercase(), "_")
        .chars()
        .take(20)
        .collect();

    let date = chrono::Local::now().format("%Y%m%d");

    format!("{prefix}-{category}_{description}_{date}_v01.{extension}")
}

/// Structured convention reference served to the web layer.
#[derive(Debug, Clone, Serialize)]
pub struct NamingGuide {
    pub format: &'static str,
    pub prefixes: Vec<(&'static str, &'static str)>,
    pub categories: Vec<(&'static str, &'static str)>,
    pub examples: Vec<&'static str>,
    pub guidelines: Vec<&'static str>,
}

pub fn naming_guide() -> NamingGuide {
    NamingGuide {
        format: "{PREFIX}-{CATEGORY}_{description}_{YYYYMMDD}_v{NN}.{ext}",
        prefixes: vec![
            ("SP", "Spectra Platform"),
            ("BS", "Bharat Series"),
            ("MA", "Marketing Assets"),
            ("SE", "Sales Enablement"),
            ("TD", "Technical Documentation"),
        ],
        categories: vec![
            ("MIN", "Mining Solutions"),
            ("AGR", "Agriculture"),
            ("SEC", "Security & Surveillance"),
            ("INF", "Infrastructure"),
            ("TECH", "Technical Documentation"),
            ("PRES", "Presentations"),
            ("BRAND", "Brand Assets"),
        ],
        examples: vec![
            "SP-MIN_performance_analysis_20250126_v01.pdf",
            "BS-100E_technical_specs_20250126_v01.pdf",
            "MA-BRAND_digital_assets_20250126_v01.zip",
            "SE-PRES_customer_deck_20250126_v01.pptx",
        ],
        guidelines: vec![
            "Use descriptive but concise descriptions",
            "Always include date in YYYYMMDD format",
            "Version numbers start at v01 and increment",
            "Use underscores to separate components",
            "Keep total filename under 100 characters",
        ],
    }
}

// src/services/classify.rs
// Step 1: model content analysis with filename-pattern fallback

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::llm::{ModelProvider, parse};
use crate::types::FileDescriptor;

/// Content analysis for one file. Every field is always populated;
/// missing model output falls back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub document_type: String,
    pub content_category: String,
    pub product_line: String,
    pub industry: String,
    pub target_audience: String,
    pub business_impact: String,
    pub technical_complexity: String,
    pub content_description: String,
    pub confidence_score: u8,
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self {
            document_type: "Business Document".to_string(),
            content_category: "GENERAL".to_string(),
            product_line: "MA".to_string(),
            industry: "General".to_string(),
            target_audience: "Business Team".to_string(),
            business_impact: "Medium".to_string(),
            technical_complexity: "Intermediate".to_string(),
            content_description: "Business document for organizational use".to_string(),
            confidence_score: 95,
        }
    }
}

/// Classifies files by name, type and size through the model, degrading to
/// filename-pattern heuristics when the model cannot answer.
pub struct ContentClassifier {
    model: Arc<dyn ModelProvider>,
    timeout: Duration,
}

impl ContentClassifier {
    pub fn new(model: Arc<dyn ModelProvider>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    /// Never fails; the worst case is the heuristic fallback. One model
    /// attempt under an explicit timeout, no retries.
    pub async fn classify(
        &self,
        file: &FileDescriptor,
        naming_rules: &str,
    ) -> ClassificationResult {
        if !self.model.is_available() {
            info!("🔄 Model not configured, using fallback content analysis");
            return classify_fallback(file);
        }

        let prompt = build_classification_prompt(file, naming_rules);

        match tokio::time::timeout(self.timeout, self.model.generate(&prompt)).await {
            Ok(Ok(reply)) => parse_classification(&reply),
            Ok(Err(e)) => {
                warn!("⚠️ Content analysis failed: {}, using fallback", e);
                classify_fallback(file)
            }
            Err(_) => {
                warn!(
                    "⚠️ Content analysis timed out after {}s, using fallback",
                    self.timeout.as_secs()
                );
                classify_fallback(file)
            }
        }
    }
}

fn build_classification_prompt(file: &FileDescriptor, naming_rules: &str) -> String {
    let rules = if naming_rules.trim().is_empty() {
        "Standard business naming conventions"
    } else {
        naming_rules
    };

    format!(
        r#"Analyze this file for intelligent organization in Skylark Drones Marketing Hub:

FILE DETAILS:
- Filename: {name}
- Type: {media_type}
- Size: {size} bytes

NAMING CONVENTION RULES:
{rules}

Please provide a comprehensive analysis including:

1. DOCUMENT TYPE: What type of document is this? (e.g., Product Brochure, Technical Manual, Corporate Profile, etc.)
2. CONTENT CATEGORY: Technical (TECH), Sales (SALES), Marketing (MARK), Brand (BRAND), etc.
3. PRODUCT LINE: Spectra (SP), Bharat (BS), DMO/Software Platform, or Marketing (MA)
4. INDUSTRY: Mining, Agriculture, Infrastructure, Solar/Renewable Energy, Security, General/Cross-Sector, etc.
5. TARGET AUDIENCE: Engineers, Sales Team, Marketing, Management, Customers, Partners
6. BUSINESS IMPACT: High/Medium/Low strategic value
7. TECHNICAL COMPLEXITY: Basic/Intermediate/Advanced
8. CONTENT DESCRIPTION: Brief description of what this document contains
9. CONFIDENCE SCORE: 0-100% confidence in analysis

Respond in this exact format:
DOCUMENT_TYPE: [type]
CONTENT_CATEGORY: [category]
PRODUCT_LINE: [product]
INDUSTRY: [industry]
TARGET_AUDIENCE: [audience]
BUSINESS_IMPACT: [impact]
TECHNICAL_COMPLEXITY: [complexity]
CONTENT_DESCRIPTION: [description]
CONFIDENCE_SCORE: [score]"#,
        name = file.name,
        media_type = file.media_type,
        size = file.size_bytes,
        rules = rules,
    )
}

/// Scrape the labeled reply; anything missing or empty gets the default.
fn parse_classification(reply: &str) -> ClassificationResult {
    let text = parse::strip_code_fences(reply);
    let defaults = ClassificationResult::default();
    let mut fields = parse::parse_labeled_fields(
        text,
        &[
            "DOCUMENT_TYPE",
            "CONTENT_CATEGORY",
            "PRODUCT_LINE",
            "INDUSTRY",
            "TARGET_AUDIENCE",
            "BUSINESS_IMPACT",
            "TECHNICAL_COMPLEXITY",
            "CONTENT_DESCRIPTION",
        ],
    );
    let mut take = |label: &str, default: String| fields.remove(label).unwrap_or(default);

    ClassificationResult {
        document_type: take("DOCUMENT_TYPE", defaults.document_type),
        content_category: take("CONTENT_CATEGORY", defaults.content_category),
        product_line: take("PRODUCT_LINE", defaults.product_line),
        industry: take("INDUSTRY", defaults.industry),
        target_audience: take("TARGET_AUDIENCE", defaults.target_audience),
        business_impact: take("BUSINESS_IMPACT", defaults.business_impact),
        technical_complexity: take("TECHNICAL_COMPLEXITY", defaults.technical_complexity),
        content_description: take("CONTENT_DESCRIPTION", defaults.content_description),
        confidence_score: parse::extract_number(text, "CONFIDENCE_SCORE")
            .unwrap_or(defaults.confidence_score),
    }
}

/// Filename-pattern heuristics, used whenever the model path is closed.
fn classify_fallback(file: &FileDescriptor) -> ClassificationResult {
    let name = file.name.to_lowercase();

    let (document_type, content_category) = if name.contains("profile") {
        ("Corporate Profile", "BRAND")
    } else if name.contains("brochure") {
        ("Product Brochure", "MARK")
    } else if name.contains("technical") || name.contains("manual") {
        ("Technical Document", "TECH")
    } else if name.contains("presentation") || file.media_type.contains("ppt") {
        ("Presentation", "SALES")
    } else {
        ("Business Document", "GENERAL")
    };

    let product_line = if name.contains("spectra") || name.contains("sp-") {
        "SP"
    } else if name.contains("bharat") || name.contains("bs-") {
        "BS"
    } else if name.contains("dmo") || name.contains("software") {
        "DMO"
    } else {
        "MA"
    };

    ClassificationResult {
        document_type: document_type.to_string(),
        content_category: content_category.to_string(),
        product_line: product_line.to_string(),
        content_description: format!("Fallback analysis for {}", file.name),
        confidence_score: 75,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::{ProviderError, ProviderResult};

    struct StubModel {
        available: bool,
        reply: Option<&'static str>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn replying(reply: &'static str) -> Self {
            Self {
                available: true,
                reply: Some(reply),
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn unavailable() -> Self {
            Self {
                available: false,
                reply: None,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                available: true,
                reply: None,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelProvider for StubModel {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn generate(&self, _prompt: &str) -> ProviderResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Err(ProviderError::Status { status: 500 }),
            }
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn pdf(name: &str) -> FileDescriptor {
        FileDescriptor::new(name, "application/pdf", 1_500_000)
    }

    const FULL_REPLY: &str = "\
DOCUMENT_TYPE: Product Brochure
CONTENT_CATEGORY: MARK
PRODUCT_LINE: SP
INDUSTRY: Mining
TARGET_AUDIENCE: Customers
BUSINESS_IMPACT: High
TECHNICAL_COMPLEXITY: Basic
CONTENT_DESCRIPTION: Spectra brochure for mining clients
CONFIDENCE_SCORE: 92";

    #[test]
    fn test_parse_full_reply() {
        let result = parse_classification(FULL_REPLY);
        assert_eq!(result.document_type, "Product Brochure");
        assert_eq!(result.content_category, "MARK");
        assert_eq!(result.product_line, "SP");
        assert_eq!(result.industry, "Mining");
        assert_eq!(result.confidence_score, 92);
    }

    #[test]
    fn test_parse_garbage_uses_defaults() {
        let result = parse_classification("I could not analyze this file, sorry.");
        assert_eq!(result.document_type, "Business Document");
        assert_eq!(result.content_category, "GENERAL");
        assert_eq!(result.product_line, "MA");
        assert_eq!(result.confidence_score, 95);
    }

    #[test]
    fn test_parse_never_leaves_empty_fields() {
        let partial = "DOCUMENT_TYPE: Manual\nCONFIDENCE_SCORE: 80";
        let result = parse_classification(partial);
        assert_eq!(result.document_type, "Manual");
        assert_eq!(result.confidence_score, 80);
        assert!(!result.industry.is_empty());
        assert!(!result.content_description.is_empty());
    }

    #[test]
    fn test_fallback_filename_patterns() {
        let profile = classify_fallback(&pdf("Company Profile 2024.pdf"));
        assert_eq!(profile.document_type, "Corporate Profile");
        assert_eq!(profile.content_category, "BRAND");
        assert_eq!(profile.confidence_score, 75);

        let brochure = classify_fallback(&pdf("Solar Energy Brochure.pdf"));
        assert_eq!(brochure.document_type, "Product Brochure");
        assert_eq!(brochure.content_category, "MARK");
        assert_eq!(
            brochure.content_description,
            "Fallback analysis for Solar Energy Brochure.pdf"
        );

        let manual = classify_fallback(&pdf("user manual v3.pdf"));
        assert_eq!(manual.content_category, "TECH");

        let deck = classify_fallback(&FileDescriptor::new("q3 deck.pptx", "pptx", 900_000));
        assert_eq!(deck.document_type, "Presentation");
        assert_eq!(deck.content_category, "SALES");
    }

    #[test]
    fn test_fallback_product_lines() {
        assert_eq!(classify_fallback(&pdf("SP-MIN_analysis.pdf")).product_line, "SP");
        assert_eq!(classify_fallback(&pdf("bharat overview.pdf")).product_line, "BS");
        assert_eq!(classify_fallback(&pdf("software platform.pdf")).product_line, "DMO");
        assert_eq!(classify_fallback(&pdf("misc notes.pdf")).product_line, "MA");
    }

    #[test]
    fn test_prompt_includes_file_details_and_rules() {
        let prompt = build_classification_prompt(&pdf("report.pdf"), "CUSTOM RULES");
        assert!(prompt.contains("- Filename: report.pdf"));
        assert!(prompt.contains("- Size: 1500000 bytes"));
        assert!(prompt.contains("CUSTOM RULES"));

        let bare = build_classification_prompt(&pdf("report.pdf"), "  ");
        assert!(bare.contains("Standard business naming conventions"));
    }

    #[tokio::test]
    async fn test_classify_parses_model_reply() {
        let model = Arc::new(StubModel::replying(FULL_REPLY));
        let classifier = ContentClassifier::new(model.clone(), Duration::from_secs(5));

        let result = classifier.classify(&pdf("anything.pdf"), "rules").await;
        assert_eq!(result.document_type, "Product Brochure");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_classify_unavailable_model_never_called() {
        let model = Arc::new(StubModel::unavailable());
        let classifier = ContentClassifier::new(model.clone(), Duration::from_secs(5));

        let result = classifier.classify(&pdf("Solar Energy Brochure.pdf"), "").await;
        assert_eq!(result.content_category, "MARK");
        assert_eq!(result.confidence_score, 75);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_classify_model_error_falls_back() {
        let model = Arc::new(StubModel::failing());
        let classifier = ContentClassifier::new(model, Duration::from_secs(5));

        let result = classifier.classify(&pdf("misc notes.pdf"), "").await;
        assert_eq!(result.confidence_score, 75);
        assert_eq!(result.content_category, "GENERAL");
    }

    #[tokio::test]
    async fn test_classify_timeout_falls_back() {
        let mut model = StubModel::replying(FULL_REPLY);
        model.delay = Some(Duration::from_millis(200));
        let classifier = ContentClassifier::new(Arc::new(model), Duration::from_millis(10));

        let result = classifier.classify(&pdf("misc notes.pdf"), "").await;
        assert_eq!(result.confidence_score, 75);
    }
}

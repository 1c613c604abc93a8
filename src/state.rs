// src/state.rs
// Shared application state: providers and stage services wired once at startup

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    config::UploaderConfig,
    drive::{AccessToken, DriveProvider, GoogleDriveClient},
    llm::{GeminiClient, ModelProvider},
    orchestrator::UploadOrchestrator,
    services::{
        ContentClassifier, DuplicateChecker, FolderRecommender, FolderService, NamingService,
    },
};

#[derive(Clone)]
pub struct UploaderState {
    pub config: Arc<UploaderConfig>,

    // -------- Providers --------
    pub model: Arc<dyn ModelProvider>,
    pub drive: Arc<dyn DriveProvider>,

    // -------- Services --------
    pub naming: Arc<NamingService>,
    pub classifier: Arc<ContentClassifier>,
    pub folders: Arc<FolderService>,
    pub recommender: Arc<FolderRecommender>,
    pub duplicates: Arc<DuplicateChecker>,
    pub orchestrator: Arc<UploadOrchestrator>,
}

impl UploaderState {
    /// Build live providers from config plus the user's OAuth token.
    pub fn new(config: UploaderConfig, token: AccessToken) -> Result<Self> {
        let model: Arc<dyn ModelProvider> = Arc::new(GeminiClient::new(&config)?);
        let drive: Arc<dyn DriveProvider> = Arc::new(GoogleDriveClient::new(&config, token)?);
        Ok(Self::with_providers(config, model, drive))
    }

    pub fn from_env(token: AccessToken) -> Result<Self> {
        Self::new(UploaderConfig::from_env(), token)
    }

    /// Wire the service graph over arbitrary providers. Tests use this to
    /// swap in stub backends.
    pub fn with_providers(
        config: UploaderConfig,
        model: Arc<dyn ModelProvider>,
        drive: Arc<dyn DriveProvider>,
    ) -> Self {
        let naming = Arc::new(NamingService::new(drive.clone(), config.naming_doc_id.clone()));
        let classifier = Arc::new(ContentClassifier::new(model.clone(), config.model_timeout()));
        let folders = Arc::new(FolderService::new(drive.clone(), config.max_tree_depth));
        let recommender = Arc::new(FolderRecommender::new(model.clone(), config.model_timeout()));
        let duplicates = Arc::new(DuplicateChecker::new(drive.clone()));

        let orchestrator = Arc::new(UploadOrchestrator::new(
            classifier.clone(),
            folders.clone(),
            recommender.clone(),
            naming.clone(),
            duplicates.clone(),
        ));

        if model.is_available() {
            info!("✅ Gemini model configured: {}", config.gemini_model);
        } else {
            warn!("⚠️ GEMINI_API_KEY not set, analysis will use pattern fallbacks");
        }
        info!("✅ Uploader state initialized");

        Self {
            config: Arc::new(config),
            model,
            drive,
            naming,
            classifier,
            folders,
            recommender,
            duplicates,
            orchestrator,
        }
    }

    pub fn orchestrator(&self) -> Arc<UploadOrchestrator> {
        self.orchestrator.clone()
    }

    /// Probe the configured Marketing Hub root with the user's credentials.
    ///
    /// Only a definitive HTTP rejection reports the folder as inaccessible;
    /// transport problems fail open and let the upload attempt surface them.
    pub async fn verify_hub_access(&self) -> bool {
        match self
            .drive
            .file_metadata(&self.config.marketing_hub_folder_id, "id,name")
            .await
        {
            Ok(folder) => {
                info!("✅ Marketing Hub accessible: {}", folder.name);
                true
            }
            Err(e) if e.is_definitive_rejection() => {
                warn!("⚠️ Marketing Hub access denied: {}", e);
                false
            }
            Err(e) => {
                warn!("⚠️ Marketing Hub probe inconclusive: {}", e);
                true
            }
        }
    }
}

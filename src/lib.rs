// src/lib.rs
// drivesort - AI-powered file organization core for the Marketing Hub uploader

pub mod config;
pub mod drive;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod types;

pub use config::UploaderConfig;
pub use drive::{AccessToken, DriveFile, DriveProvider, GoogleDriveClient};
pub use error::{ProviderError, ProviderResult};
pub use llm::{GeminiClient, ModelProvider};
pub use orchestrator::{ProgressCallback, ProgressUpdate, UploadOrchestrator, WorkflowResult};
pub use services::{
    format_filename, naming_guide, ClassificationResult, ContentClassifier, DuplicateChecker,
    DuplicateMatch, FolderNode, FolderRecommendation, FolderRecommender, FolderService,
    FolderTree, NamingGuide, NamingService, TreeSource,
};
pub use state::UploaderState;
pub use types::FileDescriptor;

// src/services/mod.rs
// Workflow stage services: classification, folders, recommendation, naming, duplicates

pub mod classify;
pub mod duplicates;
pub mod folders;
pub mod naming;
pub mod recommend;

// Export stage services
pub use classify::{ClassificationResult, ContentClassifier};
pub use duplicates::{DuplicateChecker, DuplicateMatch};
pub use folders::{FolderNode, FolderService, FolderTree, TreeSource};
pub use naming::{NamingGuide, NamingService, format_filename, naming_guide};
pub use recommend::{FolderRecommendation, FolderRecommender};

// src/config/mod.rs
// Environment-driven settings, constructed once by the caller and injected
// everywhere. No process-wide statics: the web layer owns the instance.

use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

#[derive(Debug, Clone, Deserialize)]
pub struct UploaderConfig {
    // ── Gemini Configuration
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub model_timeout_secs: u64,

    // ── Google Drive Configuration
    pub drive_timeout_secs: u64,
    pub marketing_hub_folder_id: String,
    pub naming_doc_id: String,

    // ── Workflow Configuration
    pub max_tree_depth: u32,

    // ── Logging Configuration
    pub log_level: String,
}

// Handles values with trailing comments and extra whitespace, which show up
// in hand-edited .env files.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl UploaderConfig {
    pub fn from_env() -> Self {
        // Load from .env file first if it exists
        let _ = dotenvy::dotenv();

        Self {
            gemini_api_key: env_var_or("GEMINI_API_KEY", String::new()),
            gemini_model: env_var_or("GEMINI_MODEL", "gemini-2.5-pro".to_string()),
            model_timeout_secs: env_var_or("UPLOADER_MODEL_TIMEOUT_SECS", 30),
            drive_timeout_secs: env_var_or("UPLOADER_DRIVE_TIMEOUT_SECS", 30),
            marketing_hub_folder_id: env_var_or(
                "MARKETING_HUB_FOLDER_ID",
                "1FM66Jay8G6gpXsP-pLGwW64-FmqJszLa".to_string(),
            ),
            naming_doc_id: env_var_or(
                "NAMING_CONVENTION_DOC_ID",
                "1IqpsMdfAjGx3H2l6SyRWcRH3red40c6AosMORn0oQes".to_string(),
            ),
            max_tree_depth: env_var_or("UPLOADER_MAX_TREE_DEPTH", 3),
            log_level: env_var_or("UPLOADER_LOG_LEVEL", "info".to_string()),
        }
    }

    // --- Convenience Methods for Common Operations ---

    /// Whether the Gemini API can be called at all
    pub fn gemini_available(&self) -> bool {
        !self.gemini_api_key.trim().is_empty()
    }

    /// Full generateContent URL for the configured model
    pub fn gemini_generate_url(&self) -> String {
        format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.gemini_model, self.gemini_api_key
        )
    }

    /// Timeout for model calls
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }

    /// Timeout for storage calls
    pub fn drive_timeout(&self) -> Duration {
        Duration::from_secs(self.drive_timeout_secs)
    }

    /// Install a global tracing subscriber at the configured level.
    /// Safe to call more than once; later calls are no-ops.
    pub fn init_tracing(&self) {
        let level = Level::from_str(&self.log_level).unwrap_or(Level::INFO);
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_config_defaults() {
        let config = UploaderConfig::from_env();

        assert_eq!(config.gemini_model, "gemini-2.5-pro");
        assert_eq!(config.max_tree_depth, 3);
        assert_eq!(config.model_timeout(), Duration::from_secs(30));
        assert!(!config.marketing_hub_folder_id.is_empty());
    }

    #[test]
    fn test_gemini_availability_tracks_key() {
        let mut config = UploaderConfig::from_env();

        config.gemini_api_key = String::new();
        assert!(!config.gemini_available());

        config.gemini_api_key = "   ".to_string();
        assert!(!config.gemini_available());

        config.gemini_api_key = "test-key".to_string();
        assert!(config.gemini_available());
        assert!(config.gemini_generate_url().contains("gemini-2.5-pro"));
        assert!(config.gemini_generate_url().ends_with("key=test-key"));
    }

    #[test]
    fn test_env_var_or_strips_comments() {
        // Save original env
        let original = env::var("UPLOADER_MAX_TREE_DEPTH").ok();

        unsafe { env::set_var("UPLOADER_MAX_TREE_DEPTH", "5 # deeper walk for staging") };
        assert_eq!(env_var_or("UPLOADER_MAX_TREE_DEPTH", 3u32), 5);

        unsafe { env::set_var("UPLOADER_MAX_TREE_DEPTH", "not-a-number") };
        assert_eq!(env_var_or("UPLOADER_MAX_TREE_DEPTH", 3u32), 3);

        // Restore original env
        unsafe {
            match original {
                Some(val) => env::set_var("UPLOADER_MAX_TREE_DEPTH", val),
                None => env::remove_var("UPLOADER_MAX_TREE_DEPTH"),
            }
        }
    }
}

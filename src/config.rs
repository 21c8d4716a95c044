//! Runtime configuration.
//!
//! [`BackendConfig`] holds the connection to the hosted backend and is read
//! from the environment at start. [`AppConfig`] adds the terminal UI options.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the backend project URL.
pub const URL_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the public (anon) API key.
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Optional password-reset redirect target.
pub const REDIRECT_URL_VAR: &str = "MALAJUNTA_REDIRECT_URL";

/// Fallback names accepted for the two variables above.
pub const URL_FALLBACK_VAR: &str = "VITE_SUPABASE_URL";
pub const ANON_KEY_FALLBACK_VAR: &str = "VITE_SUPABASE_ANON_KEY";

/// How long the profile screen waits on a loading identity before giving up.
pub const PROFILE_LOADING_FALLBACK: Duration = Duration::from_secs(5);

/// How long success toasts stay on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}: set it in the environment or in a .env file")]
    MissingVar(&'static str),

    #[error("invalid backend URL {0:?}: expected an http(s) URL")]
    InvalidUrl(String),
}

/// Connection settings for the hosted backend.
///
/// # Example
///
/// ```ignore
/// use malajunta::config::BackendConfig;
///
/// let config = BackendConfig::new("https://abc.supabase.co", "anon-key")?
///     .with_redirect_url("https://malajunta.gg/reset");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project URL without trailing slash
    pub url: String,
    /// Public API key sent as `apikey` on every request
    pub anon_key: String,
    /// Where password-reset e-mails send the user back to
    pub redirect_url: Option<String>,
}

impl BackendConfig {
    /// Create a config, normalizing the URL.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/').to_string();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url));
        }
        Ok(Self {
            url: trimmed,
            anon_key: anon_key.into(),
            redirect_url: None,
        })
    }

    /// Read the config from the process environment.
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |primary: &'static str, fallback: &str| {
            lookup(primary)
                .or_else(|| lookup(fallback))
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(primary))
        };

        let url = read(URL_VAR, URL_FALLBACK_VAR)?;
        let anon_key = read(ANON_KEY_VAR, ANON_KEY_FALLBACK_VAR)?;
        let config = Self::new(url, anon_key.trim())?;
        Ok(match lookup(REDIRECT_URL_VAR).filter(|v| !v.trim().is_empty()) {
            Some(redirect) => config.with_redirect_url(redirect.trim()),
            None => config,
        })
    }

    /// Set the password-reset redirect URL.
    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url)
    }

    pub fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.url)
    }
}

/// Configuration for the terminal application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    /// Where the session is persisted; `None` keeps it in memory only
    pub session_path: Option<PathBuf>,
    pub profile_loading_fallback: Duration,
    pub toast_duration: Duration,
    /// Directory image downloads are written to
    pub download_dir: PathBuf,
}

impl AppConfig {
    pub fn new(backend: BackendConfig) -> Self {
        Self {
            backend,
            session_path: crate::adapters::FileSessionStore::new().map(|s| s.path().to_path_buf()),
            profile_loading_fallback: PROFILE_LOADING_FALLBACK,
            toast_duration: TOAST_DURATION,
            download_dir: dirs::download_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn with_session_path(mut self, path: Option<PathBuf>) -> Self {
        self.session_path = path;
        self
    }

    pub fn with_profile_loading_fallback(mut self, fallback: Duration) -> Self {
        self.profile_loading_fallback = fallback;
        self
    }

    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_primary_names() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://abc.supabase.co");
        assert_eq!(config.anon_key, "anon");
        assert_eq!(config.rest_url(), "https://abc.supabase.co/rest/v1");
    }

    #[test]
    fn test_from_lookup_fallback_names() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("VITE_SUPABASE_URL", "https://abc.supabase.co"),
            ("VITE_SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(config.storage_url(), "https://abc.supabase.co/storage/v1");
    }

    #[test]
    fn test_missing_url_is_error() {
        let err = BackendConfig::from_lookup(lookup(&[("SUPABASE_ANON_KEY", "anon")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("SUPABASE_URL"));
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let err = BackendConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "  "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn test_invalid_url() {
        let err = BackendConfig::new("abc.supabase.co", "anon").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_app_config_builder() {
        let backend = BackendConfig::new("http://localhost:54321", "anon").unwrap();
        let config = AppConfig::new(backend)
            .with_session_path(None)
            .with_profile_loading_fallback(Duration::from_millis(10));
        assert!(config.session_path.is_none());
        assert_eq!(config.profile_loading_fallback, Duration::from_millis(10));
        assert_eq!(config.toast_duration, TOAST_DURATION);
    }

    #[test]
    fn test_redirect_url_is_optional() {
        let vars = [
            ("SUPABASE_URL", "https://abc.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ];
        let config = BackendConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.redirect_url, None);

        let config = BackendConfig::from_lookup(lookup(&[
            vars[0],
            vars[1],
            ("MALAJUNTA_REDIRECT_URL", " https://malajunta.app/reset "),
        ]))
        .unwrap();
        assert_eq!(config.redirect_url.as_deref(), Some("https://malajunta.app/reset"));
    }

    #[test]
    fn test_app_config_builders() {
        let backend = BackendConfig::new("https://abc.supabase.co", "anon").unwrap();
        let config = AppConfig::new(backend)
            .with_session_path(None)
            .with_toast_duration(Duration::from_millis(10))
            .with_download_dir("/tmp/descargas");
        assert!(config.session_path.is_none());
        assert_eq!(config.toast_duration, Duration::from_millis(10));
        assert_eq!(config.download_dir, PathBuf::from("/tmp/descargas"));
        assert_eq!(config.profile_loading_fallback, PROFILE_LOADING_FALLBACK);
    }
}


/// Hosted backend used when no override is baked in at build time
pub const DEFAULT_API_URL: &str = "https://api.gardendiary.app";

pub const DEFAULT_PAGE_SIZE: u32 = 50;

pub const DEFAULT_TOAST_DURATION_MS: u32 = 5000;

/// Frontend configuration, built once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the record backend, without trailing slash
    pub api_url: String,
    /// Number of containers requested per page
    pub page_size: u32,
    /// How long toasts stay up when the caller doesn't say
    pub default_toast_duration_ms: u32,
}

impl AppConfig {
    /// Defaults, with `GARDEN_DIARY_API_URL` taking over the API URL if it
    /// was set when the bundle was compiled
    pub fn from_build_env() -> Self {
        match option_env!("GARDEN_DIARY_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::default().with_api_url(url),
            _ => Self::default(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            default_toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}

use std::time::Duration;

/// Image shown when no poster can be resolved.
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://placehold.co/600x900?text=No+Image";

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/original";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for TMDB poster lookups.
#[derive(Debug, Clone)]
pub struct PosterConfig {
    /// TMDB read-access token, sent as a bearer credential.
    pub api_key: Option<String>,
    /// Base URL of the TMDB v3 API.
    pub api_base: String,
    /// Prefix joined with a movie's `poster_path`.
    pub image_base: String,
    /// `language` query parameter.
    pub language: String,
    /// URL returned whenever a lookup fails.
    pub placeholder_url: String,
    /// Upper bound on a single request, connect included.
    pub timeout: Duration,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl PosterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key. Blank keys count as absent.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_image_base(mut self, image_base: impl Into<String>) -> Self {
        self.image_base = image_base.into();
        self
    }

    pub fn with_placeholder(mut self, url: impl Into<String>) -> Self {
        self.placeholder_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the full image URL for a TMDB `poster_path`.
    #[must_use]
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base, poster_path)
    }
}

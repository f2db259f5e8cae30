use std::time::Duration;

/// Connection settings for the data API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the data API, e.g. `https://admin.example.com`. Relative
    /// attachment URLs are resolved against it as well.
    pub base_url: String,
    /// Static bearer token sent with every request.
    pub token: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            request_timeout: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                        | Default    |
    /// |--------------------------------|------------|
    /// | `CATALOG_API_BASE_URL`         | (required) |
    /// | `CATALOG_API_TOKEN`            | (required) |
    /// | `CATALOG_REQUEST_TIMEOUT_SECS` | unset      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("CATALOG_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("CATALOG_API_BASE_URL"))?;
        let token = lookup("CATALOG_API_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("CATALOG_API_TOKEN"))?;

        let request_timeout = match lookup("CATALOG_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "CATALOG_REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let mut config = Self::new(base_url, token);
        config.request_timeout = request_timeout;
        Ok(config)
    }
}

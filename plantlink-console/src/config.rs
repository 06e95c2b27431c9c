use std::path::Path;

use serde::Deserialize;

use plantlink_client::ApiClient;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
}

#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the REST backend, including the `/api` prefix
    pub base_url: String,
    /// Accept the self-signed certificate of a local development backend
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Config {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// `PLANTLINK_API_URL` overrides the configured base URL.
    pub fn with_env_overrides(self) -> Self {
        self.with_base_url_override(std::env::var("PLANTLINK_API_URL").ok())
    }

    fn with_base_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url
            && !url.trim().is_empty()
        {
            // An override can point anywhere; accepting invalid certificates
            // stays scoped to the backend the config file describes.
            self.backend.accept_invalid_certs = false;
            self.backend.base_url = url;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: ApiClient::DEFAULT_BASE_URL.to_string(),
                // the default backend is local HTTPS with a dev certificate
                accept_invalid_certs: true,
            },
        }
    }
}

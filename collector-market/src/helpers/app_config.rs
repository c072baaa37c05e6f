use config::{Config, File, FileFormat};
use serde::Deserialize;

/// Process-wide configuration, built once at startup and handed to the
/// gateway and API constructors.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_chain")]
    pub default_chain: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_retryable_statuses")]
    pub retryable_statuses: Vec<u16>,
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "https://api.opensea.io/api/v2".to_string()
}

fn default_chain() -> String {
    "base".to_string()
}

fn default_request_timeout_ms() -> u64 {
    12_000
}

fn default_retryable_statuses() -> Vec<u16> {
    vec![408, 429, 500, 502, 503, 504, 522, 524]
}

impl AppConfig {
    pub fn load_from_file(config_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let builder = Config::builder();
        let settings = builder
            .add_source(File::new(config_path, FileFormat::Yaml))
            .build()?;
        let config: AppConfig = settings.try_deserialize()?;

        Ok(config)
    }
}

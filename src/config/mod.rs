// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::cli::Args;
use crate::error::{LlmError, Result};
use config::{Config, Environment, File};
use std::env;
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. CLI arguments (highest)
    /// 2. Plain deployment variables (`PROJECT_ID`, `LOCATION`, `PORT`, ...)
    /// 3. Prefixed environment variables (`VERTEX_LLM__SECTION__KEY`)
    /// 4. Config file
    /// 5. Defaults (lowest)
    pub fn load(args: &Args) -> Result<Self> {
        let config_path = args
            .config
            .clone()
            .unwrap_or_else(Self::default_config_path);

        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: VERTEX_LLM__)
            .add_source(
                Environment::with_prefix("VERTEX_LLM")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("vertex.project_id", non_empty_env("PROJECT_ID"))?
            .set_override_option("vertex.location", non_empty_env("LOCATION"))?
            .set_override_option(
                "vertex.credentials_path",
                non_empty_env("GOOGLE_APPLICATION_CREDENTIALS"),
            )?
            .set_override_option("server.port", non_empty_env("PORT"))?
            .set_override_option("server.host", args.host.clone())?
            .set_override_option("server.port", args.port.map(i64::from))?
            .set_override_option("logging.format", args.log_format.clone())?
            .build()
            .map_err(|e| LlmError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| LlmError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vertex-llm")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

/// Reads a deployment variable; an empty value (e.g. `PROJECT_ID=` in `.env`) counts as unset.
fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in this crate that touches process environment variables.
    #[test]
    fn test_empty_deployment_variables_keep_defaults() {
        env::set_var("PROJECT_ID", "");
        env::set_var("LOCATION", "");
        env::set_var("PORT", "");

        let args = Args {
            config: Some("/nonexistent/vertex-llm.toml".to_string()),
            ..Args::default()
        };
        let config = AppConfig::load(&args).unwrap();

        assert_eq!(config.vertex.project_id, "welcome-study-project");
        assert_eq!(config.vertex.location, "us-central1");
        assert_eq!(config.vertex.endpoint(), "https://us-central1-aiplatform.googleapis.com");
        assert_eq!(config.server.port, 8080);

        env::set_var("PROJECT_ID", "other-project");
        env::set_var("LOCATION", "europe-west4");
        let config = AppConfig::load(&args).unwrap();
        assert_eq!(config.vertex.project_id, "other-project");
        assert_eq!(config.vertex.location, "europe-west4");

        env::remove_var("PROJECT_ID");
        env::remove_var("LOCATION");
        env::remove_var("PORT");
    }
}

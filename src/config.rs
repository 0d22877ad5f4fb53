use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub port: u16,
    #[serde(with = "humantime_serde")]
    pub connection_timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the notes API, e.g. `http://localhost:3000`.
    pub base_url: String,
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let api = ApiConfig {
        base_url: env::var("NOTES_API_BASE_URL")
            .map_err(|_| "NOTES_API_BASE_URL environment variable is required")?,
    };

    let port = env::var("PORT")
        .map_err(|_| "PORT environment variable is required")?
        .parse::<u16>()
        .map_err(|e| format!("Failed to parse PORT: {}", e))?;

    let connection_timeout = match env::var("CONNECTION_TIMEOUT_SECS") {
        Ok(raw) => Duration::from_secs(
            raw.parse::<u64>()
                .map_err(|e| format!("Failed to parse CONNECTION_TIMEOUT_SECS: {}", e))?,
        ),
        Err(_) => Duration::from_secs(30),
    };

    Ok(Config {
        api,
        port,
        connection_timeout,
    })
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path = env::var("NOTES_FRONTEND_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        let contents = fs::read_to_string(&config_path)?;
        return serde_yaml::from_str(&contents).map_err(Into::into);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        let contents = fs::read_to_string("config.yaml")?;
        return serde_yaml::from_str(&contents).map_err(Into::into);
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        let contents = fs::read_to_string("config.example.yaml")?;
        return serde_yaml::from_str(&contents).map_err(Into::into);
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(format!(
            "Config file not found and environment variables are incomplete. \
             Tried: '{}', 'config.yaml', 'config.example.yaml', and environment variables. \
             Error: {}",
            config_path, e
        )
        .into()),
    }
}

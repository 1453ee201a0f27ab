use std::fs;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

// Backend the app talks to when no override is configured.
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub theme: String,
}

pub fn get_app_data_dir() -> Result<PathBuf, String> {
    let data_dir = dirs::data_dir()
        .ok_or("Could not find data directory")?
        .join("Quad");

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir).map_err(|e| e.to_string())?;
    }

    Ok(data_dir)
}

fn get_config_path() -> Result<PathBuf, String> {
    Ok(get_app_data_dir()?.join("config.json"))
}

pub fn load_config() -> Result<Config, String> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read config: {}", e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse config: {}", e))
}

pub fn save_config(config: &Config) -> Result<(), String> {
    let config_path = get_config_path()?;
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(&config_path, content)
        .map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(())
}

/// The configured backend base URL, falling back to the compiled default.
pub fn get_base_url() -> Result<String, String> {
    let config = load_config()?;
    Ok(config
        .base_url
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
}

pub fn set_base_url(base_url: &str) -> Result<(), String> {
    url::Url::parse(base_url).map_err(|e| format!("Invalid base URL: {}", e))?;

    let mut config = load_config().unwrap_or_default();
    config.base_url = Some(base_url.trim_end_matches('/').to_string());
    save_config(&config)
}

pub fn get_theme() -> Result<String, String> {
    let config = load_config()?;
    Ok(config.theme)
}

pub fn set_theme(theme: &str) -> Result<(), String> {
    let mut config = load_config().unwrap_or_default();
    config.theme = theme.to_string();
    save_config(&config)
}

pub fn get_full_config() -> Result<Config, String> {
    load_config()
}

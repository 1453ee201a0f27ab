use crate::services::config_service;

#[tauri::command]
pub fn get_base_url() -> Result<String, String> {
    config_service::get_base_url()
}

#[tauri::command]
pub fn set_base_url(base_url: String) -> Result<(), String> {
    config_service::set_base_url(&base_url)
}

#[tauri::command]
pub fn get_theme() -> Result<String, String> {
    config_service::get_theme()
}

#[tauri::command]
pub fn set_theme(theme: String) -> Result<(), String> {
    config_service::set_theme(&theme)
}

#[tauri::command]
pub fn get_config() -> Result<config_service::Config, String> {
    config_service::get_full_config()
}

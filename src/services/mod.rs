pub mod api_client;
pub mod chat_service;
pub mod config_service;
pub mod session_service;

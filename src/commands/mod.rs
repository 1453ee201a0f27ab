mod auth;
mod chat;
mod config;
mod feed;
mod notifications;
mod posts;
mod profile;
mod search;

pub use auth::*;
pub use chat::*;
pub use config::*;
pub use feed::*;
pub use notifications::*;
pub use posts::*;
pub use profile::*;
pub use search::*;

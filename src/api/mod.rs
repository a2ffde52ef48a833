//! HTTP API layer

pub mod chat_handlers;
pub mod fs_handlers;
pub mod handlers;
pub mod project_handlers;
pub mod routes;
pub mod settings_handlers;

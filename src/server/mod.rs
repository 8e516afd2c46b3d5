//! HTTP transport for the chat service.

mod api;
mod error;
mod handlers;
mod app;

pub use api::*;
pub use error::ServerError;
pub use handlers::AppState;
pub use app::ChatServer;

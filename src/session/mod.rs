//! Session layer: persists dialogue state between requests and validates input.

mod error;
mod service;
mod store;

pub use error::*;
pub use service::*;
pub use store::*;

//! Knowledge layer for local answers.
//!
//! Provides read-only access to the structured data the assistant answers from:
//! - Career records (description, graduate profile, regimes and curricula)
//! - Frequently asked questions
//! - Institutional facts (mission, vision, location, contact)
//! - Training examples used as few-shot context for the generative fallback

mod error;
mod store;
mod types;

pub use error::*;
pub use store::*;
pub use types::*;

//! Generative fallback for questions the local rules cannot answer.

mod client;
mod prompts;

pub use client::*;
pub use prompts::{APOLOGY, SYSTEM_INSTRUCTION};

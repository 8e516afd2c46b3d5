//! IngeChat 360° - rule-based academic assistant with a generative fallback.

pub mod ai;
pub mod config;
pub mod dialogue;
pub mod display;
pub mod knowledge;
pub mod runtime;
pub mod server;
pub mod session;

//! Rule-based dialogue: transcript, slot state, matching pipeline and engine.
//!
//! The engine is a function of `(DialogueState, utterance)`; persistence of
//! the state between requests belongs to the session layer.

mod engine;
mod formatter;
mod matching;
pub mod replies;
mod rules;
mod state;
mod transcript;

pub use engine::DialogueEngine;
pub use formatter::format_curriculum;
pub use matching::{short_name, Utterance};
pub use rules::{first_match, Outcome, Rule, PIPELINE};
pub use state::*;
pub use transcript::*;

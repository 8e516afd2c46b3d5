//! Colored terminal output for the interactive chat.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::dialogue::BotReply;
use crate::knowledge::KnowledgeStore;

/// Command that restarts the conversation.
pub const RESTART_COMMAND: &str = "/reiniciar";
/// Command that leaves the chat.
pub const EXIT_COMMAND: &str = "/salir";

pub fn print_banner() {
    println!("{}", "IngeChat 360°".blue().bold());
    println!(
        "{}",
        format!("Escribe {RESTART_COMMAND} para reiniciar o {EXIT_COMMAND} para salir.").dimmed()
    );
}

pub fn print_prompt() {
    print!("{} ", "tú>".green().bold());
    let _ = io::stdout().flush();
}

/// Print a reply with its quick replies numbered from 1.
pub fn print_reply(reply: &BotReply) {
    println!("{} {}", "bot>".cyan().bold(), reply.response);
    for (i, option) in reply.quick_replies.iter().enumerate() {
        println!("  {} {}", format!("[{}]", i + 1).yellow(), option);
    }
    let _ = io::stdout().flush();
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}

/// Map a bare number to the matching quick reply; other input passes through.
#[must_use]
pub fn resolve_choice<'a>(input: &'a str, quick_replies: &'a [String]) -> &'a str {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| quick_replies.get(i))
        .map_or(input, String::as_str)
}

/// Print knowledge counts and load errors.
pub fn print_data_report(store: &KnowledgeStore) {
    println!("{}", "[DATA]".blue().bold());
    println!("  careers:     {}", store.list_career_keys().join(", "));
    println!("  faqs:        {}", store.faq_count());
    println!("  institution: {}", store.institution_keys().join(", "));
    println!("  training:    {}", store.training_examples().len());

    if store.load_errors().is_empty() {
        println!("  {}", "all sources loaded".green());
    }
    for error in store.load_errors() {
        println!("  {} {}", "[WARN]".yellow().bold(), error);
    }
}

//! IngeChat 360° - academic assistant for the UNEFA engineering programs.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ingechat::config::{AppConfig, ConfigLoader};
use ingechat::display;
use ingechat::knowledge::KnowledgeStore;
use ingechat::runtime::Runtime;
use ingechat::server::ChatServer;

/// Session id used by the terminal chat.
const TERMINAL_SESSION: &str = "terminal";

#[derive(Parser)]
#[command(
    name = "ingechat",
    about = "Rule-based academic assistant with a generative fallback",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the chat HTTP API.
    Serve {
        /// Override the configured port.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Chat interactively in the terminal.
    Chat,
    /// Load the knowledge files and report what was found.
    CheckData {
        /// Override the configured data directory.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<AppConfig, String> {
    let loader = path.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    loader.load().map_err(|e| e.to_string())
}

async fn serve(config: AppConfig) -> Result<(), String> {
    let runtime = Runtime::bootstrap(config).await.map_err(|e| e.to_string())?;
    let cancel = CancellationToken::new();
    let server = ChatServer::new(runtime.chat, runtime.config.server).with_cancel(cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C");
            cancel.cancel();
        }
    });

    server.run().await.map_err(|e| e.to_string())
}

async fn chat(config: AppConfig) -> Result<(), String> {
    let runtime = Runtime::bootstrap(config).await.map_err(|e| e.to_string())?;
    let chat = runtime.chat;

    display::print_banner();
    let mut last = chat
        .restart(TERMINAL_SESSION)
        .await
        .map_err(|e| e.to_string())?
        .reply;
    display::print_reply(&last);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        display::print_prompt();
        let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? else {
            break;
        };
        let input = line.trim();
        if input == display::EXIT_COMMAND {
            break;
        }

        let result = if input == display::RESTART_COMMAND {
            chat.restart(TERMINAL_SESSION).await
        } else {
            let message = display::resolve_choice(input, &last.quick_replies).to_string();
            chat.send_message(TERMINAL_SESSION, &message).await
        };

        match result {
            Ok(exchange) => {
                display::print_reply(&exchange.reply);
                last = exchange.reply;
            }
            Err(e) if e.is_validation() => display::print_error(&e.to_string()),
            Err(e) => return Err(e.to_string()),
        }
    }
    Ok(())
}

async fn check_data(config: AppConfig) -> bool {
    let store = KnowledgeStore::load_all(&config.data).await;
    display::print_data_report(&store);
    store.load_errors().is_empty()
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match load_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            display::print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Commands::Chat => chat(config).await,
        Commands::CheckData { data_dir } => {
            if let Some(dir) = data_dir {
                config.data.dir = dir;
            }
            if check_data(config).await {
                Ok(())
            } else {
                return ExitCode::FAILURE;
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

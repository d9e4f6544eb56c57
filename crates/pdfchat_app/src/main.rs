//! # pdfchat
//!
//! Upload a PDF to the chat backend and ask questions about it.
//!
//! ```bash
//! pdfchat upload report.pdf
//! pdfchat chat --question "What is the scope?"
//! pdfchat health
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use pdfchat_app::commands;
use pdfchat_app::platform::app::Session;
use pdfchat_app::platform::config::{
    load_file_config, resolve, AppConfig, ConfigOverrides, DEFAULT_CONFIG_FILE,
};
use pdfchat_app::platform::effects::EffectRunner;
use pdfchat_app::platform::logging::{self, LogDestination};
use pdfchat_app::platform::persistence::open_store;
use pdfchat_app::platform::render::TerminalRenderer;
use pdfchat_client::{EngineHandle, BASE_URL_ENV};
use pdfchat_core::{AppState, ChatQuery};
use pdfchat_logging::chat_info;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "pdfchat")]
#[command(about = "Chat with your PDF through the pdfchat backend", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides PDFCHAT_API_BASE_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,
    /// Config file (RON)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding the last-upload record and the log file
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,
    /// Also write logs to pdfchat.log in the state directory
    #[arg(long, global = true)]
    log_file: bool,
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Health,
    /// Upload a PDF and start chatting with it
    Upload {
        /// PDF file to index
        #[arg(value_name = "PATH")]
        path: PathBuf,
        /// Exit after the upload instead of opening the chat prompt
        #[arg(long)]
        no_chat: bool,
    },
    /// Ask questions about an uploaded PDF
    Chat {
        /// Document id returned by upload (defaults to the last upload)
        #[arg(long, value_name = "DOC_ID")]
        doc_id: Option<String>,
        /// Label shown for the document
        #[arg(long, value_name = "NAME")]
        filename: Option<String>,
        /// Ask one question and exit
        #[arg(long, short = 'q', value_name = "QUESTION")]
        question: Option<String>,
        /// How many chunks the backend retrieves (1-10)
        #[arg(long, short = 'k', value_name = "COUNT")]
        k: Option<u32>,
        /// Chat model name passed to the backend
        #[arg(long, value_name = "MODEL")]
        chat_model: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = load_config(&cli)?;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let destination = if cli.log_file {
        LogDestination::Both(config.state_dir.clone())
    } else {
        LogDestination::Terminal
    };
    logging::initialize(destination, level);
    chat_info!("Using backend {}", config.client.base_url);

    let store = open_store(&config.state_dir)?;
    let engine = EngineHandle::new(config.client.clone()).context("could not start client")?;
    let runner = EffectRunner::new(engine, Arc::new(store));
    let state = AppState::new().with_chat_defaults(config.top_k, config.chat_model.clone());

    let single_question = matches!(
        &cli.command,
        Commands::Chat {
            question: Some(_),
            ..
        }
    );
    let renderer = TerminalRenderer::new(single_question);
    let mut session = Session::new(state, runner, renderer, io::stdout());

    match cli.command {
        Commands::Health => commands::health(&mut session),
        Commands::Upload { path, no_chat } => {
            let uploaded = commands::upload(&mut session, &path)?;
            if uploaded && !no_chat {
                commands::chat_loop(&mut session, io::stdin().lock())?;
            }
            Ok(uploaded)
        }
        Commands::Chat {
            doc_id,
            filename,
            question,
            ..
        } => {
            session.open_chat(ChatQuery::new(doc_id, filename))?;
            match question {
                Some(question) => commands::ask_once(&mut session, &question),
                None => {
                    commands::chat_loop(&mut session, io::stdin().lock())?;
                    Ok(true)
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let (path, explicit) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let file = load_file_config(&path, explicit)?;

    let (top_k, chat_model) = match &cli.command {
        Commands::Chat { k, chat_model, .. } => (*k, chat_model.clone()),
        _ => (None, None),
    };
    let overrides = ConfigOverrides {
        base_url: cli.base_url.clone(),
        state_dir: cli.state_dir.clone(),
        top_k,
        chat_model,
    };
    resolve(file, std::env::var(BASE_URL_ENV).ok(), overrides)
}

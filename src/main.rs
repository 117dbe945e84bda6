//! convview - Entry Point

use chrono::Utc;
use clap::builder::PossibleValuesParser;
use clap::Parser;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use convview::adapter::ConversationAdapter;
use convview::backend::{ConversationService, SnapshotBackend};
use convview::grouping::resolve_windows;
use convview::model::{AppError, ConversationError};
use convview::render::highlighter::VALID_THEMES;
use convview::render::{MarkdownRenderer, SyntaxHighlighter};

/// convview - print render-ready conversations from a snapshot
#[derive(Parser, Debug)]
#[command(name = "convview")]
#[command(version)]
#[command(about = "Render conversation history from a JSON snapshot into display chunks")]
pub struct Args {
    /// Path to JSON snapshot (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Print only the conversation with this id
    #[arg(long, conflicts_with = "grouped")]
    pub id: Option<String>,

    /// Maximum number of conversations to list
    #[arg(long, default_value = "50")]
    pub limit: usize,

    /// Number of most recent conversations to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Group the listing into time windows
    #[arg(long)]
    pub grouped: bool,

    /// Disable syntax highlighting
    #[arg(long)]
    pub plain: bool,

    /// Color theme for syntax highlighting
    #[arg(long, value_parser = PossibleValuesParser::new(VALID_THEMES.iter().copied()))]
    pub theme: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = convview::config::load_config_with_precedence(args.config.clone())?;
        let merged = convview::config::merge_config(config_file);
        let with_env = convview::config::apply_env_overrides(merged);
        let highlight_override = if args.plain { Some(false) } else { None };
        convview::config::apply_cli_overrides(with_env, args.theme.clone(), highlight_override)
    };

    convview::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let input = convview::source::detect_input_source(args.file.clone())?;
    let text = input.read_to_string()?;
    let backend = SnapshotBackend::from_json(&text).map_err(ConversationError::from)?;

    let renderer = MarkdownRenderer::new(SyntaxHighlighter::new(&config.theme));
    let adapter = ConversationAdapter::new(renderer).with_highlighting(config.highlight);
    let service = ConversationService::new(backend, adapter);

    if let Some(id) = args.id.as_deref() {
        let conversation = service.find(Some(id))?;
        info!(id, found = conversation.is_some(), "Printing conversation");
        return emit(&conversation);
    }

    if args.grouped {
        let windows = resolve_windows(&config.windows, Utc::now());
        let groups = service.recent_grouped(args.limit, args.offset, &windows)?;
        info!(groups = groups.len(), "Printing grouped conversations");
        return emit(&groups);
    }

    let conversations = service.recent(args.limit, args.offset)?;
    info!(count = conversations.len(), "Printing conversations");
    emit(&conversations)
}

/// Pretty JSON to stdout, newline terminated.
fn emit<T: Serialize>(value: &T) -> Result<(), AppError> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out).map_err(serde_json::Error::io)?;
    Ok(())
}

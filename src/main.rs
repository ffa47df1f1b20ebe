mod app;
mod board;
mod config;
mod input;
mod ui;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use tracing_subscriber::EnvFilter;

use board::controller::{BoardController, LoadOutcome};
use board::filter::{BoardView, ColumnView};
use board::source::HttpSource;
use board::BoardState;
use config::{Config, ConfigError};

#[derive(Parser)]
#[command(name = "corkboard", about = "A keyboard-first kanban board over a remote work-item feed")]
struct Cli {
    /// Feed URL (overrides the config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Config file (default: <config dir>/corkboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the board once and print it
    List {
        /// Only show cards whose title contains this text
        #[arg(short, long)]
        query: Option<String>,
    },
}

fn main() {
    // Install color_eyre for unexpected panics/errors (developer bugs).
    let _ = color_eyre::install();
    let cli = Cli::parse();

    let result = Config::load(cli.config.as_deref())
        .wrap_err("failed to load config")
        .and_then(|config| {
            let endpoint = config.endpoint(cli.endpoint.as_deref());
            match cli.command {
                Some(Command::List { query }) => {
                    setup_logging(None);
                    cmd_list(&endpoint, query.as_deref().unwrap_or(""))
                }
                None => {
                    setup_logging(config.log_path().as_deref());
                    cmd_tui(&endpoint)
                }
            }
        });

    if let Err(e) = result {
        print_user_error(&e);
        std::process::exit(1);
    }
}

/// Install the tracing subscriber.
///
/// With a path, logs append to that file, or are discarded if it cannot be
/// opened. Without one they go to stderr.
fn setup_logging(log_path: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = log_path else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return;
    };

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init(),
        // The board owns the terminal, so there is nowhere else to write
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
}

/// Print a user-friendly error message, with actionable hints for known error types.
fn print_user_error(error: &color_eyre::Report) {
    if let Some(config_err) = error.downcast_ref::<ConfigError>() {
        match config_err {
            ConfigError::Io { path, source } => {
                eprintln!("error: cannot read config file {}.", path.display());
                eprintln!("  {source}");
            }
            ConfigError::Toml { path, source } => {
                eprintln!("error: config file {} is invalid.", path.display());
                eprintln!("  {source}");
                eprintln!("  Known keys: endpoint, log_file");
            }
        }
        return;
    }

    eprintln!("error: {error:#}");
}

fn runtime() -> color_eyre::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")
}

fn cmd_tui(endpoint: &str) -> color_eyre::Result<()> {
    let rt = runtime()?;
    let source = HttpSource::new(endpoint);
    let mut terminal = ratatui::init();
    let result = rt.block_on(app::run(&mut terminal, &source));
    ratatui::restore();
    result
}

fn cmd_list(endpoint: &str, query: &str) -> color_eyre::Result<()> {
    let rt = runtime()?;
    let source = HttpSource::new(endpoint);
    let mut controller = BoardController::new();

    if let LoadOutcome::Failed { message } = rt.block_on(controller.load(&source)) {
        bail!("could not load board from {}: {message}", source.endpoint());
    }

    controller.set_query(query);
    let view = controller.view();
    for line in list_lines(&view) {
        println!("{line}");
    }
    println!("\n{}", summary_line(&view, controller.state(), query));
    Ok(())
}

/// Closing line of `list`: how much of the board the query let through.
fn summary_line(view: &BoardView<'_>, state: &BoardState, query: &str) -> String {
    if state.is_empty() {
        "The board is empty.".to_string()
    } else if query.is_empty() {
        format!("{} cards", state.len())
    } else if view.is_empty() {
        format!("No cards match {query:?}")
    } else {
        format!("{} of {} cards match {query:?}", view.len(), state.len())
    }
}

/// Plain-text rendering of a board view, one block per column.
fn list_lines(view: &BoardView<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for col in view.columns() {
        lines.push(String::new());
        lines.push(column_heading(col));
        lines.push("─".repeat(40));
        for item in &col.items {
            let kind = item.kind.map(|k| format!(" [{k}]")).unwrap_or_default();
            let devs = if item.developers.is_empty() {
                String::new()
            } else {
                format!("  {}", item.developers.join(", "))
            };
            lines.push(format!("  {}{kind}{devs}", item.id));
        }
    }
    lines
}

fn column_heading(col: &ColumnView<'_>) -> String {
    format!("{} ({}/{})", col.name, col.count(), col.total)
}

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetcards_core::session::{Command, HELP, Outcome};
use sheetcards_core::{CardRenderer, FilterToggles, Frame, Notice, Session, SheetCardsConfig};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

mod formatter;

#[derive(Parser)]
#[command(name = "sheetcards")]
#[command(about = "Browse an order sheet as one card per row, with follow-up messages", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the order sheet (CSV, TSV, XLSX, ODS)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// First row to display (1 is the first row below the header)
    #[arg(short, long, value_name = "ROW")]
    start: Option<usize>,

    /// Last row to display
    #[arg(short, long, value_name = "ROW")]
    end: Option<usize>,

    /// Hide rows where any cell reads "done"
    #[arg(long)]
    hide_done: bool,

    /// Show rows where a cell reads "done", even if the config hides them
    #[arg(long, conflicts_with = "hide_done")]
    show_done: bool,

    /// Only show rows whose "Contact by" cell is blank
    #[arg(long)]
    only_blank_contact: bool,

    /// Show rows whatever their "Contact by" cell holds, even if the config restricts them
    #[arg(long, conflicts_with = "only_blank_contact")]
    any_contact: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Keep a session open and read commands from stdin
    #[arg(short, long, conflicts_with = "output")]
    interactive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// Standalone HTML page
    Html,
    /// JSON output
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    config.validate().context("Invalid configuration")?;

    let toggles = resolve_toggles(&cli, config.filter);
    let renderer = CardRenderer::with_config(config);

    if cli.interactive {
        let session = Session::open(renderer, &cli.file, cli.start, cli.end, toggles);
        return run_session(session, &cli.file, cli.format);
    }

    let frame = renderer.frame_file(&cli.file, cli.start, cli.end, toggles);
    if cli.output.is_some() {
        colored::control::set_override(false);
    }
    let rendered = match cli.format {
        OutputFormat::Human => formatter::human(&frame),
        OutputFormat::Html => formatter::html(&cli.file, &frame),
        OutputFormat::Json => formatter::json(&cli.file, &frame)?,
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(path = %path.display(), cards = frame.cards.len(), "wrote output");
        }
        None => print!("{}", rendered),
    }

    // Exit with appropriate code
    std::process::exit(if frame.has_errors() { 1 } else { 0 });
}

/// Command-line switches override the configured filters; unset switches keep them
fn resolve_toggles(cli: &Cli, configured: FilterToggles) -> FilterToggles {
    let mut toggles = configured;
    if cli.hide_done {
        toggles.show_done_payments = false;
    }
    if cli.show_done {
        toggles.show_done_payments = true;
    }
    if cli.only_blank_contact {
        toggles.show_only_blank_contact = true;
    }
    if cli.any_contact {
        toggles.show_only_blank_contact = false;
    }
    toggles
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SheetCardsConfig> {
    if let Some(config_path) = path {
        return SheetCardsConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    // Try to load default config from current directory if it exists
    let default_config_path = PathBuf::from("sheetcards.toml");
    if default_config_path.exists() {
        SheetCardsConfig::from_file(&default_config_path).with_context(|| {
            format!(
                "Failed to load config from {}",
                default_config_path.display()
            )
        })
    } else {
        Ok(SheetCardsConfig::default())
    }
}

/// Read commands until `quit` or end of input, re-rendering after each one
fn run_session(mut session: Session, file: &Path, format: OutputFormat) -> Result<()> {
    let present = |frame: &Frame| -> Result<String> {
        Ok(match format {
            OutputFormat::Json => formatter::json(file, frame)?,
            // HTML pages make no sense in a terminal loop
            OutputFormat::Human | OutputFormat::Html => formatter::human(frame),
        })
    };

    print!("{}", present(&session.frame())?);
    println!("{}", HELP);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("sheetcards> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", formatter::notice_line(&Notice::error(message)));
                continue;
            }
        };

        match session.execute(command) {
            Outcome::Frame(frame) => print!("{}", present(&frame)?),
            Outcome::Notices(notices) => {
                for notice in &notices {
                    println!("{}", formatter::notice_line(notice));
                }
            }
            Outcome::Help => println!("{}", HELP),
            Outcome::Quit => break,
        }
    }

    Ok(())
}

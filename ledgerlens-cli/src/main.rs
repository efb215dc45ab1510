use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ledgerlens_ingest::{ExportNaming, StatementFile};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod auth;
mod config;
mod extract;
mod render;
mod session;

use extract::GeminiClient;
use session::{Session, SessionState};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGERLENS_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlens",
    version = VERSION,
    about = "Extract transactions from bank statement images and PDFs"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a statement (image or PDF) for extraction and show the transactions
    Scan {
        /// Statement file
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        /// Print the raw CSV instead of the summary and table
        #[arg(long)]
        raw: bool,
    },

    /// Summarize a CSV that was already extracted (no network)
    Parse {
        /// CSV with Date,Description,Amount,Category[,Notes] headers
        csv: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage ~/.ledgerlens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Store the Gemini API key
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Save the extracted CSV as transactions-<name>.csv
    #[arg(long)]
    export: bool,

    /// Directory for the exported CSV (default: current directory)
    #[arg(long, requires = "export")]
    out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Paste a Gemini API key into ~/.ledgerlens/auth.json
    PasteApiKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Scan { file, output, raw } => scan(&file, &output, raw).await?,
        Command::Parse { csv, output } => parse_csv(&csv, &output)?,
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
        Command::Auth { command } => match command {
            AuthCommand::PasteApiKey => auth::paste_api_key()?,
        },
    }

    Ok(())
}

async fn scan(file: &Path, output: &OutputArgs, raw: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let statement = StatementFile::load(file).with_context(|| format!("loading {}", file.display()))?;

    let api_key = auth::resolve_api_key()?;
    let client = GeminiClient::new(&cfg.extraction, api_key)?;

    eprintln!("Extracting transactions from {} ...", statement.name);
    let session = Session::new();
    session.run(&client, &statement).await?;

    print_session(&session, raw);
    maybe_export(&session, output, &cfg.export)
}

fn parse_csv(csv: &Path, output: &OutputArgs) -> Result<()> {
    let cfg = config::load_config()?;
    let text = std::fs::read_to_string(csv).with_context(|| format!("read {}", csv.display()))?;
    let name = csv
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let session = Session::new();
    session
        .load_csv(&name, &text)
        .with_context(|| format!("parsing {}", csv.display()))?;

    print_session(&session, false);
    maybe_export(&session, output, &cfg.export)
}

fn print_session(session: &Session, raw: bool) {
    match session.state() {
        SessionState::Ready(x) if raw => println!("{}", x.raw_csv),
        SessionState::Ready(x) => {
            let summary = session.summary().unwrap_or_default();
            print!("{}", render::render_report(&x.source_name, &x.transactions, &summary));
        }
        SessionState::Failed(msg) => eprintln!("Error: {msg}"),
        SessionState::Idle | SessionState::Loading => {}
    }
}

fn maybe_export(session: &Session, output: &OutputArgs, naming: &ExportNaming) -> Result<()> {
    if !output.export {
        return Ok(());
    }
    let dir = output.out.clone().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    match session.export(&dir, naming)? {
        Some(path) => println!("\nSaved {}", path.display()),
        None => println!("\nNothing to export."),
    }
    Ok(())
}

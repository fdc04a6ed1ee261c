mod display;
mod session;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use laporan_ai::{GeminiClient, Polisher};
use laporan_core::CaseReport;
use laporan_store::{DraftStore, FileStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Parser)]
#[command(
    name = "laporan",
    version,
    about = "Laporan Awal Kes PPD: draft, polish and print school case reports"
)]
struct Cli {
    /// Directory holding the saved draft.
    #[arg(long, global = true, default_value = ".laporan")]
    data_dir: PathBuf,

    /// API key for the text-generation service used by `polish`.
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive editor (default).
    Edit,
    /// List every field of the saved draft.
    Show,
    /// Render the printable report of the saved draft.
    Print {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete the saved draft.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(data_dir = %cli.data_dir.display(), "laporan v{}", env!("CARGO_PKG_VERSION"));
    let drafts = DraftStore::new(FileStore::open(&cli.data_dir));

    match cli.command.unwrap_or(Command::Edit) {
        Command::Edit => {
            let polisher = match cli.api_key.as_deref().map(GeminiClient::new) {
                Some(Ok(client)) => Some(Polisher::new(client)),
                Some(Err(e)) => {
                    warn!(error = %e, "polishing disabled");
                    None
                }
                None => None,
            };
            let mut session = Session::open(drafts, polisher);
            let stdin = std::io::stdin();
            session
                .run(&mut stdin.lock(), &mut std::io::stdout())
                .await?;
        }
        Command::Show => {
            let report = drafts.load().unwrap_or_default();
            print!("{}", display::render_field_list(&report));
        }
        Command::Print { output } => {
            let report = drafts.load().unwrap_or_default();
            warn_blank_fields(&report);
            let page = display::render_print_view(&report, chrono::Local::now().naive_local());
            match output {
                Some(path) => {
                    std::fs::write(&path, page)
                        .with_context(|| format!("writing {}", path.display()))?;
                    eprintln!("Laporan ditulis ke {}", path.display());
                }
                None => print!("{page}"),
            }
        }
        Command::Clear { yes } => {
            let confirmed = yes || {
                print!("{}", session::CONFIRM_CLEAR);
                std::io::stdout().flush()?;
                session::confirmed(&mut std::io::stdin().lock())?
            };
            if confirmed {
                drafts.clear();
                println!("Semua data dipadam.");
            } else {
                println!("Dibatalkan.");
            }
        }
    }

    Ok(())
}

fn warn_blank_fields(report: &CaseReport) {
    let blanks = report.blank_fields();
    if blanks.is_empty() {
        return;
    }
    let names: Vec<String> = blanks.iter().map(|f| f.path()).collect();
    warn!(count = blanks.len(), fields = %names.join(", "), "printing with blank fields");
}

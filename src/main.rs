//! gridcalc - a spreadsheet grid on the command line

mod config;
mod render;
mod repl;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::debug;

use gridcalc_core::storage::encode_state;
use gridcalc_core::{
    DirStorage, Document, MemoryStorage, RecalcMode, Settings, SlotStorage, UnresolvedRefs,
};
use gridcalc_engine::builtins::BUILTINS;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(version, about = "Spreadsheet grid with formulas, saved between runs")]
struct Cli {
    /// Settings file (default: config.toml in the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding saved grids (default: platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep the grid in memory only; nothing is loaded or saved
    #[arg(long, global = true, conflicts_with = "data_dir")]
    ephemeral: bool,

    /// Grid rows
    #[arg(long, global = true)]
    rows: Option<usize>,

    /// Grid columns (at most 26)
    #[arg(long, global = true)]
    cols: Option<usize>,

    /// Storage slot to load and save
    #[arg(long, global = true)]
    slot: Option<String>,

    /// Recalculation strategy
    #[arg(long, global = true, value_enum)]
    recalc: Option<RecalcArg>,

    /// Show REF_ERROR for references to cells outside the grid instead of reading 0
    #[arg(long, global = true)]
    strict_refs: bool,

    /// More logging (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RecalcArg {
    Linear,
    Dependency,
}

impl From<RecalcArg> for RecalcMode {
    fn from(arg: RecalcArg) -> Self {
        match arg {
            RecalcArg::Linear => RecalcMode::Linear,
            RecalcArg::Dependency => RecalcMode::Dependency,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Set a cell and print its display value
    Set {
        /// Cell label, e.g. B3
        label: String,

        /// Cell text; words are joined with spaces. Start with `=` for a formula
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Print a cell's display value
    Get {
        /// Cell label, e.g. B3
        label: String,

        /// Print the entered text instead
        #[arg(long)]
        raw: bool,
    },

    /// Print the grid as a table
    Show,

    /// Print the saved JSON of the grid
    Dump,

    /// Edit interactively, one `<LABEL> <TEXT>` per line
    Repl,

    /// List built-in formula functions
    Functions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Functions = cli.command {
        print_functions();
        return Ok(());
    }

    let mut settings = config::load_settings(cli.config.as_deref())?;
    apply_overrides(&cli, &mut settings);
    let mut doc = open_document(&cli, settings)?;

    match cli.command {
        Commands::Set { label, text } => {
            let id = doc.resolve_label(&label)?;
            let state = doc
                .commit_edit(id, &text.join(" "))
                .with_context(|| format!("Failed to set {label}"))?;
            println!("{}", state.display(&id));
        }
        Commands::Get { label, raw } => {
            let cell = doc.cell(&doc.resolve_label(&label)?);
            println!("{}", if raw { cell.raw } else { cell.display });
        }
        Commands::Show => print!("{}", render::render_table(&doc.snapshot(), doc.dims())),
        Commands::Dump => println!("{}", encode_state(&doc.snapshot())?),
        Commands::Repl => repl::run(&mut doc, io::stdin().lock(), io::stdout().lock())?,
        Commands::Functions => print_functions(),
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if let Some(rows) = cli.rows {
        settings.rows = rows;
    }
    if let Some(cols) = cli.cols {
        settings.cols = cols;
    }
    if let Some(slot) = &cli.slot {
        settings.slot = slot.clone();
    }
    if let Some(recalc) = cli.recalc {
        settings.recalc = recalc.into();
    }
    if cli.strict_refs {
        settings.unresolved_refs = UnresolvedRefs::Error;
    }
}

fn open_document(cli: &Cli, settings: Settings) -> Result<Document> {
    let storage: Box<dyn SlotStorage + Send> = if cli.ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        let dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => config::default_data_dir()
                .context("Could not determine a data directory; pass --data-dir")?,
        };
        debug!("Using data directory {}", dir.display());
        Box::new(DirStorage::new(dir))
    };
    Document::open(settings, storage).context("Failed to open grid")
}

fn print_functions() {
    let width = BUILTINS
        .iter()
        .map(|builtin| builtin.signature.len())
        .max()
        .unwrap_or(0);
    for builtin in BUILTINS {
        println!("{:<width$}  {}", builtin.signature, builtin.description);
    }
}

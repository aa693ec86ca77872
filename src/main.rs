use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tablestruct::core::config::{HeuristicConfig, ShapeLimits};
use tablestruct::core::model::SourceKind;
use tablestruct::export::error_object;
use tablestruct::parser::PageSelection;
use tablestruct::pipeline::{build_tables, export_tables, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "tablestruct")]
#[command(version, about = "Extract, normalize and score tables from PDF and DOCX documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract tables from a PDF file
    Pdf {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        pages: PageArgs,
    },

    /// Extract tables from a DOCX file
    Docx {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Extract tables, picking the parser from the file extension
    Extract {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        pages: PageArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input document path
    #[arg(short, long)]
    input: PathBuf,

    /// Minimum non-empty rows for a table to be kept
    #[arg(long, default_value_t = 2)]
    min_rows: usize,

    /// Minimum cells in the first kept row
    #[arg(long, default_value_t = 2)]
    min_cols: usize,

    /// JSON file overriding header, confidence and section heuristics
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the table array to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Comma-separated 1-indexed page numbers (default: all pages)
    #[arg(long)]
    pages: Option<String>,

    /// Accepted for compatibility; OCR is not performed
    #[arg(long)]
    ocr: bool,
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Pdf { common, .. }
            | Commands::Docx { common }
            | Commands::Extract { common, .. } => common.verbose,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            eprintln!("{}", error_object(err.to_string().trim()));
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.command.verbose());

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_object(&err.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<()> {
    let (format, common, pages) = match command {
        Commands::Pdf { common, pages } => (Some(SourceKind::Pdf), common, Some(pages)),
        Commands::Docx { common } => (Some(SourceKind::Docx), common, None),
        Commands::Extract { common, pages } => (None, common, Some(pages)),
    };

    // Arguments are validated before the document is touched.
    let (selection, ocr) = match &pages {
        Some(args) => (
            PageSelection::parse(args.pages.as_deref().unwrap_or_default())?,
            args.ocr,
        ),
        None => (PageSelection::All, false),
    };
    let heuristics = match &common.config {
        Some(path) => HeuristicConfig::load(path)?,
        None => HeuristicConfig::default(),
    };

    let mut config = PipelineConfig::new(common.input)
        .with_limits(ShapeLimits {
            min_rows: common.min_rows,
            min_cols: common.min_cols,
        })
        .with_heuristics(heuristics)
        .with_pages(selection)
        .with_ocr(ocr);
    if let Some(format) = format {
        config = config.with_format(format);
    }

    let tables = build_tables(&config)?;
    export_tables(&tables, common.output.as_deref())
}

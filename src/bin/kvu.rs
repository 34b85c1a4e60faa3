//! kvu CLI - Key-value-unit extraction from datasheet tables and text

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use kvu::features::loader::{
    load_config, load_knowledge, load_table_documents, load_text_documents, load_tuples,
    write_tuples, write_value, Format,
};
#[cfg(feature = "cli")]
use kvu::{
    merge, normalize_knowledge, run_pipeline, KvuConfig, KvuResult, TableDocument,
};
#[cfg(feature = "cli")]
use kvu::features::normalize::{normalize_document, NormalizeOptions};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is not set
#[cfg(feature = "cli")]
const DEFAULT_LOG_FILTER: &str = "kvu=info";

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "kvu")]
#[command(version)]
#[command(about = "kvu - Key-value-unit extraction from datasheet tables and text", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Quiet mode: only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Extract key-value-unit tuples from tables and text pages
    Extract {
        /// Domain knowledge file (JSON, YAML or TOML)
        #[arg(short, long)]
        knowledge: PathBuf,

        /// Table documents file (JSON or YAML)
        #[arg(short, long)]
        tables: Option<PathBuf>,

        /// Text documents file (JSON or YAML)
        #[arg(long)]
        text: Option<PathBuf>,

        /// Run configuration file (JSON, YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (taken from the output extension by default)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Also search columns and pivot headers
        #[arg(long)]
        pivot: bool,

        /// Accept any unit found next to a value
        #[arg(long)]
        no_unit_check: bool,

        /// Search main keys only
        #[arg(long)]
        no_synonyms: bool,

        /// Levenshtein threshold for synonym matching
        #[arg(short, long)]
        edit_distance: Option<usize>,

        /// Keep values in their extracted unit
        #[arg(long)]
        no_convert: bool,
    },

    /// Normalize tables and split compound rows
    Split {
        /// Table documents file (JSON or YAML)
        input: PathBuf,

        /// Domain knowledge file providing the keywords
        #[arg(short, long)]
        knowledge: PathBuf,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge table and text results, dropping duplicates
    Merge {
        /// Tuples extracted from tables
        table_results: PathBuf,

        /// Tuples extracted from text
        text_results: PathBuf,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (taken from the output extension by default)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
    Csv,
}

#[cfg(feature = "cli")]
impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Csv => Format::Csv,
        }
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "kvu=warn" } else { DEFAULT_LOG_FILTER };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(err) = run(cli.command) {
        eprintln!("✗ {}", err);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(command: Commands) -> KvuResult<()> {
    match command {
        Commands::Extract {
            knowledge,
            tables,
            text,
            config,
            output,
            format,
            pivot,
            no_unit_check,
            no_synonyms,
            edit_distance,
            no_convert,
        } => {
            let knowledge = load_knowledge(&knowledge)?;
            let mut config = match config {
                Some(path) => load_config(&path)?,
                None => KvuConfig::default(),
            };
            // command line flags override the configuration file
            config.options.do_pivot_search |= pivot;
            config.options.unit_check &= !no_unit_check;
            config.options.use_synonyms &= !no_synonyms;
            if let Some(distance) = edit_distance {
                config.options.edit_distance = distance;
            }
            config.convert_units &= !no_convert;

            let tables = match tables {
                Some(path) => load_table_documents(&path)?,
                None => Vec::new(),
            };
            let texts = match text {
                Some(path) => load_text_documents(&path)?,
                None => Vec::new(),
            };

            let tuples = run_pipeline(&tables, &texts, &knowledge, &config)?;
            let format = output_format(format, output.as_deref())?;
            emit(output.as_deref(), |writer| write_tuples(&tuples, format, writer))
        }

        Commands::Split {
            input,
            knowledge,
            output,
        } => {
            let knowledge = normalize_knowledge(&load_knowledge(&knowledge)?);
            let options = NormalizeOptions::default();
            let documents: Vec<TableDocument> = load_table_documents(&input)?
                .iter()
                .map(|doc| normalize_document(doc, &knowledge, &options))
                .collect();
            let format = output_format(None, output.as_deref())?;
            emit(output.as_deref(), |writer| write_value(&documents, format, writer))
        }

        Commands::Merge {
            table_results,
            text_results,
            output,
            format,
        } => {
            let merged = merge(load_tuples(&table_results)?, load_tuples(&text_results)?);
            let format = output_format(format, output.as_deref())?;
            emit(output.as_deref(), |writer| write_tuples(&merged, format, writer))
        }

        Commands::Info => {
            println!("kvu v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Inputs:   domain knowledge (json, yaml, toml)");
            println!("          table and text documents (json, yaml)");
            println!("Outputs:  json, yaml, csv");
            println!();
            println!("Set RUST_LOG to change the log level (default: {})", DEFAULT_LOG_FILTER);
            Ok(())
        }
    }
}

/// Explicit format, else the output extension, else JSON
#[cfg(feature = "cli")]
fn output_format(explicit: Option<OutputFormat>, output: Option<&Path>) -> KvuResult<Format> {
    match (explicit, output) {
        (Some(format), _) => Ok(format.into()),
        (None, Some(path)) => Format::from_path(path),
        (None, None) => Ok(Format::Json),
    }
}

#[cfg(feature = "cli")]
fn emit<F>(output: Option<&Path>, write: F) -> KvuResult<()>
where
    F: FnOnce(&mut dyn io::Write) -> KvuResult<()>,
{
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            write(&mut file)?;
            eprintln!("✓ Output written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write(&mut lock)?;
        }
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install kvu --features cli");
    eprintln!("  kvu extract --knowledge <FILE> --tables <FILE>");
}

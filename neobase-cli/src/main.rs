//! NeoBase CLI - Command-line interface
//!
//! This binary looks up OpenTravelData points of reference from the shell.

mod commands;
mod error;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use neobase::config::{ConfigFile, DuplicatePolicy, NeoBaseConfig, ReferenceDate};
use neobase::logging::{init_logging, level_for_verbosity};
use neobase::store::StoreError;

use commands::field::MatchOptions;
use commands::output::Output;
use error::CliError;

#[derive(Parser)]
#[command(name = "neobase", version = neobase::VERSION)]
#[command(about = "Look up OpenTravelData points of reference", long_about = None)]
struct Args {
    /// IATA codes to look up, or '-' to read them from stdin
    #[arg(required = true)]
    keys: Vec<String>,

    /// Reference date to compute active points of reference (default: today)
    #[arg(long, env = "OPTD_POR_DATE", value_name = "YYYY-MM-DD")]
    date: Option<ReferenceDate>,

    /// Duplicate handling: keep-all (1) or keep-first (0)
    #[arg(long, env = "OPTD_POR_DUPLICATES")]
    duplicates: Option<DuplicatePolicy>,

    /// POR file to load instead of the bundled sample
    #[arg(long, env = "OPTD_POR_FILE")]
    por_file: Option<PathBuf>,

    /// Configuration file (default: ~/.neobase/config.ini)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search by a specific field instead of key
    #[arg(short, long, conflicts_with_all = ["radius", "closest"])]
    field: Option<String>,

    /// Like 'grep -w', only match whole words with --field
    #[arg(short, long, requires = "field")]
    word: bool,

    /// Like 'grep -v', select non-matching with --field
    #[arg(short = 'v', long, requires = "field")]
    invert_match: bool,

    /// Make the matching case-sensitive with --field
    #[arg(short, long, requires = "field")]
    case_sensitive: bool,

    /// Search by radius, in km
    #[arg(short, long, conflicts_with = "closest")]
    radius: Option<f64>,

    /// Show the N closest points of reference
    #[arg(short = 'n', long, value_name = "N")]
    closest: Option<usize>,

    /// Print these fields as CSV instead of the text report
    #[arg(long, value_name = "FIELD", value_delimiter = ',')]
    show: Vec<String>,

    /// Also write log events to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (once for info, twice for debug)
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let _guard = init_logging(level_for_verbosity(args.verbose), args.log_file.as_deref())
        .map_err(CliError::LoggingInit)?;

    let config = resolve_config(&args)?;
    let store = neobase::open(&config)?;

    if let Some(unknown) = args
        .show
        .iter()
        .find(|field| !store.schema().contains_field(field))
    {
        return Err(StoreError::FieldNotInSchema(unknown.clone()).into());
    }

    let keys = commands::read_keys(&args.keys)?;
    let mut out = Output::new(io::stdout().lock(), &args.show);
    out.summary(&store)?;

    if let Some(field) = &args.field {
        let options = MatchOptions {
            word: args.word,
            invert: args.invert_match,
            case_sensitive: args.case_sensitive,
        };
        commands::field::run(&store, field, &keys, options, &mut out)?;
    } else if let Some(radius) = args.radius {
        commands::near::radius(&store, &keys, radius, &mut out)?;
    } else if let Some(n) = args.closest {
        commands::near::closest(&store, &keys, n, &mut out)?;
    } else {
        commands::lookup::run(&store, &keys, &mut out)?;
    }

    out.finish()?;
    Ok(())
}

/// Build the load configuration.
///
/// Precedence: command-line flag, then environment variable (both resolved
/// by clap), then config file, then built-in default.
fn resolve_config(args: &Args) -> Result<NeoBaseConfig, CliError> {
    let path = args.config.clone().unwrap_or_else(ConfigFile::default_path);
    let mut config = ConfigFile::load_from(&path)?.apply(NeoBaseConfig::new());

    if let Some(date) = &args.date {
        config = config.with_date(date.clone());
    }
    if let Some(duplicates) = args.duplicates {
        config = config.with_duplicates(duplicates);
    }
    if let Some(por_file) = &args.por_file {
        config = config.with_por_file(por_file.clone());
    }

    tracing::debug!(
        date = %config.date(),
        duplicates = config.duplicates().as_str(),
        por_file = ?config.por_file(),
        "Resolved configuration"
    );
    Ok(config)
}

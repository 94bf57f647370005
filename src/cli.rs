//! Command-line interface
//!
//! Every library operation has a subcommand of the same name. Names use
//! underscores (`tt_load_gh`) and the dashed form (`tt-load-gh`) is accepted
//! as an alias.
//!
//! Exit codes: `0` for success and help output, `1` for unknown commands,
//! wrong arguments, malformed input and unusable configuration. Remote
//! failures are logged and produce empty output with exit code `0`.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::date::last_tuesday;
use crate::error::{Error, Result};
use crate::session::{TidyTuesday, report};
use crate::types::{
    FileIdentifier, FileSelector, LoadedRelease, ReleaseMetadata, ReleaseTarget,
};

const BIN_NAME: &str = "tidytuesday";

/// TidyTuesday dataset client
#[derive(Parser, Debug, Clone)]
#[command(
    name = BIN_NAME,
    version,
    about = "Discover and load weekly TidyTuesday datasets",
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// JSON configuration file (default: $TIDYTUESDAY_CONFIG, then built-in defaults)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Find the release Tuesday of the week containing a date
    #[command(name = "last_tuesday", alias = "last-tuesday")]
    LastTuesday {
        /// Date in YYYY-MM-DD format (default: today in New York)
        date: Option<String>,
    },

    /// List all available datasets, grouped by year
    #[command(name = "tt_available", alias = "tt-available")]
    TtAvailable,

    /// List the datasets of one year
    #[command(name = "tt_datasets", alias = "tt-datasets")]
    TtDatasets {
        /// Year, e.g. 2025
        year: String,
    },

    /// Print release metadata as JSON
    #[command(name = "tt_load_gh", alias = "tt-load-gh")]
    TtLoadGh {
        /// Release date (YYYY-MM-DD) or year (YYYY)
        date_or_year: String,
        /// 1-based week number when the first argument is a year
        week: Option<u32>,
    },

    /// Download one file of a release
    #[command(name = "tt_download_file", alias = "tt-download-file")]
    TtDownloadFile {
        /// Metadata JSON file written from tt_load_gh, or a release date
        data: String,
        /// File name or 0-based index
        file: String,
    },

    /// Download all or some files of a release
    #[command(name = "tt_download", alias = "tt-download")]
    TtDownload {
        /// Metadata JSON file written from tt_load_gh, or a release date
        data: String,
        /// File names, or "All" (default)
        files: Vec<String>,
    },

    /// Fetch a release and download its files
    #[command(name = "tt_load", alias = "tt-load")]
    TtLoad {
        /// Release date (YYYY-MM-DD) or year (YYYY)
        date_or_year: String,
        /// Optional week number, then file names or "All"
        #[arg(value_name = "WEEK|FILES")]
        rest: Vec<String>,
    },

    /// Open a release README in the browser
    #[command(name = "readme")]
    Readme {
        /// Metadata JSON file written from tt_load_gh, or a release date
        data: String,
    },

    /// Show the remaining GitHub API calls
    #[command(name = "rate_limit_check", alias = "rate-limit-check")]
    RateLimitCheck {
        /// Print only the number (true/false)
        quiet: Option<String>,
    },

    /// Load every file of the release published on a date
    #[command(name = "get_date", alias = "get-date")]
    GetDate {
        /// Week in YYYY-MM-DD format
        week: String,
    },

    /// Load every file of the n-th release of a year
    #[command(name = "get_week", alias = "get-week")]
    GetWeek {
        /// Year (YYYY)
        year: String,
        /// 1-based week number
        week_num: u32,
    },
}

impl Command {
    /// Primary name of the subcommand
    pub fn name(&self) -> &'static str {
        match self {
            Command::LastTuesday { .. } => "last_tuesday",
            Command::TtAvailable => "tt_available",
            Command::TtDatasets { .. } => "tt_datasets",
            Command::TtLoadGh { .. } => "tt_load_gh",
            Command::TtDownloadFile { .. } => "tt_download_file",
            Command::TtDownload { .. } => "tt_download",
            Command::TtLoad { .. } => "tt_load",
            Command::Readme { .. } => "readme",
            Command::RateLimitCheck { .. } => "rate_limit_check",
            Command::GetDate { .. } => "get_date",
            Command::GetWeek { .. } => "get_week",
        }
    }
}

/// Every accepted command name, primary names and aliases, sorted
pub fn command_names() -> Vec<String> {
    let cmd = Cli::command();
    let mut names: Vec<String> = cmd
        .get_subcommands()
        .flat_map(|sub| {
            std::iter::once(sub.get_name().to_string())
                .chain(sub.get_all_aliases().map(str::to_string))
        })
        .collect();
    names.sort();
    names
}

/// Parse arguments and run one command, writing results to `out` and
/// diagnostics to `err`
///
/// Returns the process exit code.
pub async fn run<I, T, O, E>(args: I, out: &mut O, err: &mut E) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
    O: Write,
    E: Write,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) => return parse_failure(&e, &args, out, err),
    };

    let command = cli.command.name();
    match execute(cli, out).await {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            if matches!(e, Error::InvalidInput(_)) {
                let _ = writeln!(err, "Run '{BIN_NAME} {command} --help' for usage information.");
            }
            1
        }
    }
}

fn parse_failure<O: Write, E: Write>(
    e: &clap::Error,
    args: &[String],
    out: &mut O,
    err: &mut E,
) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(out, "{}", e.render());
            0
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = write!(err, "{}", e.render());
            1
        }
        ErrorKind::InvalidSubcommand => {
            let unknown = match e.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(s)) => s.clone(),
                _ => args.get(1).cloned().unwrap_or_default(),
            };
            let _ = writeln!(err, "Unknown command: {unknown}");
            let _ = writeln!(err, "Available commands: {}", command_names().join(", "));
            let _ = writeln!(err);
            let _ = writeln!(err, "For more information on a specific command, run:");
            let _ = writeln!(err, "  {BIN_NAME} <command> --help");
            1
        }
        _ => {
            let command = invoked_command(args).unwrap_or_else(|| BIN_NAME.to_string());
            let _ = write!(err, "{}", e.render());
            let _ = writeln!(err, "Check the arguments for the '{command}' command.");
            let _ = writeln!(err, "Run '{BIN_NAME} {command} --help' for usage information.");
            1
        }
    }
}

/// The first argument that names a known command, normalized to its primary name
fn invoked_command(args: &[String]) -> Option<String> {
    let cmd = Cli::command();
    args.iter().skip(1).find_map(|arg| {
        cmd.get_subcommands()
            .find(|sub| sub.get_name() == arg || sub.get_all_aliases().any(|a| a == arg))
            .map(|sub| sub.get_name().to_string())
    })
}

async fn execute<O: Write>(cli: Cli, out: &mut O) -> Result<()> {
    if let Command::LastTuesday { date } = &cli.command {
        writeln!(out, "{}", last_tuesday(date.as_deref().map(Into::into))?)?;
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    let mut tt = TidyTuesday::new(config)?;

    match cli.command {
        Command::LastTuesday { .. } => {}
        Command::TtAvailable => {
            let catalog = tt.available().await;
            writeln!(out, "Available TidyTuesday Datasets:")?;
            writeln!(out, "==============================")?;
            for (year, releases) in &catalog {
                writeln!(out, "\n{year}:")?;
                for release in releases {
                    writeln!(out, "  {release}")?;
                }
            }
        }
        Command::TtDatasets { year } => {
            let releases = tt.datasets(&year).await;
            writeln!(out, "Available TidyTuesday Datasets for {year}:")?;
            writeln!(out, "======================================")?;
            for release in &releases {
                writeln!(out, "{release}")?;
            }
        }
        Command::TtLoadGh { date_or_year, week } => {
            let target = ReleaseTarget::parse(&date_or_year, week)?;
            let metadata = tt.load_metadata(&target).await;
            if !metadata.is_empty() {
                writeln!(out, "{}", serde_json::to_string_pretty(&metadata)?)?;
            }
        }
        Command::TtDownloadFile { data, file } => {
            if let Some(metadata) = resolve_data(&mut tt, &data).await? {
                let table = tt.download_file(&metadata, &FileIdentifier::parse(&file)).await;
                writeln!(out, "{table}")?;
            }
        }
        Command::TtDownload { data, files } => {
            if let Some(metadata) = resolve_data(&mut tt, &data).await? {
                let tables = tt.download(&metadata, &FileSelector::from_args(&files)).await;
                for (name, table) in &tables {
                    writeln!(out, "{name}:\n{table}\n")?;
                }
            }
        }
        Command::TtLoad { date_or_year, rest } => {
            let (week, files) = split_week(&rest);
            let target = ReleaseTarget::parse(&date_or_year, week)?;
            let loaded = tt.load(&target, &FileSelector::from_args(files)).await;
            print_loaded(out, &loaded)?;
        }
        Command::Readme { data } => {
            if let Some(metadata) = resolve_data(&mut tt, &data).await? {
                if tt.readme(&metadata).is_some() {
                    writeln!(out, "README opened in your browser.")?;
                }
            }
        }
        Command::RateLimitCheck { quiet } => {
            let quiet = parse_flag(quiet.as_deref())?;
            let remaining = tt
                .rate_limit_check()
                .await
                .map_or_else(|| "unknown".to_string(), |n| n.to_string());
            if quiet {
                writeln!(out, "{remaining}")?;
            } else {
                writeln!(out, "Requests remaining: {remaining}")?;
            }
        }
        Command::GetDate { week } => {
            ReleaseTarget::parse(&week, None)?;
            let loaded = tt.get_date(&week).await;
            print_loaded(out, &loaded)?;
        }
        Command::GetWeek { year, week_num } => {
            ReleaseTarget::parse(&year, Some(week_num))?;
            let loaded = tt.get_week(&year, week_num).await;
            print_loaded(out, &loaded)?;
        }
    }

    Ok(())
}

/// Leading integer of `tt_load`'s trailing arguments is the week number
fn split_week(rest: &[String]) -> (Option<u32>, &[String]) {
    match rest.split_first() {
        Some((first, files)) => match first.parse::<u32>() {
            Ok(week) => (Some(week), files),
            Err(_) => (None, rest),
        },
        None => (None, rest),
    }
}

fn parse_flag(value: Option<&str>) -> Result<bool> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("false" | "0" | "no") => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some(other) => Err(Error::InvalidInput(format!(
            "quiet must be true or false, got '{other}'"
        ))),
    }
}

/// Metadata from a JSON file written by `tt_load_gh`, or fetched for a date
async fn resolve_data(tt: &mut TidyTuesday, data: &str) -> Result<Option<ReleaseMetadata>> {
    let path = Path::new(data);
    if path.is_file() {
        let content = std::fs::read_to_string(path)?;
        let metadata: ReleaseMetadata =
            serde_json::from_str(&content).map_err(|e| Error::InvalidInput(format!(
                "{} is not release metadata: {e}",
                path.display()
            )))?;
        return Ok(Some(metadata));
    }

    let target = ReleaseTarget::parse(data, None).map_err(|_| {
        Error::InvalidInput(format!(
            "'{data}' is neither a metadata file nor a YYYY-MM-DD date"
        ))
    })?;
    match tt.try_load_metadata(&target).await {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) => {
            report("load release", &e);
            Ok(None)
        }
    }
}

fn print_loaded<O: Write>(out: &mut O, loaded: &LoadedRelease) -> Result<()> {
    if loaded.metadata.is_empty() {
        return Ok(());
    }
    writeln!(out, "Date: {}", loaded.date())?;
    writeln!(out, "Year: {}", loaded.year())?;
    for (name, table) in &loaded.tables {
        writeln!(out, "\n{name}:\n{table}")?;
    }
    Ok(())
}

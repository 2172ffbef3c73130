use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use version_filter::config::{self, load_filter};
use version_filter::logging::{self, LogFormat};
use version_filter::{CandidateOrder, Filter, FilterError};

/// Select the version matching a filter from a list of candidates.
///
/// Candidates are taken from the positional arguments, or read from stdin one
/// per line when none are given. They are expected oldest first unless
/// `--newest-first` is set.
#[derive(Parser)]
#[command(name = "version-filter")]
#[command(version, about)]
struct Cli {
    /// Filter document (JSON or YAML) providing kind, pattern and strict
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Version kind: latest, regex or semver
    #[arg(short, long)]
    kind: Option<String>,

    /// Pattern interpreted according to the kind
    #[arg(short, long, allow_hyphen_values = true)]
    pattern: Option<String>,

    /// Make semver pre-releases eligible
    #[arg(long)]
    strict: bool,

    /// Candidates are listed newest first
    #[arg(long)]
    newest_first: bool,

    /// Log filter directive, overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t)]
    log_format: LogFormat,

    /// Write logs to a file instead of stderr (`--log-file=PATH`); defaults to the data directory
    #[arg(long, require_equals = true, num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    /// Candidate versions
    versions: Vec<String>,
}

impl Cli {
    /// Merge the config file with the command-line fields, which take precedence
    fn filter(&self) -> anyhow::Result<Filter> {
        let mut filter = match &self.config {
            Some(path) => load_filter(path)?,
            None => Filter::default(),
        };
        if let Some(kind) = &self.kind {
            filter.kind = kind.clone();
        }
        if let Some(pattern) = &self.pattern {
            filter.pattern = pattern.clone();
        }
        filter.strict |= self.strict;
        Ok(filter)
    }

    fn order(&self) -> CandidateOrder {
        if self.newest_first {
            CandidateOrder::NewestFirst
        } else {
            CandidateOrder::OldestFirst
        }
    }

    fn log_file(&self) -> Option<PathBuf> {
        self.log_file
            .as_ref()
            .map(|path| path.clone().unwrap_or_else(config::log_path))
    }
}

fn read_candidates(reader: impl BufRead) -> anyhow::Result<Vec<String>> {
    let mut candidates = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read candidates")?;
        let line = line.trim();
        if !line.is_empty() {
            candidates.push(line.to_string());
        }
    }
    Ok(candidates)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let filter = cli.filter()?.init()?;

    let candidates = if cli.versions.is_empty() {
        read_candidates(std::io::stdin().lock())?
    } else {
        cli.versions.clone()
    };

    let found = filter.search_ordered(&candidates, cli.order())?;
    println!("{}", serde_json::to_string(&found)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = cli.log_file();
    let _guard = match logging::init(cli.log_level.as_deref(), cli.log_format, log_file.as_deref())
    {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            // No match is an expected outcome, distinguish it from failures
            match e.downcast_ref::<FilterError>() {
                Some(err) if err.is_not_found() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

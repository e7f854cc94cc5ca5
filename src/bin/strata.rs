//! Strata CLI
//!
//! Quotes a catalog from a YAML document or the plain token format and
//! prints the total price in minor units.

use std::{
    error::Error,
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Parser, ValueEnum};
use humanize_duration::{Truncate, prelude::DurationExt};
use rusty_money::iso;

use strata::{
    catalog::{Catalog, file::CatalogFile},
    input,
    quote::Quote,
    solvers::{Solver, threshold::ThresholdSolver},
};

/// Configuration quoting engine
#[derive(Debug, Parser)]
#[command(name = "strata", about = "Configuration quoting engine", long_about = None)]
struct Cli {
    /// Catalog file path, or `-` for stdin
    input: PathBuf,

    /// Input format
    #[arg(short, long, value_enum, default_value = "yaml")]
    format: Format,

    /// ISO currency code for token-format prices
    #[arg(short, long, default_value = "USD")]
    currency: String,

    /// Override the demanded configuration count from the input
    #[arg(short, long)]
    demand: Option<u64>,

    /// Print a per-group breakdown table before the total
    #[arg(short, long)]
    breakdown: bool,

    /// Print how long the search took
    #[arg(short, long)]
    timing: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// YAML catalog document
    Yaml,

    /// Whitespace-separated tokens: group count, demand, then each group as
    /// an option count and its prices in minor units
    Tokens,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let (catalog, file_demand) = load_catalog(cli)?;
    let demand = cli.demand.unwrap_or(file_demand);

    let normalized = catalog.normalize()?;

    let start = Instant::now();
    let result = ThresholdSolver::solve(&normalized, demand)?;
    let elapsed = start.elapsed();

    let quote = Quote::from_solver_result(&normalized, demand, result, catalog.currency())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if cli.breakdown {
        quote.write_to(&mut handle, &catalog, &normalized)?;
    }

    writeln!(handle, "{}", quote.total_minor())?;

    if cli.timing {
        writeln!(handle, "solved in {}", elapsed.human(Truncate::Nano))?;
    }

    Ok(())
}

fn load_catalog(cli: &Cli) -> Result<(Catalog<'static>, u64), Box<dyn Error>> {
    let contents = read_input(&cli.input)?;

    match cli.format {
        Format::Yaml => Ok(CatalogFile::parse(&contents)?.into_catalog()?),
        Format::Tokens => {
            let currency = iso::find(&cli.currency)
                .ok_or_else(|| format!("unknown currency code: {}", cli.currency))?;

            Ok(input::read_catalog(contents.as_bytes(), currency)?)
        }
    }
}

fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut contents = String::new();
        io::stdin().lock().read_to_string(&mut contents)?;

        Ok(contents)
    } else {
        fs::read_to_string(path)
    }
}

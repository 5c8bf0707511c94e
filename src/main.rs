use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hypercube_doe::{Assembler, Lhs, LhsKind, ParameterDef};
use log::info;
use ndarray::Array2;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Latin Hypercube design of experiments generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Samples ranges given on the command line, prints rows as a JSON array
    Ranges {
        /// Range as `LOWER,UPPER`, repeat for each component in column order
        #[arg(short, long = "range", required = true, allow_hyphen_values = true)]
        ranges: Vec<Bounds>,
        #[command(flatten)]
        sampling: SamplingArgs,
    },
    /// Samples parameters defined in a JSON file, prints `{ ids, dropped, doe }`
    Assemble {
        /// JSON array of `{ "id", "lower", "upper", "type": "integer" | "continuous" | "unsupported" }`
        file: PathBuf,
        #[command(flatten)]
        sampling: SamplingArgs,
        /// Truncate integer parameter values to the lower integer
        #[arg(long)]
        discretize: bool,
    },
}

#[derive(Args, Debug)]
struct SamplingArgs {
    /// Number of samples (i.e. strata per component)
    #[arg(short = 'n', long)]
    count: usize,
    /// Seed for a reproducible design
    #[arg(short, long)]
    seed: Option<u64>,
    /// Kind of Latin Hypercube design
    #[arg(short, long, value_enum, default_value_t = Kind::Classic)]
    kind: Kind,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Classic,
    Centered,
}

impl From<Kind> for LhsKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Classic => LhsKind::Classic,
            Kind::Centered => LhsKind::Centered,
        }
    }
}

/// Comma separated bounds of a range, their number is checked by the sampler
#[derive(Clone, Debug, PartialEq)]
struct Bounds(Vec<f64>);

impl FromStr for Bounds {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.split(',')
            .map(|v| {
                v.trim()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid bound {v:?}: {e}"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Bounds)
    }
}

impl AsRef<[f64]> for Bounds {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

#[derive(Serialize, Debug)]
struct Design<'a> {
    ids: &'a [Value],
    dropped: &'a [Value],
    doe: Vec<Vec<f64>>,
}

fn rows(doe: &Array2<f64>) -> Vec<Vec<f64>> {
    doe.rows().into_iter().map(|row| row.to_vec()).collect()
}

fn ranges_design(ranges: &[Bounds], sampling: &SamplingArgs) -> Result<Value> {
    let doe = Lhs::from_pairs(ranges)?
        .kind(sampling.kind.into())
        .seed(sampling.seed)
        .sample(sampling.count)?;
    Ok(serde_json::to_value(rows(&doe))?)
}

fn assemble_design(json: &str, sampling: &SamplingArgs, discretize: bool) -> Result<Value> {
    let defs: Vec<ParameterDef<Value>> =
        serde_json::from_str(json).context("Invalid parameter definitions")?;
    let experiments = Assembler::new()
        .kind(sampling.kind.into())
        .seed(sampling.seed)
        .assemble(sampling.count, &defs)?;
    let doe = if discretize {
        experiments.discretized()
    } else {
        experiments.doe().clone()
    };
    let design = Design {
        ids: experiments.ids(),
        dropped: experiments.dropped(),
        doe: rows(&doe),
    };
    Ok(serde_json::to_value(design)?)
}

fn run(cli: Cli) -> Result<Value> {
    match cli.command {
        Command::Ranges { ranges, sampling } => {
            info!("Sample {} range(s)", ranges.len());
            ranges_design(&ranges, &sampling)
        }
        Command::Assemble {
            file,
            sampling,
            discretize,
        } => {
            info!("Read parameter definitions from {file:?}");
            let json = fs::read_to_string(&file)
                .with_context(|| format!("Cannot read parameter definitions {file:?}"))?;
            assemble_design(&json, &sampling, discretize)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let design = run(Cli::parse())?;
    println!("{}", serde_json::to_string(&design)?);
    Ok(())
}

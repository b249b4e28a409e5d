use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, BufReader, Write};

use percolation::render::{render_cells, render_roots};
use percolation::union_find::DisjointSet;
use percolation::{script, timing, PercolationModel};

/// Parse a count that may have metric suffix (k/K=1000, m/M=1e6)
fn parse_metric_number(s: &str) -> Result<usize, String> {
    if s.is_empty() {
        return Err("Empty string".to_string());
    }

    let (num_part, suffix) = match s.char_indices().last() {
        Some((i, c)) if c.is_ascii_alphabetic() => (&s[..i], Some(c)),
        _ => (s, None),
    };

    let base: f64 = num_part
        .parse()
        .map_err(|e| format!("Invalid number: {e}"))?;

    let multiplier = match suffix {
        Some('k') | Some('K') => 1000.0,
        Some('m') | Some('M') => 1_000_000.0,
        Some(c) => {
            return Err(format!(
                "Unknown suffix '{c}'. Use k/K (1000) or m/M (1e6)"
            ))
        }
        None => 1.0,
    };

    let result = base * multiplier;
    if result < 0.0 || result > usize::MAX as f64 {
        return Err(format!("Value {result} out of range"));
    }

    Ok(result as usize)
}

/// Percolation - open cells on an n-by-n grid and check whether it percolates
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Quiet mode (no progress output)
    #[clap(long = "quiet", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an open script and print the resulting grid
    Run {
        /// Grid side length
        #[clap(short = 'n', long = "size")]
        size: usize,

        /// Script file (stdin if not specified)
        #[clap(short = 'i', long = "input")]
        input: Option<String>,

        /// Also print the root of every site in the fullness union-find
        #[clap(long = "roots")]
        roots: bool,
    },

    /// Time union and connected operations replayed from a pair file
    Bench {
        /// Number of union-find elements
        #[clap(short = 'n', long = "size", value_parser = parse_metric_number)]
        size: usize,

        /// File of whitespace-separated element pairs
        #[clap(short = 'p', long = "pairs")]
        pairs: String,

        /// Replay at most this many pairs
        #[clap(long = "ops", value_parser = parse_metric_number)]
        ops: Option<usize>,
    },
}

fn open_input(path: Option<&str>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("failed to open {path}"))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn run(size: usize, input: Option<&str>, roots: bool, quiet: bool) -> Result<()> {
    let mut model = PercolationModel::new(size)?;

    let commands = script::parse_script(open_input(input)?)
        .with_context(|| format!("failed to parse script {}", input.unwrap_or("<stdin>")))?;
    if !quiet {
        eprintln!("[percolation] {} open commands for a {size}x{size} grid", commands.len());
    }

    let replay = script::apply(&mut model, &commands)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", render_cells(&mut model))?;
    if roots {
        writeln!(out)?;
        write!(out, "{}", render_roots(&model.full_set_roots(), size))?;
    }
    writeln!(out, "percolates: {}", model.percolates())?;
    writeln!(out, "open sites: {}", model.number_of_open_sites())?;
    if let (Some(step), Some(open)) = (replay.percolated_at_step, replay.percolated_with_open_sites) {
        let fraction = open as f64 / (size * size) as f64;
        writeln!(out, "percolated at step {step} with {open} open sites ({fraction:.4})")?;
    }

    Ok(())
}

fn bench(size: usize, pairs_path: &str, ops: Option<usize>, quiet: bool) -> Result<()> {
    let mut pairs = timing::read_pairs(open_input(Some(pairs_path))?)
        .with_context(|| format!("failed to read pairs from {pairs_path}"))?;
    if let Some(ops) = ops {
        pairs.truncate(ops);
    }
    if !quiet {
        eprintln!("[percolation] replaying {} pairs over {size} elements", pairs.len());
    }

    let mut set = DisjointSet::new(size);
    let union_time = timing::time_unions(&mut set, &pairs)?;
    let find_time = timing::time_connected(&mut set, &pairs)?;

    println!("union: {} ms", union_time.as_millis());
    println!("connected: {} ms", find_time.as_millis());
    println!("components: {}", set.count());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match args.command {
        Command::Run { size, input, roots } => run(size, input.as_deref(), roots, args.quiet),
        Command::Bench { size, pairs, ops } => bench(size, &pairs, ops, args.quiet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric_number() {
        assert_eq!(parse_metric_number("250").unwrap(), 250);
        assert_eq!(parse_metric_number("2k").unwrap(), 2000);
        assert_eq!(parse_metric_number("1.5M").unwrap(), 1_500_000);
        assert!(parse_metric_number("").is_err());
        assert!(parse_metric_number("3g").is_err());
        assert!(parse_metric_number("-4").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["percolation", "run", "-n", "5", "--roots"]).unwrap();
        match args.command {
            Command::Run { size, input, roots } => {
                assert_eq!(size, 5);
                assert!(input.is_none());
                assert!(roots);
            }
            _ => panic!("expected run"),
        }
    }
}

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use memmap2::Mmap;

use chd_table::{ChdConfig, ChdTable};

/// Build a CHD perfect hash table from a newline-separated key file and
/// probe it.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// File with one key per line; the value stored for each key is its
    /// zero-based line number
    keys: PathBuf,

    /// Target occupancy of the slot array
    #[arg(long, default_value_t = 1.0)]
    load_factor: f64,

    /// Average keys per first-level bucket
    #[arg(long, default_value_t = 4)]
    keys_per_bucket: usize,

    /// Seed search bound per bucket
    #[arg(long, default_value_t = 1_000_000)]
    max_seed: u64,

    /// Keys to look up after the build
    #[arg(long = "query")]
    queries: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file = match File::open(&args.keys) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("{}: {}", args.keys.display(), err);
            return ExitCode::FAILURE;
        }
    };
    // The file is mapped read-only and only sliced into key lines.
    let map = match unsafe { Mmap::map(&file) } {
        Ok(map) => map,
        Err(err) => {
            eprintln!("{}: {}", args.keys.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let pairs: Vec<(&[u8], usize)> = map
        .split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(line_no, line)| (line, line_no))
        .collect();
    let key_count = pairs.len();

    let config = ChdConfig {
        load_factor: args.load_factor,
        keys_per_bucket: args.keys_per_bucket,
        max_seed: args.max_seed,
    };

    let start = Instant::now();
    let table = match ChdTable::new(pairs, &config) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("build failed: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    let params = table.params();
    println!(
        "{} keys -> {} slots in {} buckets, built in {:.2?}",
        key_count,
        params.m(),
        params.r(),
        elapsed
    );
    let largest_seed = params.seeds().iter().max().copied().unwrap_or(0);
    println!("largest seed: {}", largest_seed);

    for query in &args.queries {
        match table.get(query.as_str()) {
            Some(line_no) => println!("{}: line {}", query, line_no),
            None => println!("{}: not found", query),
        }
    }

    ExitCode::SUCCESS
}

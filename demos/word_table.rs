use std::time::Instant;

use chd_table::{ChdConfig, ChdTable};

fn main() {
    // Synthesize a larger key set; values are the keys' ordinals.
    let num_keys = 1_000_000;
    let pairs: Vec<(String, usize)> = (0..num_keys)
        .map(|i| (format!("word-{:07}", i), i))
        .collect();

    let config = ChdConfig::default();

    let start = Instant::now();
    let table = ChdTable::new(pairs, &config).expect("construction failed");
    let duration = start.elapsed();

    let num_of_seconds = duration.as_secs_f64();
    let throughput = (num_keys as f64 / 1_000_000.0) / num_of_seconds;
    println!("built {} keys in {} seconds", num_keys, num_of_seconds);
    println!(
        "throughput: {} Mkeys/s, each key uses {} ns",
        throughput,
        1_000.0 / throughput
    );

    let params = table.params();
    println!(
        "{} slots, {} buckets, {} seed words",
        params.m(),
        params.r(),
        params.seeds().len()
    );
    println!(
        "largest seed: {}",
        params.seeds().iter().max().copied().unwrap_or(0)
    );

    // Probe a mix of hits and misses.
    let start = Instant::now();
    let mut hits = 0usize;
    for i in 0..num_keys {
        if table.get(format!("word-{:07}", i).as_str()).is_some() {
            hits += 1;
        }
    }
    let misses = (0..1000)
        .filter(|i| table.get(format!("missing-{}", i).as_str()).is_none())
        .count();
    let probe_time = start.elapsed();

    println!(
        "{} hits, {} clean misses, probed in {:.2?}",
        hits, misses, probe_time
    );
}

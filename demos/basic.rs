use chd_table::{ChdConfig, ChdTable};

fn main() {
    // Build a table with:
    // - load_factor=1.0 (slot array exactly as large as the key set, i.e. a minimal table)
    // - keys_per_bucket=1 (one key per bucket on average, fastest seed search)
    // - max_seed=1_000_000 (give up on a bucket after a million candidate seeds)
    let config = ChdConfig {
        load_factor: 1.0,
        keys_per_bucket: 1,
        ..ChdConfig::default()
    };

    let pairs = vec![("a", 1), ("b", 2), ("c", 3), ("d", 4)];
    let table = ChdTable::new(pairs, &config).expect("construction failed");

    // The whole table is the seed array plus the two moduli.
    let params = table.params();
    println!(
        "{} keys in {} slots, {} buckets, seeds {:?}",
        table.len(),
        params.m(),
        params.r(),
        params.seeds()
    );

    // Present keys come back with their value after a single probe.
    println!("a -> {:?}", table.get("a"));

    // Absent keys are a definitive miss, not an error.
    println!("z -> {:?}", table.get("z"));

    // Iterate pairs in slot order.
    for (key, value) in table.iter() {
        println!("{}: {}", key, value);
    }
}

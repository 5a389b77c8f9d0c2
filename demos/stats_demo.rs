use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use clap::Parser;
use dhash_map::HashTable;
use dhash_map::MapConfig;
use dhash_map::hash_table::Entry;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "capacity", default_value_t = 16)]
    capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f32,

    #[arg(short = 'n', long = "values", default_value_t = 1000)]
    values: u64,

    /// Remove every n-th value after filling, to show tombstones.
    #[arg(short = 'r', long = "remove_every", default_value_t = 3)]
    remove_every: u64,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn main() {
    let args = Args::parse();

    let config = match MapConfig::new(args.capacity, args.load_factor) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    println!(
        "Creating HashTable with capacity {} and load factor {}",
        config.capacity(),
        config.load_factor()
    );

    let mut table: HashTable<u64> = HashTable::with_config(config);
    let mut resizes = 0;

    println!("Filling table with {} u64 values...", args.values);
    for value in 0..args.values {
        let hash = hash_u64(value);
        let before = table.capacity();

        match table.entry(hash, |&v| v == value) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(_) => {
                panic!("Value already exists in table: {}", value);
            }
        }

        if table.capacity() != before {
            resizes += 1;
        }
    }

    println!(
        "Inserted {} values, capacity {} after {} resizes",
        table.len(),
        table.capacity(),
        resizes
    );
    table.print_probe_histogram();
    table.debug_stats().print();

    if args.remove_every > 0 {
        let mut removed = 0;
        for value in (0..args.values).step_by(args.remove_every as usize) {
            if table.remove(hash_u64(value), |&v| v == value).is_some() {
                removed += 1;
            }
        }

        println!();
        println!("Removed {} values", removed);
        table.debug_stats().print();
    }
}

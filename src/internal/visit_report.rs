#![allow(clippy::missing_docs_in_private_items)]

use std::{
    collections::HashMap,
    env,
    fs::File,
    io::{BufRead, BufReader},
    time::Instant,
};

use probemap::{DEFAULT_K, TableExtensions, parse_filename, tally_visits};

const USAGE: &str = "usage: visit_report <access_log> [k]";
const HOMEPAGE: &str = "index.html";

// Same tally through the standard library map, for timing
fn tally_with_std<R: BufRead>(reader: R) -> std::io::Result<HashMap<String, u64>> {
    let mut visits: HashMap<String, u64> = HashMap::new();
    for line in reader.split(b'\n') {
        let line = line?;
        if let Some(filename) = parse_filename(&String::from_utf8_lossy(&line)) {
            let count = visits.entry(filename.to_owned()).or_insert(0);
            *count = count.saturating_add(1);
        }
    }
    Ok(visits)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        return Err(USAGE.into());
    };
    let k = match args.next() {
        Some(k) => k.parse::<usize>().map_err(|err| format!("invalid k {k:?}: {err}"))?,
        None => DEFAULT_K,
    };

    let started = Instant::now();
    let visits = tally_visits(BufReader::new(File::open(&path)?))?;
    let probing_elapsed = started.elapsed();

    match visits.search(HOMEPAGE) {
        Some(count) => println!("'{HOMEPAGE}' visit count: {count}"),
        None => println!("'{HOMEPAGE}' was not found in the hash table."),
    }

    for (filename, count) in visits.top(k) {
        println!("Filename: {filename}, Visits: {count}");
    }

    let started = Instant::now();
    let std_visits = tally_with_std(BufReader::new(File::open(&path)?))?;
    let std_elapsed = started.elapsed();

    println!(
        "Tallied {} distinct files ({} slots, load factor {:.2})",
        visits.len(),
        visits.capacity(),
        visits.load_factor()
    );
    println!("Probing hash table: {probing_elapsed:?}");
    println!("std HashMap:        {std_elapsed:?} ({} distinct files)", std_visits.len());

    Ok(())
}

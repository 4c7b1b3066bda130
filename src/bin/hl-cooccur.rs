//! Item / adjective cooccurrence counter
//!
//! Reads a mention table made by hl-extract and counts how often each adjective was used on each
//! item. The output is a numpy file with a cooccurrence matrix. The rows are the items and the
//! columns the adjectives, both in sorted order, except that column 0 is the missing adjective.
//! The labels go next to the matrix, one per line, in `<matrix>.items.txt` and
//! `<matrix>.adjectives.txt`.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate hemline;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;

use hemline::analysis::Cooccurrence;
use hemline::dataset::Dataset;
use hemline::errors::*;
use hemline::numpy;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    if let Err(err) = inner_main() {
        eprintln!("Could not recover: {}", err);
        process::exit(1);
    }
}
pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .arg_from_usage("<dataset> 'mention table written by hl-extract'")
        .arg_from_usage("<matrix> 'file in which to store the cooccurrence matrix (.npy)'")
        .get_matches();
    // clap enforces the positional arguments
    let matrix_path = args.value_of("matrix").unwrap_or_default();

    let dataset = Dataset::from_path(args.value_of("dataset").unwrap_or_default())?;
    let table = Cooccurrence::new(dataset.rows());
    info!("Counting {} rows over {} items and {} adjectives",
        dataset.len(), table.items.len(), table.adjectives.len());

    numpy::write_matrix_path(matrix_path, &table.as_f64())?;
    write_labels(&format!("{}.items.txt", matrix_path), &table.items)?;
    write_labels(&format!("{}.adjectives.txt", matrix_path), &table.adjectives)?;
    println!("Wrote a {}x{} matrix to {}", table.items.len(), table.adjectives.len(), matrix_path);
    Ok(())
}

fn write_labels(path: &str, labels: &[String]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for label in labels {
        writeln!(out, "{}", label)?;
    }
    out.flush()?;
    Ok(())
}

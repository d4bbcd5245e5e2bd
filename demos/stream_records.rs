//! Streaming Records Example
//!
//! Reads delimited text from a file (first argument) or stdin and prints
//! every record as it is parsed.
//!
//! ```text
//! cargo run --example stream_records -- data.csv
//! cat data.tsv | cargo run --example stream_records -- - tsv
//! RUST_LOG=debug cargo run --example stream_records -- data.csv
//! ```

use std::error::Error;
use std::io::Read;
use xsvstream::{Config, XsvReader};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "-".to_string());
    let config = match args.next().as_deref() {
        Some("tsv") => Config::tsv(),
        Some("rfc4180") => Config::rfc4180(),
        _ => Config::csv(),
    };

    let source: Box<dyn Read> = if path == "-" {
        Box::new(std::io::stdin())
    } else {
        Box::new(std::fs::File::open(&path)?)
    };

    let mut reader = XsvReader::new(source, config)?;
    for record in reader.records() {
        println!("{}", record?);
    }

    eprintln!("{} records", reader.row_count());
    Ok(())
}

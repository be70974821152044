use std::path::PathBuf;

use clap::Parser;
use jwch::{parser::course::parse_courses, schema::Course};
use scraper::Html;

/// Parses a saved course page and checks that the result survives a JSON round trip.
#[derive(Parser)]
struct Opts {
    input_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();
    let html = Html::parse_document(&fs_err::read_to_string(opts.input_file)?);

    let result = parse_courses(&html)?;
    let serialized = serde_json::to_string_pretty(&result)?;
    println!("{}", &serialized);
    let deserialized: Vec<Course> = serde_json::from_str(&serialized)?;

    assert_eq!(result, deserialized);

    Ok(())
}

use reportgen::{GenerationError, Generator};
use serde_json::{from_str, Value};
use std::env;
use std::fs;

/// A simple CLI to generate a PDF report from a JSON data file.
fn main() -> Result<(), GenerationError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Generate a PDF report from arbitrary JSON data.");
        eprintln!();
        eprintln!("Usage: {} <path/to/data.json> <path/to/output.pdf>", args[0]);
        std::process::exit(1);
    }

    let data_path = &args[1];
    let output_path = &args[2];

    println!("Loading data from {}", data_path);
    let data_str = fs::read_to_string(data_path)?;
    let data: Value = from_str(&data_str)
        .map_err(|e| GenerationError::InvalidData(e.to_string()))?;

    println!("Generating PDF to {}...", output_path);
    let generator = Generator::new();
    generator.generate_to_file(&data, output_path)?;

    println!("Successfully generated {}", output_path);
    Ok(())
}

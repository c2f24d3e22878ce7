//! Export an evaluation record to all three submission formats.
//!
//! Reads a JSON evaluation record, prints the compliance findings, and
//! writes the EES text, PDF, and DOCX exports next to each other.
//!
//! Usage:
//!   cargo run --release --bin export_evaluation -- record.json
//!   cargo run --release --bin export_evaluation -- record.json --output-dir exports -v

use mileval::export::{generate_docx, generate_ees_text, generate_pdf};
use mileval::record::EvaluationRecord;
use mileval::validation::validate_evaluation;
use mileval::{Error, Result};
use std::fs;
use std::path::PathBuf;

struct ExportConfig {
    record_path: PathBuf,
    output_dir: PathBuf,
    verbose: bool,
}

impl ExportConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut record_path: Option<PathBuf> = None;
        let mut output_dir = PathBuf::from(".");
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output-dir" => {
                    i += 1;
                    if i < args.len() {
                        output_dir = PathBuf::from(&args[i]);
                    }
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                arg if !arg.starts_with('-') => {
                    record_path = Some(PathBuf::from(arg));
                },
                _ => {},
            }
            i += 1;
        }

        record_path.map(|record_path| Self {
            record_path,
            output_dir,
            verbose,
        })
    }
}

fn run(config: &ExportConfig) -> Result<()> {
    let json = fs::read_to_string(&config.record_path)?;
    let record: EvaluationRecord =
        serde_json::from_str(&json).map_err(|e| Error::InvalidRecord(e.to_string()))?;

    let result = validate_evaluation(&record);
    for finding in result.errors.iter().chain(result.warnings.iter()) {
        match &finding.reference {
            Some(reference) => {
                println!("[{}] {}: {} ({})", finding.severity, finding.field, finding.message, reference)
            },
            None => println!("[{}] {}: {}", finding.severity, finding.field, finding.message),
        }
    }
    if result.is_valid {
        println!("Record is compliant ({} warnings)", result.warnings.len());
    } else {
        println!(
            "Record is NOT compliant: {} errors, {} warnings",
            result.errors.len(),
            result.warnings.len()
        );
    }

    fs::create_dir_all(&config.output_dir)?;
    let stem = config
        .record_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "evaluation".to_string());

    let text_path = config.output_dir.join(format!("{stem}.txt"));
    fs::write(&text_path, generate_ees_text(&record))?;
    if config.verbose {
        println!("Wrote {}", text_path.display());
    }

    let pdf_path = config.output_dir.join(format!("{stem}.pdf"));
    fs::write(&pdf_path, generate_pdf(&record)?)?;
    if config.verbose {
        println!("Wrote {}", pdf_path.display());
    }

    let docx_path = config.output_dir.join(format!("{stem}.docx"));
    fs::write(&docx_path, generate_docx(&record)?)?;
    if config.verbose {
        println!("Wrote {}", docx_path.display());
    }

    println!("Exported 3 formats to {}", config.output_dir.display());
    Ok(())
}

fn main() {
    env_logger::init();

    let Some(config) = ExportConfig::from_args() else {
        eprintln!("Usage: export_evaluation <record.json> [--output-dir DIR] [--verbose]");
        std::process::exit(2);
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

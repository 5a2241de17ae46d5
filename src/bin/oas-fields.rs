//! OpenAPI field report CLI
//!
//! Lists the operations declared in an API document and builds
//! flattened field reports for selected operations.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use oas_fields::{build_report, extract_operations, load_document_auto, OperationRecord};

#[derive(Parser)]
#[command(name = "oas-fields")]
#[command(about = "Flatten OpenAPI operation schemas into field reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the operations declared in a document
    Ops {
        /// Document source: file path or URL (http:// or https://)
        source: String,

        /// Output as JSON (for automation)
        #[arg(long)]
        json: bool,
    },

    /// Build a field report for selected operations
    Report {
        /// Document source: file path or URL (http:// or https://)
        source: String,

        /// Operation id to include, repeatable; all operations if omitted
        #[arg(long = "op")]
        ops: Vec<String>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ops { source, json } => run_ops(&source, json),
        Commands::Report {
            source,
            ops,
            output,
        } => run_report(&source, &ops, output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn load(source: &str) -> Result<serde_json::Value, u8> {
    load_document_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })
}

fn run_ops(source: &str, json: bool) -> Result<(), u8> {
    let document = load(source)?;
    let operations = extract_operations(&document);

    if json {
        println!("{}", serde_json::to_string_pretty(&operations).unwrap());
    } else {
        for operation in &operations {
            match &operation.summary {
                Some(summary) => println!("{}  {}", operation.id, summary),
                None => println!("{}", operation.id),
            }
        }
    }
    Ok(())
}

fn run_report(source: &str, ops: &[String], output: Option<PathBuf>) -> Result<(), u8> {
    let document = load(source)?;
    let operations = extract_operations(&document);

    // An explicit selection keeps the caller's order; no selection
    // reports every operation in extraction order.
    let selected: Vec<OperationRecord> = if ops.is_empty() {
        operations
    } else {
        let mut selected = Vec::with_capacity(ops.len());
        for id in ops {
            match operations.iter().find(|operation| operation.id == *id) {
                Some(operation) => selected.push(operation.clone()),
                None => {
                    eprintln!("Error: unknown operation id: {}", id);
                    return Err(2);
                }
            }
        }
        selected
    };

    let report = build_report(&document, &selected);

    match output {
        Some(path) => {
            std::fs::write(&path, &report).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", report);
        }
    }

    Ok(())
}

//! form106 - extract Official Form 106 content from a page layout dump.
//!
//! The input is a JSON dump of positioned characters and rule lines per
//! page (the shape produced by a pdfplumber-style layout pass); the output
//! is the extracted form data as JSON on stdout.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use form106_core::{
    Document, extract_all, extract_form_106_ab, extract_form_106_d, extract_form_106_ef,
    extract_form_106_sum,
};

/// Which form to extract.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Form {
    /// Form 106Sum (summary)
    Sum,
    /// Form 106A/B (property)
    Ab,
    /// Form 106D (secured creditors)
    D,
    /// Form 106 E/F (unsecured creditors)
    Ef,
}

/// Extract structured data from a bankruptcy Official Form 106 filing.
#[derive(Parser, Debug)]
#[command(name = "form106")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the page layout dump (JSON)
    layout: PathBuf,

    /// Extract a single form instead of the whole filing
    #[arg(short, long, value_enum)]
    form: Option<Form>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Use debug logging level
    #[arg(short = 'd', long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let file = File::open(&args.layout)
        .with_context(|| format!("failed to open {}", args.layout.display()))?;
    let doc: Document = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("malformed layout dump {}", args.layout.display()))?;

    let output = match args.form {
        None => to_json(&extract_all(&doc).context("document is not extractable")?, args.pretty)?,
        Some(Form::Sum) => to_json(&extract_form_106_sum(&doc), args.pretty)?,
        Some(Form::Ab) => to_json(&extract_form_106_ab(&doc), args.pretty)?,
        Some(Form::D) => to_json(&extract_form_106_d(&doc), args.pretty)?,
        Some(Form::Ef) => to_json(&extract_form_106_ef(&doc), args.pretty)?,
    };
    println!("{output}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

//! `persona` CLI: encode, decode and recover TOON character records.
//!
//! ## Usage
//!
//! ```sh
//! # Encode a JSON object to a flat TOON line (stdin → stdout)
//! echo '{"name":"Alice","tags":["a","b"]}' | persona encode
//!
//! # Decode TOON back to pretty-printed JSON, reporting dropped tokens
//! persona decode -i reply.toon --diagnostics
//!
//! # Recover a character record from a raw model reply
//! persona recover -i reply.txt
//!
//! # Build the model prompt with the schema embedded as TOON
//! persona prompt --schema character.json --instructions prompt.txt
//!
//! # Show encoding statistics
//! persona stats -i record.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use persona_service::{PromptTemplate, DEFAULT_INSTRUCTIONS, RECORD_KEYS};
use persona_toon::{Diagnostics, ToonError};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "persona",
    version,
    about = "Flat TOON codec and model-reply recovery for character records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON object to flat TOON
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Decode TOON text to JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Report skipped tokens and parsing decisions on stderr
        #[arg(long)]
        diagnostics: bool,
    },
    /// Recover a record from a model reply (JSON, fenced JSON, embedded JSON or TOON)
    Recover {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Comma-separated expected top-level keys (defaults to the character record keys)
        #[arg(long)]
        keys: Option<String>,
    },
    /// Build the model prompt with a JSON schema embedded as TOON
    Prompt {
        /// JSON schema file
        #[arg(short, long)]
        schema: String,
        /// Instructions file (uses built-in instructions if omitted)
        #[arg(long)]
        instructions: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show encoding statistics (byte sizes, reduction)
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { input, output } => {
            let json = read_input(input.as_deref())?;
            let toon = persona_toon::encode(&json).context("Failed to encode JSON to TOON")?;
            write_output(output.as_deref(), &toon)?;
        }
        Commands::Decode {
            input,
            output,
            diagnostics,
        } => {
            let toon = read_input(input.as_deref())?;
            let mut diag = Diagnostics::new();
            let map = persona_toon::decode_with_diagnostics(&toon, &mut diag);
            if diagnostics {
                report_diagnostics(&diag);
            }
            let pretty = serde_json::to_string_pretty(&map)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Recover {
            input,
            output,
            keys,
        } => {
            let reply = read_input(input.as_deref())?;
            let keys = parse_keys(keys.as_deref());
            let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            let recovered = match persona_toon::recover(&reply, &key_refs) {
                Ok(recovered) => recovered,
                Err(ToonError::Unrecoverable { raw }) => {
                    anyhow::bail!("No record could be recovered from the reply:\n{}", raw)
                }
                Err(other) => return Err(other).context("Failed to recover record"),
            };
            tracing::info!(path = ?recovered.path, "recovered record");
            let pretty = serde_json::to_string_pretty(&recovered.record)?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Prompt {
            schema,
            instructions,
            output,
        } => {
            let schema_text = read_input(Some(schema.as_str()))?;
            let schema: serde_json::Value = serde_json::from_str(&schema_text)
                .with_context(|| format!("Schema is not valid JSON: {}", schema))?;
            let instructions = match instructions {
                Some(path) => read_input(Some(path.as_str()))?,
                None => DEFAULT_INSTRUCTIONS.to_string(),
            };
            let template = PromptTemplate::new(instructions, &schema)
                .context("Failed to encode schema as TOON")?;
            write_output(output.as_deref(), &template.render())?;
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let toon = persona_toon::encode(&json).context("Failed to encode JSON to TOON")?;
            let json_bytes = json.trim().len();
            let toon_bytes = toon.len();
            let ratio = if json_bytes > 0 {
                (1.0 - (toon_bytes as f64 / json_bytes as f64)) * 100.0
            } else {
                0.0
            };
            println!("JSON size:  {} bytes", json_bytes);
            println!("TOON size:  {} bytes", toon_bytes);
            println!("Reduction:  {:.1}%", ratio);
        }
    }

    Ok(())
}

/// Expected keys from `--keys a,b`, or the character record keys.
///
/// Blank entries are ignored, so `--keys ""` yields no keys at all and every
/// TOON reply is rejected.
fn parse_keys(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        None => RECORD_KEYS.iter().map(|k| k.to_string()).collect(),
    }
}

fn report_diagnostics(diag: &Diagnostics) {
    if let Some(fence) = diag.fence {
        eprintln!("fence: {}", fence.opener());
    }
    if let Some(mode) = diag.mode {
        eprintln!("mode: {:?}", mode);
    }
    for token in &diag.skipped {
        eprintln!("skipped: {}", token);
    }
    for key in &diag.overwritten {
        eprintln!("overwritten: {}", key);
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

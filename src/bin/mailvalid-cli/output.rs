use anyhow::{Result, bail};
use serde::Serialize;

use mailvalid_lib::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => bail!("unknown --format '{other}', use: human|json"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckRow {
    pub email: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

#[derive(Debug, Serialize)]
pub struct DeliverRow {
    pub email: String,
    pub valid: bool,
    pub deliverable: bool,
}

pub fn print_checks(rows: &[CheckRow], format: Format) -> Result<()> {
    match format {
        Format::Human => {
            for r in rows {
                if r.result.valid {
                    println!("[OK]      {}", r.email);
                } else if r.result.suggestions.is_empty() {
                    println!("[INVALID] {}", r.email);
                } else {
                    println!(
                        "[INVALID] {} :: did you mean {}",
                        r.email,
                        r.result.suggestions.join(", ")
                    );
                }
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(rows)?),
    }
    Ok(())
}

pub fn print_completions(partial: &str, completions: &[String], format: Format) -> Result<()> {
    match format {
        Format::Human => {
            if completions.is_empty() {
                println!("no suggestion for '{partial}'");
            }
            for c in completions {
                println!("{c}");
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(completions)?),
    }
    Ok(())
}

pub fn print_delivery(row: &DeliverRow, format: Format) -> Result<()> {
    match format {
        Format::Human => {
            let verdict = match (row.valid, row.deliverable) {
                (false, _) => "[INVALID]",
                (true, true) => "[DELIVERABLE]",
                (true, false) => "[UNDELIVERABLE]",
            };
            println!("{verdict} {}", row.email);
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(row)?),
    }
    Ok(())
}

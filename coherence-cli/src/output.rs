//! Rendering of a batch for standard output.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;

use coherence_rs::quil::Quil;
use coherence_rs::CoherenceSequences;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Each sequence as Quil, preceded by a comment naming it
    #[default]
    Quil,
    /// The whole batch as JSON
    Json,
}

pub fn render(batch: &CoherenceSequences, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Quil => render_quil(batch),
        OutputFormat::Json => {
            serde_json::to_string_pretty(batch).context("Failed to serialize sequences to JSON")
        }
    }
}

fn render_quil(batch: &CoherenceSequences) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# experiment {}", batch.experiment)?;
    if let Some(frequency) = batch.oscillation_frequency {
        writeln!(out, "# oscillation frequency {frequency}")?;
    }
    for (sequence, elapsed) in batch.iter() {
        writeln!(out)?;
        writeln!(out, "# {} (elapsed {elapsed})", sequence.name)?;
        let quil = sequence
            .to_quil()
            .with_context(|| format!("Failed to write {} as Quil", sequence.name))?;
        out.push_str(&quil);
    }
    Ok(out)
}

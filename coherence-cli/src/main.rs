//! Command line generator for qubit coherence sequences.
//!
//! ```bash
//! # T1 on qubits 0 and 2, delays of 0 to 200 gates at 50 ns per gate
//! coherence-cli t1 --qubits 0,2 --delays 0,50,100,200 --gate-time 0.05
//!
//! # T2* with three induced oscillations, as JSON
//! coherence-cli --format json t2star --qubits 1 --delays 0,10,20,40 --gate-time 0.05 --oscillations 3
//!
//! # Parameters from a file, overriding the qubits
//! coherence-cli --config t2.yaml t2 --qubits 4
//! ```

mod config;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use coherence_rs::ExperimentKind;

use crate::config::{Config, Overrides};
use crate::output::{render, OutputFormat};

/// Generate Quil sequences for T1, T2 and T2* coherence experiments
#[derive(Parser, Debug)]
#[command(name = "coherence-cli", version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true, env = "COHERENCE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t)]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    /// Energy relaxation: excite, then idle
    T1(ScheduleArgs),
    /// Hahn echo: quarter turn, idle, invert, idle, quarter turn
    T2(ScheduleArgs),
    /// Ramsey with an artificial oscillation
    #[command(name = "t2star")]
    T2Star {
        #[command(flatten)]
        schedule: ScheduleArgs,

        /// Number of oscillations to induce across the longest delay
        #[arg(long, env = "COHERENCE_OSCILLATIONS")]
        oscillations: Option<u64>,
    },
}

#[derive(Args, Clone, Debug)]
struct ScheduleArgs {
    /// Qubits under test, in measurement order
    #[arg(long, value_delimiter = ',', env = "COHERENCE_QUBITS")]
    qubits: Option<Vec<u64>>,

    /// Idle gate counts, in non-decreasing order
    #[arg(long, value_delimiter = ',', env = "COHERENCE_DELAYS")]
    delays: Option<Vec<u64>>,

    /// Duration of one gate
    #[arg(long, env = "COHERENCE_GATE_TIME")]
    gate_time: Option<f64>,

    /// Register size; defaults to one more than the highest qubit
    #[arg(long, env = "COHERENCE_NUM_LINES")]
    num_lines: Option<u64>,
}

impl Command {
    fn into_parts(self) -> (ExperimentKind, Overrides) {
        let (kind, schedule, oscillations) = match self {
            Command::T1(schedule) => (ExperimentKind::T1, schedule, None),
            Command::T2(schedule) => (ExperimentKind::T2, schedule, None),
            Command::T2Star {
                schedule,
                oscillations,
            } => (ExperimentKind::T2Star, schedule, oscillations),
        };
        let overrides = Overrides {
            qubits: schedule.qubits,
            delays: schedule.delays,
            gate_time: schedule.gate_time,
            num_lines: schedule.num_lines,
            oscillations,
        };
        (kind, overrides)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut config = Config::load(cli.config.as_deref())?;
    let (kind, overrides) = cli.command.into_parts();
    config.apply_overrides(overrides);

    let experiment = config.experiment(kind);
    let schedule = config.schedule()?;
    let layout = config.layout()?;
    let batch = experiment
        .build(&schedule, &layout)
        .with_context(|| format!("Failed to build {kind} sequences"))?;
    info!(experiment = %kind, sequences = batch.len(), "generated sequences");

    print!("{}", render(&batch, cli.format)?);

    Ok(())
}

/// Initialize logging with tracing, writing to stderr so stdout carries only the sequences.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use coherence_rs::ExperimentKind;

    use super::{Cli, OutputFormat};

    #[test]
    fn parses_t2star_flags() {
        let cli = Cli::try_parse_from([
            "coherence-cli",
            "--format",
            "json",
            "t2star",
            "--qubits",
            "3,1",
            "--delays",
            "0,5,10",
            "--gate-time",
            "0.1",
            "--oscillations",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);

        let (kind, overrides) = cli.command.into_parts();
        assert_eq!(kind, ExperimentKind::T2Star);
        assert_eq!(overrides.qubits, Some(vec![3, 1]));
        assert_eq!(overrides.delays, Some(vec![0, 5, 10]));
        assert_eq!(overrides.gate_time, Some(0.1));
        assert_eq!(overrides.num_lines, None);
        assert_eq!(overrides.oscillations, Some(2));
    }

    #[rstest]
    #[case("t1", ExperimentKind::T1)]
    #[case("t2", ExperimentKind::T2)]
    #[case("t2star", ExperimentKind::T2Star)]
    fn subcommand_names(#[case] name: &str, #[case] expected: ExperimentKind) {
        let cli = Cli::try_parse_from(["coherence-cli", name]).unwrap();
        assert_eq!(cli.format, OutputFormat::Quil);
        assert_eq!(cli.command.into_parts().0, expected);
    }

    #[test]
    fn rejects_malformed_qubits() {
        assert!(Cli::try_parse_from(["coherence-cli", "t1", "--qubits", "0,x"]).is_err());
    }
}

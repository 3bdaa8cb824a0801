//! Experiment configuration for the command line.
//!
//! Values are taken from the following sources, later ones overriding earlier ones:
//!
//! 1. A YAML file given with `--config` (or `COHERENCE_CONFIG`)
//! 2. Environment variables (`COHERENCE_*`)
//! 3. Command line flags

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use coherence_rs::{DelaySchedule, Experiment, ExperimentKind, QubitLayout};

/// The parameters of one batch of coherence sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Qubits under test, in measurement order
    #[serde(default)]
    pub qubits: Vec<u64>,

    /// Idle gate counts, one sequence per entry
    #[serde(default)]
    pub delays: Vec<u64>,

    /// Duration of one gate
    pub gate_time: Option<f64>,

    /// Register size; defaults to one more than the highest qubit
    pub num_lines: Option<u64>,

    /// Artificial oscillations imprinted on T2* sequences
    #[serde(default)]
    pub oscillations: u64,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub qubits: Option<Vec<u64>>,
    pub delays: Option<Vec<u64>>,
    pub gate_time: Option<f64>,
    pub num_lines: Option<u64>,
    pub oscillations: Option<u64>,
}

impl Config {
    /// Load configuration from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Replace every value that `overrides` provides.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(qubits) = overrides.qubits {
            self.qubits = qubits;
        }
        if let Some(delays) = overrides.delays {
            self.delays = delays;
        }
        if let Some(gate_time) = overrides.gate_time {
            self.gate_time = Some(gate_time);
        }
        if let Some(num_lines) = overrides.num_lines {
            self.num_lines = Some(num_lines);
        }
        if let Some(oscillations) = overrides.oscillations {
            self.oscillations = oscillations;
        }
    }

    /// Validate the delay schedule.
    pub fn schedule(&self) -> Result<DelaySchedule> {
        let gate_time = self
            .gate_time
            .context("A gate time is required (--gate-time or `gate_time`)")?;
        DelaySchedule::new(self.delays.clone(), gate_time).context("Invalid delay schedule")
    }

    /// Validate the qubit layout.
    pub fn layout(&self) -> Result<QubitLayout> {
        match self.num_lines {
            Some(num_lines) => QubitLayout::new(self.qubits.clone(), num_lines),
            None => QubitLayout::from_qubits(self.qubits.clone()),
        }
        .context("Invalid qubit layout")
    }

    pub fn experiment(&self, kind: ExperimentKind) -> Experiment {
        match kind {
            ExperimentKind::T1 => Experiment::T1,
            ExperimentKind::T2 => Experiment::T2,
            ExperimentKind::T2Star => Experiment::T2Star {
                oscillations: self.oscillations,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use coherence_rs::{CoherenceError, Experiment, ExperimentKind};

    use super::{Config, Overrides};

    #[test]
    fn test_config_load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
qubits: [2, 0]
delays: [0, 10, 20]
gate_time: 0.05
oscillations: 3
"#
        )
        .unwrap();

        let config = Config::load(Some(f.path())).unwrap();
        assert_eq!(config.qubits, vec![2, 0]);
        assert_eq!(config.delays, vec![0, 10, 20]);
        assert_eq!(config.gate_time, Some(0.05));
        assert_eq!(config.num_lines, None);
        assert_eq!(config.oscillations, 3);
        assert_eq!(config.layout().unwrap().num_lines(), 3);
    }

    #[test]
    fn test_config_load_without_path() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = Config::load(Some(std::path::Path::new("/nonexistent/coherence.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_load_invalid_yaml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{{{{not: valid: yaml::::").unwrap();
        assert!(Config::load(Some(f.path())).is_err());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "qubit: [0]").unwrap();
        assert!(Config::load(Some(f.path())).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config {
            qubits: vec![0],
            delays: vec![1, 2],
            gate_time: Some(1.0),
            num_lines: None,
            oscillations: 1,
        };
        config.apply_overrides(Overrides {
            qubits: Some(vec![4]),
            gate_time: Some(0.5),
            num_lines: Some(8),
            ..Default::default()
        });

        assert_eq!(config.qubits, vec![4]);
        assert_eq!(config.delays, vec![1, 2]);
        assert_eq!(config.gate_time, Some(0.5));
        assert_eq!(config.num_lines, Some(8));
        assert_eq!(config.oscillations, 1);
    }

    #[test]
    fn test_missing_gate_time() {
        let config = Config {
            delays: vec![0, 1],
            ..Default::default()
        };
        let msg = format!("{}", config.schedule().unwrap_err());
        assert!(msg.contains("gate time"));
    }

    #[test]
    fn test_layout_errors_keep_their_cause() {
        let config = Config {
            qubits: vec![0, 5],
            num_lines: Some(4),
            ..Default::default()
        };
        let error = config.layout().unwrap_err();
        assert_eq!(
            error.downcast_ref::<CoherenceError>(),
            Some(&CoherenceError::QubitOutOfRange {
                qubit: 5,
                num_lines: 4
            })
        );
    }

    #[test]
    fn test_experiment_carries_oscillations() {
        let config = Config {
            oscillations: 2,
            ..Default::default()
        };
        assert_eq!(
            config.experiment(ExperimentKind::T2Star),
            Experiment::T2Star { oscillations: 2 }
        );
        assert_eq!(config.experiment(ExperimentKind::T1), Experiment::T1);
    }
}

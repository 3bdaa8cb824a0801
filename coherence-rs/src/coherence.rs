// Copyright 2021 Rigetti Computing
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The T1, T2 and T2* sequence builders.
//!
//! All three share one template: for every entry of the delay schedule a fresh [`Sequence`] is
//! created, a per-qubit gate pattern is applied to each qubit under test, a fence is placed across
//! the whole register, and each qubit is measured into its own readout slot in layout order. The
//! variants differ only in the pattern and in how the elapsed-time axis is derived.

use std::f64::consts::TAU;

use ndarray::Array1;
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::expression::Expression;
use crate::instruction::{Declaration, Gate, Qubit};
use crate::layout::{DelaySchedule, QubitLayout};
use crate::sequence::{Sequence, SequenceError};

/// Name of the readout region every sequence declares.
pub const READOUT_REGION: &str = "ro";

#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum CoherenceError {
    #[error("invalid configuration: at least one qubit must be measured")]
    EmptyQubits,

    #[error("invalid configuration: qubit {0} is listed more than once")]
    DuplicateQubit(u64),

    #[error("invalid configuration: qubit {qubit} is outside the {num_lines}-qubit register")]
    QubitOutOfRange { qubit: u64, num_lines: u64 },

    #[error("invalid configuration: at least one delay is required")]
    EmptyDelays,

    #[error("invalid configuration: delay counts must be non-decreasing, but entry {index} ({current}) follows {previous}")]
    UnorderedDelays {
        index: usize,
        previous: u64,
        current: u64,
    },

    #[error("invalid configuration: gate time must be finite and positive, got {0}")]
    InvalidGateTime(f64),

    #[error("cannot induce {oscillations} oscillation(s) when the longest delay is zero")]
    ZeroObservationWindow { oscillations: u64 },

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

/// Which decoherence time a batch characterizes.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExperimentKind {
    /// Energy relaxation.
    T1,
    /// Dephasing with a refocusing echo.
    T2,
    /// Free-induction dephasing.
    T2Star,
}

/// A coherence experiment, with any parameters beyond the shared schedule and layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Experiment {
    T1,
    T2,
    /// `oscillations` artificial oscillations are imprinted across the longest delay.
    T2Star { oscillations: u64 },
}

impl Experiment {
    pub fn kind(&self) -> ExperimentKind {
        match self {
            Experiment::T1 => ExperimentKind::T1,
            Experiment::T2 => ExperimentKind::T2,
            Experiment::T2Star { .. } => ExperimentKind::T2Star,
        }
    }

    /// Build this experiment's batch of sequences.
    pub fn build(
        &self,
        schedule: &DelaySchedule,
        layout: &QubitLayout,
    ) -> Result<CoherenceSequences, CoherenceError> {
        match *self {
            Experiment::T1 => t1_sequences(schedule, layout),
            Experiment::T2 => t2_sequences(schedule, layout),
            Experiment::T2Star { oscillations } => {
                t2_star_sequences(schedule, layout, oscillations)
            }
        }
    }
}

/// A batch of sequences with its elapsed-time axis.
///
/// `elapsed_times[i]` is the total idle time of `sequences[i]`, in the unit of the schedule's
/// gate time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoherenceSequences {
    pub experiment: ExperimentKind,
    pub sequences: Vec<Sequence>,
    #[serde(serialize_with = "serialize_times")]
    pub elapsed_times: Array1<f64>,
    /// The induced oscillation frequency; only T2* batches carry one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oscillation_frequency: Option<f64>,
}

impl CoherenceSequences {
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Each sequence paired with its elapsed time.
    pub fn iter(&self) -> impl Iterator<Item = (&Sequence, f64)> {
        self.sequences
            .iter()
            .zip(self.elapsed_times.iter().copied())
    }
}

fn serialize_times<S: Serializer>(times: &Array1<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(times.iter())
}

/// Run the shared template, calling `pattern(sequence, qubit, index, delay)` for every qubit of
/// every sequence.
fn build_sequences<F>(
    kind: ExperimentKind,
    schedule: &DelaySchedule,
    layout: &QubitLayout,
    pattern: F,
) -> Result<Vec<Sequence>, CoherenceError>
where
    F: Fn(&mut Sequence, Qubit, usize, u64) -> Result<(), SequenceError>,
{
    let readout = Declaration::readout(READOUT_REGION, layout.qubits().len() as u64);

    let sequences = schedule
        .delay_counts()
        .iter()
        .enumerate()
        .map(|(index, &delay)| -> Result<Sequence, CoherenceError> {
            let mut sequence =
                Sequence::new(format!("circuit_{index}"), layout.num_lines(), readout.clone());
            for &qubit in layout.qubits() {
                pattern(&mut sequence, qubit, index, delay)?;
            }
            sequence.fence_all()?;
            for (slot, &qubit) in layout.qubits().iter().enumerate() {
                sequence.measure(qubit, slot as u64)?;
            }
            trace!(name = %sequence.name, delay, instructions = sequence.len(), "built sequence");
            Ok(sequence)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        experiment = %kind,
        sequences = sequences.len(),
        qubits = ?layout.qubits().iter().map(Qubit::index).collect::<Vec<_>>(),
        num_lines = layout.num_lines(),
        "built coherence batch"
    );
    Ok(sequences)
}

/// Build the T1 (energy relaxation) batch.
///
/// Each qubit is excited with `X` and then left idle for `delay_counts[i]` gate times.
/// `elapsed_times[i] = gate_time * delay_counts[i]`.
pub fn t1_sequences(
    schedule: &DelaySchedule,
    layout: &QubitLayout,
) -> Result<CoherenceSequences, CoherenceError> {
    let sequences = build_sequences(ExperimentKind::T1, schedule, layout, |seq, qubit, _, delay| {
        seq.add_instruction(Gate::x(qubit))?;
        seq.pad_identities(qubit, delay)
    })?;

    Ok(CoherenceSequences {
        experiment: ExperimentKind::T1,
        sequences,
        elapsed_times: schedule.elapsed_times(1.0),
        oscillation_frequency: None,
    })
}

/// Build the T2 (Hahn echo) batch.
///
/// Each qubit gets a quarter turn, `delay_counts[i]` idle steps, a `Y` inversion, another
/// `delay_counts[i]` idle steps and a closing quarter turn. The qubit idles through both halves,
/// so `elapsed_times[i] = 2 * gate_time * delay_counts[i]`.
pub fn t2_sequences(
    schedule: &DelaySchedule,
    layout: &QubitLayout,
) -> Result<CoherenceSequences, CoherenceError> {
    let sequences = build_sequences(ExperimentKind::T2, schedule, layout, |seq, qubit, _, delay| {
        seq.add_instruction(Gate::quarter_turn(qubit))?;
        seq.pad_identities(qubit, delay)?;
        seq.add_instruction(Gate::y(qubit))?;
        seq.pad_identities(qubit, delay)?;
        seq.add_instruction(Gate::quarter_turn(qubit))
    })?;

    Ok(CoherenceSequences {
        experiment: ExperimentKind::T2,
        sequences,
        elapsed_times: schedule.elapsed_times(2.0),
        oscillation_frequency: None,
    })
}

/// Build the T2* (Ramsey) batch with `oscillations` artificial oscillations.
///
/// The oscillation frequency is `oscillations / elapsed_times[last]`, and exactly zero when no
/// oscillations are requested. Each qubit gets `H`, `delay_counts[i]` idle steps, a
/// `PHASE(2π · frequency · elapsed_times[i])` and a closing `H`.
/// `elapsed_times[i] = gate_time * delay_counts[i]`.
///
/// # Errors
///
/// Besides the template's errors, oscillations cannot be induced when the longest delay is zero.
pub fn t2_star_sequences(
    schedule: &DelaySchedule,
    layout: &QubitLayout,
    oscillations: u64,
) -> Result<CoherenceSequences, CoherenceError> {
    let elapsed_times = schedule.elapsed_times(1.0);
    let window = elapsed_times[schedule.len() - 1];
    let frequency = if oscillations == 0 {
        0.0
    } else if window > 0.0 {
        oscillations as f64 / window
    } else {
        return Err(CoherenceError::ZeroObservationWindow { oscillations });
    };

    let sequences = build_sequences(
        ExperimentKind::T2Star,
        schedule,
        layout,
        |seq, qubit, index, delay| {
            let angle = TAU * frequency * elapsed_times[index];
            seq.add_instruction(Gate::h(qubit))?;
            seq.pad_identities(qubit, delay)?;
            seq.add_instruction(Gate::phase(Expression::from(angle), qubit))?;
            seq.add_instruction(Gate::h(qubit))
        },
    )?;

    Ok(CoherenceSequences {
        experiment: ExperimentKind::T2Star,
        sequences,
        elapsed_times,
        oscillation_frequency: Some(frequency),
    })
}

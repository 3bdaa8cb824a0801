//! Validated inputs for the sequence builders.
//!
//! Everything a builder needs to know about its inputs is checked here, once, so that an invalid
//! configuration is rejected before the first sequence is emitted.

use itertools::Itertools;
use ndarray::Array1;

use crate::coherence::CoherenceError;
use crate::instruction::Qubit;

/// The delay lengths of a batch, in gate counts, and the duration of one gate.
#[derive(Clone, Debug, PartialEq)]
pub struct DelaySchedule {
    delay_counts: Vec<u64>,
    gate_time: f64,
}

impl DelaySchedule {
    /// Build a schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if `delay_counts` is empty or decreases anywhere, or if `gate_time` is not
    /// a finite positive number.
    pub fn new(delay_counts: Vec<u64>, gate_time: f64) -> Result<Self, CoherenceError> {
        if !(gate_time.is_finite() && gate_time > 0.0) {
            return Err(CoherenceError::InvalidGateTime(gate_time));
        }
        if delay_counts.is_empty() {
            return Err(CoherenceError::EmptyDelays);
        }
        if let Some((index, (&previous, &current))) = delay_counts
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (previous, current))| current < previous)
        {
            return Err(CoherenceError::UnorderedDelays {
                index: index + 1,
                previous,
                current,
            });
        }

        Ok(Self {
            delay_counts,
            gate_time,
        })
    }

    pub fn delay_counts(&self) -> &[u64] {
        &self.delay_counts
    }

    pub fn gate_time(&self) -> f64 {
        self.gate_time
    }

    pub fn len(&self) -> usize {
        self.delay_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delay_counts.is_empty()
    }

    /// The idle time of each delay entry, `gate_time * count * multiplier`.
    pub(crate) fn elapsed_times(&self, multiplier: f64) -> Array1<f64> {
        self.delay_counts
            .iter()
            .map(|&count| self.gate_time * count as f64 * multiplier)
            .collect()
    }
}

/// The qubits under test and the size of the register they live in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QubitLayout {
    qubits: Vec<Qubit>,
    num_lines: u64,
}

impl QubitLayout {
    /// Build a layout on a register of `num_lines` qubits.
    ///
    /// # Errors
    ///
    /// Returns an error if `qubits` is empty, names a qubit twice, or names a qubit outside the
    /// register.
    pub fn new(qubits: Vec<u64>, num_lines: u64) -> Result<Self, CoherenceError> {
        if qubits.is_empty() {
            return Err(CoherenceError::EmptyQubits);
        }
        if let Some(&duplicate) = qubits.iter().duplicates().next() {
            return Err(CoherenceError::DuplicateQubit(duplicate));
        }
        if let Some(&qubit) = qubits.iter().find(|&&qubit| qubit >= num_lines) {
            return Err(CoherenceError::QubitOutOfRange { qubit, num_lines });
        }

        Ok(Self {
            qubits: qubits.into_iter().map(Qubit::from).collect(),
            num_lines,
        })
    }

    /// Build a layout on the smallest register holding every qubit, `max(qubits) + 1` lines.
    ///
    /// # Errors
    ///
    /// Returns an error if `qubits` is empty or names a qubit twice.
    pub fn from_qubits(qubits: Vec<u64>) -> Result<Self, CoherenceError> {
        let num_lines = qubits
            .iter()
            .max()
            .map(|&highest| highest + 1)
            .ok_or(CoherenceError::EmptyQubits)?;
        Self::new(qubits, num_lines)
    }

    /// The qubits under test, in measurement order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    pub fn num_lines(&self) -> u64 {
        self.num_lines
    }
}

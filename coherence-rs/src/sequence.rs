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

//! A single coherence sequence: a named, self-contained Quil program on a fixed register.

use serde::ser::{Error as _, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::instruction::{
    Declaration, Fence, Gate, GateError, Instruction, Matrix, Measurement, MemoryReference, Qubit,
    StandardGate,
};
use crate::quil::{Quil, ToQuilError};

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("qubit {qubit} is outside the {num_lines}-qubit register")]
    QubitOutOfRange { qubit: Qubit, num_lines: u64 },

    #[error("{reference} is not a slot of the declared readout region `{region}`")]
    UndeclaredMemory {
        reference: MemoryReference,
        region: String,
    },

    #[error("{0}")]
    GateError(#[from] GateError),
}

type Result<T> = std::result::Result<T, SequenceError>;

/// A coherence sequence describes one circuit of a batch.
///
/// It owns a register of `num_lines` qubits and one readout region; every instruction added to
/// it must stay inside both.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    pub name: String,
    num_lines: u64,
    readout: Declaration,
    instructions: Vec<Instruction>,
}

impl Sequence {
    pub fn new(name: impl Into<String>, num_lines: u64, readout: Declaration) -> Self {
        Sequence {
            name: name.into(),
            num_lines,
            readout,
            instructions: vec![],
        }
    }

    pub fn num_lines(&self) -> u64 {
        self.num_lines
    }

    pub fn readout(&self) -> &Declaration {
        &self.readout
    }

    /// Returns the instructions that make up the body of the sequence.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Add an instruction to the end of the sequence.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the sequence unchanged, if the instruction addresses a qubit
    /// outside the register or a readout slot outside the declared region.
    pub fn add_instruction(&mut self, instruction: impl Into<Instruction>) -> Result<()> {
        let instruction = instruction.into();

        if let Some(&&qubit) = instruction
            .get_qubits()
            .iter()
            .find(|qubit| qubit.index() >= self.num_lines)
        {
            return Err(SequenceError::QubitOutOfRange {
                qubit,
                num_lines: self.num_lines,
            });
        }
        if let Some(reference) = instruction.get_memory_target() {
            if !self.readout.contains(reference) {
                return Err(SequenceError::UndeclaredMemory {
                    reference: reference.clone(),
                    region: self.readout.name.clone(),
                });
            }
        }

        self.instructions.push(instruction);
        Ok(())
    }

    /// Append `count` idle steps on `qubit`.
    pub fn pad_identities(&mut self, qubit: Qubit, count: u64) -> Result<()> {
        (0..count).try_for_each(|_| self.add_instruction(Gate::identity(qubit)))
    }

    /// Append a fence across every line of the register.
    pub fn fence_all(&mut self) -> Result<()> {
        self.add_instruction(Fence::all_lines(self.num_lines))
    }

    /// Append a measurement of `qubit` into slot `slot` of the readout region.
    pub fn measure(&mut self, qubit: Qubit, slot: u64) -> Result<()> {
        let target = MemoryReference::new(self.readout.name.clone(), slot);
        self.add_instruction(Measurement::new(qubit, target))
    }

    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::Gate(gate) => Some(gate),
            _ => None,
        })
    }

    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::Measurement(measurement) => Some(measurement),
            _ => None,
        })
    }

    pub fn fences(&self) -> impl Iterator<Item = &Fence> {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::Fence(fence) => Some(fence),
            _ => None,
        })
    }

    /// The number of `kind` gates applied to `qubit`.
    pub fn count_gates(&self, kind: StandardGate, qubit: Qubit) -> usize {
        self.gates()
            .filter(|gate| gate.kind() == kind && gate.acts_on(qubit))
            .count()
    }

    /// The unitary applied to `qubit` by its gates, in sequence order.
    ///
    /// Every gate here acts on a single qubit, so this is the whole evolution of that line before
    /// it is measured.
    pub fn line_unitary(&self, qubit: Qubit) -> Result<Matrix> {
        self.gates()
            .filter(|gate| gate.acts_on(qubit))
            .try_fold(Matrix::eye(2), |acc, gate| Ok(gate.to_matrix()?.dot(&acc)))
    }
}

impl Quil for Sequence {
    fn write(
        &self,
        writer: &mut impl std::fmt::Write,
        fall_back_to_debug: bool,
    ) -> std::result::Result<(), ToQuilError> {
        self.readout.write(writer, fall_back_to_debug)?;
        writeln!(writer)?;
        for instruction in &self.instructions {
            instruction.write(writer, fall_back_to_debug)?;
            writeln!(writer)?;
        }
        Ok(())
    }
}

impl Serialize for Sequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let quil = self.to_quil().map_err(S::Error::custom)?;
        let mut state = serializer.serialize_struct("Sequence", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("num_lines", &self.num_lines)?;
        state.serialize_field("quil", &quil)?;
        state.end()
    }
}

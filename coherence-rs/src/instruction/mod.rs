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

//! The operations a coherence sequence is made of.

use crate::expression::Expression;
use crate::quil::{write_join_quil, Quil, ToQuilResult};

mod declaration;
mod gate;
mod measurement;
mod qubit;
mod timing;

pub use self::declaration::{Declaration, MemoryReference};
pub use self::gate::{Gate, GateError, Matrix, StandardGate};
pub use self::measurement::Measurement;
pub use self::qubit::Qubit;
pub use self::timing::Fence;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    Fence(Fence),
    Gate(Gate),
    Measurement(Measurement),
}

impl Instruction {
    /// The qubits this instruction acts on, in operand order.
    pub fn get_qubits(&self) -> Vec<&Qubit> {
        match self {
            Instruction::Fence(fence) => fence.qubits.iter().collect(),
            Instruction::Gate(gate) => gate.qubits().iter().collect(),
            Instruction::Measurement(measurement) => vec![&measurement.qubit],
        }
    }

    /// The readout slot written by this instruction, if any.
    pub fn get_memory_target(&self) -> Option<&MemoryReference> {
        match self {
            Instruction::Measurement(measurement) => Some(&measurement.target),
            Instruction::Fence(_) | Instruction::Gate(_) => None,
        }
    }
}

impl From<Fence> for Instruction {
    fn from(fence: Fence) -> Self {
        Instruction::Fence(fence)
    }
}

impl From<Gate> for Instruction {
    fn from(gate: Gate) -> Self {
        Instruction::Gate(gate)
    }
}

impl From<Measurement> for Instruction {
    fn from(measurement: Measurement) -> Self {
        Instruction::Measurement(measurement)
    }
}

impl Quil for Instruction {
    fn write(
        &self,
        f: &mut impl std::fmt::Write,
        fall_back_to_debug: bool,
    ) -> Result<(), crate::quil::ToQuilError> {
        match self {
            Instruction::Fence(fence) => fence.write(f, fall_back_to_debug),
            Instruction::Gate(gate) => gate.write(f, fall_back_to_debug),
            Instruction::Measurement(measurement) => measurement.write(f, fall_back_to_debug),
        }
    }
}

/// Write a list of qubits, with each prefixed by a space (including the first)
fn write_qubits(
    f: &mut impl std::fmt::Write,
    fall_back_to_debug: bool,
    qubits: &[Qubit],
) -> ToQuilResult<()> {
    for qubit in qubits {
        write!(f, " ")?;
        qubit.write(f, fall_back_to_debug)?;
    }
    Ok(())
}

fn write_expression_parameter_string(
    f: &mut impl std::fmt::Write,
    fall_back_to_debug: bool,
    parameters: &[Expression],
) -> ToQuilResult<()> {
    if parameters.is_empty() {
        return Ok(());
    }

    write!(f, "(")?;
    write_join_quil(f, fall_back_to_debug, parameters, ", ", "")?;
    write!(f, ")")?;
    Ok(())
}

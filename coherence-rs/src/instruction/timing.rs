use super::{write_qubits, Qubit};
use crate::quil::Quil;

/// A barrier: no operation may be moved across it on any of its qubits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fence {
    pub qubits: Vec<Qubit>,
}

impl Quil for Fence {
    fn write(
        &self,
        writer: &mut impl std::fmt::Write,
        fall_back_to_debug: bool,
    ) -> Result<(), crate::quil::ToQuilError> {
        write!(writer, "FENCE")?;
        write_qubits(writer, fall_back_to_debug, &self.qubits)
    }
}

impl Fence {
    pub fn new(qubits: Vec<Qubit>) -> Self {
        Self { qubits }
    }

    /// A fence across every line of a `num_lines`-qubit register.
    pub fn all_lines(num_lines: u64) -> Self {
        Self::new((0..num_lines).map(Qubit::new).collect())
    }
}

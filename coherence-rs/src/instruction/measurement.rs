use crate::quil::Quil;

use super::{MemoryReference, Qubit};

/// Binds the final state of one qubit to one readout slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Measurement {
    pub qubit: Qubit,
    pub target: MemoryReference,
}

impl Measurement {
    pub fn new(qubit: Qubit, target: MemoryReference) -> Self {
        Self { qubit, target }
    }
}

impl Quil for Measurement {
    fn write(
        &self,
        writer: &mut impl std::fmt::Write,
        fall_back_to_debug: bool,
    ) -> Result<(), crate::quil::ToQuilError> {
        write!(writer, "MEASURE ")?;
        self.qubit.write(writer, fall_back_to_debug)?;
        write!(writer, " ")?;
        self.target.write(writer, fall_back_to_debug)
    }
}

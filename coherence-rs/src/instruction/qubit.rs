use crate::quil::{Quil, ToQuilResult};

/// A fixed qubit index on the processor.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Qubit(u64);

impl Qubit {
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Qubit {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

impl Quil for Qubit {
    fn write(&self, writer: &mut impl std::fmt::Write, _fall_back_to_debug: bool) -> ToQuilResult<()> {
        write!(writer, "{}", self.0).map_err(Into::into)
    }
}

impl std::fmt::Display for Qubit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

use crate::quil::{Quil, ToQuilResult};

/// A classical `BIT` region, e.g. the `ro` bits measurements are written into.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub name: String,
    pub length: u64,
}

impl Declaration {
    /// A region with one slot per measured qubit.
    pub fn readout(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    /// Whether `reference` addresses a slot inside this region.
    pub fn contains(&self, reference: &MemoryReference) -> bool {
        reference.name == self.name && reference.index < self.length
    }
}

impl Quil for Declaration {
    fn write(&self, f: &mut impl std::fmt::Write, _fall_back_to_debug: bool) -> ToQuilResult<()> {
        write!(f, "DECLARE {} BIT[{}]", self.name, self.length).map_err(Into::into)
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MemoryReference {
    pub name: String,
    pub index: u64,
}

impl MemoryReference {
    pub fn new(name: impl Into<String>, index: u64) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

impl Quil for MemoryReference {
    fn write(&self, f: &mut impl std::fmt::Write, _fall_back_to_debug: bool) -> ToQuilResult<()> {
        write!(f, "{}[{}]", self.name, self.index).map_err(Into::into)
    }
}

impl std::fmt::Display for MemoryReference {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}[{}]", self.name, self.index)
    }
}

#[cfg(test)]
mod test {
    use super::{Declaration, MemoryReference};
    use crate::quil::Quil;

    #[test]
    fn readout_declaration() {
        let declaration = Declaration::readout("ro", 3);
        assert_eq!(declaration.to_quil().unwrap(), "DECLARE ro BIT[3]");
        assert!(declaration.contains(&MemoryReference::new("ro", 2)));
        assert!(!declaration.contains(&MemoryReference::new("ro", 3)));
        assert!(!declaration.contains(&MemoryReference::new("theta", 0)));
    }
}

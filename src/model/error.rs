use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("atom index {index} is out of bounds for a topology of {natoms} atoms")]
    InvalidIndex { index: usize, natoms: usize },

    #[error("cannot bond atom {index} to itself")]
    SelfBonded { index: usize },

    #[error("atom {index} already belongs to another residue")]
    ResidueOverlap { index: usize },
}

impl Error {
    pub fn invalid_index(index: usize, natoms: usize) -> Self {
        Self::InvalidIndex { index, natoms }
    }
}

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("parse error at byte {position}: {message}")]
    Parse { message: String, position: usize },

    #[error("reference #{reference} is out of range for a selection of arity {arity}")]
    InvalidReference { reference: u8, arity: u8 },

    #[error("cannot evaluate '{function}' without a geometry provider")]
    GeometryUnavailable { function: &'static str },
}

impl Error {
    pub fn parse(message: impl Into<String>, position: usize) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }
}

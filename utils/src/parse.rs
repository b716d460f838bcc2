use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} comma-separated values, found {found} in {input:?}")]
    ComponentCount {
        expected: &'static str,
        found: usize,
        input: String,
    },

    #[error("bad integer component: {0}")]
    Int(#[from] ParseIntError),

    #[error("bad float component: {0}")]
    Float(#[from] ParseFloatError),
}

pub(crate) fn components(input: &str) -> impl Iterator<Item = &str> {
    //! splits "a, b,c" style lists into trimmed components.
    input.split(',').map(str::trim)
}

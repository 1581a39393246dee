#![warn(missing_docs)]
//! Ocellus specific error structures
use std::{error::Error, fmt::Display};

/// Ocellus application specific Result type
pub type OclResult<T> = std::result::Result<T, OcellusError>;

/// Errors that can be returned by various Ocellus functions.
///
/// Note that the expected per-ray outcomes (geometric miss, total internal
/// reflection, iris absorption) are *not* errors. They are modelled as enum
/// variants of the respective interaction results and simply shorten a ray
/// path.
#[derive(Debug, PartialEq, Eq)]
pub enum OcellusError {
    /// invalid optical parameter snapshot (non-positive lengths, indices < 1.0, ...)
    Parameters(String),
    /// error while deriving or constructing a surface descriptor
    Geometry(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for OcellusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parameters(m) => {
                write!(f, "Parameters:{m}")
            }
            Self::Geometry(m) => {
                write!(f, "Geometry:{m}")
            }
            Self::Other(m) => write!(f, "Ocellus Error:Other:{m}"),
        }
    }
}
impl Error for OcellusError {}

impl std::convert::From<String> for OcellusError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}

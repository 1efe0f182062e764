use std::fmt;

use crate::model::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty identity, field listed twice, etc.).
    ConfigValidation(String),
    /// A record input element is not a JSON object.
    NotAnObject { side: Side, position: usize },
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::NotAnObject { side, position } => {
                write!(f, "{} record at position {position} is not an object", side.as_str())
            }
        }
    }
}

impl std::error::Error for DiffError {}

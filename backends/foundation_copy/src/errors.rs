use derive_more::derive::From;
use thiserror::Error;

use crate::path::ValuePath;
use crate::value::ValueKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CopyError {
    #[error("cannot copy {kind} `{name}` at {path}: it has no structural representation")]
    Unsupported {
        path: ValuePath,
        kind: ValueKind,
        name: String,
    },

    #[error("cyclic reference at {path}")]
    Cycle { path: ValuePath },

    #[error("nesting at {path} exceeds the depth limit of {limit}")]
    DepthExceeded { path: ValuePath, limit: usize },

    #[error("cannot move out of a {kind}: only arrays and objects can be moved")]
    NotAContainer { kind: ValueKind },

    #[error("expected {expected}, found {found}")]
    KindMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("non-finite number at {path} has no JSON representation")]
    NonFiniteNumber { path: ValuePath },
}

pub type CopyResult<T> = std::result::Result<T, CopyError>;

// region -- ConfigError

#[derive(Debug, From)]
pub enum ConfigError {
    IOError(std::io::Error),

    DeserializationFailed(toml::de::Error),

    #[from(ignore)]
    InvalidLimit(&'static str),
}

// --- region: Error & Display boilerplate

impl std::error::Error for ConfigError {}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

// --- end region: Error & Display boilerplate

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// --- end region: ConfigError

use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`ValveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input text does not have the expected shape.
    Parse,
    /// The input is well formed but describes an inconsistent network.
    DataIntegrity,
    /// The search broke one of its own invariants.
    InvariantViolation,
    Io,
}

impl ErrorKind {
    /// Process exit status reported for errors of this kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            ErrorKind::Parse => 2,
            ErrorKind::DataIntegrity => 3,
            ErrorKind::InvariantViolation => 4,
            ErrorKind::Io => 5,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Parse => "parse error",
            ErrorKind::DataIntegrity => "invalid network",
            ErrorKind::InvariantViolation => "internal error",
            ErrorKind::Io => "i/o error",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum ValveError {
    #[error("line {line}: cannot parse valve description `{content}`")]
    Parse { line: usize, content: String },

    #[error("valve {0} is defined more than once")]
    DuplicateValve(String),

    #[error("unknown valve {0}")]
    UnknownValve(String),

    #[error("tunnel {from} -> {to} has no tunnel back")]
    AsymmetricTunnel { from: String, to: String },

    #[error("valve {to} is unreachable from {from}")]
    Unreachable { from: String, to: String },

    #[error("{count} valves with positive flow, at most {max} are supported")]
    TooManyValves { count: usize, max: usize },

    #[error("valve {0} activated twice in one schedule")]
    DoubleActivation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ValveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse { .. } => ErrorKind::Parse,
            Self::DuplicateValve(_)
            | Self::UnknownValve(_)
            | Self::AsymmetricTunnel { .. }
            | Self::Unreachable { .. }
            | Self::TooManyValves { .. } => ErrorKind::DataIntegrity,
            Self::DoubleActivation(_) => ErrorKind::InvariantViolation,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValveError>;

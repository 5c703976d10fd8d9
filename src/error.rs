use std::fmt;
use std::io;
use thiserror::Error;

/// The OS collaborator a query was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    MemoryStatus,
    FrequencyRegistry,
    HighResClock,
    CycleCounter,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::MemoryStatus => write!(f, "memory status"),
            SourceKind::FrequencyRegistry => write!(f, "frequency registry"),
            SourceKind::HighResClock => write!(f, "high-resolution clock"),
            SourceKind::CycleCounter => write!(f, "cycle counter"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// An OS query is absent or unsupported on this machine.
    #[error("{kind} source unavailable: {error}")]
    Unavailable {
        kind: SourceKind,
        #[source]
        error: io::Error,
    },
    /// Calibration could not produce a trustworthy value.
    #[error("clock frequency undetermined")]
    Undetermined,
    /// An override variable did not hold a valid value.
    #[error("invalid value {value:?} for {name}")]
    Config { name: &'static str, value: String },
}

impl Error {
    pub(crate) fn unavailable(kind: SourceKind, error: io::Error) -> Self {
        Error::Unavailable { kind, error }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

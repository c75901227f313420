/*
Error conditions raised by the particle world.

Every operation either succeeds completely or returns one of these before
touching the state it was asked to change.
 */

/// Coarse classification of a [`WorldError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Capacity,
    Parse,
    Io,
    Config,
}

#[derive(Debug)]
pub enum WorldError {
    InvalidArgument {
        reason: String,
    },
    Capacity {
        requested: usize,
        available: usize,
    },
    IndexOutOfRange {
        line: usize,
        index: usize,
        capacity: usize,
    },
    Parse {
        line: usize,
        reason: String,
    },
    Io {
        path: String,
        source: std::io::Error,
    },
    Config {
        path: String,
        reason: String,
    },
}

impl WorldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorldError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            WorldError::Capacity { .. } | WorldError::IndexOutOfRange { .. } => {
                ErrorKind::Capacity
            }
            WorldError::Parse { .. } => ErrorKind::Parse,
            WorldError::Io { .. } => ErrorKind::Io,
            WorldError::Config { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        WorldError::Parse {
            line,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            WorldError::Capacity {
                requested,
                available,
            } => write!(
                f,
                "box is too small to position all particles on a lattice: {requested} requested, {available} sites available"
            ),
            WorldError::IndexOutOfRange {
                line,
                index,
                capacity,
            } => write!(
                f,
                "problem in configuration import at line {line}: index {index} is not below the particle count {capacity}"
            ),
            WorldError::Parse { line, reason } => {
                write!(f, "problem in configuration import at line {line}: {reason}")
            }
            WorldError::Io { path, source } => {
                write!(f, "I/O error on `{path}`: {source}")
            }
            WorldError::Config { path, reason } => {
                write!(f, "invalid configuration `{path}`: {reason}")
            }
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type WorldResult<T> = Result<T, WorldError>;

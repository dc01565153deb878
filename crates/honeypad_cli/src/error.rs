use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

use honeypad_core::StoreError;

#[derive(Debug)]
pub enum CliError {
    Store(StoreError),
    Logging(String),
    Io(io::Error),
    Json(serde_json::Error),
    NoDataDir,
    NoteNotFound(String),
    InvalidNoteReference(String),
    NothingToUpdate,
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "failed to initialize logging: {message}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::NoDataDir => write!(
                f,
                "could not determine a data directory; pass --db-path or set HONEYPAD_DB"
            ),
            Self::NoteNotFound(reference) => write!(f, "no note found for `{reference}`"),
            Self::InvalidNoteReference(reference) => {
                write!(f, "`{reference}` is not a note id or note address")
            }
            Self::NothingToUpdate => write!(f, "pass --title and/or --body to edit a note"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

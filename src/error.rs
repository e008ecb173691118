use std::{io, path::PathBuf};

use thiserror::Error;

/// Broad category of a [`DictCsvError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Io,
    Parse,
    Lookup,
    Config,
}

#[derive(Error, Debug)]
pub enum DictCsvError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} has no header row", .path.display())]
    MissingHeader { path: PathBuf },
    #[error("malformed CSV in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("key field {key_field:?} is not in the header of {}", .path.display())]
    UnknownKeyField { path: PathBuf, key_field: String },
    #[error("no field names given for {}", .path.display())]
    EmptyFieldNames { path: PathBuf },
    #[error("invalid CSV options: {0}")]
    InvalidOptions(String),
}

/// Path reported in errors raised while reading from or writing to a plain
/// reader/writer instead of a file.
pub(crate) const READER_PATH: &str = "<reader>";

pub type Result<T> = std::result::Result<T, DictCsvError>;

impl DictCsvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DictCsvError::Io { .. } => ErrorKind::Io,
            DictCsvError::MissingHeader { .. } | DictCsvError::Parse { .. } => ErrorKind::Parse,
            DictCsvError::UnknownKeyField { .. } => ErrorKind::Lookup,
            DictCsvError::EmptyFieldNames { .. } | DictCsvError::InvalidOptions(_) => {
                ErrorKind::Config
            }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DictCsvError::Io {
            path: path.into(),
            source,
        }
    }

    /// Sort a `csv` error into the I/O or parse bucket.
    pub(crate) fn from_csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        let path = path.into();
        if !matches!(err.kind(), csv::ErrorKind::Io(_)) {
            return DictCsvError::Parse { path, source: err };
        }
        match err.into_kind() {
            csv::ErrorKind::Io(source) => DictCsvError::Io { path, source },
            // checked above
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        let err = DictCsvError::io("a.csv", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.kind(), ErrorKind::Io);

        let err = DictCsvError::MissingHeader {
            path: "a.csv".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.to_string(), "a.csv has no header row");

        let err = DictCsvError::UnknownKeyField {
            path: "a.csv".into(),
            key_field: "ID".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Lookup);

        let err = DictCsvError::EmptyFieldNames {
            path: "a.csv".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(
            err.to_string(),
            "key field \"ID\" is not in the header of a.csv"
        );
    }

    #[test]
    fn test_csv_io_error_maps_to_io() {
        let csv_err = csv::Error::from(io::Error::from(io::ErrorKind::PermissionDenied));
        let err = DictCsvError::from_csv("a.csv", csv_err);
        match err {
            DictCsvError::Io { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied)
            }
            other => panic!("expected Io, got {:?}", other),
        }
    }
}

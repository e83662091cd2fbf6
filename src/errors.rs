//! Error types shared by the registry and the persistence layer. Registry
//! failures are ordinary outcomes the caller is expected to branch on, while
//! store failures wrap whatever the filesystem or the decoders reported.

use std::path::Path;

use thiserror::Error;

/// Failure outcomes of registry mutations and queries.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    #[error("student '{id}' already exists")]
    AlreadyExists { id: String },
    #[error("student '{student_id}' is not enrolled in '{course_code}'")]
    NotEnrolled {
        student_id: String,
        course_code: String,
    },
    #[error("{0}")]
    Validation(String),
}

impl RegistryError {
    pub(crate) fn student_not_found(id: &str) -> Self {
        RegistryError::NotFound {
            kind: "student",
            id: id.to_string(),
        }
    }

    pub(crate) fn course_not_found(code: &str) -> Self {
        RegistryError::NotFound {
            kind: "course",
            id: code.to_string(),
        }
    }
}

/// Failures raised while saving or loading the data directory.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("snapshot error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("unsupported snapshot version {found} in '{path}'")]
    UnsupportedVersion { path: String, found: u32 },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }

    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        StoreError::Csv {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        StoreError::Json {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }
}

//! Crate-level error taxonomy.
//!
//! # Responsibility
//! - Represent failures that abort an index run (filesystem, traversal).
//!
//! # Invariants
//! - Remote lookup failures never surface here; they are carried by
//!   `remote::FetchOutcome` and resolved by the caller.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type IndexResult<T> = Result<T, IndexError>;

/// Fatal run error.
#[derive(Debug)]
pub enum IndexError {
    /// Filesystem operation failed on `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Directory traversal failed.
    Walk(walkdir::Error),
}

impl IndexError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Walk(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IndexError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Walk(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for IndexError {
    fn from(value: walkdir::Error) -> Self {
        Self::Walk(value)
    }
}

#[cfg(test)]
mod tests {
    use super::IndexError;
    use std::error::Error;

    #[test]
    fn io_error_display_includes_path() {
        let err = IndexError::io(
            "archives/aws/note.md",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let text = err.to_string();
        assert!(text.contains("archives/aws/note.md"));
        assert!(text.contains("denied"));
        assert!(err.source().is_some());
    }
}

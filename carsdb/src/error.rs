//! Error types and result definitions for the cars database.
//!
//! [`CarsDbError`] carries an [`ErrorKind`] classification together with a
//! static description, optional dynamic detail, an optional source error and
//! the callsite location captured at construction time. Row level rejections
//! during ingestion are not errors and never surface through this type.

use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Convenient result type for cars database operations using [`CarsDbError`].
pub type CarsDbResult<T> = Result<T, CarsDbError>;

/// Categories of errors that can occur while maintaining the dictionary.
///
/// Lease contention is intentionally absent: failing to acquire the refresh
/// lease is a normal branch of the refresh cycle, not a failure.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The local dataset file is missing or could not be read.
    DatasetIoError,
    /// The remote dataset retrieval failed.
    FetchFailed,
    /// The lease backend itself failed, as opposed to the lease being held.
    LeaseFailed,
    /// Configuration values are invalid.
    ConfigError,
    /// The refresh worker task panicked.
    RefreshWorkerPanic,
    /// Uncategorized failure.
    Unknown,
}

/// Main error type for cars database operations.
#[derive(Debug, Clone)]
pub struct CarsDbError {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    location: &'static Location<'static>,
}

impl CarsDbError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the callsite location captured when the error was created.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Attaches an originating [`error::Error`] and returns the modified
    /// instance.
    ///
    /// The stored source is preserved across clones and exposed via
    /// [`error::Error::source`].
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Creates a [`CarsDbError`] from its components.
    #[track_caller]
    fn from_components(
        kind: ErrorKind,
        description: Cow<'static, str>,
        detail: Option<Cow<'static, str>>,
    ) -> Self {
        CarsDbError {
            kind,
            description,
            detail,
            source: None,
            location: Location::caller(),
        }
    }
}

/// Creates a [`CarsDbError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for CarsDbError {
    #[track_caller]
    fn from((kind, description): (ErrorKind, &'static str)) -> CarsDbError {
        CarsDbError::from_components(kind, Cow::Borrowed(description), None)
    }
}

/// Creates a [`CarsDbError`] from an error kind, static description, and
/// dynamic detail.
impl<D> From<(ErrorKind, &'static str, D)> for CarsDbError
where
    D: Into<Cow<'static, str>>,
{
    #[track_caller]
    fn from((kind, description, detail): (ErrorKind, &'static str, D)) -> CarsDbError {
        CarsDbError::from_components(kind, Cow::Borrowed(description), Some(detail.into()))
    }
}

impl PartialEq for CarsDbError {
    fn eq(&self, other: &CarsDbError) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for CarsDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "[{:?}] {} @ {}:{}:{}",
            self.kind,
            self.description,
            self.location.file(),
            self.location.line(),
            self.location.column()
        )?;

        if let Some(detail) = self.detail.as_deref() {
            write!(f, "\n  Detail: {detail}")?;
        }

        Ok(())
    }
}

impl error::Error for CarsDbError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source as &(dyn error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_compare_by_kind() {
        let a = CarsDbError::from((ErrorKind::DatasetIoError, "first"));
        let b = CarsDbError::from((ErrorKind::DatasetIoError, "second", "with detail"));
        let c = CarsDbError::from((ErrorKind::FetchFailed, "first"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_includes_kind_description_and_detail() {
        let err = CarsDbError::from((ErrorKind::FetchFailed, "Download failed", "status 503"));
        let rendered = err.to_string();

        assert!(rendered.contains("FetchFailed"));
        assert!(rendered.contains("Download failed"));
        assert!(rendered.contains("status 503"));
    }

    #[test]
    fn source_is_exposed_through_the_error_trait() {
        use std::error::Error;

        let io = std::io::Error::other("boom");
        let err = CarsDbError::from((ErrorKind::DatasetIoError, "Read failed")).with_source(io);

        assert!(err.source().is_some());
    }
}

use thiserror::Error;

/// Result alias used throughout arbor.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the runtime and widgets.
///
/// Every variant signals a programmer-visible defect; there is no retry
/// policy anywhere in the engine. Dead weak references (stale focus history,
/// unregistered nodes) are never errors; they are skipped.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A required piece of configuration is missing or duplicated: a
    /// composite without a produced child, a runtime initialized twice, a
    /// root mounted over an existing root.
    #[error("configuration: {0}")]
    Config(String),

    /// A lifecycle method was invoked out of order, e.g. drawing a widget
    /// that was never initialized.
    #[error("lifecycle: {0}")]
    Lifecycle(String),

    /// A logical address could not be resolved, e.g. an image that its
    /// provider cannot produce.
    #[error("resolve: {0}")]
    Resolve(String),

    /// A geometric invariant was violated.
    #[error("geometry: {0}")]
    Geometry(String),

    /// A collaborator backend failed.
    #[error("backend: {0}")]
    Backend(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Error::Geometry(e.to_string())
    }
}

use thiserror::Error;

/// Errors surfaced by the automation library.
///
/// Searches that exhaust their budget report `ElementNotFound` /
/// `WindowNotFound` only when the policy asked for an assertion; with
/// assertion disabled the search returns an empty result instead.
#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Window not found: {0}")]
    WindowNotFound(String),

    #[error("Element not ready: {0}")]
    ElementNotReady(String),

    /// A search was asked to start from the current window, but no window
    /// has been located yet.
    #[error("No current window: {0}")]
    MissingRoot(String),

    /// The underlying UI element was destroyed; the handle is stale.
    #[error("Element no longer available: {0}")]
    ElementNotAvailable(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A condition built from a blank string or otherwise unusable input.
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// The control does not support the requested capability pattern.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Operation cancelled: {0}")]
    OperationCancelled(String),

    #[error("Platform error: {0}")]
    PlatformError(String),
}

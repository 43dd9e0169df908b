/// Domain error shared by every crate in the workspace.
///
/// The HTTP layer maps each variant to a status code; see
/// `wander_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Credential exchange with an upstream provider failed.
    ///
    /// `context` is the caller-facing message; `detail` is for logs only.
    #[error("{context}: authentication failed: {detail}")]
    Auth { context: String, detail: String },

    /// A live provider call failed after a provider code was resolved.
    ///
    /// `message` is the provider's own error text when it sent one and is
    /// safe to surface to the caller.
    #[error("{context}: {detail}")]
    Upstream {
        context: String,
        message: Option<String>,
        detail: String,
    },
}

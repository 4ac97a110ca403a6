//! Per-request execution context carried through every collaborator call.

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Execution context for a single auth request
///
/// The use case never acts on the context itself; it forwards it to each
/// repository and service so that they can honour cancellation and tag
/// their logs with the request id.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Identifier used to correlate logs of one request
    pub request_id: Uuid,

    /// Cancellation signal owned by the caller
    pub cancel_token: CancellationToken,
}

impl RequestContext {
    /// Creates a context with a fresh request id and its own cancellation token
    pub fn new() -> Self {
        Self::with_cancel_token(CancellationToken::new())
    }

    /// Creates a context bound to a caller-owned cancellation token
    pub fn with_cancel_token(cancel_token: CancellationToken) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            cancel_token,
        }
    }

    /// Derives a context whose token is cancelled with this one, but which
    /// can also be cancelled on its own
    pub fn child(&self) -> Self {
        Self {
            request_id: self.request_id,
            cancel_token: self.cancel_token.child_token(),
        }
    }

    /// Checks if the caller has cancelled the request
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Returns `DomainError::Cancelled` once the request has been cancelled
    pub fn ensure_active(&self) -> DomainResult<()> {
        if self.is_cancelled() {
            Err(DomainError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use crate::error::{CancelReason, Error, Operation, Result};

/// Cancellation scope for a single device request.
///
/// Combines an explicit [`CancellationToken`] with an optional deadline.
/// Clones share the token, so any clone can cancel the request.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestScope {
    /// A scope that only ends when cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope that also ends once `timeout` has elapsed from now.
    /// A timeout too large to represent means no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the scope is cancelled or its deadline passes.
    pub async fn done(&self) -> CancelReason {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => CancelReason::Cancelled,
                _ = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                CancelReason::Cancelled
            }
        }
    }

    /// Drive `exchange` unless the scope ends first, in which case the
    /// exchange is dropped and [`Error::Cancelled`] is returned.
    pub async fn run<T, F>(&self, operation: Operation, exchange: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            biased;
            reason = self.done() => {
                tracing::debug!("{} aborted: {}", operation, reason);
                Err(Error::Cancelled { operation, reason })
            }
            result = exchange => result,
        }
    }
}

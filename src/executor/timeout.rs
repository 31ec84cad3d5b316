//! Deadline-bounded execution of blocking work.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

use crate::error::{LogError, Result};

// == Timeout Executor ==
/// Runs blocking work on tokio's blocking pool under a deadline.
///
/// Cancellation is cooperative: each unit of work receives a token and is
/// expected to poll it. When the deadline passes the caller gets
/// [`LogError::Timeout`] right away while the worker winds down on its own;
/// whatever it returns afterwards is discarded.
#[derive(Debug, Clone, Default)]
pub struct TimeoutExecutor {
    /// Parent of every per-call token; cancelled on shutdown
    root: CancellationToken,
}

impl TimeoutExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    // == Run With Timeout ==
    /// Runs `work` and waits at most `timeout` for its result.
    ///
    /// # Errors
    /// - [`LogError::Timeout`] if the deadline passes first, or if the work
    ///   reports [`LogError::Cancelled`]
    /// - the work's own error, unchanged, if it fails in time
    /// - [`LogError::Internal`] if the worker panics or the executor is shut down
    pub async fn run_with_timeout<T, F>(&self, work: F, timeout: Duration) -> Result<T>
    where
        F: FnOnce(CancellationToken) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        if self.root.is_cancelled() {
            return Err(LogError::Internal("Executor is shut down".to_string()));
        }

        let token = self.root.child_token();
        // Cancels the worker on every exit path, including this future being dropped
        let _cancel_on_exit = token.clone().drop_guard();

        let worker_token = token.clone();
        let handle = tokio::task::spawn_blocking(move || work(worker_token));

        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(LogError::Cancelled))) => Err(LogError::Timeout(timeout.as_millis())),
            Ok(Ok(Err(err))) => Err(err),
            Ok(Err(join_err)) => {
                error!("Worker task failed: {}", join_err);
                Err(LogError::Internal(format!("Worker task failed: {}", join_err)))
            }
            Err(_) => {
                token.cancel();
                warn!("Work exceeded deadline of {} ms, cancelled", timeout.as_millis());
                Err(LogError::Timeout(timeout.as_millis()))
            }
        }
    }

    // == Shutdown ==
    /// Cancels all in-flight work and refuses new work.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.root.is_cancelled()
    }
}

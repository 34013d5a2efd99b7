//! Cancellable in-flight requests.

use std::future::Future;

use anyhow::{Result, bail};
use tokio::task::JoinHandle;

/// Handle to a request running on its own task.
///
/// Dropping the handle or calling [`cancel`](Self::cancel) aborts the
/// request at its next suspension point (rate-limit wait, backoff, or I/O),
/// so a caller that no longer needs the result cannot observe a stale one.
#[derive(Debug)]
pub struct RequestHandle<T> {
    /// Spawned request task.
    task: JoinHandle<Result<T>>,
}

/// Spawns `request` on the current tokio runtime.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
pub fn spawn_request<T, F>(request: F) -> RequestHandle<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    RequestHandle {
        task: tokio::spawn(request),
    }
}

impl<T> RequestHandle<T> {
    /// Aborts the request.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Returns `true` once the request has settled or was cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the request to settle.
    ///
    /// Returns `Ok(None)` if the request was cancelled before settling.
    ///
    /// # Errors
    ///
    /// Returns the request's own error, or an error if its task panicked.
    pub async fn join(mut self) -> Result<Option<T>> {
        let joined = (&mut self.task).await;
        match joined {
            Ok(result) => result.map(Some),
            Err(e) if e.is_cancelled() => {
                tracing::debug!("Request cancelled");
                Ok(None)
            }
            Err(e) => bail!("request task failed: {e}"),
        }
    }
}

impl<T> Drop for RequestHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_join_returns_value() {
        // Arrange
        let handle = spawn_request(async { Ok(42) });

        // Act
        let value = handle.join().await.unwrap();

        // Assert
        assert_eq!(value, Some(42));
    }

    #[tokio::test]
    async fn test_join_returns_error() {
        // Arrange
        let handle: RequestHandle<u32> = spawn_request(async { bail!("Invalid token") });

        // Act
        let err = handle.join().await.unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[tokio::test]
    async fn test_cancel_discards_result() {
        // Arrange
        let completed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&completed);
        let handle = spawn_request(async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        // Act
        handle.cancel();
        let value = handle.join().await.unwrap();

        // Assert
        assert!(value.is_none());
        assert!(!completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drop_aborts_request() {
        // Arrange
        let completed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&completed);
        let handle = spawn_request(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        // Act
        drop(handle);
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Assert
        assert!(!completed.load(Ordering::SeqCst));
    }
}

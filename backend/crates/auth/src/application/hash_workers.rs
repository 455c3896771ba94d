//! Hash Workers
//!
//! Argon2id is deliberately slow and memory-hungry. Each computation runs on
//! the blocking thread pool, and a semaphore caps how many run at once so a
//! burst of requests queues instead of exhausting memory.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::{AuthError, AuthResult};

/// Bounded runner for hash computations
#[derive(Debug, Clone)]
pub struct HashWorkers {
    permits: Arc<Semaphore>,
}

impl HashWorkers {
    /// `max_concurrent` of zero is treated as one
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Run `job` on the blocking pool once a permit is free
    ///
    /// The permit is held until `job` finishes, even if the caller stops
    /// waiting.
    pub async fn run<F, T>(&self, job: F) -> AuthResult<T>
    where
        F: FnOnce() -> AuthResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AuthError::Internal("hash worker pool closed".into()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| AuthError::Internal(format!("hash worker failed: {}", e)))?
    }

    /// Permits currently free
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_returns_job_result() {
        let workers = HashWorkers::new(2);
        assert_eq!(workers.run(|| Ok(21 * 2)).await.unwrap(), 42);

        let err = workers
            .run(|| Err::<(), _>(AuthError::InvalidCredentials))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_permits_are_released() {
        let workers = HashWorkers::new(1);
        for _ in 0..3 {
            workers.run(|| Ok(())).await.unwrap();
        }
        assert_eq!(workers.available(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_second_job_waits_for_the_permit() {
        let workers = HashWorkers::new(1);
        let (started_tx, started_rx) = tokio::sync::oneshot::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

        let first = tokio::spawn({
            let workers = workers.clone();
            async move {
                workers
                    .run(move || {
                        let _ = started_tx.send(());
                        let _ = release_rx.recv();
                        Ok(1)
                    })
                    .await
            }
        });
        started_rx.await.unwrap();
        assert_eq!(workers.available(), 0);

        let second_started = Arc::new(AtomicBool::new(false));
        let second = tokio::spawn({
            let workers = workers.clone();
            let second_started = second_started.clone();
            async move {
                workers
                    .run(move || {
                        second_started.store(true, Ordering::SeqCst);
                        Ok(2)
                    })
                    .await
            }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!second_started.load(Ordering::SeqCst));
        assert_eq!(workers.available(), 0);

        release_tx.send(()).unwrap();
        assert_eq!(first.await.unwrap().unwrap(), 1);
        assert_eq!(second.await.unwrap().unwrap(), 2);
        assert!(second_started.load(Ordering::SeqCst));
        assert_eq!(workers.available(), 1);
    }

    #[tokio::test]
    async fn test_zero_is_clamped() {
        assert_eq!(HashWorkers::new(0).available(), 1);
    }

    #[tokio::test]
    async fn test_panicking_job_is_internal_error() {
        let workers = HashWorkers::new(1);
        let err = workers
            .run(|| -> AuthResult<()> { panic!("boom") })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(workers.available(), 1);
    }
}

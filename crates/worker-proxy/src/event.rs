//! Event-lifetime extension.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::BoxFuture;

/// Lifetime scope of one delivered event.
///
/// A handler registers every asynchronous side effect it wants guaranteed to
/// complete with [`EventScope::wait_until`]; the driver awaits them through
/// [`EventScope::settle`] after the handler returns. Work not registered here
/// may be silently abandoned once the handler's synchronous portion is done.
#[derive(Default)]
pub struct EventScope {
    tasks: Mutex<Vec<BoxFuture<'static, ()>>>,
}

impl EventScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the event alive until `task` completes.
    pub fn wait_until<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.lock_tasks().push(Box::pin(task));
    }

    /// Number of registered tasks still pending.
    pub fn pending(&self) -> usize {
        self.lock_tasks().len()
    }

    /// Await every registered task. Tasks registered while settling (for
    /// example by a task that itself calls `wait_until`) are awaited too.
    pub async fn settle(&self) {
        loop {
            let batch = std::mem::take(&mut *self.lock_tasks());
            if batch.is_empty() {
                return;
            }
            futures::future::join_all(batch).await;
        }
    }

    /// The registry survives a poisoned lock: discarding registered work
    /// would break the guarantee the scope exists to provide.
    fn lock_tasks(&self) -> MutexGuard<'_, Vec<BoxFuture<'static, ()>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_settle_runs_registered_tasks() {
        let scope = EventScope::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = Arc::clone(&counter);
            scope.wait_until(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(scope.pending(), 3);
        scope.settle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test]
    async fn test_settle_on_empty_scope() {
        let scope = EventScope::new();
        scope.settle().await;
        assert_eq!(scope.pending(), 0);
    }

    #[tokio::test]
    async fn test_scope_stays_usable_after_a_task_panics() {
        let scope = EventScope::new();
        scope.wait_until(async { panic!("task blew up") });

        let settled = futures::FutureExt::catch_unwind(std::panic::AssertUnwindSafe(
            scope.settle(),
        ))
        .await;
        assert!(settled.is_err());

        // Work registered afterwards is still guaranteed.
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        scope.wait_until(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        scope.settle().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }
}

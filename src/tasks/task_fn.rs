//! # Closure-backed tasks (`TaskFn`, `SyncFn`)
//!
//! [`TaskFn`] wraps `F: FnOnce() -> Fut` and produces the future on spawn.
//! [`SyncFn`] wraps `F: FnOnce() -> Result<T, E>` for computations that finish
//! immediately; the closure still runs only when the slot polls it.
//!
//! ## Example
//! ```rust
//! use taskclamp::{SyncFn, TaskError, TaskFn, TaskRef};
//!
//! let tasks: Vec<TaskRef<u32, TaskError>> = vec![
//!     TaskFn::boxed(|| async { Ok(1) }),
//!     SyncFn::boxed(|| Ok(2)),
//!     SyncFn::boxed(|| Err(TaskError::fail("three"))),
//! ];
//! assert_eq!(tasks.len(), 3);
//! ```

use std::future::Future;
use std::marker::PhantomData;

use crate::tasks::task::{BoxTaskFuture, Task, TaskRef};

/// Asynchronous closure-backed task.
pub struct TaskFn<F> {
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new closure-backed task.
    ///
    /// Prefer [`TaskFn::boxed`] when you immediately need a [`TaskRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the task and returns it as an owned [`TaskRef`].
    pub fn boxed<Fut, T, E>(f: F) -> TaskRef<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        Box::new(Self::new(f))
    }
}

impl<F, Fut, T, E> Task for TaskFn<F>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Error = E;

    fn spawn(self: Box<Self>) -> BoxTaskFuture<T, E> {
        Box::pin((self.f)())
    }
}

/// Immediate closure-backed task.
pub struct SyncFn<F, T, E> {
    f: F,
    _out: PhantomData<fn() -> (T, E)>,
}

impl<F, T, E> SyncFn<F, T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates a new immediate task.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _out: PhantomData,
        }
    }

    /// Creates the task and returns it as an owned [`TaskRef`].
    pub fn boxed(f: F) -> TaskRef<T, E> {
        Box::new(Self::new(f))
    }
}

impl<F, T, E> Task for SyncFn<F, T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Error = E;

    fn spawn(self: Box<Self>) -> BoxTaskFuture<T, E> {
        let f = self.f;
        Box::pin(async move { f() })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[tokio::test]
    async fn test_sync_fn_is_deferred_until_polled() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let task: TaskRef<u8, ()> = SyncFn::boxed(move || {
            flag.store(true, Ordering::SeqCst);
            Ok(7)
        });

        let fut = task.spawn();
        assert!(!ran.load(Ordering::SeqCst));
        assert_eq!(fut.await, Ok(7));
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_task_fn_yields_closure_result() {
        let ok: TaskRef<&str, &str> = TaskFn::boxed(|| async { Ok("zero") });
        let err: TaskRef<&str, &str> = TaskFn::boxed(|| async { Err("one") });
        assert_eq!(ok.spawn().await, Ok("zero"));
        assert_eq!(err.spawn().await, Err("one"));
    }
}

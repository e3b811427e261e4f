//! # Worker Pool
//! One bounded rayon pool per run, shared by every stage.
//!
//! Async callers hand closures to the pool with [`WorkerPool::run`] and await
//! the result on a oneshot channel, so the tokio scheduler only suspends at
//! that await while the CPU work happens on pool threads. A panic inside a
//! task comes back as [`CorpusError::TaskFailure`].

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tokio::sync::oneshot;

use crate::error::{CorpusError, Result};

#[derive(Clone)]
pub struct WorkerPool {
    inner: Arc<ThreadPool>,
}

impl WorkerPool {
    /// Build a pool with `workers` threads; `None` or `Some(0)` uses the
    /// available parallelism of the host.
    pub fn new(workers: Option<usize>) -> Result<Self> {
        let size = match workers {
            Some(n) if n > 0 => n,
            _ => default_size(),
        };
        let inner = ThreadPoolBuilder::new()
            .num_threads(size)
            .thread_name(|i| format!("corpus-worker-{i}"))
            .build()
            .map_err(|e| CorpusError::Pool(e.to_string()))?;
        tracing::debug!(target: "pipeline", workers = size, "worker pool ready");
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn size(&self) -> usize {
        self.inner.current_num_threads()
    }

    /// Queue `task` on the pool immediately and return a future for its
    /// result. Tasks are queued in call order.
    pub fn submit<F, R>(
        &self,
        name: &'static str,
        task: F,
    ) -> impl Future<Output = Result<R>> + Send + 'static
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.inner.spawn_fifo(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task));
            // receiver gone means the run already failed elsewhere
            let _ = tx.send(outcome);
        });

        async move {
            match rx.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(payload)) => {
                    let reason = panic_message(&*payload);
                    tracing::error!(target: "pipeline", task = name, %reason, "task panicked");
                    Err(CorpusError::task_failure(name, reason))
                }
                Err(_) => Err(CorpusError::task_failure(
                    name,
                    "worker dropped the task before reporting",
                )),
            }
        }
    }

    /// Run `task` on the pool and await its result.
    pub async fn run<F, R>(&self, name: &'static str, task: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.submit(name, task).await
    }

    /// Run `op` inside the pool on the calling thread, blocking until done.
    /// Parallel iterators inside `op` use this pool's threads.
    pub fn install<F, R>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.inner.install(op)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.size())
            .finish()
    }
}

fn default_size() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

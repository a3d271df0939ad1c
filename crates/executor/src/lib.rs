//! Batch execution for independent report requests.
//!
//! A batch is a `Vec` of owned work items and a closure applied to each one.
//! [`SyncExecutor`] runs the batch on the calling thread; [`RayonExecutor`]
//! (feature `rayon`) spreads it over a work-stealing pool. Either way the
//! outputs line up with the inputs.

#[cfg(feature = "rayon")]
mod rayon_executor;
mod sync_executor;

#[cfg(feature = "rayon")]
pub use rayon_executor::RayonExecutor;
pub use sync_executor::SyncExecutor;

pub trait Executor: Send + Sync {
    /// Applies `f` to every item; `out[i]` is `f(items[i])`.
    fn run_batch<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static;

    /// Upper bound on items processed at the same time.
    fn parallelism(&self) -> usize;

    fn name(&self) -> &'static str;
}

/// Closed set of executors, for holding one without generics.
///
/// `Executor` has generic methods and is therefore not object safe.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    Sync(SyncExecutor),
    #[cfg(feature = "rayon")]
    Rayon(RayonExecutor),
}

impl Executor for ExecutorImpl {
    fn run_batch<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        log::trace!("Running a batch of {} item(s) on the {} executor", items.len(), self.name());
        match self {
            ExecutorImpl::Sync(exec) => exec.run_batch(items, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.run_batch(items, f),
        }
    }

    fn parallelism(&self) -> usize {
        match self {
            ExecutorImpl::Sync(_) => 1,
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.parallelism(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExecutorImpl::Sync(exec) => exec.name(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.name(),
        }
    }
}

/// The pool when the `rayon` feature is on, sequential otherwise.
impl Default for ExecutorImpl {
    fn default() -> Self {
        #[cfg(feature = "rayon")]
        return ExecutorImpl::Rayon(RayonExecutor::new());
        #[cfg(not(feature = "rayon"))]
        return ExecutorImpl::Sync(SyncExecutor::new());
    }
}

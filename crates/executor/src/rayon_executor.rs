use crate::Executor;
use rayon::prelude::*;
use std::sync::Arc;

/// Spreads items over a rayon thread pool.
///
/// Without an explicit thread count the global pool is used.
#[derive(Clone, Debug, Default)]
pub struct RayonExecutor {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl RayonExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a dedicated pool of `threads` workers. Falls back to the global pool
    /// if the pool cannot be built.
    pub fn with_threads(threads: usize) -> Self {
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => Self { pool: Some(Arc::new(pool)) },
            Err(e) => {
                log::warn!("Failed to build a {}-thread pool ({}); using the global pool", threads, e);
                Self::default()
            }
        }
    }
}

impl Executor for RayonExecutor {
    fn run_batch<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        match &self.pool {
            Some(pool) => pool.install(|| items.into_par_iter().map(f).collect()),
            None => items.into_par_iter().map(f).collect(),
        }
    }

    fn parallelism(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn name(&self) -> &'static str {
        "rayon"
    }
}

use crate::error::Result;
use crate::partition::WorkRange;
use clap::ValueEnum;
use std::thread;
use tokio::runtime;
use tokio::task;
use tracing::{debug, trace};

/// Execution substrate for the per-range tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// One scoped OS thread per range.
    #[default]
    Threads,
    /// One `spawn_blocking` task per range on a tokio runtime.
    Tokio,
}

#[inline]
pub fn integrand(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

/// Midpoint-rule sum of the integrand over one range, in ascending index order.
/// Not yet scaled by `dx`.
pub fn local_sum(range: WorkRange, dx: f64) -> f64 {
    let mut sum = 0.0;
    for i in range.indices() {
        let x = (i as f64 + 0.5) * dx;
        sum += integrand(x);
    }
    sum
}

/// Adds the partial sums in slot order and scales by the interval width.
pub fn combine(partials: &[f64], dx: f64) -> f64 {
    partials.iter().fold(0.0, |acc, &p| acc + p) * dx
}

pub fn reduce(ranges: &[WorkRange], dx: f64, backend: Backend) -> Result<f64> {
    let partials = match backend {
        Backend::Threads => partial_sums_threads(ranges, dx),
        Backend::Tokio => partial_sums_blocking_pool(ranges, dx)?,
    };
    let total = combine(&partials, dx);
    debug!(tasks = partials.len(), total, "combined partial sums");
    Ok(total)
}

pub fn partial_sums_threads(ranges: &[WorkRange], dx: f64) -> Vec<f64> {
    fork_join_threads(ranges, move |range| local_sum(range, dx))
}

/// Same fork-join on tokio's blocking pool. Builds its own runtime, so it must
/// be called from synchronous code; inside a runtime use [`partial_sums_async`].
pub(crate) fn partial_sums_blocking_pool(ranges: &[WorkRange], dx: f64) -> Result<Vec<f64>> {
    run_on_blocking_pool(ranges, move |range| local_sum(range, dx))
}

pub async fn partial_sums_async(ranges: &[WorkRange], dx: f64) -> Vec<f64> {
    fork_join_blocking(ranges, move |range| local_sum(range, dx)).await
}

/// One scoped thread per range. Slot `t` is borrowed mutably by task `t` only;
/// joining every handle is the barrier, and a task panic is re-raised as-is.
fn fork_join_threads<F>(ranges: &[WorkRange], task: F) -> Vec<f64>
where
    F: Fn(WorkRange) -> f64 + Sync,
{
    let mut partials = vec![0.0; ranges.len()];
    let task = &task;

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(ranges.len());
        for (worker_id, (slot, range)) in partials.iter_mut().zip(ranges).enumerate() {
            let handle = s.spawn(move || {
                trace!(worker_id, start = range.start, end = range.end, "task started");
                *slot = task(*range);
                trace!(worker_id, "task done");
            });
            handles.push(handle);
        }

        for handle in handles {
            if let Err(payload) = handle.join() {
                std::panic::resume_unwind(payload);
            }
        }
    });

    partials
}

fn run_on_blocking_pool<F>(ranges: &[WorkRange], task: F) -> Result<Vec<f64>>
where
    F: Fn(WorkRange) -> f64 + Copy + Send + 'static,
{
    let rt = runtime::Builder::new_current_thread()
        .max_blocking_threads(ranges.len().max(1))
        .build()?;
    Ok(rt.block_on(fork_join_blocking(ranges, task)))
}

/// Handles are awaited in index order and each result lands in the slot of the
/// range that produced it.
async fn fork_join_blocking<F>(ranges: &[WorkRange], task: F) -> Vec<f64>
where
    F: Fn(WorkRange) -> f64 + Copy + Send + 'static,
{
    let mut handles = Vec::with_capacity(ranges.len());

    for (worker_id, range) in ranges.iter().copied().enumerate() {
        let handle = task::spawn_blocking(move || {
            trace!(worker_id, start = range.start, end = range.end, "task started");
            let sum = task(range);
            trace!(worker_id, "task done");
            sum
        });
        handles.push(handle);
    }

    let mut partials = vec![0.0; handles.len()];
    for (slot, handle) in partials.iter_mut().zip(handles) {
        *slot = match handle.await {
            Ok(sum) => sum,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => panic!("integration task did not complete: {e}"),
        };
    }
    partials
}

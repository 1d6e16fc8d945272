use crate::config::Config;
use crate::error::Result;
use crate::partition::{partition, WorkRange};
use crate::reduce::{local_sum, reduce, Backend};
use std::f64::consts::PI;
use std::time::{Duration, Instant};
use tracing::debug;

/// Outcome of one integration run.
#[derive(Debug, Clone, Copy)]
pub struct Estimate {
    pub estimate: f64,
    pub absolute_error: f64,
    pub elapsed: Duration,
}

pub fn estimate_pi(config: &Config, backend: Backend) -> Result<Estimate> {
    let start = Instant::now();

    let dx = 1.0 / config.steps as f64;
    let ranges = partition(config.steps, config.workers);
    debug!(ranges = ranges.len(), dx, ?backend, "partitioned work");

    let estimate = reduce(&ranges, dx, backend)?;
    let elapsed = start.elapsed();

    Ok(Estimate {
        estimate,
        absolute_error: (estimate - PI).abs(),
        elapsed,
    })
}

/// Single-threaded midpoint sum over `[0, steps)`, used as the reference the
/// parallel result is checked against.
pub fn sequential_estimate(steps: u64) -> f64 {
    let dx = 1.0 / steps as f64;
    local_sum(WorkRange { start: 0, end: steps }, dx) * dx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(steps: u64, workers: usize) -> Estimate {
        estimate_pi(&Config::new(steps, workers).unwrap(), Backend::Threads).unwrap()
    }

    #[test]
    fn million_steps_four_workers() {
        let result = run(1_000_000, 4);
        assert!((result.estimate - 3.14159265358979323846).abs() < 1e-6);
        assert_eq!(result.absolute_error, (result.estimate - PI).abs());
        assert!(result.elapsed > Duration::ZERO);
    }

    #[test]
    fn single_step_is_one_midpoint() {
        let result = run(1, 1);
        assert_eq!(result.estimate, 3.2);
    }

    #[test]
    fn error_shrinks_as_steps_grow() {
        let errors: Vec<f64> = [1_000, 10_000, 100_000]
            .into_iter()
            .map(|steps| run(steps, 4).absolute_error)
            .collect();
        assert!(errors[0] > errors[1], "{errors:?}");
        assert!(errors[1] > errors[2], "{errors:?}");
    }

    #[test]
    fn tokio_backend_matches_threads() {
        let config = Config::new(250_000, 3).unwrap();
        let threads = estimate_pi(&config, Backend::Threads).unwrap();
        let tokio = estimate_pi(&config, Backend::Tokio).unwrap();
        assert_eq!(threads.estimate.to_bits(), tokio.estimate.to_bits());
    }

    #[test]
    fn parallel_matches_sequential_reference() {
        let steps = 300_000;
        let reference = sequential_estimate(steps);
        for workers in [1, 2, 5, 8, 33] {
            let estimate = run(steps, workers).estimate;
            let rel = ((estimate - reference) / reference).abs();
            assert!(rel < 1e-9, "workers={workers}: {estimate} vs {reference}");
        }
        assert_eq!(run(steps, 1).estimate, reference);
    }

    #[test]
    fn sequential_single_step() {
        assert_eq!(sequential_estimate(1), 3.2);
    }
}

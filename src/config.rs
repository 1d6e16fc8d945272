use crate::error::{PiError, Result};
use std::thread;

pub const DEFAULT_STEPS: u64 = 100_000_000;

/// Validated run parameters. `workers` never exceeds `steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub steps: u64,
    pub workers: usize,
}

impl Config {
    pub fn new(steps: u64, workers: usize) -> Result<Self> {
        if steps == 0 {
            return Err(PiError::InvalidStepCount(steps.to_string()));
        }
        if workers == 0 {
            return Err(PiError::InvalidWorkerCount(workers.to_string()));
        }
        let workers = if workers as u64 > steps {
            steps as usize
        } else {
            workers
        };
        Ok(Config { steps, workers })
    }

    /// Builds a config from raw command-line values, falling back to defaults
    /// for missing ones.
    pub fn from_args(steps: Option<&str>, workers: Option<&str>) -> Result<Self> {
        let steps = match steps {
            Some(raw) => {
                parse_positive(raw).ok_or_else(|| PiError::InvalidStepCount(raw.to_string()))?
            }
            None => DEFAULT_STEPS,
        };
        let workers = match workers {
            Some(raw) => parse_positive(raw)
                .and_then(|w| usize::try_from(w).ok())
                .ok_or_else(|| PiError::InvalidWorkerCount(raw.to_string()))?,
            None => default_workers(),
        };
        Config::new(steps, workers)
    }
}

pub fn default_workers() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

fn parse_positive(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_args_missing() {
        let config = Config::from_args(None, None).unwrap();
        assert_eq!(config.steps, DEFAULT_STEPS);
        assert_eq!(config.workers, default_workers().min(DEFAULT_STEPS as usize));
        assert!(config.workers >= 1);
    }

    #[test]
    fn workers_are_clamped_to_steps() {
        let config = Config::from_args(Some("3"), Some("16")).unwrap();
        assert_eq!(config, Config { steps: 3, workers: 3 });

        let config = Config::from_args(Some("1"), None).unwrap();
        assert_eq!(config.workers, 1);
    }

    #[test]
    fn rejects_bad_step_count() {
        for raw in ["abc", "0", "-5", "", "1.5", "12abc"] {
            match Config::from_args(Some(raw), Some("2")) {
                Err(PiError::InvalidStepCount(v)) => assert_eq!(v, raw),
                other => panic!("expected InvalidStepCount for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_bad_worker_count() {
        for raw in ["0", "many", "-1"] {
            assert!(matches!(
                Config::from_args(Some("100"), Some(raw)),
                Err(PiError::InvalidWorkerCount(_))
            ));
        }
    }

    #[test]
    fn step_count_is_checked_before_workers() {
        assert!(matches!(
            Config::from_args(Some("abc"), Some("0")),
            Err(PiError::InvalidStepCount(_))
        ));
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        let config = Config::from_args(Some(" 1000 "), Some("\t4")).unwrap();
        assert_eq!(config, Config { steps: 1000, workers: 4 });
    }

    #[test]
    fn new_rejects_zero() {
        assert!(matches!(Config::new(0, 1), Err(PiError::InvalidStepCount(_))));
        assert!(matches!(Config::new(1, 0), Err(PiError::InvalidWorkerCount(_))));
    }
}

use std::ops::Range;

/// Half-open index interval `[start, end)` handed to a single worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkRange {
    pub start: u64,
    pub end: u64,
}

impl WorkRange {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn indices(&self) -> Range<u64> {
        self.start..self.end
    }
}

/// Splits `[0, steps)` into `workers` contiguous ranges whose lengths differ by
/// at most one. The first `steps % workers` ranges carry the extra element.
///
/// `workers` is clamped to `1..=steps`, so no returned range is ever empty
/// unless `steps` is zero.
pub fn partition(steps: u64, workers: usize) -> Vec<WorkRange> {
    let workers = (workers as u64).clamp(1, steps.max(1));
    let base = steps / workers;
    let rem = steps % workers;

    (0..workers)
        .map(|t| {
            let start = t * base + t.min(rem);
            let len = base + u64::from(t < rem);
            WorkRange {
                start,
                end: start + len,
            }
        })
        .collect()
}

//! Depth plan derived from the single benchmark parameter `n`.

use crate::domain::error::{DomainError, DomainResult};

/// Default lower bound of the per-depth loop.
pub const DEFAULT_MIN_DEPTH: u32 = 4;

/// Largest accepted `max_depth`: the stretch tree (`max_depth + 1`) must
/// still have a node count that fits in `usize`.
pub const DEPTH_LIMIT: u32 = usize::BITS - 3;

/// One step of the per-depth loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    pub depth: u32,
    pub iterations: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthPlan {
    min_depth: u32,
    max_depth: u32,
}

impl DepthPlan {
    /// `max_depth = max(n, min_depth + 2)`.
    ///
    /// Every integer `n` is meaningful: anything below `min_depth + 2`,
    /// negative values included, selects the smallest plan.
    pub fn new(n: i64, min_depth: u32) -> DomainResult<Self> {
        let n = u32::try_from(n.max(0)).unwrap_or(u32::MAX);
        let max_depth = n.max(min_depth.saturating_add(2));
        if max_depth > DEPTH_LIMIT {
            return Err(DomainError::DepthOutOfRange {
                depth: max_depth,
                limit: DEPTH_LIMIT,
            });
        }
        Ok(Self {
            min_depth,
            max_depth,
        })
    }

    pub fn min_depth(&self) -> u32 {
        self.min_depth
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn stretch_depth(&self) -> u32 {
        self.max_depth + 1
    }

    pub fn long_lived_depth(&self) -> u32 {
        self.max_depth
    }

    /// Even-stepped depths from `min_depth` to `max_depth` inclusive, each
    /// with `2^(max_depth - depth + min_depth)` iterations.
    pub fn batches(&self) -> impl Iterator<Item = Batch> + '_ {
        (self.min_depth..=self.max_depth).step_by(2).map(|depth| Batch {
            depth,
            iterations: 1u64 << (self.max_depth - depth + self.min_depth),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_n_is_raised_to_min_depth_plus_two() {
        let plan = DepthPlan::new(0, DEFAULT_MIN_DEPTH).unwrap();
        assert_eq!(plan.max_depth(), 6);
        assert_eq!(plan.stretch_depth(), 7);
        let depths: Vec<u32> = plan.batches().map(|b| b.depth).collect();
        assert_eq!(depths, vec![4, 6]);
    }

    #[test]
    fn negative_n_selects_smallest_plan() {
        let plan = DepthPlan::new(-3, DEFAULT_MIN_DEPTH).unwrap();
        assert_eq!(plan, DepthPlan::new(0, DEFAULT_MIN_DEPTH).unwrap());
        assert_eq!(plan.max_depth(), 6);
    }

    #[test]
    fn odd_span_stops_below_max_depth() {
        let plan = DepthPlan::new(9, DEFAULT_MIN_DEPTH).unwrap();
        let batches: Vec<Batch> = plan.batches().collect();
        assert_eq!(
            batches,
            vec![
                Batch { depth: 4, iterations: 512 },
                Batch { depth: 6, iterations: 128 },
                Batch { depth: 8, iterations: 32 },
            ]
        );
    }

    #[test]
    fn depth_beyond_word_size_is_rejected() {
        assert_eq!(
            DepthPlan::new(i64::from(DEPTH_LIMIT) + 1, DEFAULT_MIN_DEPTH),
            Err(DomainError::DepthOutOfRange {
                depth: DEPTH_LIMIT + 1,
                limit: DEPTH_LIMIT
            })
        );
        assert!(DepthPlan::new(i64::from(DEPTH_LIMIT), DEFAULT_MIN_DEPTH).is_ok());
        assert!(DepthPlan::new(i64::MAX, DEFAULT_MIN_DEPTH).is_err());
    }
}

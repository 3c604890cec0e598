//! Strategy selection
//!
//! One algorithm is always hashed sequentially. Several algorithms share a
//! single pass unless the file is larger than the parallel threshold, in
//! which case each gets its own worker. Hints override the automatic rule.

use super::{
    HashingContext, HashingStrategy, MultipleStrategy, ParallelStrategy, SequentialStrategy,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Hints that can be provided to influence strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyHint {
    /// Always read the file once per algorithm
    PreferSequential,
    /// Always run one worker per algorithm
    PreferParallel,
    /// Let the selector decide from algorithm count and file size
    #[default]
    Automatic,
}

/// Selector for choosing the hashing strategy
#[derive(Debug, Clone, Default)]
pub struct StrategySelector {
    hint: StrategyHint,
}

impl StrategySelector {
    /// Create a new strategy selector with automatic selection
    pub fn new() -> Self {
        Self::with_hint(StrategyHint::Automatic)
    }

    /// Create a selector with a specific hint
    pub fn with_hint(hint: StrategyHint) -> Self {
        Self { hint }
    }

    /// The hint this selector applies
    pub fn hint(&self) -> StrategyHint {
        self.hint
    }

    /// Select the strategy for the given context
    pub fn select(&self, context: &HashingContext) -> Arc<dyn HashingStrategy> {
        let buffer_size = context.config.buffer_size;
        match self.hint {
            StrategyHint::PreferSequential => Arc::new(SequentialStrategy::new(buffer_size)),
            StrategyHint::PreferParallel => Arc::new(ParallelStrategy::new(buffer_size)),
            StrategyHint::Automatic => {
                if context.algorithms.len() <= 1 {
                    Arc::new(SequentialStrategy::new(buffer_size))
                } else if context.file_size > context.config.parallel_threshold {
                    Arc::new(ParallelStrategy::new(buffer_size))
                } else {
                    Arc::new(MultipleStrategy::new(buffer_size))
                }
            }
        }
    }
}

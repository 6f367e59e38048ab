//! Growth policies deciding the next capacity of a full array

use crate::config::GrowthStrategy;
use std::fmt;
use std::sync::Arc;

/// Maps the current capacity to the capacity of the replacement buffer
///
/// The policy is consulted only when an insertion finds the array full. It
/// must return a strictly larger value; a policy that does not is reported
/// as [`ArrayError::StalledGrowth`](crate::ArrayError::StalledGrowth) instead
/// of being called again.
///
/// # Examples
///
/// ```rust
/// use dynarray::GrowthPolicy;
///
/// let doubling = GrowthPolicy::doubling();
/// assert_eq!(doubling.next_capacity(10), 20);
///
/// let plus_one = GrowthPolicy::from_fn(|cap| cap + 1);
/// assert_eq!(plus_one.next_capacity(10), 11);
/// ```
#[derive(Clone)]
pub struct GrowthPolicy {
    grow: Arc<dyn Fn(usize) -> usize + Send + Sync>,
    label: &'static str,
}

impl GrowthPolicy {
    /// Double the capacity on every growth
    pub fn doubling() -> Self {
        GrowthStrategy::Doubling.into()
    }

    /// Wrap an arbitrary closure
    pub fn from_fn<F>(grow: F) -> Self
    where
        F: Fn(usize) -> usize + Send + Sync + 'static,
    {
        Self {
            grow: Arc::new(grow),
            label: "custom",
        }
    }

    /// Compute the capacity that follows `capacity`
    #[inline]
    pub fn next_capacity(&self, capacity: usize) -> usize {
        (self.grow)(capacity)
    }

    /// Short name for log lines and debug output
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::doubling()
    }
}

impl From<GrowthStrategy> for GrowthPolicy {
    fn from(strategy: GrowthStrategy) -> Self {
        let grow: Arc<dyn Fn(usize) -> usize + Send + Sync> = match strategy {
            GrowthStrategy::Doubling => Arc::new(|cap: usize| cap.saturating_mul(2)),
            // 103/64 ~ 1.609, always at least one slot more
            GrowthStrategy::GoldenRatio => Arc::new(|cap: usize| {
                (cap.saturating_mul(103) / 64).max(cap.saturating_add(1))
            }),
            GrowthStrategy::Linear { step } => Arc::new(move |cap: usize| cap.saturating_add(step)),
        };
        Self {
            grow,
            label: strategy.label(),
        }
    }
}

impl fmt::Debug for GrowthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GrowthPolicy").field(&self.label).finish()
    }
}

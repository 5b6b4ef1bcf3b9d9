/// Ordering applied to entries that share the same priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueStrategy {
    /// No ordering guarantee; equal priorities leave the heap in whatever
    /// order the sift operations produce.
    #[default]
    Unordered,
    /// First In, First Out - equal priorities are popped in insertion order.
    Fifo,
    /// Last In, First Out - equal priorities are popped in reverse insertion order.
    Lifo,
}

/// A rule for determining queue strategy based on priority.
#[derive(Debug, Clone)]
pub(crate) enum PriorityRule {
    /// Default strategy for all priorities not matched by other rules.
    Default(QueueStrategy),
    /// Strategy for an exact priority value.
    Exact(isize, QueueStrategy),
    /// Strategy for priorities within a range [min, max] (inclusive).
    Range(isize, isize, QueueStrategy),
}

/// Per-priority tie-breaking configuration for a
/// [`BoundedPriorityQueue`](crate::BoundedPriorityQueue).
///
/// ```rust
/// use bounded_sync::{PriorityConfig, QueueStrategy};
///
/// let config = PriorityConfig::new()
///     .default_strategy(QueueStrategy::Fifo)
///     .exact(0, QueueStrategy::Lifo);
///
/// assert_eq!(config.strategy_for_priority(0), QueueStrategy::Lifo);
/// assert_eq!(config.strategy_for_priority(3), QueueStrategy::Fifo);
/// ```
#[derive(Debug, Clone)]
pub struct PriorityConfig {
    pub(crate) rules: Vec<PriorityRule>,
}

impl PriorityConfig {
    /// Create a new empty priority configuration.
    ///
    /// Priorities not matched by any rule resolve to [`QueueStrategy::Unordered`].
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Set the default strategy for all priorities not matched by other rules.
    pub fn default_strategy(mut self, strategy: QueueStrategy) -> Self {
        self.rules.push(PriorityRule::Default(strategy));
        self
    }

    /// Set the strategy for an exact priority value.
    pub fn exact(mut self, priority: isize, strategy: QueueStrategy) -> Self {
        self.rules.push(PriorityRule::Exact(priority, strategy));
        self
    }

    /// Set the strategy for priorities greater than or equal to the threshold.
    pub fn greater_or_equal(mut self, threshold: isize, strategy: QueueStrategy) -> Self {
        self.rules
            .push(PriorityRule::Range(threshold, isize::MAX, strategy));
        self
    }

    /// Set the strategy for priorities greater than the threshold (exclusive).
    pub fn greater_than(mut self, threshold: isize, strategy: QueueStrategy) -> Self {
        let min = threshold.saturating_add(1);
        self.rules.push(PriorityRule::Range(min, isize::MAX, strategy));
        self
    }

    /// Set the strategy for priorities less than or equal to the threshold.
    pub fn less_or_equal(mut self, threshold: isize, strategy: QueueStrategy) -> Self {
        self.rules
            .push(PriorityRule::Range(isize::MIN, threshold, strategy));
        self
    }

    /// Set the strategy for priorities less than the threshold (exclusive).
    pub fn less_than(mut self, threshold: isize, strategy: QueueStrategy) -> Self {
        let max = threshold.saturating_sub(1);
        self.rules.push(PriorityRule::Range(isize::MIN, max, strategy));
        self
    }

    /// Set the strategy for priorities within a range [min, max] (inclusive).
    pub fn range(mut self, min: isize, max: isize, strategy: QueueStrategy) -> Self {
        self.rules.push(PriorityRule::Range(min, max, strategy));
        self
    }

    /// Resolve the strategy for a given priority.
    ///
    /// Rules are evaluated in the following order:
    /// 1. Exact matches
    /// 2. Range matches (first match wins)
    /// 3. Default strategy (last `default_strategy` call wins)
    pub(crate) fn resolve_strategy(&self, priority: isize) -> QueueStrategy {
        let mut default_strategy = QueueStrategy::Unordered;

        for rule in &self.rules {
            match rule {
                PriorityRule::Exact(p, strategy) if *p == priority => return *strategy,
                PriorityRule::Default(strategy) => default_strategy = *strategy,
                _ => {}
            }
        }

        for rule in &self.rules {
            match rule {
                PriorityRule::Range(min, max, strategy) if priority >= *min && priority <= *max => {
                    return *strategy
                }
                _ => {}
            }
        }

        default_strategy
    }

    /// Secondary heap key for an entry pushed with sequence number `seq`.
    ///
    /// Entries of equal priority always resolve to the same strategy, so
    /// comparing `(priority, tie_key)` pairs is consistent across the heap.
    pub(crate) fn tie_key(&self, priority: isize, seq: u64) -> u64 {
        match self.resolve_strategy(priority) {
            QueueStrategy::Unordered => 0,
            QueueStrategy::Fifo => seq,
            QueueStrategy::Lifo => u64::MAX - seq,
        }
    }

    /// Returns the strategy that would be used for the given priority.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bounded_sync::{PriorityConfig, QueueStrategy};
    ///
    /// let config = PriorityConfig::new().range(1, 4, QueueStrategy::Fifo);
    ///
    /// assert_eq!(config.strategy_for_priority(0), QueueStrategy::Unordered);
    /// assert_eq!(config.strategy_for_priority(2), QueueStrategy::Fifo);
    /// ```
    pub fn strategy_for_priority(&self, priority: isize) -> QueueStrategy {
        self.resolve_strategy(priority)
    }
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self::new().default_strategy(QueueStrategy::Unordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_unordered() {
        let config = PriorityConfig::new();
        assert_eq!(config.resolve_strategy(0), QueueStrategy::Unordered);
        assert_eq!(config.resolve_strategy(isize::MIN), QueueStrategy::Unordered);
    }

    #[test]
    fn test_exact_match() {
        let config = PriorityConfig::new()
            .default_strategy(QueueStrategy::Fifo)
            .exact(5, QueueStrategy::Lifo);

        assert_eq!(config.resolve_strategy(5), QueueStrategy::Lifo);
        assert_eq!(config.resolve_strategy(4), QueueStrategy::Fifo);
        assert_eq!(config.resolve_strategy(6), QueueStrategy::Fifo);
    }

    #[test]
    fn test_range_match() {
        let config = PriorityConfig::new()
            .default_strategy(QueueStrategy::Fifo)
            .range(1, 10, QueueStrategy::Lifo);

        assert_eq!(config.resolve_strategy(0), QueueStrategy::Fifo);
        assert_eq!(config.resolve_strategy(1), QueueStrategy::Lifo);
        assert_eq!(config.resolve_strategy(10), QueueStrategy::Lifo);
        assert_eq!(config.resolve_strategy(11), QueueStrategy::Fifo);
    }

    #[test]
    fn test_open_ranges() {
        let config = PriorityConfig::new()
            .greater_than(5, QueueStrategy::Lifo)
            .less_than(0, QueueStrategy::Fifo);

        assert_eq!(config.resolve_strategy(5), QueueStrategy::Unordered);
        assert_eq!(config.resolve_strategy(6), QueueStrategy::Lifo);
        assert_eq!(config.resolve_strategy(-1), QueueStrategy::Fifo);
        assert_eq!(config.resolve_strategy(0), QueueStrategy::Unordered);

        let config = PriorityConfig::new()
            .greater_or_equal(5, QueueStrategy::Lifo)
            .less_or_equal(0, QueueStrategy::Fifo);

        assert_eq!(config.resolve_strategy(5), QueueStrategy::Lifo);
        assert_eq!(config.resolve_strategy(0), QueueStrategy::Fifo);
        assert_eq!(config.resolve_strategy(3), QueueStrategy::Unordered);
    }

    #[test]
    fn test_exact_overrides_range() {
        let config = PriorityConfig::new()
            .greater_or_equal(5, QueueStrategy::Lifo)
            .exact(10, QueueStrategy::Fifo);

        assert_eq!(config.resolve_strategy(8), QueueStrategy::Lifo);
        assert_eq!(config.resolve_strategy(10), QueueStrategy::Fifo);
    }

    #[test]
    fn test_first_range_wins() {
        let config = PriorityConfig::new()
            .range(5, isize::MAX, QueueStrategy::Lifo)
            .range(10, isize::MAX, QueueStrategy::Fifo);

        assert_eq!(config.resolve_strategy(15), QueueStrategy::Lifo);
    }

    #[test]
    fn test_tie_key_orders_sequences() {
        let config = PriorityConfig::new()
            .exact(1, QueueStrategy::Fifo)
            .exact(2, QueueStrategy::Lifo);

        assert!(config.tie_key(1, 3) < config.tie_key(1, 4));
        assert!(config.tie_key(2, 3) > config.tie_key(2, 4));
        assert_eq!(config.tie_key(0, 3), config.tie_key(0, 4));
    }
}

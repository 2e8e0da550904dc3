//! Padded batch sizes for key-based batch loading.
//!
//! Padding the number of bound keys to a power of two keeps the number of
//! distinct statement shapes small, which keeps backend plan caches warm.

use tracing::warn;

/// Computes the number of keys to bind in one batched load.
pub trait BatchLoadSizingStrategy: Send + Sync + std::fmt::Debug {
    /// Returns the padded batch size for `key_count` keys spread over
    /// `key_columns` columns. `in_list_ceiling <= 0` means the backend
    /// imposes no limit.
    fn determine_optimal_batch_load_size(
        &self,
        key_columns: usize,
        key_count: usize,
        in_list_ceiling: i32,
    ) -> usize;
}

/// Power-of-two padding, capped by the IN-list ceiling for single-column keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBatchLoadSizing;

impl StandardBatchLoadSizing {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BatchLoadSizingStrategy for StandardBatchLoadSizing {
    fn determine_optimal_batch_load_size(
        &self,
        key_columns: usize,
        key_count: usize,
        in_list_ceiling: i32,
    ) -> usize {
        let padded = ceiling_power_of_two(key_count);
        // Tuple keys are not rendered as a single IN list.
        if key_columns > 1 {
            return padded;
        }
        let Ok(ceiling) = usize::try_from(in_list_ceiling) else {
            return padded;
        };
        if ceiling == 0 || padded < ceiling {
            padded
        } else if key_count < ceiling {
            warn!(
                key_count,
                ceiling, "Padding would exceed the IN-list ceiling; binding keys unpadded"
            );
            key_count
        } else {
            if key_count > ceiling {
                warn!(
                    key_count,
                    ceiling, "Key count exceeds the IN-list ceiling; batch clamped"
                );
            }
            ceiling
        }
    }
}

/// Smallest power of two that is `>= n`. Zero and one both yield one.
#[must_use]
pub const fn ceiling_power_of_two(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        n.next_power_of_two()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(columns: usize, keys: usize, ceiling: i32) -> usize {
        StandardBatchLoadSizing.determine_optimal_batch_load_size(columns, keys, ceiling)
    }

    #[test]
    fn test_ceiling_power_of_two() {
        let got: Vec<usize> = (0..=10).map(ceiling_power_of_two).collect();
        assert_eq!(got, vec![1, 1, 2, 4, 4, 8, 8, 8, 8, 16, 16]);
    }

    #[test]
    fn test_unbounded_padding() {
        let got: Vec<usize> = (1..=10).map(|n| size(1, n, 0)).collect();
        assert_eq!(got, vec![1, 2, 4, 4, 8, 8, 8, 8, 16, 16]);
        assert_eq!(size(1, 9, -1), 16);
    }

    #[test]
    fn test_ceiling_never_exceeded() {
        assert_eq!(size(1, 9, 8), 8);
        assert_eq!(size(1, 5, 7), 5);
        assert_eq!(size(1, 5, 9), 8);
        assert_eq!(size(1, 20, 8), 8);
    }

    #[test]
    fn test_key_count_equal_to_ceiling() {
        assert_eq!(size(1, 8, 8), 8);
        assert_eq!(size(1, 6, 6), 6);
    }

    #[test]
    fn test_tuple_keys_ignore_ceiling() {
        assert_eq!(size(2, 9, 8), 16);
        assert_eq!(size(3, 3, 2), 4);
    }
}

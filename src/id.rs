//! Snowflake-style identifier generation.
//!
//! Every parsed entity and layer is stamped with a unique, roughly
//! time-ordered string id: a millisecond timestamp relative to a fixed
//! epoch, shifted left 22 bits, combined with a node component and a 12-bit
//! per-millisecond sequence. Within one process no two calls ever return
//! the same id; the sequence increments inside a millisecond and the
//! generator waits out the clock when the sequence wraps.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{MapError, Result};

/// Default epoch: 2015-01-01T00:00:00Z in milliseconds.
pub const DEFAULT_EPOCH: u64 = 1_420_070_400_000;

/// Default node id.
pub const DEFAULT_NODE_ID: u16 = 1;

const MAX_NODE_ID: u16 = 1023;
const SEQUENCE_MASK: u16 = 4095;

struct ClockState {
    last_ts: Option<u64>,
    sequence: u16,
}

/// A unique id generator.
///
/// Callers construct one instance and share it; the timestamp/sequence pair
/// sits behind a mutex so concurrent `next` calls stay duplicate-free.
pub struct SnowflakeGenerator {
    epoch: u64,
    node_id: u16,
    state: Mutex<ClockState>,
    clock: Box<dyn Fn() -> u64 + Send + Sync>,
}

impl std::fmt::Debug for SnowflakeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowflakeGenerator")
            .field("epoch", &self.epoch)
            .field("node_id", &self.node_id)
            .finish()
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SnowflakeGenerator {
    /// Create a generator with the default epoch and node id.
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_EPOCH, DEFAULT_NODE_ID, Box::new(system_millis))
    }

    /// Create a generator with an explicit epoch (ms since the Unix epoch)
    /// and node id (0-1023).
    pub fn with_config(epoch: u64, node_id: u16) -> Result<Self> {
        if node_id > MAX_NODE_ID {
            return Err(MapError::Generator {
                message: format!("Invalid node id: {}", node_id),
                help: Some("Node ids range from 0 to 1023".to_string()),
            });
        }
        if epoch > system_millis() {
            return Err(MapError::Generator {
                message: format!("Invalid epoch: {}", epoch),
                help: Some("The epoch must not be in the future".to_string()),
            });
        }
        Ok(Self::with_clock(epoch, node_id, Box::new(system_millis)))
    }

    fn with_clock(epoch: u64, node_id: u16, clock: Box<dyn Fn() -> u64 + Send + Sync>) -> Self {
        Self {
            epoch,
            node_id,
            state: Mutex::new(ClockState {
                last_ts: None,
                sequence: 0,
            }),
            clock,
        }
    }

    /// Produce the next identifier.
    ///
    /// Fails if the clock moved backwards since the previous call or sits
    /// before the configured epoch; never retries on its own.
    pub fn next(&self) -> Result<String> {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut ts = (self.clock)();
        if let Some(last) = state.last_ts {
            if ts < last {
                return Err(MapError::Generator {
                    message: "Invalid clock ticks".to_string(),
                    help: Some("The system clock moved backwards".to_string()),
                });
            }
        }
        if ts < self.epoch {
            return Err(MapError::Generator {
                message: format!("Invalid epoch: {}", self.epoch),
                help: Some("The epoch must not be in the future".to_string()),
            });
        }

        if state.last_ts == Some(ts) {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                // Sequence exhausted within this millisecond; wait for the
                // clock to advance.
                while ts <= state.last_ts.unwrap_or(0) {
                    ts = (self.clock)();
                }
            }
        } else {
            state.sequence = 0;
        }
        state.last_ts = Some(ts);

        let value = (u128::from(ts - self.epoch) << 22)
            | u128::from(self.node_id >> 12)
            | u128::from(state.sequence);
        Ok(value.to_string())
    }
}

fn system_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_sequential_ids_distinct_and_non_decreasing() {
        let generator = SnowflakeGenerator::new();
        let mut seen = HashSet::new();
        let mut last: u128 = 0;
        for _ in 0..10_000 {
            let id = generator.next().unwrap();
            let value: u128 = id.parse().unwrap();
            assert!(value >= last, "ids must be non-decreasing");
            assert!(seen.insert(value), "ids must be unique");
            last = value;
        }
    }

    #[test]
    fn test_backward_clock_fails() {
        let ticks = vec![DEFAULT_EPOCH + 5_000, DEFAULT_EPOCH + 4_000];
        let cursor = AtomicUsize::new(0);
        let generator = SnowflakeGenerator::with_clock(
            DEFAULT_EPOCH,
            1,
            Box::new(move || {
                let i = cursor.fetch_add(1, Ordering::SeqCst);
                ticks[i.min(ticks.len() - 1)]
            }),
        );

        assert!(generator.next().is_ok());
        let err = generator.next().unwrap_err();
        assert!(err.to_string().contains("Invalid clock ticks"));
    }

    #[test]
    fn test_same_millisecond_increments_sequence() {
        let generator = SnowflakeGenerator::with_clock(
            0,
            1,
            Box::new(|| 1_000),
        );

        let a: u128 = generator.next().unwrap().parse().unwrap();
        let b: u128 = generator.next().unwrap().parse().unwrap();
        let c: u128 = generator.next().unwrap().parse().unwrap();
        assert_eq!(b, a + 1);
        assert_eq!(c, a + 2);
    }

    #[test]
    fn test_invalid_node_id() {
        let err = SnowflakeGenerator::with_config(DEFAULT_EPOCH, 1024).unwrap_err();
        assert!(err.to_string().contains("Invalid node id"));
    }

    #[test]
    fn test_future_epoch() {
        let err = SnowflakeGenerator::with_config(u64::MAX, 1).unwrap_err();
        assert!(err.to_string().contains("Invalid epoch"));
    }

    #[test]
    fn test_timestamp_occupies_high_bits() {
        let generator = SnowflakeGenerator::with_clock(0, 1, Box::new(|| 7));
        let id: u128 = generator.next().unwrap().parse().unwrap();
        assert_eq!(id >> 22, 7);
    }
}

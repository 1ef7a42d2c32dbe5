//! Nonce generation for EXMO API authentication.
//!
//! Every signed request carries a `nonce` body field that must never repeat
//! or decrease for a given API key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// The nonce must be strictly increasing for each request.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider that returns the current time in milliseconds.
///
/// When the clock has not advanced past the last issued nonce (two calls in
/// the same millisecond, or a clock step backwards), the provider busy-spins
/// re-reading the clock until it does. This burns CPU for at most the
/// remainder of the current millisecond on platforms with millisecond or
/// finer timer resolution. A clock stepped backwards spins until it catches
/// up with the last issued value.
///
/// The read-compare-write is a compare-and-swap, so a provider shared
/// between threads never hands out the same nonce twice.
pub struct MillisecondNonce {
    last_nonce: AtomicU64,
    clock: fn() -> u64,
}

impl MillisecondNonce {
    /// Create a new provider backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(current_time_millis)
    }

    /// Create a provider backed by a custom millisecond clock.
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(0),
            clock,
        }
    }
}

/// Milliseconds since the UNIX epoch.
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

impl Default for MillisecondNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for MillisecondNonce {
    fn next_nonce(&self) -> u64 {
        loop {
            let now = (self.clock)();
            let last = self.last_nonce.load(Ordering::Acquire);

            if now <= last {
                std::hint::spin_loop();
                continue;
            }

            if self
                .last_nonce
                .compare_exchange(last, now, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return now;
            }
            // Another thread issued a nonce in between. Re-read both values.
        }
    }
}

//! Task ID generation utilities.
//!
//! Task IDs are opaque strings made of:
//! 1. The current Unix time in milliseconds, in base 36
//! 2. Eight hex characters of per-process randomness
//!
//! The random part mixes in a process-wide counter, so two IDs generated in
//! the same millisecond still differ.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter mixed into every generated ID.
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render a number in lowercase base 36.
#[must_use]
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        // value % 36 < 36, so the index is always in range
        #[allow(clippy::cast_possible_truncation)]
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
#[allow(clippy::cast_possible_truncation)]
fn now_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_millis() as u64)
}

/// Generate an 8-character random hex suffix.
#[allow(clippy::cast_possible_truncation)]
fn random_suffix() -> String {
    let count = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u64(
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos() as u64),
    );
    hasher.write_u64(count);
    // Truncation is intentional - we only need entropy, not precision
    format!("{:08x}", hasher.finish() as u32)
}

/// Generate a fresh task ID.
#[must_use]
pub fn generate_task_id() -> String {
    format!("{}{}", to_base36(now_millis()), random_suffix())
}

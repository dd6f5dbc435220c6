//! Per-launch seed for field layout and creature draws.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static LAUNCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh seed from the clock, the process id and a per-process counter.
pub fn generate_runtime_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64);
    let counter = LAUNCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    splitmix64(nanos ^ u64::from(process::id()).rotate_left(32) ^ counter.rotate_left(11))
}

fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

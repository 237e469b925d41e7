//! Habit identifier generation.
//!
//! Ids are drawn from the OS random source and encoded base36. No lookup
//! against existing ids is made; collision odds are kept negligible by the
//! 64 bits of entropy instead.

use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn new_id() -> String {
    let mut bytes = [0u8; 8];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => {
            let high = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            let low = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
            format!("{}{}", to_base36(high.into()), to_base36(low.into()))
        }
        Err(err) => {
            warn!("os random source unavailable, using fallback id: {err}");
            fallback_id()
        }
    }
}

fn fallback_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let counter = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut rng = SmallRng::seed_from_u64(nanos as u64 ^ counter.rotate_left(32));
    let millis = (nanos / 1_000_000) as u64;
    format!("{}{}", to_base36(rng.next_u64()), to_base36(millis))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::with_capacity(13);
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

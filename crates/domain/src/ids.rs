use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static LAST_ID: AtomicU64 = AtomicU64::new(0);

/// Fresh record id: the current epoch-millisecond timestamp, bumped
/// past the previous id when two records land in the same
/// millisecond. Monotonic within one process run, which is all the
/// collision guarantee the single-user collections need. Ids are
/// opaque strings thereafter; display order never derives from them.
pub fn next_id() -> String {
    let now = Utc::now().timestamp_millis().max(0) as u64;
    let mut prev = LAST_ID.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(prev + 1);
        match LAST_ID.compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return candidate.to_string(),
            Err(actual) => prev = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = next_id();
        let b = next_id();
        let c = next_id();
        assert!(a < b || a.len() < b.len());
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(b.parse::<u64>().unwrap() < c.parse::<u64>().unwrap());
    }
}

//! Single-slot response cache with stale-payload fallback.
//!
//! Each API read surface owns one slot: a memoized payload and its write
//! time. Fresh hits never touch the store; a failed recompute serves the
//! previous payload instead of surfacing the failure, as long as one exists.
//! Invalidation expires the slot but keeps the payload around as fallback
//! material.

use std::sync::RwLock;
use std::time::{Duration, Instant};

use log::warn;

use crate::errors::Result;

/// Anything the sync orchestrator can expire after a refresh.
pub trait InvalidateCache: Send + Sync {
    fn invalidate(&self);
}

struct CachedPayload<T> {
    value: T,
    written_at: Instant,
    expired: bool,
}

struct Slot<T> {
    payload: Option<CachedPayload<T>>,
    last_error: Option<String>,
}

/// A single-slot, TTL-bounded memo for one endpoint's payload.
pub struct ResponseCache<T: Clone> {
    ttl: Duration,
    slot: RwLock<Slot<T>>,
}

impl<T: Clone> ResponseCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(Slot {
                payload: None,
                last_error: None,
            }),
        }
    }

    /// Returns the memoized payload while fresh; otherwise recomputes and
    /// replaces it. A failed recompute falls back to the stale payload when
    /// one exists (recording the failure), and propagates otherwise.
    pub fn get_or_refresh<F>(&self, compute: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        {
            let slot = self.slot.read().unwrap();
            if let Some(cached) = &slot.payload {
                if !cached.expired && cached.written_at.elapsed() < self.ttl {
                    return Ok(cached.value.clone());
                }
            }
        }

        match compute() {
            Ok(payload) => {
                let mut slot = self.slot.write().unwrap();
                slot.payload = Some(CachedPayload {
                    value: payload.clone(),
                    written_at: Instant::now(),
                    expired: false,
                });
                slot.last_error = None;
                Ok(payload)
            }
            Err(e) => {
                let mut slot = self.slot.write().unwrap();
                slot.last_error = Some(e.to_string());
                match &slot.payload {
                    Some(stale) => {
                        warn!("Recompute failed, serving stale payload: {}", e);
                        Ok(stale.value.clone())
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// Expires the memoized payload so the next read recomputes. The value
    /// itself is retained as stale-fallback material.
    pub fn invalidate(&self) {
        if let Some(cached) = self.slot.write().unwrap().payload.as_mut() {
            cached.expired = true;
        }
    }

    /// Age of the memoized payload, if any.
    pub fn age(&self) -> Option<Duration> {
        self.slot
            .read()
            .unwrap()
            .payload
            .as_ref()
            .map(|cached| cached.written_at.elapsed())
    }

    /// True when a payload (fresh or stale) is held.
    pub fn is_cached(&self) -> bool {
        self.slot.read().unwrap().payload.is_some()
    }

    /// The most recent recompute failure, for the health surface.
    pub fn last_error(&self) -> Option<String> {
        self.slot.read().unwrap().last_error.clone()
    }
}

impl<T: Clone + Send + Sync> InvalidateCache for ResponseCache<T> {
    fn invalidate(&self) {
        ResponseCache::invalidate(self);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::errors::Error;

    #[test]
    fn fresh_hits_do_not_recompute() {
        let cache: ResponseCache<String> = ResponseCache::new(Duration::from_secs(60));
        let calls = Rc::new(Cell::new(0));

        let counted = || {
            calls.set(calls.get() + 1);
            Ok("payload".to_string())
        };
        let first = cache.get_or_refresh(counted).unwrap();

        let second = cache
            .get_or_refresh(|| panic!("store must not be hit within the TTL"))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert!(cache.is_cached());
        assert!(cache.age().is_some());
    }

    #[test]
    fn expired_entries_recompute() {
        // Zero TTL: every read is an expiry.
        let cache: ResponseCache<i32> = ResponseCache::new(Duration::ZERO);
        assert_eq!(cache.get_or_refresh(|| Ok(1)).unwrap(), 1);
        assert_eq!(cache.get_or_refresh(|| Ok(2)).unwrap(), 2);
    }

    #[test]
    fn stale_payload_survives_a_failed_recompute() {
        let cache: ResponseCache<i32> = ResponseCache::new(Duration::ZERO);
        cache.get_or_refresh(|| Ok(7)).unwrap();

        let value = cache
            .get_or_refresh(|| Err(Error::Unexpected("store down".to_string())))
            .unwrap();

        assert_eq!(value, 7);
        assert_eq!(cache.last_error().unwrap(), "Unexpected error: store down");
    }

    #[test]
    fn failure_with_no_prior_payload_propagates() {
        let cache: ResponseCache<i32> = ResponseCache::new(Duration::from_secs(60));
        let result = cache.get_or_refresh(|| Err(Error::Unexpected("boom".to_string())));
        assert!(result.is_err());
        assert!(!cache.is_cached());
    }

    #[test]
    fn invalidation_forces_a_recompute_but_keeps_the_fallback() {
        let cache: ResponseCache<i32> = ResponseCache::new(Duration::from_secs(60));
        cache.get_or_refresh(|| Ok(1)).unwrap();

        cache.invalidate();
        assert!(cache.is_cached());
        assert_eq!(cache.get_or_refresh(|| Ok(2)).unwrap(), 2);

        // And the stale value still backs a failed recompute after expiry.
        cache.invalidate();
        let value = cache
            .get_or_refresh(|| Err(Error::Unexpected("down".to_string())))
            .unwrap();
        assert_eq!(value, 2);
    }
}

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Default number of units of work allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 3;

/// Point-in-time view of the limiter counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub active: usize,
    pub total_admitted: u64,
}

/// Non-blocking concurrency limiter.
///
/// Callers that find every slot taken are turned away immediately instead of
/// waiting; nothing is queued. Both counters live behind one lock, which is
/// held only for the check-and-increment or the decrement.
#[derive(Debug)]
pub struct AdmissionLimiter {
    max_concurrent: usize,
    counters: Mutex<Counters>,
    // Written inside the critical section, read without the lock by the
    // clients endpoint. May lag behind in-flight admissions.
    admitted_hint: AtomicU64,
}

impl AdmissionLimiter {
    /// A capacity of zero rejects every attempt.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent,
            counters: Mutex::new(Counters {
                active: 0,
                total_admitted: 0,
            }),
            admitted_hint: AtomicU64::new(0),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Admits one unit of work if a slot is free.
    ///
    /// Every `true` must be paired with exactly one [`release`](Self::release).
    /// Prefer [`try_acquire`](Self::try_acquire), which pairs them for you.
    pub fn try_admit(&self) -> bool {
        self.admit().is_ok()
    }

    /// Frees one slot and returns the counters as left behind.
    pub fn release(&self) -> Counters {
        let mut counters = self.counters.lock();
        if counters.active == 0 {
            warn!(
                total_admitted = counters.total_admitted,
                "release without a matching admission ignored"
            );
        } else {
            counters.active -= 1;
        }
        *counters
    }

    /// Admits one unit of work and hands back a permit that releases the slot
    /// when dropped. On rejection the counters observed at the time are
    /// returned instead.
    pub fn try_acquire(self: &Arc<Self>) -> Result<AdmissionPermit, Counters> {
        let admitted = self.admit()?;
        Ok(AdmissionPermit {
            limiter: Arc::clone(self),
            admitted,
            released: false,
        })
    }

    /// Both counters, read under the lock.
    pub fn snapshot(&self) -> Counters {
        *self.counters.lock()
    }

    /// Admitted count read without taking the lock. Diagnostic only: racing
    /// admissions may or may not be reflected.
    pub fn admitted_unsynchronized(&self) -> u64 {
        self.admitted_hint.load(Ordering::Relaxed)
    }

    fn admit(&self) -> Result<Counters, Counters> {
        let mut counters = self.counters.lock();
        if counters.active >= self.max_concurrent {
            return Err(*counters);
        }
        counters.active += 1;
        counters.total_admitted += 1;
        self.admitted_hint
            .store(counters.total_admitted, Ordering::Relaxed);
        Ok(*counters)
    }
}

/// A held slot in an [`AdmissionLimiter`]. Dropping it releases the slot, so
/// early returns, errors and panics all give capacity back.
#[derive(Debug)]
#[must_use = "dropping the permit releases the slot immediately"]
pub struct AdmissionPermit {
    limiter: Arc<AdmissionLimiter>,
    admitted: Counters,
    released: bool,
}

impl AdmissionPermit {
    /// Counters right after this permit was admitted.
    pub fn admitted(&self) -> Counters {
        self.admitted
    }

    /// Releases the slot now and returns the counters afterwards.
    pub fn release(mut self) -> Counters {
        self.released = true;
        self.limiter.release()
    }
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        if !self.released {
            self.limiter.release();
        }
    }
}

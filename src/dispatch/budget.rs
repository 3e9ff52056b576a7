//! Blocking cap on records queued or running in the pool.
//!
//! The reader takes a permit before submitting each record and the task drops
//! it when done, so memory held by pending records stays bounded no matter
//! how long the input is.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

#[derive(Debug)]
pub struct InFlightBudget {
    total: usize,
    avail: Mutex<usize>,
    cv: Condvar,
}

impl InFlightBudget {
    /// # Panics
    ///
    /// Panics if `total` is 0.
    pub fn new(total: usize) -> Arc<Self> {
        assert!(total > 0, "InFlightBudget capacity must be > 0");
        Arc::new(InFlightBudget {
            total,
            avail: Mutex::new(total),
            cv: Condvar::new(),
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Permits currently handed out.
    pub fn in_use(&self) -> usize {
        self.total - *self.lock()
    }

    /// Take a permit, blocking while all are in use.
    pub fn acquire(self: &Arc<Self>) -> Permit {
        let mut avail = self.lock();
        while *avail == 0 {
            avail = match self.cv.wait(avail) {
                Ok(guard) => guard,
                Err(poison) => poison.into_inner(),
            };
        }
        *avail -= 1;
        Permit {
            budget: Arc::clone(self),
        }
    }

    /// Poison-tolerant: a panicking task still has to give its permit back.
    fn lock(&self) -> MutexGuard<'_, usize> {
        match self.avail.lock() {
            Ok(guard) => guard,
            Err(poison) => poison.into_inner(),
        }
    }

    fn release(&self) {
        let mut avail = self.lock();
        debug_assert!(*avail < self.total, "permit released twice");
        *avail += 1;
        self.cv.notify_one();
    }
}

/// Returned to the budget on drop.
#[derive(Debug)]
pub struct Permit {
    budget: Arc<InFlightBudget>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.budget.release();
    }
}

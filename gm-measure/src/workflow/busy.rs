//! Re-entry guard for in-flight submissions

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Busy flag; doubles as the progress indicator state
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag unless it is already set
    ///
    /// The returned guard clears the flag when dropped, whatever the exit path.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                flag: Arc::clone(&self.0),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Holds the busy flag until dropped
#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_refused() {
        let flag = BusyFlag::new();
        let guard = flag.try_acquire();
        assert!(guard.is_some());
        assert!(flag.is_busy());
        assert!(flag.try_acquire().is_none());

        drop(guard);
        assert!(!flag.is_busy());
        assert!(flag.try_acquire().is_some());
    }

    #[test]
    fn test_released_on_early_return() {
        fn fails(flag: &BusyFlag) -> Result<(), &'static str> {
            let _guard = flag.try_acquire().ok_or("busy")?;
            Err("request failed")
        }

        let flag = BusyFlag::new();
        assert!(fails(&flag).is_err());
        assert!(!flag.is_busy());
    }

    #[test]
    fn test_released_on_panic() {
        let flag = BusyFlag::new();
        let inner = flag.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = inner.try_acquire().unwrap();
            panic!("boom");
        });
        assert!(result.is_err());
        assert!(!flag.is_busy());
    }
}

//! Stale-result suppression for overlapping lookups.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one lookup among many issued over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

/// Hands out tickets and remembers which one is the latest.
///
/// A lookup takes a ticket when it starts and checks it before presenting;
/// if a newer lookup started in the meantime, its results are dropped.
#[derive(Debug, Default)]
pub struct LookupTracker {
    latest: AtomicU64,
}

impl LookupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a lookup, superseding every earlier ticket.
    pub fn begin(&self) -> LookupTicket {
        LookupTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: LookupTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let tracker = LookupTracker::new();

        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[tokio::test]
    async fn concurrent_begins_leave_one_current() {
        let tracker = std::sync::Arc::new(LookupTracker::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let tracker = tracker.clone();
                tokio::spawn(async move { tracker.begin() })
            })
            .collect();

        let mut tickets = Vec::new();
        for handle in handles {
            tickets.push(handle.await.unwrap());
        }

        let current = tickets.iter().filter(|t| tracker.is_current(**t)).count();
        assert_eq!(current, 1);
    }
}

//! Liveness Guard
//!
//! Requests cannot be cancelled, so a response may arrive after its screen
//! is gone. Async completions check `is_alive()` before touching screen state.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use leptos::prelude::on_cleanup;

#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Guard tied to the current reactive owner (the mounted component)
    pub fn for_current_owner() -> Self {
        let liveness = Self::new();
        let handle = liveness.clone();
        on_cleanup(move || handle.retire());
        liveness
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn retire(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Orders repeated requests from one screen: only the newest ticket's
/// response is applied, earlier ones are dropped on arrival
#[derive(Clone, Debug, Default)]
pub struct RequestSeq(Arc<AtomicU32>);

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a request about to be sent
    pub fn next(&self) -> u32 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn is_current(&self, ticket: u32) -> bool {
        self.0.load(Ordering::Acquire) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::prelude::Owner;

    #[test]
    fn test_owner_cleanup_retires() {
        let owner = Owner::new();
        let liveness = owner.with(Liveness::for_current_owner);
        assert!(liveness.is_alive());
        owner.cleanup();
        assert!(!liveness.is_alive());
    }

    #[test]
    fn test_only_latest_request_is_current() {
        let seq = RequestSeq::new();
        let unfiltered = seq.next();
        let filtered = seq.next();
        // The slower, older response arrives last
        assert!(seq.is_current(filtered));
        assert!(!seq.is_current(unfiltered));

        let shared = seq.clone();
        let newest = shared.next();
        assert!(seq.is_current(newest));
        assert!(!seq.is_current(filtered));
    }

    #[test]
    fn test_retire_is_shared_by_clones() {
        let liveness = Liveness::new();
        let in_flight = liveness.clone();
        assert!(in_flight.is_alive());
        liveness.retire();
        assert!(!in_flight.is_alive());
    }
}

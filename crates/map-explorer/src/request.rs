//! Request tagging for asynchronous results.
//!
//! Every fetch that feeds a piece of session state first takes a [`RequestTag`]
//! from that state's [`Tracked`] slot. When the response lands it is handed back
//! together with its tag, and the slot decides whether it still applies.

/// How overlapping responses for the same slot are reconciled.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingPolicy {
    /// Only the response to the most recently issued request is applied.
    #[default]
    LastRequestWins,
    /// Every response is applied in arrival order, so a slow early request can
    /// overwrite a fast later one. Invalidating the slot still drops them.
    LastResponseWins,
}

/// Monotonic id of one issued request within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTag(u64);

impl RequestTag {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A value produced by asynchronous requests, with stale-result suppression.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    value: Option<T>,
    policy: OrderingPolicy,
    issued: u64,
    settled: u64,
    /// Requests tagged at or below this were invalidated and never apply
    barrier: u64,
    in_flight: usize,
}

impl<T> Tracked<T> {
    pub fn new(policy: OrderingPolicy) -> Self {
        Self {
            value: None,
            policy,
            issued: 0,
            settled: 0,
            barrier: 0,
            in_flight: 0,
        }
    }

    /// Issue a tag for a new request. The current value is kept.
    pub fn begin(&mut self) -> RequestTag {
        self.issued += 1;
        self.in_flight += 1;
        RequestTag(self.issued)
    }

    /// Apply a successful response. Returns `false` if it was discarded as stale.
    pub fn complete(&mut self, tag: RequestTag, value: Option<T>) -> bool {
        if !self.accept(tag) {
            return false;
        }
        self.value = value;
        true
    }

    /// Settle a failed request, keeping whatever value was there before.
    pub fn fail(&mut self, tag: RequestTag) -> bool {
        self.accept(tag)
    }

    /// Drop the value and make every pending request stale, whatever the policy.
    pub fn invalidate(&mut self) {
        self.issued += 1;
        self.settled = self.issued;
        self.barrier = self.issued;
        self.in_flight = 0;
        self.value = None;
    }

    /// `true` while a response that would be applied is still outstanding.
    pub fn is_loading(&self) -> bool {
        match self.policy {
            OrderingPolicy::LastRequestWins => self.settled < self.issued,
            OrderingPolicy::LastResponseWins => self.in_flight > 0,
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The value a renderer may draw: nothing while a newer response is pending.
    pub fn renderable(&self) -> Option<&T> {
        if self.is_loading() {
            None
        } else {
            self.value.as_ref()
        }
    }

    pub fn latest_tag(&self) -> Option<RequestTag> {
        (self.issued > 0).then_some(RequestTag(self.issued))
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn accept(&mut self, tag: RequestTag) -> bool {
        if tag.0 <= self.barrier {
            return false;
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        match self.policy {
            OrderingPolicy::LastRequestWins => {
                if tag.0 != self.issued {
                    return false;
                }
                self.settled = tag.0;
                true
            }
            OrderingPolicy::LastResponseWins => {
                self.settled = self.settled.max(tag.0);
                true
            }
        }
    }
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self::new(OrderingPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request_lifecycle() {
        let mut slot = Tracked::new(OrderingPolicy::LastRequestWins);
        assert!(!slot.is_loading());
        assert!(slot.latest_tag().is_none());

        let tag = slot.begin();
        assert!(slot.is_loading());
        assert_eq!(slot.latest_tag(), Some(tag));

        assert!(slot.complete(tag, Some("A")));
        assert!(!slot.is_loading());
        assert_eq!(slot.renderable(), Some(&"A"));
    }

    #[test]
    fn test_last_request_wins_discards_late_response() {
        let mut slot = Tracked::new(OrderingPolicy::LastRequestWins);
        let a = slot.begin();
        let b = slot.begin();

        assert!(slot.complete(b, Some("B")));
        assert!(!slot.complete(a, Some("A")));
        assert_eq!(slot.value(), Some(&"B"));
        assert!(!slot.is_loading());
        assert_eq!(slot.in_flight(), 0);
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut slot = Tracked::new(OrderingPolicy::LastRequestWins);
        let a = slot.begin();
        let b = slot.begin();

        assert!(!slot.complete(a, Some("A")));
        assert!(slot.is_loading());
        assert_eq!(slot.renderable(), None);

        assert!(slot.complete(b, Some("B")));
        assert_eq!(slot.renderable(), Some(&"B"));
    }

    #[test]
    fn test_last_response_wins_applies_arrival_order() {
        let mut slot = Tracked::new(OrderingPolicy::LastResponseWins);
        let a = slot.begin();
        let b = slot.begin();

        assert!(slot.complete(b, Some("B")));
        assert!(slot.is_loading());
        assert!(slot.complete(a, Some("A")));
        assert!(!slot.is_loading());
        assert_eq!(slot.renderable(), Some(&"A"));
    }

    #[test]
    fn test_failure_keeps_previous_value() {
        let mut slot = Tracked::new(OrderingPolicy::LastRequestWins);
        let first = slot.begin();
        slot.complete(first, Some(1));

        let second = slot.begin();
        assert_eq!(slot.renderable(), None);
        assert!(slot.fail(second));
        assert!(!slot.is_loading());
        assert_eq!(slot.renderable(), Some(&1));
    }

    #[test]
    fn test_invalidate_clears_and_drops_pending() {
        let mut slot = Tracked::new(OrderingPolicy::LastRequestWins);
        let first = slot.begin();
        slot.complete(first, Some(1));
        let pending = slot.begin();

        slot.invalidate();
        assert!(slot.value().is_none());
        assert!(!slot.is_loading());
        assert!(!slot.complete(pending, Some(2)));
        assert!(slot.value().is_none());
    }

    #[test]
    fn test_invalidate_is_a_barrier_for_last_response_wins() {
        let mut slot = Tracked::new(OrderingPolicy::LastResponseWins);
        let before = slot.begin();

        slot.invalidate();
        assert!(!slot.is_loading());
        assert!(!slot.complete(before, Some("late")));
        assert!(slot.value().is_none());
        assert_eq!(slot.in_flight(), 0);

        // Requests issued after the barrier still apply in arrival order
        let a = slot.begin();
        let b = slot.begin();
        assert!(slot.complete(b, Some("B")));
        assert!(slot.complete(a, Some("A")));
        assert_eq!(slot.renderable(), Some(&"A"));
    }
}

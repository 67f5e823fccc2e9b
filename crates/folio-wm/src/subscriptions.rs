//! Desktop-wide pointer listeners held by in-progress drags.
//!
//! A drag subscribes its window to pointer-move/pointer-up for as long as the
//! button is held. The desktop only forwards pointer moves to subscribed
//! windows, so a subscription that outlives its drag would keep moving a
//! window nobody is holding. Every path that ends a drag (pointer-up, the
//! window closing, the shell shutting down) must release it.

use crate::window::WindowId;

/// Handle for one live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy)]
struct Subscription {
    id: SubscriptionId,
    window: WindowId,
}

/// Registry of live pointer subscriptions.
#[derive(Debug, Default)]
pub struct PointerSubscriptions {
    live: Vec<Subscription>,
    next_id: u64,
}

impl PointerSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `window` for pointer-move/pointer-up delivery.
    pub fn subscribe(&mut self, window: WindowId) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.live.push(Subscription { id, window });
        log::debug!("pointer subscription {} for {window}", id.0);
        id
    }

    /// Drop one subscription. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.live.retain(|s| s.id != id);
    }

    /// Drop every subscription held by `window`.
    pub fn release_window(&mut self, window: WindowId) {
        self.live.retain(|s| s.window != window);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.live.clear();
    }

    /// Windows currently receiving pointer events, oldest subscription first.
    pub fn subscribers(&self) -> Vec<WindowId> {
        let mut out: Vec<WindowId> = Vec::with_capacity(self.live.len());
        for s in &self.live {
            if !out.contains(&s.window) {
                out.push(s.window);
            }
        }
        out
    }

    pub fn is_subscribed(&self, window: WindowId) -> bool {
        self.live.iter().any(|s| s.window == window)
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

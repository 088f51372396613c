// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A single cancellable scheduled action.
///
/// At most one action is pending at any time. [`Debounce::schedule`] cancels
/// whatever was pending before arming the new action, so the last request
/// always wins and nothing is queued.
#[derive(Clone, Debug)]
pub struct Debounce<A> {
    pending: Option<Pending<A>>,
}

#[derive(Clone, Debug)]
struct Pending<A> {
    deadline: u64,
    action: A,
}

impl<A> Default for Debounce<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Debounce<A> {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Schedules `action` to fire `delay` milliseconds after `now`.
    ///
    /// Returns the action that was cancelled, if any.
    pub fn schedule(&mut self, now: u64, delay: u64, action: A) -> Option<A> {
        let previous = self.cancel();
        self.pending = Some(Pending {
            deadline: now.saturating_add(delay),
            action,
        });
        previous
    }

    /// Cancels the pending action and returns it.
    pub fn cancel(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.action)
    }

    /// Returns `true` while an action is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Timestamp at which the pending action becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Returns a reference to the pending action without firing it.
    #[must_use]
    pub fn pending_action(&self) -> Option<&A> {
        self.pending.as_ref().map(|p| &p.action)
    }

    /// Fires the pending action if its deadline is at or before `now`.
    ///
    /// An action fires at most once; after it is returned the timer is idle.
    pub fn poll(&mut self, now: u64) -> Option<A> {
        match &self.pending {
            Some(p) if p.deadline <= now => self.cancel(),
            _ => None,
        }
    }
}

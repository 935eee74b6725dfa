//! Cooperative timers driven by caller-supplied time.
//!
//! Nothing here sleeps or spawns: the owner asks for the next deadline,
//! waits however its host waits, then pops whatever is due.

use std::collections::{BTreeMap, HashMap};

/// Milliseconds on the host's monotonic clock.
pub type Millis = u64;

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Pending timers ordered by deadline, ties broken by scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_seq: u64,
    entries: BTreeMap<(Millis, u64), T>,
    deadlines: HashMap<u64, Millis>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, at: Millis, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((at, seq), task);
        self.deadlines.insert(seq, at);
        TimerId(seq)
    }

    /// Cancels a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(at) => self.entries.remove(&(at, id.0)).is_some(),
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.keys().next().map(|(at, _)| *at)
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerId, T)> {
        let key = *self.entries.keys().next()?;
        if key.0 > now {
            return None;
        }
        self.deadlines.remove(&key.1);
        self.entries.remove(&key).map(|task| (TimerId(key.1), task))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trailing-edge debounce: every call cancels the pending timer and
/// schedules a new one `window` ms later, so only the last call of a burst
/// fires.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Millis,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(window: Millis) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Millis {
        self.window
    }

    pub fn call<T>(&mut self, now: Millis, queue: &mut TimerQueue<T>, task: T) -> TimerId {
        if let Some(id) = self.pending.take() {
            queue.cancel(id);
        }
        let id = queue.schedule(now.saturating_add(self.window), task);
        self.pending = Some(id);
        id
    }

    /// Marks the timer `id` as fired. Returns whether it was this debouncer's.
    pub fn fired(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

//! Cooperative event loop: one-shot timers and per-frame callbacks.
//!
//! Tasks are plain values (usually an enum); the owner decides what each one
//! means when the host hands it back. Nothing here runs on its own: the host
//! calls `take_due(now)` from its timer tick and `take_frame_tasks()` once
//! per display refresh.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

struct Pending<T> {
    id: u64,
    due: f64,
    task: T,
}

pub struct EventLoop<T> {
    /// Host time in seconds of the latest `advance_to`/`take_due`.
    now: f64,
    next_id: u64,
    timers: Vec<Pending<T>>,
    frames: Vec<(u64, T)>,
}

impl<T> EventLoop<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            timers: Vec::with_capacity(32),
            frames: Vec::with_capacity(4),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move host time forward. Going backwards is ignored.
    pub fn advance_to(&mut self, now: f64) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Fire `task` once, `delay` after the current host time.
    pub fn after(&mut self, delay: Duration, task: T) -> TimerHandle {
        let id = self.allocate_id();
        self.timers.push(Pending {
            id,
            due: self.now + delay.as_secs_f64(),
            task,
        });
        TimerHandle(id)
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|pending| pending.id != handle.0);
        self.timers.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|pending| pending.id == handle.0)
    }

    /// Remove and return every task due at or before `now`, earliest first.
    /// Timers due at the same instant fire in the order they were armed.
    pub fn take_due(&mut self, now: f64) -> Vec<T> {
        self.advance_to(now);

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].due <= self.now {
                due.push(self.timers.remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter().map(|pending| pending.task).collect()
    }

    /// Earliest pending timer deadline, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.iter().map(|pending| pending.due).reduce(f64::min)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Run `task` on the next display refresh.
    pub fn request_frame(&mut self, task: T) -> FrameHandle {
        let id = self.allocate_id();
        self.frames.push((id, task));
        FrameHandle(id)
    }

    pub fn cancel_frame(&mut self, handle: FrameHandle) -> bool {
        let before = self.frames.len();
        self.frames.retain(|(id, _)| *id != handle.0);
        self.frames.len() != before
    }

    /// Drain the callbacks requested for this refresh. Requests made while
    /// handling them wait for the next refresh.
    pub fn take_frame_tasks(&mut self) -> Vec<T> {
        std::mem::take(&mut self.frames)
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }

    pub fn has_frame_request(&self) -> bool {
        !self.frames.is_empty()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl<T> Default for EventLoop<T> {
    fn default() -> Self {
        Self::new()
    }
}

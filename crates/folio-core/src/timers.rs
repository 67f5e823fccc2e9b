//! Scoped interval timers.
//!
//! Every cosmetic timer in the shell (clock, quote rotation, typing effects,
//! counters) lives in one [`Scheduler`], keyed by the view that owns it.
//! Views start their timers when mounted and the shell cancels them by
//! owner on teardown, so no timer outlives its view. Time only advances
//! through [`Scheduler::tick`], which the event loop calls once per frame.

use std::collections::BTreeMap;

use folio_wm::WindowId;

/// The view a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerOwner {
    Welcome,
    Taskbar,
    Sidebar,
    Window(WindowId),
}

/// What a timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    Clock,
    QuoteRotation,
    CertificationPoll,
    /// Count-up animation of the stat tile at this index.
    Counter(usize),
    Typing,
    CodeReveal,
    WelcomeAdvance,
}

/// A timer expiry reported by [`Scheduler::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub owner: TimerOwner,
    pub kind: TimerKind,
    /// Set for interval timers, clear for one-shots.
    pub repeating: bool,
}

/// Most expiries one repeating timer reports from a single [`Scheduler::tick`].
pub const MAX_CATCH_UP: u32 = 64;

#[derive(Debug, Clone, Copy)]
struct Timer {
    period_ms: u32,
    remaining_ms: u32,
    repeat: bool,
}

/// Owner of every live timer.
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: BTreeMap<(TimerOwner, TimerKind), Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a repeating timer. Returns `false` (and leaves the running
    /// timer untouched) if this owner already runs a timer of this kind.
    pub fn start(&mut self, owner: TimerOwner, kind: TimerKind, period_ms: u32) -> bool {
        self.insert(owner, kind, period_ms, true)
    }

    /// Start a timer that fires once and then removes itself.
    pub fn start_once(&mut self, owner: TimerOwner, kind: TimerKind, delay_ms: u32) -> bool {
        self.insert(owner, kind, delay_ms, false)
    }

    /// Restart a timer with a new period, creating it if needed.
    pub fn reschedule(&mut self, owner: TimerOwner, kind: TimerKind, period_ms: u32) {
        let period_ms = period_ms.max(1);
        self.timers.insert(
            (owner, kind),
            Timer {
                period_ms,
                remaining_ms: period_ms,
                repeat: true,
            },
        );
    }

    pub fn cancel(&mut self, owner: TimerOwner, kind: TimerKind) {
        self.timers.remove(&(owner, kind));
    }

    /// Cancel every timer held by `owner`.
    pub fn cancel_owner(&mut self, owner: TimerOwner) {
        let before = self.timers.len();
        self.timers.retain(|(o, _), _| *o != owner);
        let dropped = before - self.timers.len();
        if dropped > 0 {
            log::debug!("Cancelled {dropped} timer(s) of {owner:?}");
        }
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_running(&self, owner: TimerOwner, kind: TimerKind) -> bool {
        self.timers.contains_key(&(owner, kind))
    }

    /// Timers held by `owner`.
    pub fn owned_by(&self, owner: TimerOwner) -> usize {
        self.timers.keys().filter(|(o, _)| *o == owner).count()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance time by `dt_ms` and collect expiries in key order.
    ///
    /// A repeating timer whose period is shorter than `dt_ms` fires once per
    /// elapsed period, up to [`MAX_CATCH_UP`] times. Periods past the cap are
    /// dropped and the timer keeps its phase.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<Fired> {
        let mut fired = Vec::new();
        let mut finished = Vec::new();
        for (&(owner, kind), timer) in self.timers.iter_mut() {
            if dt_ms < timer.remaining_ms {
                timer.remaining_ms -= dt_ms;
                continue;
            }
            let repeating = timer.repeat;
            if !repeating {
                fired.push(Fired { owner, kind, repeating });
                finished.push((owner, kind));
                continue;
            }
            let past = dt_ms - timer.remaining_ms;
            let expiries = 1 + past / timer.period_ms;
            for _ in 0..expiries.min(MAX_CATCH_UP) {
                fired.push(Fired { owner, kind, repeating });
            }
            timer.remaining_ms = timer.period_ms - past % timer.period_ms;
        }
        for key in finished {
            self.timers.remove(&key);
        }
        fired
    }

    fn insert(&mut self, owner: TimerOwner, kind: TimerKind, period_ms: u32, repeat: bool) -> bool {
        if self.is_running(owner, kind) {
            return false;
        }
        let period_ms = period_ms.max(1);
        self.timers.insert(
            (owner, kind),
            Timer {
                period_ms,
                remaining_ms: period_ms,
                repeat,
            },
        );
        true
    }
}

//! Game timers as plain deadlines.
//!
//! The session owns a [`Schedule`]; the event loop sleeps until
//! [`Schedule::next_deadline`] and then asks the session to fire whatever
//! is due. Nothing here spawns tasks, so clearing a deadline is all it
//! takes to cancel it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// The repeating game tick.
    Tick,
    /// Narrator mode one-shot, tagged with the round that armed it.
    DelayedStart(u64),
    Announcement,
}

#[derive(Debug, Clone, Copy)]
struct Repeating {
    interval: Duration,
    next: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    tick: Option<Repeating>,
    delayed_start: Option<(u64, Instant)>,
    announcement: Option<Instant>,
}

impl Schedule {
    /// (Re)arm the tick. `immediate` fires it at `now`, otherwise one
    /// interval later.
    pub fn arm_tick(&mut self, interval: Duration, now: Instant, immediate: bool) {
        let next = if immediate { now } else { now + interval };
        self.tick = Some(Repeating { interval, next });
    }

    pub fn disarm_tick(&mut self) {
        self.tick = None;
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick.map(|t| t.interval)
    }

    pub fn arm_delayed_start(&mut self, round: u64, at: Instant) {
        self.delayed_start = Some((round, at));
    }

    pub fn clear_delayed_start(&mut self) {
        self.delayed_start = None;
    }

    pub fn delayed_start(&self) -> Option<(u64, Instant)> {
        self.delayed_start
    }

    pub fn arm_announcement(&mut self, at: Instant) {
        self.announcement = Some(at);
    }

    /// Drop every deadline.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.tick.map(|t| t.next),
            self.delayed_start.map(|(_, at)| at),
            self.announcement,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Pop the earliest timer due at `now`. The tick is rescheduled one
    /// interval on (skipping missed beats); one-shots are removed.
    pub fn take_due(&mut self, now: Instant) -> Option<Timer> {
        let mut due: Option<(Instant, Timer)> = None;
        let mut consider = |at: Instant, timer: Timer| {
            if at <= now && due.is_none_or(|(best, _)| at < best) {
                due = Some((at, timer));
            }
        };
        if let Some(t) = self.tick {
            consider(t.next, Timer::Tick);
        }
        if let Some((round, at)) = self.delayed_start {
            consider(at, Timer::DelayedStart(round));
        }
        if let Some(at) = self.announcement {
            consider(at, Timer::Announcement);
        }

        let (_, timer) = due?;
        match timer {
            Timer::Tick => {
                if let Some(t) = self.tick.as_mut() {
                    t.next += t.interval;
                    if t.next <= now {
                        t.next = now + t.interval;
                    }
                }
            }
            Timer::DelayedStart(_) => self.delayed_start = None,
            Timer::Announcement => self.announcement = None,
        }
        Some(timer)
    }
}

//! Timer registry - single-slot cancellable delayed actions
//!
//! Every [`TimerKind`] owns at most one live timer. Scheduling a kind cancels
//! whatever that kind had armed before. A timer is a spawned task that posts
//! a [`TimerFired`] into the owner's event channel, so the action always runs
//! later on the owner's loop and never inside the call that armed it.
//!
//! A fire can still be sitting in the channel when its slot is cancelled or
//! re-armed; [`TimerRegistry::accept`] rejects it by generation.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Inactivity before the eyes fall asleep.
    Idle,
    /// Keystroke silence before the user-typing flag clears.
    TypingStop,
    /// Repeating thinking-cycle tick while a reply is pending.
    GazeTick,
    /// One-shot gaze sequence step: wake-up blink or post-reply settle.
    GazeStep,
    /// Delay before the locally answered shortcut reply lands.
    ShortcutReply,
}

impl TimerKind {
    pub const ALL: [TimerKind; 5] = [
        TimerKind::Idle,
        TimerKind::TypingStop,
        TimerKind::GazeTick,
        TimerKind::GazeStep,
        TimerKind::ShortcutReply,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
    pub generation: u64,
}

struct Slot {
    generation: u64,
    repeating: bool,
    handle: JoinHandle<()>,
}

/// Owns the live timers of one controller.
///
/// Must be used from within a tokio runtime. Dropping the registry cancels
/// every outstanding timer.
pub struct TimerRegistry<E> {
    slots: HashMap<TimerKind, Slot>,
    next_generation: u64,
    tx: UnboundedSender<E>,
}

impl<E> TimerRegistry<E>
where
    E: From<TimerFired> + Send + 'static,
{
    pub fn new(tx: UnboundedSender<E>) -> Self {
        Self {
            slots: HashMap::new(),
            next_generation: 0,
            tx,
        }
    }

    /// Arm `kind` to fire once after `delay`, replacing any live timer of that kind.
    pub fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.cancel(kind);
        let generation = self.bump_generation();
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(TimerFired { kind, generation }.into());
        });

        self.slots.insert(
            kind,
            Slot {
                generation,
                repeating: false,
                handle,
            },
        );
    }

    /// Arm `kind` to fire every `period` (first fire after one period) until cancelled.
    ///
    /// A zero period is refused: the previous timer of `kind` is still
    /// cancelled, nothing is armed, and `false` is returned.
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> bool {
        self.cancel(kind);
        if period.is_zero() {
            log::warn!("refusing to arm {:?} with a zero period", kind);
            return false;
        }
        let generation = self.bump_generation();
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                if tx.send(TimerFired { kind, generation }.into()).is_err() {
                    break;
                }
            }
        });

        self.slots.insert(
            kind,
            Slot {
                generation,
                repeating: true,
                handle,
            },
        );
        true
    }

    fn bump_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }
}

impl<E> TimerRegistry<E> {
    /// Cancel the live timer of `kind`. Returns whether one was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        match self.slots.remove(&kind) {
            Some(slot) => {
                slot.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Cancel every live timer. Safe to call repeatedly.
    pub fn cancel_all(&mut self) {
        for (_, slot) in self.slots.drain() {
            slot.handle.abort();
        }
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.slots.contains_key(&kind)
    }

    pub fn armed_count(&self) -> usize {
        self.slots.len()
    }

    /// Check a fire against the slot that produced it.
    ///
    /// Returns false for fires from a timer that has since been cancelled or
    /// replaced. An accepted one-shot fire clears its slot.
    pub fn accept(&mut self, fired: TimerFired) -> bool {
        let (generation, repeating) = match self.slots.get(&fired.kind) {
            Some(slot) => (slot.generation, slot.repeating),
            None => return false,
        };
        if generation != fired.generation {
            return false;
        }
        if !repeating {
            self.slots.remove(&fired.kind);
        }
        true
    }
}

impl<E> Drop for TimerRegistry<E> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn registry() -> (
        TimerRegistry<TimerFired>,
        mpsc::UnboundedReceiver<TimerFired>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (TimerRegistry::new(tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_fires_once_after_delay() {
        let (mut timers, mut rx) = registry();
        let start = Instant::now();

        timers.schedule(TimerKind::Idle, Duration::from_millis(15_000));
        assert!(timers.is_armed(TimerKind::Idle));

        let fired = rx.recv().await.unwrap();
        assert_eq!(fired.kind, TimerKind::Idle);
        assert!(start.elapsed() >= Duration::from_millis(15_000));
        assert!(timers.accept(fired));
        assert!(!timers.is_armed(TimerKind::Idle));

        // A one-shot fire is only accepted once.
        assert!(!timers.accept(fired));
        assert!(timeout(Duration::from_secs(60), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_replaces_previous_timer() {
        let (mut timers, mut rx) = registry();

        timers.schedule(TimerKind::TypingStop, Duration::from_millis(100));
        timers.schedule(TimerKind::TypingStop, Duration::from_millis(300));
        assert_eq!(timers.armed_count(), 1);

        let fired = rx.recv().await.unwrap();
        assert!(timers.accept(fired));
        assert!(timeout(Duration::from_secs(1), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_fire_is_rejected() {
        let (mut timers, mut rx) = registry();

        timers.schedule(TimerKind::GazeStep, Duration::from_millis(10));
        let stale = rx.recv().await.unwrap();

        // Re-armed before the first fire was handled.
        timers.schedule(TimerKind::GazeStep, Duration::from_millis(10));
        assert!(!timers.accept(stale));
        assert!(timers.is_armed(TimerKind::GazeStep));

        let fresh = rx.recv().await.unwrap();
        assert!(timers.accept(fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let (mut timers, mut rx) = registry();

        timers.schedule(TimerKind::Idle, Duration::from_millis(50));
        assert!(timers.cancel(TimerKind::Idle));
        assert!(!timers.cancel(TimerKind::Idle));

        assert!(timeout(Duration::from_secs(1), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeating_timer_keeps_its_slot() {
        let (mut timers, mut rx) = registry();
        let start = Instant::now();

        timers.schedule_repeating(TimerKind::GazeTick, Duration::from_millis(700));
        for n in 1..=3u32 {
            let fired = rx.recv().await.unwrap();
            assert!(timers.accept(fired));
            assert!(start.elapsed() >= Duration::from_millis(700) * n);
        }
        assert!(timers.is_armed(TimerKind::GazeTick));

        timers.cancel(TimerKind::GazeTick);
        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_refused() {
        let (mut timers, mut rx) = registry();
        timers.schedule_repeating(TimerKind::GazeTick, Duration::from_millis(700));

        assert!(!timers.schedule_repeating(TimerKind::GazeTick, Duration::ZERO));
        assert!(!timers.is_armed(TimerKind::GazeTick));
        assert!(timeout(Duration::from_secs(5), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_is_idempotent() {
        let (mut timers, mut rx) = registry();

        for kind in TimerKind::ALL {
            timers.schedule(kind, Duration::from_millis(100));
        }
        assert_eq!(timers.armed_count(), TimerKind::ALL.len());

        timers.cancel_all();
        timers.cancel_all();
        assert_eq!(timers.armed_count(), 0);
        assert!(timeout(Duration::from_secs(1), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_outstanding_timers() {
        let (mut timers, mut rx) = registry();
        timers.schedule(TimerKind::Idle, Duration::from_millis(100));
        timers.schedule_repeating(TimerKind::GazeTick, Duration::from_millis(100));

        drop(timers);

        // Every sender is gone once the aborted tasks are torn down.
        assert!(rx.recv().await.is_none());
    }
}

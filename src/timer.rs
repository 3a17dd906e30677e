//! Countdown timer for the active break.
//!
//! A derived view over the active break's duration: ticks once per second,
//! publishes the remaining seconds, and signals once when it reaches zero
//! so the owner can trigger the completion transition. The countdown runs
//! on the local clock, independent of backend round-trip latency.
//!
//! Cancelling (or dropping) the countdown stops the task; a timer that
//! keeps firing after its owner is gone is a defect, so Drop aborts.

use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

pub struct Countdown {
    remaining: watch::Receiver<u64>,
    cancel: Option<oneshot::Sender<()>>,
    finished: Option<oneshot::Receiver<()>>,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Start a countdown of `total_secs` seconds.
    pub fn start(total_secs: u64) -> Self {
        let (remaining_tx, remaining_rx) = watch::channel(total_secs);
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let (finished_tx, finished_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut left = total_secs;
            let mut tick = tokio::time::interval(Duration::from_secs(1));
            // The first interval tick fires immediately; consume it so the
            // first decrement lands a full second after start.
            tick.tick().await;

            while left > 0 {
                tokio::select! {
                    _ = &mut cancel_rx => return,
                    _ = tick.tick() => {
                        left -= 1;
                        let _ = remaining_tx.send(left);
                    }
                }
            }

            let _ = finished_tx.send(());
        });

        Self {
            remaining: remaining_rx,
            cancel: Some(cancel_tx),
            finished: Some(finished_rx),
            handle,
        }
    }

    /// Seconds left on the clock.
    pub fn remaining_secs(&self) -> u64 {
        *self.remaining.borrow()
    }

    /// A receiver that observes every tick (for rendering).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.remaining.clone()
    }

    /// Resolves when the countdown reaches zero. Yields `Err` if the
    /// countdown was cancelled or dropped first. Can be taken once.
    pub fn take_finished(&mut self) -> Option<oneshot::Receiver<()>> {
        self.finished.take()
    }

    /// Stop the countdown without firing the finish signal. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_to_zero_and_fires_once() {
        let mut countdown = Countdown::start(3);
        let finished = countdown.take_finished().unwrap();

        assert!(finished.await.is_ok());
        assert_eq!(countdown.remaining_secs(), 0);
        // The finish signal is single-shot by construction.
        assert!(countdown.take_finished().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_finishes_immediately() {
        let mut countdown = Countdown::start(0);
        let finished = countdown.take_finished().unwrap();
        assert!(finished.await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_finish() {
        let mut countdown = Countdown::start(60);
        let finished = countdown.take_finished().unwrap();

        countdown.cancel();
        // The task exits without sending, so the receiver errors.
        assert!(finished.await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let mut countdown = Countdown::start(60);
        countdown.cancel();
        countdown.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticks() {
        let countdown = Countdown::start(60);
        let mut ticks = countdown.subscribe();
        drop(countdown);

        // The sender side is gone once the task is aborted; waiting for a
        // change errors instead of observing further ticks.
        assert!(ticks.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remaining_decrements_per_second() {
        let countdown = Countdown::start(5);
        let mut ticks = countdown.subscribe();

        ticks.changed().await.unwrap();
        assert_eq!(*ticks.borrow(), 4);
        ticks.changed().await.unwrap();
        assert_eq!(*ticks.borrow(), 3);
    }
}

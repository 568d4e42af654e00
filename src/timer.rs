//! The countdown clock
//!
//! A wall-clock deadline running on its own thread, independent of the
//! prompt loop. The loop blocks on player input, so it polls this state
//! once per iteration rather than being notified; expiry may therefore be
//! observed some time after it happens.
//!
//! Write discipline: `remaining_ms` and `expired` are written only by the
//! timer thread and read by the loop. One writer, word-sized values, so
//! relaxed atomics are all the synchronization required.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often the timer thread re-checks the clock
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared state between the timer thread and the game loop
#[derive(Debug)]
pub struct CountdownState {
    /// Milliseconds left; monotonically non-increasing until expiry
    remaining_ms: AtomicU64,
    /// One-shot: flips false→true when the deadline passes, never reverts
    expired: AtomicBool,
    /// Set by [`Countdown::stop`] to end the thread early
    cancelled: AtomicBool,
}

impl CountdownState {
    fn new(duration: Duration) -> Self {
        Self {
            remaining_ms: AtomicU64::new(duration.as_millis() as u64),
            expired: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Seconds left on the clock, as last written by the timer thread
    pub fn remaining_secs(&self) -> f64 {
        self.remaining_ms.load(Ordering::Relaxed) as f64 / 1000.0
    }

    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Relaxed)
    }

    fn store_remaining(&self, left: Duration) {
        self.remaining_ms
            .store(left.as_millis() as u64, Ordering::Relaxed);
    }

    fn expire(&self) {
        self.expired.store(true, Ordering::Relaxed);
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Handle to the running countdown thread
#[derive(Debug)]
pub struct Countdown {
    state: Arc<CountdownState>,
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Begin the countdown on a fresh thread with the default polling cadence
    pub fn start(duration: Duration) -> Self {
        Self::start_with_poll(duration, POLL_INTERVAL)
    }

    /// Begin the countdown with an explicit polling interval
    pub fn start_with_poll(duration: Duration, poll: Duration) -> Self {
        let state = Arc::new(CountdownState::new(duration));
        let thread_state = Arc::clone(&state);

        let handle = thread::spawn(move || {
            let started = Instant::now();
            loop {
                if thread_state.is_cancelled() {
                    return;
                }
                thread::sleep(poll);

                let elapsed = started.elapsed();
                if elapsed >= duration {
                    // Expiry is the final write; remaining_ms is frozen at
                    // its last stored value from here on.
                    thread_state.expire();
                    return;
                }
                thread_state.store_remaining(duration - elapsed);
            }
        });

        tracing::debug!(?duration, "countdown started");
        Self {
            state,
            handle: Some(handle),
        }
    }

    /// Shared view of the clock for the game loop
    pub fn state(&self) -> Arc<CountdownState> {
        Arc::clone(&self.state)
    }

    pub fn is_expired(&self) -> bool {
        self.state.is_expired()
    }

    pub fn remaining_secs(&self) -> f64 {
        self.state.remaining_secs()
    }

    /// Cancel and join the timer thread. Idempotent; called on every game
    /// exit path so the thread never outlives the session.
    pub fn stop(&mut self) {
        self.state.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            tracing::debug!("countdown stopped");
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}

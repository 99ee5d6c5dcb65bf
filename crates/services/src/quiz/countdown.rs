use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use quiz_core::Clock;

use super::session::{QuizPhase, QuizSession};

/// Drives a shared session's countdown, one tick per second.
///
/// The task runs only while the session is in progress and stops on the
/// tick that expires it. Cancelling or dropping the handle aborts the task,
/// so no tick can ever mutate a session after it leaves InProgress; the
/// session's own phase guard covers the remaining race between a queued
/// tick and a submit.
pub struct QuizCountdown {
    handle: JoinHandle<()>,
}

impl QuizCountdown {
    /// Spawn the ticking task for `session`.
    ///
    /// Timestamps for the expiry transition come from `clock`.
    #[must_use]
    pub fn spawn(session: Arc<Mutex<QuizSession>>, clock: Clock) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately; the countdown starts
            // one full second after spawn
            interval.tick().await;

            loop {
                interval.tick().await;
                let Ok(mut session) = session.lock() else {
                    break;
                };
                if session.phase() != QuizPhase::InProgress {
                    break;
                }
                if session.tick(clock.now()) == QuizPhase::Finished {
                    debug!("quiz countdown expired");
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Stop the countdown. Called on every InProgress-exit path that the
    /// expiry tick does not cover itself (submit, abandon).
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once the ticking task has stopped, by expiry or cancellation.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for QuizCountdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

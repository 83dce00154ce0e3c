//! Timed, cancellable animation loops.
//!
//! Every animation in a display codebase needs the same machinery: draw a
//! frame, push it, wait out the frame interval, stop on a deadline or an
//! external "stop now" flag, and blank the display on the way out. [`Player`]
//! is that machinery, once; animation content shrinks to a frame-producer
//! closure.
//!
//! Scheduling is single-threaded and cooperative: drawing and pushing a
//! frame are synchronous, and cancellation is only ever observed between
//! frames via a polled [`CancelToken`] - no thread is ever killed. For
//! callers that want the loop off their thread, [`spawn`] runs a whole
//! player on a worker and hands back a [`PlayerHandle`] whose
//! [`join_timeout`](PlayerHandle::join_timeout) is bounded, so a stuck
//! animation cannot hang process shutdown.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use led_panel_kit::config::DisplayConfig;
//! use led_panel_kit::led2d::Led2d;
//! use led_panel_kit::led_strip::colors;
//! use led_panel_kit::player::{CancelToken, Outcome, Player};
//!
//! let config = DisplayConfig {
//!     panels: 2,
//!     panel_width: 8,
//!     panel_height: 4,
//!     ..DisplayConfig::default()
//! };
//! let mut display = Led2d::new(&config)?;
//!
//! let player = Player::new(Duration::from_millis(5)).with_duration(Duration::from_millis(20));
//! let outcome = player.run(&mut display, &CancelToken::new(), |frame, tick| {
//!     frame.set(tick as i32 % 8, 3, colors::WHITE);
//! })?;
//! assert_eq!(outcome, Outcome::Completed);
//! # Ok::<(), led_panel_kit::Error>(())
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::led2d::{Frame2d, Led2d};
use crate::{Error, Result};

/// How often a joining thread re-checks a worker that has not finished yet.
const JOIN_POLL: Duration = Duration::from_millis(5);

/// Shared cancellation flag, polled once per displayed frame.
///
/// Clones share the flag, so one clone goes to the animation loop and the
/// others stay with whoever may need to stop it (a button handler, a signal
/// handler, a supervising thread).
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an unset token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the loop exits at its next frame boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a player run ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The wall-clock duration elapsed.
    Completed,
    /// The cancellation token was set.
    Cancelled,
}

/// A paced animation loop: produce a frame, push it, wait, repeat.
///
/// Bounded by an optional wall-clock duration and always by the cancellation
/// token. Terminates within one frame interval of either signal, and blanks
/// the display before returning on every exit path, errors included.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    frame_interval: Duration,
    duration: Option<Duration>,
}

impl Player {
    /// A player that runs until cancelled, pacing frames at
    /// `frame_interval`.
    #[must_use]
    pub const fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval,
            duration: None,
        }
    }

    /// Bound the run by a wall-clock duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Run the loop on the calling thread.
    ///
    /// Per iteration: poll `cancel`, check the elapsed time against the
    /// duration, then hand `draw` a cleared scratch surface and the frame
    /// number, push the result, and sleep out the rest of the frame
    /// interval. A slow frame is never "paid back" by a negative sleep; the
    /// pacing deadline resets instead, so drift never compounds beyond one
    /// frame.
    ///
    /// # Errors
    ///
    /// Propagates transport failures from pushing frames; the display is
    /// blanked before the error is returned.
    pub fn run<F>(&self, display: &mut Led2d, cancel: &CancelToken, draw: F) -> Result<Outcome>
    where
        F: FnMut(&mut Frame2d, u64),
    {
        let outcome = self.run_inner(display, cancel, draw);
        // Mandatory blank-on-exit, then surface the loop's failure first.
        let blanked = display.cleanup();
        let outcome = outcome?;
        blanked?;
        Ok(outcome)
    }

    fn run_inner<F>(
        &self,
        display: &mut Led2d,
        cancel: &CancelToken,
        mut draw: F,
    ) -> Result<Outcome>
    where
        F: FnMut(&mut Frame2d, u64),
    {
        let mut frame = Frame2d::new(display.width(), display.height());
        let started = Instant::now();
        let mut deadline = started;
        let mut tick: u64 = 0;
        log::debug!(
            "player: loop starting (interval {:?}, duration {:?})",
            self.frame_interval,
            self.duration,
        );

        loop {
            if cancel.is_cancelled() {
                log::debug!("player: cancelled after {tick} frames");
                return Ok(Outcome::Cancelled);
            }
            if let Some(duration) = self.duration {
                if started.elapsed() >= duration {
                    log::debug!("player: completed after {tick} frames");
                    return Ok(Outcome::Completed);
                }
            }

            frame.clear();
            draw(&mut frame, tick);
            display.write_frame(&frame)?;
            display.show()?;
            tick += 1;

            deadline += self.frame_interval;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Frame production overran the interval; restart pacing from
                // now instead of letting the debt accumulate.
                deadline = now;
            }
        }
    }
}

/// Handle to a player running on a background worker thread.
pub struct PlayerHandle {
    worker: JoinHandle<Result<Outcome>>,
    cancel: CancelToken,
}

impl PlayerHandle {
    /// Request cancellation of the running player.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A clone of the worker's cancellation token.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Wait for the worker, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JoinTimeout`] when the worker does not finish in
    /// time (cancellation is requested before returning, so a merely slow
    /// worker still winds down on its own), [`Error::WorkerPanicked`] when
    /// it panicked, or the player's own error.
    pub fn join_timeout(self, timeout: Duration) -> Result<Outcome> {
        let give_up = Instant::now() + timeout;
        while !self.worker.is_finished() {
            if Instant::now() >= give_up {
                self.cancel.cancel();
                return Err(Error::JoinTimeout);
            }
            thread::sleep(JOIN_POLL);
        }
        self.worker.join().map_err(|_| Error::WorkerPanicked)?
    }
}

/// Run a whole player on a background worker thread.
///
/// The display moves into the worker (it owns the strip exclusively); the
/// returned handle carries the shared token for cooperative cancellation.
pub fn spawn<F>(player: Player, mut display: Led2d, cancel: CancelToken, draw: F) -> PlayerHandle
where
    F: FnMut(&mut Frame2d, u64) + Send + 'static,
{
    let token = cancel.clone();
    let worker = thread::spawn(move || player.run(&mut display, &cancel, draw));
    PlayerHandle {
        worker,
        cancel: token,
    }
}

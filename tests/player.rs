#![allow(missing_docs)]
//! Host-level tests for the animation loop, running on the in-memory
//! stand-in backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use led_panel_kit::Error;
use led_panel_kit::config::DisplayConfig;
use led_panel_kit::led2d::Led2d;
use led_panel_kit::led_strip::{colors, MemoryBackend, Rgb};
use led_panel_kit::player::{self, CancelToken, Outcome, Player};

const INTERVAL: Duration = Duration::from_millis(20);

fn small_config() -> DisplayConfig {
    DisplayConfig {
        panels: 2,
        panel_width: 8,
        panel_height: 4,
        brightness: 1.0,
        ..DisplayConfig::default()
    }
}

fn display_with_probe() -> (Led2d, MemoryBackend) {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = small_config();
    let backend = MemoryBackend::new(config.led_count());
    let probe = backend.clone();
    let display = Led2d::with_backend(&config, Box::new(backend)).expect("valid config");
    (display, probe)
}

fn all_black(backend: &MemoryBackend) -> bool {
    backend.last_frame().iter().all(|&pixel| pixel == Rgb::new(0, 0, 0))
}

#[test]
fn duration_of_two_intervals_draws_exactly_two_frames() {
    let (mut display, probe) = display_with_probe();
    // A generous interval keeps scheduler jitter well below one frame.
    let interval = Duration::from_millis(60);
    let player = Player::new(interval).with_duration(interval * 2);

    let frames = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&frames);
    let outcome = player
        .run(&mut display, &CancelToken::new(), move |frame, tick| {
            counter.fetch_add(1, Ordering::Relaxed);
            frame.set(tick as i32, 0, colors::WHITE);
        })
        .expect("stand-in never rejects");

    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(frames.load(Ordering::Relaxed), 2);
    // Two animation pushes plus the mandatory blank on exit.
    assert_eq!(probe.push_count(), 3);
    assert!(all_black(&probe), "display must end blanked");
}

#[test]
fn pre_set_token_cancels_before_the_first_frame() {
    let (mut display, probe) = display_with_probe();
    let player = Player::new(INTERVAL).with_duration(INTERVAL * 100);

    let cancel = CancelToken::new();
    cancel.cancel();

    let frames = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&frames);
    let outcome = player
        .run(&mut display, &cancel, move |_frame, _tick| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .expect("stand-in never rejects");

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(frames.load(Ordering::Relaxed), 0);
    // Only the blank-on-exit push.
    assert_eq!(probe.push_count(), 1);
    assert!(all_black(&probe));
}

#[test]
fn bounded_loop_finishes_near_its_deadline() {
    let (mut display, _probe) = display_with_probe();
    let player = Player::new(INTERVAL).with_duration(INTERVAL * 3);

    let started = Instant::now();
    let outcome = player
        .run(&mut display, &CancelToken::new(), |_frame, _tick| {})
        .expect("stand-in never rejects");
    let elapsed = started.elapsed();

    assert_eq!(outcome, Outcome::Completed);
    // Must terminate within roughly one frame interval of the deadline
    // (with slack for scheduler jitter).
    assert!(elapsed >= INTERVAL * 3);
    assert!(
        elapsed < INTERVAL * 8,
        "loop overshot its deadline: {elapsed:?}"
    );
}

#[test]
fn slow_frames_do_not_accumulate_pacing_debt() {
    let (mut display, probe) = display_with_probe();
    // Each frame takes ~3 intervals to produce; the loop must proceed
    // immediately rather than racking up negative sleeps.
    let player = Player::new(Duration::from_millis(5)).with_duration(Duration::from_millis(50));

    let outcome = player
        .run(&mut display, &CancelToken::new(), |_frame, _tick| {
            thread::sleep(Duration::from_millis(15));
        })
        .expect("stand-in never rejects");

    assert_eq!(outcome, Outcome::Completed);
    // 50ms budget at ~15ms per frame: three or four frames, not ten.
    let pushes = probe.push_count();
    assert!((2..=5).contains(&(pushes - 1)), "unexpected push count {pushes}");
}

#[test]
fn background_worker_cancels_within_a_frame() {
    let (display, probe) = display_with_probe();
    let player = Player::new(INTERVAL);
    let cancel = CancelToken::new();

    let handle = player::spawn(player, display, cancel, |frame, tick| {
        frame.set((tick % 8) as i32, 2, colors::CYAN);
    });

    thread::sleep(INTERVAL * 3);
    handle.cancel();
    let outcome = handle
        .join_timeout(INTERVAL * 10)
        .expect("worker must wind down after cancel");

    assert_eq!(outcome, Outcome::Cancelled);
    assert!(probe.push_count() >= 1);
    assert!(all_black(&probe), "cancelled worker must blank the display");
}

#[test]
fn join_timeout_bounds_a_stuck_worker() {
    let (display, _probe) = display_with_probe();
    let player = Player::new(Duration::from_millis(1));

    let handle = player::spawn(player, display, CancelToken::new(), |_frame, _tick| {
        // A wedged frame producer: never yields within the join deadline.
        thread::sleep(Duration::from_secs(5));
    });

    let started = Instant::now();
    let result = handle.join_timeout(Duration::from_millis(50));
    assert!(matches!(result, Err(Error::JoinTimeout)));
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "join must give up promptly instead of hanging shutdown"
    );
}

#[test]
fn token_clones_share_the_flag() {
    let token = CancelToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());
    token.cancel();
    assert!(clone.is_cancelled());
}

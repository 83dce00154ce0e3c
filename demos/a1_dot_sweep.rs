//! Sweep a white dot across a small stacked display.
//!
//! Runs on the in-memory stand-in backend unless the `hardware` feature is
//! enabled and a strip is attached, so it works on any machine:
//!
//! ```sh
//! cargo run --bin demo_a1_dot_sweep
//! ```

use std::time::Duration;

use led_panel_kit::Result;
use led_panel_kit::config::DisplayConfig;
use led_panel_kit::led2d::Led2d;
use led_panel_kit::led_strip::colors;
use led_panel_kit::player::{CancelToken, Player};

fn main() -> Result<()> {
    // Two 8x4 panels stacked vertically to create an 8x8 display.
    let config = DisplayConfig {
        panels: 2,
        panel_width: 8,
        panel_height: 4,
        ..DisplayConfig::default()
    };
    let mut display = Led2d::new(&config)?;
    let width = display.width() as i32;
    let height = display.height() as i32;

    let player = Player::new(Duration::from_millis(40)).with_duration(Duration::from_secs(3));
    let outcome = player.run(&mut display, &CancelToken::new(), move |frame, tick| {
        let step = tick as i32 % (width * height);
        frame.set(step % width, step / width, colors::WHITE);
    })?;

    println!("dot sweep finished: {outcome:?}");
    Ok(())
}

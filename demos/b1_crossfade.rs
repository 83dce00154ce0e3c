//! Cross-fade between two solid frames with an eased ramp.
//!
//! ```sh
//! cargo run --bin demo_b1_crossfade
//! ```

use std::thread;
use std::time::Duration;

use led_panel_kit::Result;
use led_panel_kit::compose::{Easing, blend_eased};
use led_panel_kit::config::DisplayConfig;
use led_panel_kit::led2d::{Frame2d, Led2d};
use led_panel_kit::led_strip::colors;

const STEPS: u32 = 25;

fn main() -> Result<()> {
    let config = DisplayConfig {
        panels: 2,
        panel_width: 8,
        panel_height: 4,
        ..DisplayConfig::default()
    };
    let mut display = Led2d::new(&config)?;

    let from = Frame2d::filled(display.width(), display.height(), colors::RED);
    let to = Frame2d::filled(display.width(), display.height(), colors::BLUE);

    for step in 0..=STEPS {
        let t = step as f32 / STEPS as f32;
        let frame = blend_eased(&from, &to, t, Easing::EaseOutCubic)?;
        display.write_frame(&frame)?;
        display.show()?;
        thread::sleep(Duration::from_millis(40));
    }

    display.cleanup()?;
    println!("cross-fade finished");
    Ok(())
}

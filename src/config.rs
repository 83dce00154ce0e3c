//! Hardware configuration read once at display construction.

use serde::{Deserialize, Serialize};

use crate::led_strip::Gamma;

/// Description of one display rig: signal parameters and panel geometry.
///
/// Loaded from a config file or built in code; every field has a default
/// matching the reference rig (six 32x8 panels on GPIO 18), so partial
/// config files only name what they change:
///
/// ```
/// use led_panel_kit::config::DisplayConfig;
///
/// let config: DisplayConfig = serde_json::from_str(r#"{ "panels": 5 }"#)?;
/// assert_eq!(config.panels, 5);
/// assert_eq!(config.panel_width, 32);
/// assert_eq!(config.led_count(), 1280);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// GPIO data pin, BCM numbering.
    pub pin: u8,
    /// Data signal frequency in Hz (WS2812 runs at 800 kHz).
    pub freq_hz: u32,
    /// DMA channel for the PWM transfer.
    pub dma_channel: u8,
    /// Invert the data signal (rigs with an inverting level shifter).
    pub invert: bool,
    /// Logical brightness in `0.0..=1.0`, scaled to a `0..=255` channel
    /// ceiling at the wire.
    pub brightness: f32,
    /// PWM channel index.
    pub pwm_channel: u8,
    /// Number of vertically stacked panels.
    pub panels: usize,
    /// Panel width in pixels.
    pub panel_width: usize,
    /// Panel height in pixels.
    pub panel_height: usize,
    /// Color response curve folded into the brightness table.
    pub gamma: Gamma,
}

impl DisplayConfig {
    /// Total LED count across all panels.
    #[must_use]
    pub const fn led_count(&self) -> usize {
        self.panels * self.panel_width * self.panel_height
    }

    /// Total display height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.panels * self.panel_height
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pin: 18,
            freq_hz: 800_000,
            dma_channel: 10,
            invert: false,
            brightness: 0.25,
            pwm_channel: 0,
            panels: 6,
            panel_width: 32,
            panel_height: 8,
            // Linear keeps pushed values an exact brightness-scale of the
            // staged colors; opt into Gamma2_2 for perceptual correction.
            gamma: Gamma::Linear,
        }
    }
}

//! Real transport backed by the `rs_ws281x` PWM/DMA driver.
//!
//! Only compiled with the `hardware` feature. Acquisition failure (missing
//! device nodes, insufficient permissions, non-Pi host) is reported as
//! [`Error::BackendUnavailable`] so the display can substitute the in-memory
//! stand-in instead of failing the process.

use rs_ws281x::{ChannelBuilder, Controller, ControllerBuilder, StripType};

use crate::config::DisplayConfig;
use crate::led_strip::{LedBackend, Rgb};
use crate::{Error, Result};

/// Exclusive handle to the ws281x PWM channel driving the display.
pub struct Ws281xBackend {
    controller: Controller,
    channel: usize,
    len: usize,
}

impl Ws281xBackend {
    /// Acquire the transport described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`] when the underlying driver
    /// cannot be initialized.
    pub fn open(config: &DisplayConfig) -> Result<Self> {
        let channel = usize::from(config.pwm_channel);
        let controller = ControllerBuilder::new()
            .freq(config.freq_hz)
            .dma(i32::from(config.dma_channel))
            .channel(
                channel,
                ChannelBuilder::new()
                    .pin(i32::from(config.pin))
                    .count(config.led_count() as i32)
                    // RGB order on the wire; brightness is applied by the
                    // display's combo table, not the vendor driver.
                    .strip_type(StripType::Ws2811Rgb)
                    .invert(config.invert)
                    .brightness(255)
                    .build(),
            )
            .build()
            .map_err(|err| Error::BackendUnavailable {
                reason: err.to_string(),
            })?;
        Ok(Self {
            controller,
            channel,
            len: config.led_count(),
        })
    }
}

impl LedBackend for Ws281xBackend {
    fn len(&self) -> usize {
        self.len
    }

    fn write(&mut self, pixels: &[Rgb]) -> Result<()> {
        {
            let leds = self.controller.leds_mut(self.channel);
            for (led, pixel) in leds.iter_mut().zip(pixels) {
                // rs_ws281x raw color order is [B, G, R, W].
                *led = [pixel.b, pixel.g, pixel.r, 0];
            }
        }
        self.controller.render().map_err(|err| Error::BackendWrite {
            reason: err.to_string(),
        })
    }
}

//! A device abstraction for rectangular NeoPixel-style (WS2812) LED panel
//! displays.
//!
//! [`Frame2d`] is the in-memory pixel surface all drawing code writes into;
//! it implements the [`embedded-graphics`](https://docs.rs/embedded-graphics)
//! drawing API, so lines, shapes, and text come for free. [`Led2d`] owns the
//! strip transport and the wiring mapping, and pushes whole surfaces to the
//! LEDs with global brightness (and optional gamma) applied at push time.
//!
//! # Example
//!
//! ```
//! use led_panel_kit::config::DisplayConfig;
//! use led_panel_kit::led2d::{Frame2d, Led2d};
//! use led_panel_kit::led_strip::colors;
//!
//! // Two stacked 8x4 panels; no hardware attached, so the in-memory
//! // stand-in backend is substituted automatically.
//! let config = DisplayConfig {
//!     panels: 2,
//!     panel_width: 8,
//!     panel_height: 4,
//!     ..DisplayConfig::default()
//! };
//! let mut display = Led2d::new(&config)?;
//!
//! let mut frame = Frame2d::new(display.width(), display.height());
//! frame.set(3, 5, colors::CYAN);
//! frame.set(-2, 99, colors::RED); // off-surface: silently dropped
//!
//! display.write_frame(&frame)?;
//! display.show()?;
//! display.cleanup()?;
//! # Ok::<(), led_panel_kit::Error>(())
//! ```

pub mod layout;

pub use layout::{LedLayout, PhysicalIndex};

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::Pixel;
use std::convert::Infallible;
use std::ops::{Index, IndexMut};

use crate::config::DisplayConfig;
use crate::led_strip::{combo_table, Frame1d, Gamma, LedBackend, MemoryBackend, Rgb};
use crate::{Error, Result};

/// Convert [`Rgb`] (smart-leds) to [`Rgb888`] (embedded-graphics).
#[must_use]
pub const fn rgb8_to_rgb888(color: Rgb) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

/// Convert [`Rgb888`] (embedded-graphics) to [`Rgb`] (smart-leds).
#[must_use]
pub fn rgb888_to_rgb8(color: Rgb888) -> Rgb {
    Rgb::new(color.r(), color.g(), color.b())
}

/// A 2D surface of RGB pixels representing a single display frame.
///
/// Surfaces are created once per animation (or reused across frames) and
/// mutated in place; they are never resized. Pixels are stored row-major with
/// `(0, 0)` at the top-left, `x` to the right, `y` downward.
///
/// Two access policies, on purpose:
/// - [`set`](Self::set) takes signed coordinates and silently drops
///   off-surface writes - moving sprites routinely drift past the edges and
///   must never panic for it.
/// - [`get`](Self::get) is bounds-checked and errors, because blending math
///   needs a defined value for every pixel it reads.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame2d {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Frame2d {
    /// Create a new blank (all black) surface.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgb::new(0, 0, 0))
    }

    /// Create a surface filled with a single color.
    #[must_use]
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Surface width in pixels (columns).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels (rows).
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count (width x height).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the surface holds zero pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Write one pixel; a no-op when `(x, y)` is off the surface.
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    /// Read one pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] when `(x, y)` is off the surface.
    pub fn get(&self, x: usize, y: usize) -> Result<Rgb> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.pixels[y * self.width + x])
    }

    /// Set every pixel to black.
    pub fn clear(&mut self) {
        self.fill(Rgb::new(0, 0, 0));
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Row-major pixel data.
    #[must_use]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Mutable row-major pixel data.
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }
}

impl Index<(usize, usize)> for Frame2d {
    type Output = Rgb;

    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        assert!(x < self.width, "x must be within width");
        assert!(y < self.height, "y must be within height");
        &self.pixels[y * self.width + x]
    }
}

impl IndexMut<(usize, usize)> for Frame2d {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        assert!(x < self.width, "x must be within width");
        assert!(y < self.height, "y must be within height");
        &mut self.pixels[y * self.width + x]
    }
}

impl OriginDimensions for Frame2d {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Frame2d {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set(coord.x, coord.y, rgb888_to_rgb8(color));
        }
        Ok(())
    }
}

/// A device abstraction for a stacked-panel LED matrix display.
///
/// Owns the strip transport exclusively and the materialized wiring mapping.
/// Pixel writes accumulate in a staged buffer; nothing reaches the LEDs until
/// [`show`](Self::show), which pushes the whole frame in one transport call,
/// so two frames' pixels never interleave on the strip.
///
/// Brightness is a single global level applied (together with the configured
/// gamma curve) at push time via a 256-entry lookup table; it is never stored
/// per pixel and never alters the staged colors.
///
/// Dropping the display blanks it first, so no exit path - normal return,
/// `?`-propagated error, or panic unwind - leaves stale colors lit.
pub struct Led2d {
    backend: Box<dyn LedBackend>,
    mapping_by_xy: Vec<u16>,
    width: usize,
    height: usize,
    staged: Frame1d,
    scaled: Frame1d,
    combo: [u8; 256],
    gamma: Gamma,
    brightness: f32,
}

impl Led2d {
    /// Build a display from `config`, acquiring the best available backend.
    ///
    /// With the `hardware` feature this attempts the ws281x transport and, if
    /// acquisition fails (off-target host, missing permissions), logs a
    /// warning and substitutes the in-memory stand-in; hardware absence is
    /// never a process-fatal condition. Without the feature the stand-in is
    /// used directly.
    ///
    /// # Errors
    ///
    /// Returns a layout configuration error when the panel geometry in
    /// `config` does not describe a bijective wiring; this is fatal by
    /// design - nothing has been written to hardware yet, and every later
    /// write would be wrong.
    pub fn new(config: &DisplayConfig) -> Result<Self> {
        let backend = Self::acquire_backend(config);
        Self::with_backend(config, backend)
    }

    /// Build a display around an explicitly injected backend.
    ///
    /// This is the seam tests and custom transports plug into.
    ///
    /// # Errors
    ///
    /// Returns a layout configuration error for bad panel geometry, or
    /// [`Error::BackendLength`] when the backend does not address exactly the
    /// layout's LED count.
    pub fn with_backend(config: &DisplayConfig, backend: Box<dyn LedBackend>) -> Result<Self> {
        let layout = LedLayout::stacked_serpentine(
            config.panel_width,
            config.panel_height,
            config.panels,
        )?;
        if backend.len() != layout.len() {
            return Err(Error::BackendLength {
                expected: layout.len(),
                found: backend.len(),
            });
        }

        let mut display = Self {
            backend,
            mapping_by_xy: layout.mapping_by_xy().to_vec(),
            width: layout.width(),
            height: layout.height(),
            staged: Frame1d::new(layout.len()),
            scaled: Frame1d::new(layout.len()),
            combo: [0; 256],
            gamma: config.gamma,
            brightness: 0.0,
        };
        display.set_brightness(config.brightness);
        log::info!(
            "led2d: {}x{} display ready ({} LEDs across {} panels)",
            display.width,
            display.height,
            display.staged.len(),
            config.panels,
        );
        Ok(display)
    }

    fn acquire_backend(config: &DisplayConfig) -> Box<dyn LedBackend> {
        #[cfg(feature = "hardware")]
        {
            match crate::led_strip::ws281x::Ws281xBackend::open(config) {
                Ok(backend) => {
                    log::info!("led2d: acquired ws281x backend on pin {}", config.pin);
                    return Box::new(backend);
                }
                Err(err) => {
                    log::warn!("led2d: {err}; substituting in-memory stand-in");
                }
            }
        }
        Box::new(MemoryBackend::new(config.led_count()))
    }

    /// Display width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Display height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total LED count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Whether the display addresses zero LEDs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Current global brightness in `0.0..=1.0`.
    #[must_use]
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Stage one pixel write; dropped silently when `(x, y)` has no mapped
    /// LED. Visible at the next [`show`](Self::show).
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let led = usize::from(self.mapping_by_xy[y * self.width + x]);
        self.staged[led] = color;
    }

    /// Stage a whole surface, replacing everything staged so far.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SizeMismatch`] when the surface dimensions differ
    /// from the display's.
    pub fn write_frame(&mut self, frame: &Frame2d) -> Result<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(Error::SizeMismatch {
                left_width: self.width,
                left_height: self.height,
                right_width: frame.width(),
                right_height: frame.height(),
            });
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let led = usize::from(self.mapping_by_xy[y * self.width + x]);
                self.staged[led] = frame.pixels()[y * self.width + x];
            }
        }
        Ok(())
    }

    /// Push the staged frame to the LEDs with brightness/gamma applied.
    ///
    /// All writes since the previous `show` become visible together; the
    /// transport receives exactly one frame per call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendWrite`] when the transport rejects the frame.
    pub fn show(&mut self) -> Result<()> {
        for (out, pixel) in self.scaled.iter_mut().zip(self.staged.iter()) {
            *out = Rgb::new(
                self.combo[usize::from(pixel.r)],
                self.combo[usize::from(pixel.g)],
                self.combo[usize::from(pixel.b)],
            );
        }
        self.backend.write(&self.scaled)
    }

    /// Set the global brightness for subsequent pushes.
    ///
    /// `level` is clamped to `0.0..=1.0`, scaled to a `0..=255` channel
    /// ceiling, and folded with the gamma curve into the push-time lookup
    /// table. Frames already shown are unaffected.
    pub fn set_brightness(&mut self, level: f32) {
        let level = level.clamp(0.0, 1.0);
        self.brightness = level;
        let max_brightness = (level * 255.0).round() as u8;
        self.combo = combo_table(self.gamma, max_brightness);
        log::debug!("led2d: brightness set to {level:.3} (channel ceiling {max_brightness})");
    }

    /// Stage black everywhere. Visible at the next [`show`](Self::show).
    pub fn clear(&mut self) {
        self.staged.fill(Rgb::new(0, 0, 0));
    }

    /// Stage `color` everywhere. Visible at the next [`show`](Self::show).
    pub fn fill(&mut self, color: Rgb) {
        self.staged.fill(color);
    }

    /// Blank every LED and push immediately.
    ///
    /// Safe to call any number of times; each call leaves the strip dark.
    /// Runs automatically on drop, so a panicking animation still blanks the
    /// display on the way out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendWrite`] when the transport rejects the blank
    /// frame.
    pub fn cleanup(&mut self) -> Result<()> {
        self.clear();
        self.show()
    }
}

impl Drop for Led2d {
    fn drop(&mut self) {
        if let Err(err) = self.cleanup() {
            log::error!("led2d: failed to blank display during teardown: {err}");
        }
    }
}

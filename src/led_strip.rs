//! The physical side of a panel display: pixel buffers in wiring order,
//! gamma/brightness lookup tables, and the transport that pushes frames to
//! the LEDs.
//!
//! [`LedBackend`] is the capability seam between the display driver and the
//! hardware. [`MemoryBackend`] is the behaviorally identical in-memory
//! stand-in used off-target (and by every test); the real transport lives in
//! [`ws281x`] behind the `hardware` feature and is selected once at display
//! construction, never via scattered conditionals.

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`,
/// `CYAN`, `MAGENTA`, `ORANGE`, `PURPLE`.
#[doc(inline)]
pub use smart_leds::colors;

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use smart_leds::RGB8;

use crate::Result;

#[cfg(feature = "hardware")]
pub mod ws281x;

/// RGB color representation re-exported from the `smart_leds` crate.
///
/// Three 8-bit channels in red-green-blue order, matching the addressable-LED
/// serial protocol; every layer above preserves this byte order bit-for-bit.
pub type Rgb = RGB8;

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode for LED strips.
///
/// Folded together with brightness into a single lookup table by
/// [`combo_table`], so correction has no per-pixel cost beyond one index.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    Gamma2_2,
}

impl Default for Gamma {
    fn default() -> Self {
        Self::Gamma2_2
    }
}

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Generate a combined gamma correction and brightness scaling lookup table.
///
/// This combines two operations into a single table lookup for efficiency:
/// 1. Apply gamma correction based on the `gamma` parameter
/// 2. Scale by `max_brightness`
///
/// The result is a table where `table[input_value]` gives the final output
/// value. Rebuilt whenever brightness changes, so a new level applies to
/// subsequent pushes immediately and never retroactively.
#[must_use]
pub fn combo_table(gamma: Gamma, max_brightness: u8) -> [u8; 256] {
    let mut result = [0_u8; 256];
    for (index, entry) in result.iter_mut().enumerate() {
        let corrected = match gamma {
            Gamma::Linear => index as u8,
            Gamma::Gamma2_2 => GAMMA_2_2_TABLE[index],
        };
        // Brightness scaling: (value * brightness) / 255
        *entry = ((u16::from(corrected) * u16::from(max_brightness)) / 255) as u8;
    }
    result
}

// ============================================================================
// Wiring-order frames
// ============================================================================

/// [`Rgb`] pixel data in LED wiring order.
///
/// Frames deref to `[Rgb]`, so pixels can be read and mutated directly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame1d(Vec<Rgb>);

impl Frame1d {
    /// Create a new blank (all black) frame for `len` LEDs.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self(vec![Rgb::new(0, 0, 0); len])
    }

    /// Create a frame of `len` LEDs filled with a single color.
    #[must_use]
    pub fn filled(len: usize, color: Rgb) -> Self {
        Self(vec![color; len])
    }
}

impl Deref for Frame1d {
    type Target = [Rgb];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Frame1d {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Rgb>> for Frame1d {
    fn from(pixels: Vec<Rgb>) -> Self {
        Self(pixels)
    }
}

impl From<Frame1d> for Vec<Rgb> {
    fn from(frame: Frame1d) -> Self {
        frame.0
    }
}

// ============================================================================
// Backend capability
// ============================================================================

/// Transport capability for one LED strip.
///
/// A `write` pushes one complete frame in wiring order; everything staged
/// between two pushes becomes visible together, so callers never observe a
/// partially updated strip. Exactly one backend instance owns the underlying
/// transport, and the display driver consumes the backend at construction to
/// enforce that exclusivity.
pub trait LedBackend: Send {
    /// Number of LEDs addressed by this backend.
    fn len(&self) -> usize;

    /// Whether the backend addresses zero LEDs.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push one complete frame, in wiring order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendWrite`](crate::Error::BackendWrite) when the
    /// transport rejects the frame.
    fn write(&mut self, pixels: &[Rgb]) -> Result<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    last: Vec<Rgb>,
    pushes: u64,
}

/// In-memory stand-in for a physical strip.
///
/// Same contract as the real transport, no physical effect. Clones share
/// state, so a test can hand one clone to a display and observe pushes
/// through another:
///
/// ```
/// use led_panel_kit::led_strip::{colors, LedBackend, MemoryBackend};
///
/// let mut backend = MemoryBackend::new(4);
/// let probe = backend.clone();
/// backend.write(&[colors::RED; 4])?;
/// assert_eq!(probe.push_count(), 1);
/// assert_eq!(probe.last_frame()[0], colors::RED);
/// # Ok::<(), led_panel_kit::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct MemoryBackend {
    len: usize,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    /// Create a stand-in for `len` LEDs, initially all black.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: Arc::new(Mutex::new(MemoryState {
                last: vec![Rgb::new(0, 0, 0); len],
                pushes: 0,
            })),
        }
    }

    /// The most recently pushed frame (all black before the first push).
    #[must_use]
    pub fn last_frame(&self) -> Frame1d {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Frame1d::from(state.last.clone())
    }

    /// Number of frames pushed so far.
    #[must_use]
    pub fn push_count(&self) -> u64 {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.pushes
    }
}

impl LedBackend for MemoryBackend {
    fn len(&self) -> usize {
        self.len
    }

    fn write(&mut self, pixels: &[Rgb]) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.last.clear();
        state.last.extend_from_slice(pixels);
        state.pushes += 1;
        Ok(())
    }
}

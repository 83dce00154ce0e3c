//! Cross-fade compositing between display frames.
//!
//! [`blend`] mixes two surfaces by a scalar factor; [`Easing`] remaps the
//! factor so transitions accelerate or decelerate instead of moving
//! linearly. Animation code typically renders the outgoing and incoming
//! frames once, then asks for a blended frame per tick:
//!
//! ```
//! use led_panel_kit::compose::{blend_eased, Easing};
//! use led_panel_kit::led2d::Frame2d;
//! use led_panel_kit::led_strip::colors;
//!
//! let from = Frame2d::filled(8, 4, colors::RED);
//! let to = Frame2d::filled(8, 4, colors::BLUE);
//! let midway = blend_eased(&from, &to, 0.5, Easing::EaseOutQuad)?;
//! assert_eq!(midway.width(), 8);
//! # Ok::<(), led_panel_kit::Error>(())
//! ```

use itertools::izip;

use crate::led2d::Frame2d;
use crate::led_strip::Rgb;
use crate::{Error, Result};

/// Remapping curves for the blend factor.
///
/// Every curve maps `[0, 1]` onto `[0, 1]`, is monotonically non-decreasing,
/// and satisfies `f(0) = 0`, `f(1) = 1`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Easing {
    /// Identity: the factor passes through unchanged.
    #[default]
    Linear,
    /// Quadratic ease-in: `t²` - starts slow, finishes fast.
    EaseInQuad,
    /// Quadratic ease-out: `1 - (1 - t)²` - starts fast, settles gently.
    EaseOutQuad,
    /// Cubic ease-out: `1 - (1 - t)³` - a stronger settle than quadratic.
    EaseOutCubic,
}

impl Easing {
    /// Remap a blend factor; the input is clamped to `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInQuad => t * t,
            Self::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

// a*(1-t) + b*t keeps the endpoints exact: at t=0 the b term is exactly
// zero and the a term exactly a, and symmetrically at t=1.
fn blend_channel(a: u8, b: u8, t: f32) -> u8 {
    (f32::from(a) * (1.0 - t) + f32::from(b) * t).round() as u8
}

fn blend_pixel(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb::new(
        blend_channel(a.r, b.r, t),
        blend_channel(a.g, b.g, t),
        blend_channel(a.b, b.b, t),
    )
}

/// Blend two surfaces: each output channel is `a·(1-t) + b·t`, rounded to
/// the nearest 8-bit value. `t` is clamped to `[0, 1]`; `t = 0` reproduces
/// `a` exactly and `t = 1` reproduces `b` exactly.
///
/// # Errors
///
/// Returns [`Error::SizeMismatch`] when the surfaces' dimensions differ.
pub fn blend(a: &Frame2d, b: &Frame2d, t: f32) -> Result<Frame2d> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(Error::SizeMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        });
    }
    let t = t.clamp(0.0, 1.0);
    let mut out = Frame2d::new(a.width(), a.height());
    for (dst, &left, &right) in izip!(out.pixels_mut(), a.pixels(), b.pixels()) {
        *dst = blend_pixel(left, right, t);
    }
    Ok(out)
}

/// Blend with the factor remapped through `easing` first.
///
/// # Errors
///
/// Returns [`Error::SizeMismatch`] when the surfaces' dimensions differ.
pub fn blend_eased(a: &Frame2d, b: &Frame2d, t: f32, easing: Easing) -> Result<Frame2d> {
    blend(a, b, easing.apply(t))
}

/// Blend a surface toward a solid color.
#[must_use]
pub fn blend_color(a: &Frame2d, color: Rgb, t: f32) -> Frame2d {
    let t = t.clamp(0.0, 1.0);
    let mut out = Frame2d::new(a.width(), a.height());
    for (dst, &left) in out.pixels_mut().iter_mut().zip(a.pixels()) {
        *dst = blend_pixel(left, color, t);
    }
    out
}

/// Scale a surface's brightness: equivalent to blending from black up to the
/// surface by `intensity`.
#[must_use]
pub fn fade(a: &Frame2d, intensity: f32) -> Frame2d {
    let intensity = intensity.clamp(0.0, 1.0);
    blend_color(a, Rgb::new(0, 0, 0), 1.0 - intensity)
}

//! Device abstractions for serpentine-wired WS2812 LED panel displays.
//!
//! A display is several fixed-size panels stacked vertically and driven as a
//! single continuous LED strip. Animation code addresses pixels as `(x, y)`;
//! the wiring order never leaks above [`led2d::layout::LedLayout`].
//!
//! The pieces, leaf-first:
//!
//! - [`led2d::layout::LedLayout`] - how strip order maps to `(x, y)`
//! - [`led2d::Frame2d`] - an in-memory pixel surface to draw on
//! - [`led2d::Led2d`] - pushes surfaces to the strip with brightness/gamma
//! - [`compose`] - cross-fades between surfaces, with easing curves
//! - [`player`] - timed, cancellable animation loops
//!
//! Without the `hardware` feature every display runs on an in-memory
//! stand-in backend, so the whole stack can be exercised off-target.
//!
//! # Glossary
//!
//! - **Panel:** one W×H LED sub-matrix, internally wired as a continuous
//!   serpentine strip (the reference rig uses 32×8).
//! - **Serpentine wiring:** consecutive LEDs snake column-by-column,
//!   alternating vertical direction each column, to minimize cabling.
//! - **Physical index:** 1-based position of an LED along the concatenated
//!   strip across all panels.
//! - **Frame interval:** the target time budget per displayed frame.

pub mod compose;
pub mod config;
mod error;
pub mod led2d;
pub mod led_strip;
pub mod player;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};

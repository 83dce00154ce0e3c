//! Run-time description of panel geometry and wiring, including dimensions.
//!
//! See [`LedLayout`] for examples including: linear strips, serpentine
//! panels, rotations, flips, concatenation, and vertically stacked
//! multi-panel displays.

use std::num::NonZeroUsize;

use crate::{Error, Result};

/// 1-based position of an LED along the full concatenated strip.
///
/// Wiring diagrams label the first LED `1`, so the public lookup API does
/// too; wiring order is stored zero-based internally and converted at this
/// boundary.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PhysicalIndex(NonZeroUsize);

impl PhysicalIndex {
    /// Create a physical index; `None` for index zero.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        NonZeroUsize::new(index).map(Self)
    }

    /// The 1-based strip position.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

/// Description of how a rectangular `(x, y)` grid of LEDs maps to the linear
/// order of LEDs on a NeoPixel-style (WS2812) strip.
///
/// `LedLayout` lets you describe LED panel wiring once, then write graphics
/// and animations in `(x, y)` space without caring about strip order.
///
/// Coordinates use a screen-style convention: `(0, 0)` is the top-left
/// corner, `x` increases to the right, and `y` increases downward.
///
/// Prefer the built-in constructors:
/// - [`serpentine_column_major`](Self::serpentine_column_major) /
///   [`serpentine_row_major`](Self::serpentine_row_major)
/// - [`stacked_serpentine`](Self::stacked_serpentine) for multi-panel displays
/// - [`linear_h`](Self::linear_h) / [`linear_v`](Self::linear_v)
///
/// For unusual wiring, construct a layout directly with [`LedLayout::new`] by
/// listing `(x, y)` for each LED in the order the strip is wired, then adapt
/// it with transforms ([`rotate_cw`](Self::rotate_cw),
/// [`flip_h`](Self::flip_h), [`combine_v`](Self::combine_v), etc.).
///
/// # Validation
///
/// Construction validates the wiring description: coordinates must be
/// in-bounds and every `(x, y)` cell must appear exactly once. A duplicate or
/// missing cell is a configuration error - nothing should be written to a
/// display whose mapping is not a bijection, so callers are expected to abort
/// on `Err` here.
///
/// # Example
///
/// ```
/// use led_panel_kit::led2d::layout::LedLayout;
///
/// // Strip snakes down columns (3x2 example):
/// //   LED0  LED3  LED4
/// //   LED1  LED2  LED5
/// let layout = LedLayout::serpentine_column_major(3, 2)?;
/// assert_eq!(
///     layout.index_to_xy(),
///     &[(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1)],
/// );
/// # Ok::<(), led_panel_kit::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedLayout {
    /// Wiring order: entry `i` is the `(x, y)` cell LED `i` lights.
    map: Vec<(u16, u16)>,
    /// Inversion: cell `y * width + x` holds the wiring slot of that cell.
    by_xy: Vec<u16>,
    width: usize,
    height: usize,
}

impl LedLayout {
    /// Constructor: verifies the mapping covers every cell of the
    /// width x height rectangle exactly once.
    ///
    /// # Errors
    ///
    /// Returns a layout configuration error when the entry count disagrees
    /// with the rectangle, an entry is out of bounds, or a cell is claimed
    /// twice or not at all.
    pub fn new(width: usize, height: usize, map: Vec<(u16, u16)>) -> Result<Self> {
        if width == 0
            || height == 0
            || map.len() != width * height
            || map.len() > usize::from(u16::MAX)
        {
            return Err(Error::LayoutSize {
                len: map.len(),
                width,
                height,
            });
        }

        let mut slots: Vec<Option<u16>> = vec![None; map.len()];
        for (led, &(x, y)) in map.iter().enumerate() {
            if usize::from(x) >= width || usize::from(y) >= height {
                return Err(Error::LayoutOutOfBounds { x, y });
            }
            let cell = usize::from(y) * width + usize::from(x);
            if slots[cell].is_some() {
                return Err(Error::LayoutDuplicate { x, y });
            }
            slots[cell] = Some(led as u16);
        }

        let mut by_xy = Vec::with_capacity(map.len());
        for (cell, slot) in slots.iter().enumerate() {
            match slot {
                Some(led) => by_xy.push(*led),
                None => {
                    return Err(Error::LayoutUncovered {
                        x: (cell % width) as u16,
                        y: (cell / width) as u16,
                    });
                }
            }
        }

        Ok(Self {
            map,
            by_xy,
            width,
            height,
        })
    }

    // Transforms of a valid layout stay bijective; a failure here is a bug.
    fn rebuild(width: usize, height: usize, map: Vec<(u16, u16)>) -> Self {
        Self::new(width, height, map).expect("layout transform preserves validity")
    }

    /// Linear row-major mapping for a single-row strip (x increases
    /// left-to-right).
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutSize`] for a zero-length strip.
    pub fn linear_h(len: usize) -> Result<Self> {
        let map = (0..len).map(|x| (x as u16, 0)).collect();
        Self::new(len, 1, map)
    }

    /// Linear column-major mapping for a single-column strip (y increases
    /// top-to-bottom).
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutSize`] for a zero-length strip.
    pub fn linear_v(len: usize) -> Result<Self> {
        let map = (0..len).map(|y| (0, y as u16)).collect();
        Self::new(1, len, map)
    }

    /// Serpentine column-major mapping: the strip snakes down and up
    /// alternating columns.
    ///
    /// ```text
    /// 3x2 example:
    ///   LED0  LED3  LED4
    ///   LED1  LED2  LED5
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutSize`] when either dimension is zero.
    pub fn serpentine_column_major(width: usize, height: usize) -> Result<Self> {
        let mut map = vec![(0_u16, 0_u16); width * height];
        for y in 0..height {
            for x in 0..width {
                let led = if x % 2 == 0 {
                    // Even column: top-to-bottom
                    x * height + y
                } else {
                    // Odd column: bottom-to-top
                    x * height + (height - 1 - y)
                };
                map[led] = (x as u16, y as u16);
            }
        }
        Self::new(width, height, map)
    }

    /// Serpentine row-major mapping: the strip snakes across alternating
    /// rows.
    ///
    /// ```text
    /// 3x2 example:
    ///   LED0  LED1  LED2
    ///   LED5  LED4  LED3
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutSize`] when either dimension is zero.
    pub fn serpentine_row_major(width: usize, height: usize) -> Result<Self> {
        let mut map = vec![(0_u16, 0_u16); width * height];
        for y in 0..height {
            for x in 0..width {
                let led = if y % 2 == 0 {
                    y * width + x
                } else {
                    y * width + (width - 1 - x)
                };
                map[led] = (x as u16, y as u16);
            }
        }
        Self::new(width, height, map)
    }

    /// Layout for `panels` serpentine panels stacked vertically and wired as
    /// one strip.
    ///
    /// Panel `k` occupies rows `[k * panel_height, (k + 1) * panel_height)`.
    /// Even-parity panels are
    /// [`serpentine_column_major`](Self::serpentine_column_major);
    /// odd-parity panels carry the same serpentine rotated 180°, so their
    /// logical column is `panel_width - 1 - c` and the vertical run
    /// direction is keyed to the recomputed column's parity. Physically this
    /// is every other panel mounted upside-down, which keeps the inter-panel
    /// jumpers on alternating sides of the stack.
    ///
    /// On the reference six-panel 32x8 rig this puts physical index 1 at
    /// `(0, 0)` and physical index 1536 at `(0, 47)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayoutSize`] when any dimension or the panel count is
    /// zero.
    pub fn stacked_serpentine(
        panel_width: usize,
        panel_height: usize,
        panels: usize,
    ) -> Result<Self> {
        if panels == 0 {
            return Err(Error::LayoutSize {
                len: 0,
                width: panel_width,
                height: 0,
            });
        }
        let even = Self::serpentine_column_major(panel_width, panel_height)?;
        let odd = even.rotate_180();

        let mut stacked = even.clone();
        for panel in 1..panels {
            let next = if panel % 2 == 0 { &even } else { &odd };
            stacked = stacked.combine_v(next)?;
        }
        Ok(stacked)
    }

    /// Rotate 90° clockwise (dims swap).
    #[must_use]
    pub fn rotate_cw(&self) -> Self {
        let map = self
            .map
            .iter()
            .map(|&(x, y)| ((self.height - 1 - usize::from(y)) as u16, x))
            .collect();
        Self::rebuild(self.height, self.width, map)
    }

    /// Rotate 90° counter-clockwise derived from [`rotate_cw`](Self::rotate_cw).
    #[must_use]
    pub fn rotate_ccw(&self) -> Self {
        self.rotate_cw().rotate_cw().rotate_cw()
    }

    /// Rotate 180° derived from [`rotate_cw`](Self::rotate_cw).
    #[must_use]
    pub fn rotate_180(&self) -> Self {
        self.rotate_cw().rotate_cw()
    }

    /// Flip horizontally (mirror columns).
    #[must_use]
    pub fn flip_h(&self) -> Self {
        let map = self
            .map
            .iter()
            .map(|&(x, y)| ((self.width - 1 - usize::from(x)) as u16, y))
            .collect();
        Self::rebuild(self.width, self.height, map)
    }

    /// Flip vertically (mirror rows).
    #[must_use]
    pub fn flip_v(&self) -> Self {
        self.rotate_cw().flip_h().rotate_ccw()
    }

    /// Concatenate horizontally with a layout sharing the same height; the
    /// other layout's strip continues where this one's ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CombineMismatch`] when the heights differ.
    pub fn combine_h(&self, right: &Self) -> Result<Self> {
        if self.height != right.height {
            return Err(Error::CombineMismatch {
                left: self.height,
                right: right.height,
            });
        }
        let mut map = self.map.clone();
        map.extend(
            right
                .map
                .iter()
                .map(|&(x, y)| ((usize::from(x) + self.width) as u16, y)),
        );
        Self::new(self.width + right.width, self.height, map)
    }

    /// Concatenate vertically with a layout sharing the same width; the
    /// other layout's strip continues where this one's ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CombineMismatch`] when the widths differ.
    pub fn combine_v(&self, bottom: &Self) -> Result<Self> {
        if self.width != bottom.width {
            return Err(Error::CombineMismatch {
                left: self.width,
                right: bottom.width,
            });
        }
        let mut map = self.map.clone();
        map.extend(
            bottom
                .map
                .iter()
                .map(|&(x, y)| (x, (usize::from(y) + self.height) as u16)),
        );
        Self::new(self.width, self.height + bottom.height, map)
    }

    /// Number of columns in the layout.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows in the layout.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of LEDs in the layout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the layout addresses zero LEDs (never true for a validated
    /// layout).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The wiring order: entry `i` is the `(x, y)` cell LED `i` lights.
    #[must_use]
    pub fn index_to_xy(&self) -> &[(u16, u16)] {
        &self.map
    }

    /// The materialized inversion: cell `y * width + x` holds the wiring
    /// slot lighting that cell. Built once at validation; read-only after.
    #[must_use]
    pub fn mapping_by_xy(&self) -> &[u16] {
        &self.by_xy
    }

    /// The `(x, y)` cell lit by the LED at a 1-based strip position, or
    /// `None` past the end of the strip.
    ///
    /// ```
    /// use led_panel_kit::led2d::layout::{LedLayout, PhysicalIndex};
    ///
    /// let layout = LedLayout::stacked_serpentine(32, 8, 6)?;
    /// let first = PhysicalIndex::new(1).expect("nonzero");
    /// assert_eq!(layout.xy_at(first), Some((0, 0)));
    /// # Ok::<(), led_panel_kit::Error>(())
    /// ```
    #[must_use]
    pub fn xy_at(&self, index: PhysicalIndex) -> Option<(u16, u16)> {
        self.map.get(index.get() - 1).copied()
    }

    /// The 1-based strip position of the LED lighting `(x, y)`, or `None`
    /// outside the rectangle. Requests outside the declared area are
    /// rejected, never silently remapped.
    #[must_use]
    pub fn index_of(&self, x: u16, y: u16) -> Option<PhysicalIndex> {
        if usize::from(x) >= self.width || usize::from(y) >= self.height {
            return None;
        }
        let led = usize::from(self.by_xy[usize::from(y) * self.width + usize::from(x)]);
        PhysicalIndex::new(led + 1)
    }
}

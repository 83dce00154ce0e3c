//! Error and result types shared across the crate.

use derive_more::{Display, Error};

/// Crate-wide result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by layout validation, frame access, and backend handling.
///
/// Layout variants are configuration errors: they surface before anything is
/// written to hardware, and callers are expected to abort on them rather than
/// recover, since a bad wiring description would corrupt every later write.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum Error {
    /// Mapping length disagrees with the declared rectangle.
    #[display("layout holds {len} entries but declares a {width}x{height} rectangle")]
    LayoutSize {
        /// Number of wiring entries provided.
        len: usize,
        /// Declared width in pixels.
        width: usize,
        /// Declared height in pixels.
        height: usize,
    },

    /// A wiring entry points outside the declared rectangle.
    #[display("layout entry ({x}, {y}) is outside the declared rectangle")]
    LayoutOutOfBounds {
        /// Column of the offending entry.
        x: u16,
        /// Row of the offending entry.
        y: u16,
    },

    /// Two LEDs claim the same `(x, y)` cell.
    #[display("layout maps two LEDs to ({x}, {y})")]
    LayoutDuplicate {
        /// Column of the doubly-claimed cell.
        x: u16,
        /// Row of the doubly-claimed cell.
        y: u16,
    },

    /// A cell of the rectangle has no LED wired to it.
    #[display("layout leaves ({x}, {y}) unmapped")]
    LayoutUncovered {
        /// Column of the unmapped cell.
        x: u16,
        /// Row of the unmapped cell.
        y: u16,
    },

    /// Two layouts cannot be combined because their shared edge lengths differ.
    #[display("cannot combine layouts: shared edge is {left} pixels on one side and {right} on the other")]
    CombineMismatch {
        /// Edge length of the left/top layout.
        left: usize,
        /// Edge length of the right/bottom layout.
        right: usize,
    },

    /// A bounds-checked frame read was outside the surface.
    #[display("pixel ({x}, {y}) is outside the {width}x{height} surface")]
    OutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Surface width.
        width: usize,
        /// Surface height.
        height: usize,
    },

    /// Two surfaces of different dimensions were combined.
    #[display("frame sizes differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    SizeMismatch {
        /// Width of the left-hand frame.
        left_width: usize,
        /// Height of the left-hand frame.
        left_height: usize,
        /// Width of the right-hand frame.
        right_width: usize,
        /// Height of the right-hand frame.
        right_height: usize,
    },

    /// The hardware transport could not be acquired.
    ///
    /// Recovered locally: the display substitutes the in-memory stand-in
    /// backend instead of failing the process.
    #[display("hardware backend unavailable: {reason}")]
    BackendUnavailable {
        /// Driver-reported reason.
        reason: String,
    },

    /// A frame push to the hardware transport failed.
    #[display("hardware backend write failed: {reason}")]
    BackendWrite {
        /// Driver-reported reason.
        reason: String,
    },

    /// An injected backend does not address the same number of LEDs as the layout.
    #[display("backend addresses {found} LEDs but the layout needs {expected}")]
    BackendLength {
        /// LED count required by the layout.
        expected: usize,
        /// LED count the backend addresses.
        found: usize,
    },

    /// A background player did not finish within the join deadline.
    #[display("animation worker did not stop within the join deadline")]
    JoinTimeout,

    /// A background player panicked.
    #[display("animation worker panicked")]
    WorkerPanicked,
}

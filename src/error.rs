/// All errors that `rasterkit` can return.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The surface id does not refer to a live surface on the device.
    #[error("unknown surface")]
    UnknownSurface,
    /// A drawing operation was issued while no surface was current.
    #[error("no surface is current")]
    NoCurrentSurface,
    /// A pixel readback requested a region outside of the surface.
    #[error("cannot read {width}x{height} pixels at ({x}, {y}): out of bounds")]
    ReadOutOfBounds {
        /// The left edge of the requested region.
        x: u32,
        /// The bottom edge of the requested region, counted from the bottom row.
        y: u32,
        /// The width of the requested region.
        width: u32,
        /// The height of the requested region.
        height: u32,
    },
    /// `pop_matrix` was called more times than `push_matrix`.
    #[error("matrix stack underflow")]
    MatrixStackUnderflow,
    /// A surface cannot be created with this size, either because an axis is
    /// zero or because the pixel count is too large to allocate.
    #[error("cannot create a {width}x{height} surface")]
    InvalidSurfaceSize {
        /// The requested width.
        width: u32,
        /// The requested height.
        height: u32,
    },
    /// The offscreen surface is too small to hit test on.
    #[error("surface of {width}x{height} is too small for hit testing")]
    SurfaceTooSmall {
        /// The width of the surface.
        width: u32,
        /// The height of the surface.
        height: u32,
    },
}

/// A `Result` whose error type is [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

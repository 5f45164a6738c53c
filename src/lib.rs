//! Hit testing and clipped fills for a small software 2d renderer.
//!
//! Paths are built in user space, mapped through a [`GraphicContext`]'s
//! transform and rasterized with [`tiny_skia`] into the current [`Surface`]
//! of a [`Device`].
//! On top of that, [`is_point_in_shape`] answers containment queries by
//! painting into an offscreen surface and reading a pixel back, and
//! [`fill_within`] fills paths while clipping them to a window.

#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    missing_docs,
    // clippy::missing_docs_in_private_items,
    clippy::nursery,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms,
)]
#![cfg_attr(doc, deny(rustdoc::all))]
#![allow(
    clippy::missing_errors_doc, // TODO clippy::missing_errors_doc
    clippy::option_if_let_else,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

mod clip;
mod color;
/// The drawing state used by every drawing operation.
pub mod context;
/// Owns surfaces and tracks which one is current.
pub mod device;
mod error;
mod hit_test;
/// Math types for 2d geometry.
pub mod math;
/// Renders flattened geometry into bounded layers.
pub mod raster;
/// Types describing what to draw.
pub mod shape;
/// Double-buffered render targets.
pub mod surface;

// Re-exports
pub use euclid;
pub use image;
pub use lyon_tessellation;
pub use palette;
pub use tiny_skia;

pub use self::{
    clip::fill_within,
    color::Color,
    context::{ContextState, GraphicContext},
    device::{Device, SurfaceId},
    error::{Error, Result},
    hit_test::{is_point_in_shape, SAMPLE_OFFSET},
    shape::{Fill, FillRule, LineCap, LineJoin, Path, PathBuilder, Stroke},
    surface::{Buffer, Surface, SurfaceOptions},
};

/// A collection of commonly used exports provided by this crate.
pub mod prelude {
    pub use super::{
        fill_within, is_point_in_shape,
        math::{Angle, Point, Raw, Scaled, Size, Transform, Vector},
        shape::*,
        Buffer, Color, Device, GraphicContext, Surface, SurfaceId, SurfaceOptions,
    };
}

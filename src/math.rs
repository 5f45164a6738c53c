#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A unit representing physical pixels on a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Raw;

/// A unit representing the coordinate space paths are authored in, before
/// the context's transform is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Scaled;

/// A type representing an x and y coordinate.
pub type Point<T = f32, Unit = Scaled> = euclid::Point2D<T, Unit>;
/// A type representing a vector with magnitudes x and y.
pub type Vector<T = f32, Unit = Scaled> = euclid::Vector2D<T, Unit>;
/// A type representing a width and height.
pub type Size<T = f32, Unit = Scaled> = euclid::Size2D<T, Unit>;
/// A type representing an angle of measurement.
pub type Angle = euclid::Angle<f32>;
/// An affine transformation from user space to device pixels.
pub type Transform = euclid::Transform2D<f32, Scaled, Raw>;

/// Returns the uniform scale factor of `transform`: the square root of the
/// absolute value of its determinant.
pub fn transform_scale<Src, Dst>(transform: &euclid::Transform2D<f32, Src, Dst>) -> f32 {
    (transform.m11 * transform.m22 - transform.m12 * transform.m21)
        .abs()
        .sqrt()
}

/// Converts `transform` to the row-major layout tiny-skia expects.
pub(crate) fn to_skia<Src, Dst>(
    transform: &euclid::Transform2D<f32, Src, Dst>,
) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(
        transform.m11,
        transform.m12,
        transform.m21,
        transform.m22,
        transform.m31,
        transform.m32,
    )
}

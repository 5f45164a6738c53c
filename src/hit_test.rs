use image::{Pixel, Rgba};
use tracing::instrument;

use crate::{
    color::Color,
    context::GraphicContext,
    device::{Device, SurfaceId},
    math::{Point, Transform},
    shape::{Path, Stroke},
    surface::Buffer,
    Error, Result,
};

/// The sampled pixel sits this many pixels away from the top-left corner of
/// the offscreen surface, on both axes.
pub const SAMPLE_OFFSET: u32 = 1;

/// Tests whether (`x`, `y`) lies inside `polygon` by painting into
/// `offscreen` and reading a single pixel back.
///
/// A red marker is stroked at the point, `polygon` is filled in green on top
/// of it using the context's fill rule, and the point is inside if the
/// sampled pixel reads back as green. Painting is aliased, so the pixel is
/// green iff the centre of the unit square below and to the right of the
/// point, (`x + 0.5`, `y + 0.5`), lies inside `polygon`. Points within half
/// a unit of a left or top edge are therefore inside, and points within half
/// a unit of a right or bottom edge are not. A centre falling exactly on an
/// edge follows the rasterizer's rounding.
///
/// The context's transform is ignored: (`x`, `y`) is in the same space
/// `polygon` was built in. The context state and the device's current surface
/// are restored before returning, including when an error is returned. The
/// contents of `offscreen`'s back buffer are overwritten.
///
/// ```rust
/// use rasterkit::{is_point_in_shape, Device, GraphicContext, Path, SurfaceOptions};
///
/// let mut device = Device::new();
/// let offscreen = device.create_surface(SurfaceOptions::sized(8, 8))?;
/// let mut gc = GraphicContext::new();
/// let rect = Path::rectangle(-1., -1., 1000., 1000.);
///
/// assert!(is_point_in_shape(&mut gc, &mut device, offscreen, -1., -1., &rect)?);
/// assert!(!is_point_in_shape(&mut gc, &mut device, offscreen, 1000., 1000., &rect)?);
/// # Ok::<(), rasterkit::Error>(())
/// ```
#[instrument(name = "is_point_in_shape", level = "trace", skip(gc, device, polygon))]
pub fn is_point_in_shape(
    gc: &mut GraphicContext,
    device: &mut Device,
    offscreen: SurfaceId,
    x: f32,
    y: f32,
    polygon: &Path,
) -> Result<bool> {
    gc.save();
    let previous = device.current();

    let result = sample(gc, device, offscreen, x, y, polygon);

    device.rebind(previous);
    gc.restore();
    result
}

fn sample(
    gc: &mut GraphicContext,
    device: &mut Device,
    offscreen: SurfaceId,
    x: f32,
    y: f32,
    polygon: &Path,
) -> Result<bool> {
    device.make_current(offscreen)?;
    let surface = device.current_surface()?;
    let (width, height) = (surface.width(), surface.height());
    if width <= SAMPLE_OFFSET || height <= SAMPLE_OFFSET {
        return Err(Error::SurfaceTooSmall { width, height });
    }

    let offset = SAMPLE_OFFSET as f32;
    gc.set_transform(Transform::translation(offset - x, offset - y));
    gc.set_antialias(false);

    gc.begin_path();
    gc.state_mut().stroke = Stroke::new(Color::RED);
    gc.move_to(Point::new(x, y));
    gc.line_to(Point::new(x + 1., y + 1.));
    gc.stroke(device, &[])?;

    gc.begin_path();
    gc.set_fill_color(Color::LIME);
    gc.fill(device, &[polygon])?;

    let surface = device.current_surface_mut()?;
    surface.set_read_buffer(Buffer::Back);
    let data = surface.read_pixels(SAMPLE_OFFSET, height - 1 - SAMPLE_OFFSET, 1, 1)?;
    let sampled = *Rgba::from_slice(&data);
    tracing::trace!(?sampled, "sampled pixel");

    Ok(sampled == Rgba::from(Color::LIME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceOptions;

    fn offscreen_device() -> (Device, SurfaceId) {
        let mut device = Device::new();
        let offscreen = device.create_surface(SurfaceOptions::sized(4, 4)).unwrap();
        (device, offscreen)
    }

    #[test]
    fn sampled_pixel_is_marked_when_outside() {
        let (mut device, offscreen) = offscreen_device();
        let mut gc = GraphicContext::new();
        let far_away = Path::rectangle(100., 100., 110., 110.);

        assert!(!is_point_in_shape(&mut gc, &mut device, offscreen, 0., 0., &far_away).unwrap());
        let surface = device.surface(offscreen).unwrap();
        assert_eq!(surface.pixel(SAMPLE_OFFSET, SAMPLE_OFFSET), Some(Color::RED));
    }

    #[test]
    fn samples_the_centre_of_the_square_after_the_point() {
        let (mut device, offscreen) = offscreen_device();
        let mut gc = GraphicContext::new();
        let square = Path::rectangle(10., 10., 20., 20.);

        let mut inside = |x: f32, y: f32| {
            is_point_in_shape(&mut gc, &mut device, offscreen, x, y, &square).unwrap()
        };
        assert!(inside(10., 10.));
        assert!(inside(15.5, 12.25));
        assert!(inside(19.4, 19.4));
        assert!(inside(9.6, 9.6));
        assert!(!inside(19.6, 19.6));
        assert!(!inside(9.4, 15.));
        assert!(!inside(20., 20.));
        assert!(!inside(20., 15.));
        assert!(!inside(9., 15.));
    }

    #[test]
    fn points_near_the_right_edge_are_outside() {
        let (mut device, offscreen) = offscreen_device();
        let mut gc = GraphicContext::new();
        let square = Path::rectangle(0., 0., 10., 10.);

        let mut inside = |x: f32, y: f32| {
            is_point_in_shape(&mut gc, &mut device, offscreen, x, y, &square).unwrap()
        };
        // (x + 0.5, 5.5) is the sampled location.
        assert!(!inside(9.9995, 5.));
        assert!(inside(9.4, 5.));
        assert!(!inside(9.6, 5.));
        assert!(inside(-0.4, 5.));
        assert!(!inside(-0.6, 5.));
    }

    #[test]
    fn dashed_context_strokes_do_not_leak_into_the_marker() {
        let (mut device, offscreen) = offscreen_device();
        let mut gc = GraphicContext::new();
        gc.state_mut().stroke.options.dash = crate::shape::StrokeDash::new(vec![0.1, 10.], 0.);
        gc.set_line_width(0.1);
        let far_away = Path::rectangle(100., 100., 110., 110.);

        assert!(!is_point_in_shape(&mut gc, &mut device, offscreen, 0., 0., &far_away).unwrap());
        let surface = device.surface(offscreen).unwrap();
        assert_eq!(surface.pixel(SAMPLE_OFFSET, SAMPLE_OFFSET), Some(Color::RED));
        assert!(gc.state().stroke.options.dash.is_some());
    }

    #[test]
    fn tiny_surfaces_are_rejected() {
        let mut device = Device::new();
        let offscreen = device.create_surface(SurfaceOptions::sized(1, 10)).unwrap();
        let mut gc = GraphicContext::new();
        let square = Path::rectangle(0., 0., 1., 1.);

        assert_eq!(
            is_point_in_shape(&mut gc, &mut device, offscreen, 0., 0., &square),
            Err(Error::SurfaceTooSmall {
                width: 1,
                height: 10
            })
        );
        assert_eq!(device.current(), None);
    }
}

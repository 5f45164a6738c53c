use tracing::instrument;

use crate::{
    context::{flattening_tolerance, GraphicContext},
    device::Device,
    math::{Raw, Vector},
    raster::Rasterizer,
    shape::Path,
    Result,
};

/// Fills `paths` and the context's current path like
/// [`GraphicContext::fill`], painting only within the `width × height`
/// window whose top-left corner is at (`x`, `y`) on the current surface.
///
/// The geometry is rendered into a layer the size of the window, so no pixel
/// outside of it is ever written. The window snaps to whole pixels: its
/// origin is rounded to the nearest pixel and it is clamped to the surface,
/// while the geometry itself is never shifted. A window that does not
/// overlap the surface paints nothing. The context's transform applies to
/// the paths as usual, and its current path is cleared afterwards.
#[instrument(name = "fill_within", level = "trace", skip(gc, device, paths))]
pub fn fill_within(
    gc: &mut GraphicContext,
    device: &mut Device,
    x: f32,
    y: f32,
    width: u32,
    height: u32,
    paths: &[&Path],
) -> Result<()> {
    let surface = device.current_surface_mut()?;
    let state = gc.state();

    let frame = surface.translation().round();
    let left = (x.round() + frame.x).max(0.);
    let top = (y.round() + frame.y).max(0.);
    let right = (x.round() + frame.x + width as f32).min(surface.width() as f32);
    let bottom = (y.round() + frame.y + height as f32).min(surface.height() as f32);

    if x.is_finite() && y.is_finite() && right > left && bottom > top {
        let origin = Vector::<f32, Raw>::new(left - frame.x, top - frame.y);
        let mut rasterizer = Rasterizer::new(
            (right - left) as u32,
            (bottom - top) as u32,
            state.fill.options.fill_rule,
        );
        let transform = state.transform.then_translate(-origin);
        let tolerance = flattening_tolerance(state.fill.options.tolerance, &transform);
        for path in paths.iter().copied().chain(std::iter::once(&state.path)) {
            for polyline in path.flatten(&transform, tolerance) {
                rasterizer.add_polyline(&polyline);
            }
        }
        tracing::trace!(edges = rasterizer.edges(), left, top, right, bottom, "flattened");

        if let Some(layer) = rasterizer.rasterize(state.fill.color, state.antialias) {
            surface.push_matrix();
            surface.translate(origin.x, origin.y);
            surface.composite(&layer);
            surface.pop_matrix()?;
        }
    } else {
        tracing::trace!("window does not overlap the surface");
    }

    gc.begin_path();
    Ok(())
}

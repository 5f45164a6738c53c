use std::iter::once;

use euclid::Transform2D;

use crate::{
    color::Color,
    device::Device,
    math::{to_skia, transform_scale, Angle, Point, Raw, Scaled, Transform, Vector},
    raster::{append_polyline, paint, Rasterizer},
    shape::{Fill, FillRule, Path, Stroke},
    Result,
};

/// Everything [`GraphicContext::save`] preserves.
#[derive(Debug, Clone)]
pub struct ContextState {
    /// The path built by [`GraphicContext::move_to`] and friends.
    pub path: Path<Scaled>,
    /// Maps path coordinates to surface pixels.
    pub transform: Transform,
    /// The color and options used by [`GraphicContext::fill`].
    pub fill: Fill,
    /// The color and options used by [`GraphicContext::stroke`].
    pub stroke: Stroke,
    /// Whether partially covered pixels are blended by their coverage. When
    /// disabled, a pixel is painted iff its centre lies inside the shape.
    pub antialias: bool,
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            path: Path::new(),
            transform: Transform::identity(),
            fill: Fill::default(),
            stroke: Stroke::default(),
            antialias: true,
        }
    }
}

/// A 2d drawing context painting into a [`Device`]'s current surface.
#[derive(Debug, Clone, Default)]
pub struct GraphicContext {
    current: ContextState,
    saved: Vec<ContextState>,
}

impl GraphicContext {
    /// Returns a context with an identity transform and black fill and
    /// stroke colors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &ContextState {
        &self.current
    }

    /// Returns the current state for modification.
    pub fn state_mut(&mut self) -> &mut ContextState {
        &mut self.current
    }

    /// Pushes a copy of the current state, including the current path.
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pops the most recently saved state. Does nothing if no state is saved.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        } else {
            tracing::trace!("restore called without a saved state");
        }
    }

    /// Returns the current transform.
    #[must_use]
    pub const fn transform(&self) -> Transform {
        self.current.transform
    }

    /// Replaces the current transform.
    pub fn set_transform(&mut self, transform: Transform) {
        self.current.transform = transform;
    }

    /// Translates path coordinates by (`x`, `y`) before the current transform.
    pub fn translate(&mut self, x: f32, y: f32) {
        self.current.transform = self.current.transform.pre_translate(Vector::new(x, y));
    }

    /// Scales path coordinates before the current transform.
    pub fn scale(&mut self, x: f32, y: f32) {
        self.current.transform = self.current.transform.pre_scale(x, y);
    }

    /// Rotates path coordinates before the current transform.
    pub fn rotate(&mut self, angle: Angle) {
        self.current.transform = self.current.transform.pre_rotate(angle);
    }

    /// Returns the fill color.
    #[must_use]
    pub const fn fill_color(&self) -> Color {
        self.current.fill.color
    }

    /// Sets the fill color.
    pub fn set_fill_color(&mut self, color: Color) {
        self.current.fill.color = color;
    }

    /// Returns the stroke color.
    #[must_use]
    pub const fn stroke_color(&self) -> Color {
        self.current.stroke.color
    }

    /// Sets the stroke color.
    pub fn set_stroke_color(&mut self, color: Color) {
        self.current.stroke.color = color;
    }

    /// Returns the stroke width in path units.
    #[must_use]
    pub const fn line_width(&self) -> f32 {
        self.current.stroke.options.width
    }

    /// Sets the stroke width in path units.
    pub fn set_line_width(&mut self, width: f32) {
        self.current.stroke.options.width = width;
    }

    /// Returns the fill rule.
    #[must_use]
    pub const fn fill_rule(&self) -> FillRule {
        self.current.fill.options.fill_rule
    }

    /// Sets the fill rule.
    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.current.fill.options.fill_rule = fill_rule;
    }

    /// Returns whether painting is antialiased.
    #[must_use]
    pub const fn antialias(&self) -> bool {
        self.current.antialias
    }

    /// Sets whether painting is antialiased. When disabled, a pixel is
    /// painted solid iff its centre lies inside the shape.
    pub fn set_antialias(&mut self, antialias: bool) {
        self.current.antialias = antialias;
    }

    /// Returns the current path.
    #[must_use]
    pub const fn path(&self) -> &Path<Scaled> {
        &self.current.path
    }

    /// Discards the current path.
    pub fn begin_path(&mut self) {
        self.current.path.clear();
    }

    /// Begins a new contour on the current path.
    pub fn move_to(&mut self, at: Point<f32, Scaled>) {
        self.current.path.move_to(at);
    }

    /// Adds a line to the current path.
    pub fn line_to(&mut self, to: Point<f32, Scaled>) {
        self.current.path.line_to(to);
    }

    /// Adds a quadratic curve to the current path.
    pub fn quadratic_curve_to(&mut self, ctrl: Point<f32, Scaled>, to: Point<f32, Scaled>) {
        self.current.path.quadratic_curve_to(ctrl, to);
    }

    /// Adds a cubic curve to the current path.
    pub fn cubic_curve_to(
        &mut self,
        ctrl1: Point<f32, Scaled>,
        ctrl2: Point<f32, Scaled>,
        to: Point<f32, Scaled>,
    ) {
        self.current.path.cubic_curve_to(ctrl1, ctrl2, to);
    }

    /// Closes the current contour of the current path.
    pub fn close(&mut self) {
        self.current.path.close();
    }

    /// Fills the device's current surface with its clear color.
    pub fn clear(&self, device: &mut Device) -> Result<()> {
        device.current_surface_mut()?.clear();
        Ok(())
    }

    /// Fills `paths` together with the current path into the device's current
    /// surface, then clears the current path.
    pub fn fill(&mut self, device: &mut Device, paths: &[&Path<Scaled>]) -> Result<()> {
        let surface = device.current_surface_mut()?;
        let size = surface.size();
        let state = &self.current;

        let mut rasterizer = Rasterizer::new(size.width, size.height, state.fill.options.fill_rule);
        let tolerance = flattening_tolerance(state.fill.options.tolerance, &state.transform);
        for path in paths.iter().copied().chain(once(&state.path)) {
            for polyline in path.flatten(&state.transform, tolerance) {
                rasterizer.add_polyline(&polyline);
            }
        }
        if let Some(layer) = rasterizer.rasterize(state.fill.color, state.antialias) {
            surface.composite(&layer);
        }

        self.begin_path();
        Ok(())
    }

    /// Strokes `paths` together with the current path into the device's
    /// current surface, then clears the current path.
    pub fn stroke(&mut self, device: &mut Device, paths: &[&Path<Scaled>]) -> Result<()> {
        let surface = device.current_surface_mut()?;
        let state = &self.current;

        // Curves are flattened in path space and the transform is applied
        // while stroking, so the width, caps and joins scale with it.
        let path_space = Transform2D::<f32, Scaled, Scaled>::identity();
        let tolerance = flattening_tolerance(state.stroke.tolerance, &state.transform);
        let mut builder = tiny_skia::PathBuilder::new();
        for path in paths.iter().copied().chain(once(&state.path)) {
            for polyline in path.flatten(&path_space, tolerance) {
                append_polyline(&mut builder, &polyline);
            }
        }
        if let Some(outline) = builder.finish() {
            surface.stroke_path(
                &outline,
                &paint(state.stroke.color, state.antialias),
                &state.stroke.options,
                to_skia(&state.transform),
            );
        }

        self.begin_path();
        Ok(())
    }
}

/// Converts a tolerance in device pixels into path units for `transform`, so
/// curves flatten with the same accuracy on screen at any scale.
pub(crate) fn flattening_tolerance<Src>(
    device_tolerance: f32,
    transform: &euclid::Transform2D<f32, Src, Raw>,
) -> f32 {
    let scale = transform_scale(transform);
    if scale > f32::EPSILON {
        device_tolerance / scale
    } else {
        device_tolerance
    }
}

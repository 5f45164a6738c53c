//! Feeds flattened geometry to tiny-skia and renders it into layers bounded
//! to a fixed number of pixels.

use tiny_skia::{Paint, PathBuilder, Pixmap, Transform};

use crate::{
    color::Color,
    math::Raw,
    shape::{FillRule, Polyline},
};

/// Collects device-space contours and renders their coverage into a
/// `width × height` layer. Geometry outside of those bounds is never
/// rasterized.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    width: u32,
    height: u32,
    fill_rule: FillRule,
    builder: PathBuilder,
    edges: usize,
}

impl Rasterizer {
    /// Returns a rasterizer bounded to `width × height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32, fill_rule: FillRule) -> Self {
        Self {
            width,
            height,
            fill_rule,
            builder: PathBuilder::new(),
            edges: 0,
        }
    }

    /// Resizes the bounds, discarding any added contours.
    pub fn set_bounds(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.clear();
    }

    /// Returns the width of the bounds.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the bounds.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the fill rule used to resolve coverage.
    #[must_use]
    pub const fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Sets the fill rule used to resolve coverage.
    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    /// Returns the number of edges added since the last clear.
    #[must_use]
    pub const fn edges(&self) -> usize {
        self.edges
    }

    /// Adds `polyline` as a contour. Filling always treats it as closed.
    pub fn add_polyline(&mut self, polyline: &Polyline<Raw>) {
        if polyline.points.len() < 2 {
            return;
        }
        append_polyline(&mut self.builder, polyline);
        self.edges += polyline.points.len();
    }

    /// Renders the added contours in `color`. Returns `None` when there is
    /// nothing to render or the bounds are empty.
    ///
    /// Without `antialias`, a pixel is painted solid when its centre lies
    /// inside the geometry and left untouched otherwise.
    #[must_use]
    pub fn rasterize(&self, color: Color, antialias: bool) -> Option<Pixmap> {
        let path = self.builder.clone().finish()?;
        let mut layer = Pixmap::new(self.width, self.height)?;
        layer.fill_path(
            &path,
            &paint(color, antialias),
            skia_fill_rule(self.fill_rule),
            Transform::identity(),
            None,
        );
        Some(layer)
    }

    /// Discards every added contour.
    pub fn clear(&mut self) {
        self.builder = PathBuilder::new();
        self.edges = 0;
    }
}

/// Appends `polyline` to `builder` as one contour, closing it if the
/// polyline is closed.
pub(crate) fn append_polyline<U>(builder: &mut PathBuilder, polyline: &Polyline<U>) {
    let mut points = polyline.points.iter();
    if let Some(first) = points.next() {
        builder.move_to(first.x, first.y);
        for point in points {
            builder.line_to(point.x, point.y);
        }
        if polyline.closed {
            builder.close();
        }
    }
}

/// Returns a solid paint of `color`.
pub(crate) fn paint(color: Color, antialias: bool) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: antialias,
        ..Paint::default()
    };
    paint.set_color(color.into());
    paint
}

pub(crate) const fn skia_fill_rule(fill_rule: FillRule) -> tiny_skia::FillRule {
    match fill_rule {
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        FillRule::NonZero => tiny_skia::FillRule::Winding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point;

    fn square(x1: f32, y1: f32, x2: f32, y2: f32) -> Polyline<Raw> {
        Polyline {
            points: vec![
                Point::new(x1, y1),
                Point::new(x2, y1),
                Point::new(x2, y2),
                Point::new(x1, y2),
            ],
            closed: true,
        }
    }

    fn alpha(layer: &Pixmap, x: u32, y: u32) -> u8 {
        layer.pixel(x, y).map_or(0, |pixel| pixel.alpha())
    }

    #[test]
    fn pixel_aligned_square_is_fully_covered() {
        let mut rasterizer = Rasterizer::new(8, 8, FillRule::NonZero);
        rasterizer.add_polyline(&square(2., 2., 5., 6.));
        assert_eq!(rasterizer.edges(), 4);
        let layer = rasterizer.rasterize(Color::RED, true).unwrap();

        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..5).contains(&x) && (2..6).contains(&y);
                assert_eq!(alpha(&layer, x, y), if inside { 255 } else { 0 }, "({}, {})", x, y);
            }
        }
        assert_eq!(layer.pixel(3, 3).unwrap().red(), 255);
    }

    #[test]
    fn half_pixel_edges_give_partial_coverage() {
        let mut rasterizer = Rasterizer::new(4, 4, FillRule::NonZero);
        rasterizer.add_polyline(&square(1.5, 1.5, 3., 3.));

        let layer = rasterizer.rasterize(Color::BLACK, true).unwrap();
        assert!(alpha(&layer, 1, 1) > 0);
        assert!(alpha(&layer, 1, 1) < alpha(&layer, 1, 2));
        assert!(alpha(&layer, 1, 2) < 255);
        assert_eq!(alpha(&layer, 2, 2), 255);
        assert_eq!(alpha(&layer, 0, 0), 0);
        assert_eq!(alpha(&layer, 3, 3), 0);
    }

    #[test]
    fn aliased_rendering_samples_pixel_centres() {
        let mut rasterizer = Rasterizer::new(4, 4, FillRule::NonZero);
        rasterizer.add_polyline(&square(1.4, 1.6, 3., 3.));

        let layer = rasterizer.rasterize(Color::BLACK, false).unwrap();
        // The centre of (1, 1) is at (1.5, 1.5): inside horizontally, above
        // the top edge vertically.
        assert_eq!(alpha(&layer, 1, 1), 0);
        assert_eq!(alpha(&layer, 1, 2), 255);
        assert_eq!(alpha(&layer, 2, 2), 255);
    }

    #[test]
    fn geometry_outside_bounds_is_clipped() {
        let mut rasterizer = Rasterizer::new(10, 10, FillRule::NonZero);
        rasterizer.add_polyline(&square(-100., -100., 500., 500.));
        let layer = rasterizer.rasterize(Color::BLUE, true).unwrap();
        assert_eq!((layer.width(), layer.height()), (10, 10));
        assert!(layer.pixels().iter().all(|pixel| pixel.alpha() == 255));

        rasterizer.clear();
        rasterizer.add_polyline(&square(20., 20., 40., 40.));
        rasterizer.add_polyline(&square(-40., -40., -20., -20.));
        let layer = rasterizer.rasterize(Color::BLUE, true).unwrap();
        assert!(layer.pixels().iter().all(|pixel| pixel.alpha() == 0));
    }

    #[test]
    fn fill_rules_differ_on_overlap() {
        let outer = square(0., 0., 6., 6.);
        let inner = square(2., 2., 4., 4.);

        let mut rasterizer = Rasterizer::new(6, 6, FillRule::NonZero);
        rasterizer.add_polyline(&outer);
        rasterizer.add_polyline(&inner);
        let layer = rasterizer.rasterize(Color::BLACK, true).unwrap();
        assert_eq!(alpha(&layer, 3, 3), 255);
        assert_eq!(alpha(&layer, 1, 1), 255);

        rasterizer.set_fill_rule(FillRule::EvenOdd);
        assert_eq!(rasterizer.fill_rule(), FillRule::EvenOdd);
        let layer = rasterizer.rasterize(Color::BLACK, true).unwrap();
        assert_eq!(alpha(&layer, 3, 3), 0);
        assert_eq!(alpha(&layer, 1, 1), 255);
    }

    #[test]
    fn nothing_to_render() {
        let mut rasterizer = Rasterizer::new(4, 4, FillRule::NonZero);
        assert!(rasterizer.rasterize(Color::BLACK, true).is_none());

        rasterizer.add_polyline(&Polyline {
            points: vec![Point::new(1., 1.)],
            closed: true,
        });
        assert_eq!(rasterizer.edges(), 0);
        assert!(rasterizer.rasterize(Color::BLACK, true).is_none());

        rasterizer.add_polyline(&square(0., 0., 4., 4.));
        rasterizer.set_bounds(0, 4);
        assert_eq!(rasterizer.edges(), 0);
        assert_eq!((rasterizer.width(), rasterizer.height()), (0, 4));
        rasterizer.add_polyline(&square(0., 0., 4., 4.));
        assert!(rasterizer.rasterize(Color::BLACK, true).is_none());
    }
}

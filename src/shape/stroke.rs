pub use tiny_skia::{LineCap, LineJoin, StrokeDash};

use crate::color::Color;

/// The flattening tolerance strokes use unless told otherwise.
const DEFAULT_TOLERANCE: f32 = 0.1;

/// Shape stroke options.
#[derive(Clone, Debug)]
pub struct Stroke {
    /// The color to stroke.
    pub color: Color,
    /// The line width, caps, joins, miter limit and dash pattern.
    pub options: tiny_skia::Stroke,
    /// The maximum distance between a curve and the line segments it is
    /// flattened into, in device pixels.
    pub tolerance: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl Stroke {
    /// Returns a solid stroke of `color` with default options: one pixel
    /// wide, butt caps and miter joins.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            options: tiny_skia::Stroke::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Sets the stroke options.
    #[must_use]
    pub fn with_options(mut self, options: tiny_skia::Stroke) -> Self {
        self.options = options;
        self
    }

    /// Sets the line width.
    #[must_use]
    pub fn line_width(mut self, width: f32) -> Self {
        self.options.width = width;
        self
    }

    /// Sets the cap drawn at the ends of open contours.
    #[must_use]
    pub fn line_cap(mut self, cap: LineCap) -> Self {
        self.options.line_cap = cap;
        self
    }

    /// Sets the join drawn where segments meet.
    #[must_use]
    pub fn line_join(mut self, join: LineJoin) -> Self {
        self.options.line_join = join;
        self
    }

    /// Sets the miter limit.
    #[must_use]
    pub fn miter_limit(mut self, limit: f32) -> Self {
        self.options.miter_limit = limit;
        self
    }
}

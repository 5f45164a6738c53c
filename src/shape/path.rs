use euclid::Transform2D;
use lyon_tessellation::{
    geom::{CubicBezierSegment, QuadraticBezierSegment},
    math::point as lyon_point,
};

use crate::math::{Point, Scaled};

/// A point on a [`Path`].
pub type Endpoint<S> = Point<f32, S>;
/// A control point used to create curves.
pub type ControlPoint<S> = Point<f32, S>;

/// Smaller flattening tolerances are raised to this.
const MIN_TOLERANCE: f32 = 1e-3;

/// An entry in a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEvent<S> {
    /// Begins a contour.
    Begin {
        /// The location to begin at.
        at: Endpoint<S>,
    },
    /// A straight line segment.
    Line {
        /// The origin of the line.
        from: Endpoint<S>,
        /// The end location of the line.
        to: Endpoint<S>,
    },
    /// A quadratic curve (one control point).
    Quadratic {
        /// The origin of the curve.
        from: Endpoint<S>,
        /// The control point for the curve.
        ctrl: ControlPoint<S>,
        /// The end location of the curve.
        to: Endpoint<S>,
    },
    /// A cubic curve (two control points).
    Cubic {
        /// The origin of the curve.
        from: Endpoint<S>,
        /// The first control point for the curve.
        ctrl1: ControlPoint<S>,
        /// The second control point for the curve.
        ctrl2: ControlPoint<S>,
        /// The end location of the curve.
        to: Endpoint<S>,
    },
    /// Ends a contour.
    End {
        /// The end location of the contour.
        last: Endpoint<S>,
        /// The start location of the contour.
        first: Endpoint<S>,
        /// Whether the contour is closed.
        close: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct OpenContour<S> {
    first: Endpoint<S>,
    current: Endpoint<S>,
}

/// An ordered list of drawing commands describing one or more contours.
///
/// A contour that has not been ended with [`Path::close`] stays open; fills
/// treat every contour as closed, strokes only close contours that were
/// explicitly closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<S = Scaled> {
    events: Vec<PathEvent<S>>,
    open: Option<OpenContour<S>>,
}

impl<S> Default for Path<S> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            open: None,
        }
    }
}

impl<S> Path<S>
where
    S: Copy,
{
    /// Returns an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a closed rectangle with corners at (`x1`, `y1`) and (`x2`, `y2`).
    #[must_use]
    pub fn rectangle(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let mut path = Self::new();
        path.add_rectangle(x1, y1, x2, y2);
        path
    }

    /// Appends a closed rectangle with corners at (`x1`, `y1`) and (`x2`,
    /// `y2`) as a new contour.
    pub fn add_rectangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.move_to(Point::new(x1, y1));
        self.line_to(Point::new(x2, y1));
        self.line_to(Point::new(x2, y2));
        self.line_to(Point::new(x1, y2));
        self.close();
    }

    /// Returns true if the path contains no drawing commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes every drawing command.
    pub fn clear(&mut self) {
        self.events.clear();
        self.open = None;
    }

    /// Ends the current contour, if any, and begins a new one at `at`.
    pub fn move_to(&mut self, at: Endpoint<S>) {
        self.finish_contour(false);
        self.events.push(PathEvent::Begin { at });
        self.open = Some(OpenContour {
            first: at,
            current: at,
        });
    }

    /// Adds a line to `to`. Without a current contour this behaves like
    /// [`Path::move_to`].
    pub fn line_to(&mut self, to: Endpoint<S>) {
        if let Some(from) = self.advance(to) {
            self.events.push(PathEvent::Line { from, to });
        }
    }

    /// Adds a quadratic curve through `ctrl` ending at `to`.
    pub fn quadratic_curve_to(&mut self, ctrl: ControlPoint<S>, to: Endpoint<S>) {
        if let Some(from) = self.advance(to) {
            self.events.push(PathEvent::Quadratic { from, ctrl, to });
        }
    }

    /// Adds a cubic curve through `ctrl1` and `ctrl2` ending at `to`.
    pub fn cubic_curve_to(&mut self, ctrl1: ControlPoint<S>, ctrl2: ControlPoint<S>, to: Endpoint<S>) {
        if let Some(from) = self.advance(to) {
            self.events.push(PathEvent::Cubic {
                from,
                ctrl1,
                ctrl2,
                to,
            });
        }
    }

    /// Closes the current contour.
    pub fn close(&mut self) {
        self.finish_contour(true);
    }

    /// Iterates over the drawing commands. An open trailing contour is
    /// terminated with an unclosed [`PathEvent::End`].
    pub fn iter(&self) -> impl Iterator<Item = PathEvent<S>> + '_ {
        self.events
            .iter()
            .copied()
            .chain(self.open.map(|open| PathEvent::End {
                last: open.current,
                first: open.first,
                close: false,
            }))
    }

    /// Approximates every contour with straight lines and maps the result
    /// through `transform`.
    ///
    /// `tolerance` is the maximum distance, in this path's units, between a
    /// curve and its approximation.
    #[must_use]
    pub fn flatten<D>(&self, transform: &Transform2D<f32, S, D>, tolerance: f32) -> Vec<Polyline<D>> {
        let tolerance = tolerance.max(MIN_TOLERANCE);
        let mut polylines = Vec::new();
        let mut points = Vec::new();
        for event in self.iter() {
            match event {
                PathEvent::Begin { at } => {
                    if !points.is_empty() {
                        polylines.push(Polyline {
                            points: std::mem::take(&mut points),
                            closed: false,
                        });
                    }
                    points.push(transform.transform_point(at));
                }
                PathEvent::Line { to, .. } => {
                    points.push(transform.transform_point(to));
                }
                PathEvent::Quadratic { from, ctrl, to } => {
                    let segment = QuadraticBezierSegment {
                        from: lyon_point(from.x, from.y),
                        ctrl: lyon_point(ctrl.x, ctrl.y),
                        to: lyon_point(to.x, to.y),
                    };
                    let start = points.len();
                    segment.for_each_flattened(tolerance, &mut |sampled| {
                        points.push(transform.transform_point(euclid::point2(sampled.x, sampled.y)));
                    });
                    end_curve(&mut points, start, transform.transform_point(to));
                }
                PathEvent::Cubic {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                } => {
                    let segment = CubicBezierSegment {
                        from: lyon_point(from.x, from.y),
                        ctrl1: lyon_point(ctrl1.x, ctrl1.y),
                        ctrl2: lyon_point(ctrl2.x, ctrl2.y),
                        to: lyon_point(to.x, to.y),
                    };
                    let start = points.len();
                    segment.for_each_flattened(tolerance, &mut |sampled| {
                        points.push(transform.transform_point(euclid::point2(sampled.x, sampled.y)));
                    });
                    end_curve(&mut points, start, transform.transform_point(to));
                }
                PathEvent::End { close, .. } => {
                    polylines.push(Polyline {
                        points: std::mem::take(&mut points),
                        closed: close,
                    });
                }
            }
        }
        if !points.is_empty() {
            polylines.push(Polyline {
                points,
                closed: false,
            });
        }

        polylines
    }

    fn advance(&mut self, to: Endpoint<S>) -> Option<Endpoint<S>> {
        match &mut self.open {
            Some(open) => {
                let from = open.current;
                open.current = to;
                Some(from)
            }
            None => {
                self.move_to(to);
                None
            }
        }
    }

    fn finish_contour(&mut self, close: bool) {
        if let Some(open) = self.open.take() {
            self.events.push(PathEvent::End {
                last: open.current,
                first: open.first,
                close,
            });
        }
    }
}

impl<S, T> From<T> for Path<S>
where
    T: IntoIterator<Item = PathEvent<S>>,
{
    fn from(source: T) -> Self {
        Self {
            events: source.into_iter().collect(),
            open: None,
        }
    }
}

/// Replaces the last point a curve produced with its exact endpoint, so
/// contours meet without gaps regardless of rounding in the flattener.
fn end_curve<D>(points: &mut Vec<Point<f32, D>>, start: usize, to: Point<f32, D>) {
    if points.len() > start {
        points.pop();
    }
    points.push(to);
}

/// A contour approximated with straight lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline<U> {
    /// The vertices in drawing order.
    pub points: Vec<Point<f32, U>>,
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}

impl<U> Polyline<U>
where
    U: Copy,
{
    /// Iterates over each line segment, including the closing segment for
    /// closed polylines.
    pub fn segments(&self) -> impl Iterator<Item = (Point<f32, U>, Point<f32, U>)> + '_ {
        let closing = if self.closed && self.points.len() > 1 {
            self.points.last().copied().zip(self.points.first().copied())
        } else {
            None
        };
        self.points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing)
    }
}

/// Builds a [`Path`] holding a single contour.
pub struct PathBuilder<S> {
    path: Path<S>,
    close: bool,
}

impl<S> PathBuilder<S>
where
    S: Copy,
{
    /// Begins a contour at `start_at`.
    #[must_use]
    pub fn new(start_at: Endpoint<S>) -> Self {
        let mut path = Path::new();
        path.move_to(start_at);
        Self { path, close: false }
    }

    /// Ends the contour and returns the path.
    #[must_use]
    pub fn build(mut self) -> Path<S> {
        self.path.finish_contour(self.close);
        self.path
    }

    /// Adds a line to `end_at`.
    #[must_use]
    pub fn line_to(mut self, end_at: Endpoint<S>) -> Self {
        self.path.line_to(end_at);
        self
    }

    /// Adds a quadratic curve through `control` ending at `end_at`.
    #[must_use]
    pub fn quadratic_curve_to(mut self, control: ControlPoint<S>, end_at: Endpoint<S>) -> Self {
        self.path.quadratic_curve_to(control, end_at);
        self
    }

    /// Adds a cubic curve through `control1` and `control2` ending at `end_at`.
    #[must_use]
    pub fn cubic_curve_to(
        mut self,
        control1: ControlPoint<S>,
        control2: ControlPoint<S>,
        end_at: Endpoint<S>,
    ) -> Self {
        self.path.cubic_curve_to(control1, control2, end_at);
        self
    }

    /// Closes the contour when it is built.
    #[must_use]
    pub fn close(mut self) -> Self {
        self.close = true;
        self
    }
}

//! Drawing surface abstraction.
//!
//! Renderers only talk to [`Surface`]; all coordinates are device-independent
//! pixels. Scaling to the device pixel ratio is the surface's job.

use crate::charts::geometry::{Dimensions, Point, Rect};
use crate::theme::Color;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Clockwise arc; a line joins the current point to the arc start.
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Close,
}

/// A vector path in canvas terms.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn arc(mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        self.segments.push(PathSegment::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[Point]) -> Self {
        let mut iter = points.iter();
        let Some(first) = iter.next() else {
            return Self::new();
        };
        iter.fold(Self::new().move_to(*first), |path, p| path.line_to(*p))
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self::new().move_to(from).line_to(to)
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new().arc(center, radius, 0.0, TAU).close()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<ColorStop>,
    },
    RadialGradient {
        center: Point,
        radius: f64,
        stops: Vec<ColorStop>,
    },
}

impl Paint {
    /// Two-stop gradient running straight down from `top` to `bottom`.
    pub fn vertical(x: f64, top: f64, bottom: f64, from: Color, to: Color) -> Self {
        Paint::LinearGradient {
            start: Point::new(x, top),
            end: Point::new(x, bottom),
            stops: vec![ColorStop::new(0.0, from), ColorStop::new(1.0, to)],
        }
    }

    pub fn radial(center: Point, radius: f64, inner: Color, outer: Color) -> Self {
        Paint::RadialGradient {
            center,
            radius,
            stops: vec![ColorStop::new(0.0, inner), ColorStop::new(1.0, outer)],
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// How a label is drawn. `at.y` passed to `fill_text` is the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub align: TextAlign,
    pub weight: FontWeight,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            align: TextAlign::Left,
            weight: FontWeight::Regular,
        }
    }

    pub fn align(self, align: TextAlign) -> Self {
        Self { align, ..self }
    }

    pub fn bold(self) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..self
        }
    }
}

/// A 2D raster target accepting path, fill, stroke and text operations.
pub trait Surface {
    fn dimensions(&self) -> Dimensions;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn stroke_path(&mut self, path: &Path, color: Color, width: f64);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

//! A surface that records draw calls instead of rasterizing them.

use crate::charts::geometry::{Dimensions, Point, Rect};
use crate::charts::surface::{Paint, Path, Surface, TextStyle};
use crate::theme::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    FillPath { path: Path, paint: Paint },
    StrokePath { path: Path, color: Color, width: f64 },
    FillRect { rect: Rect, paint: Paint },
    Text { text: String, at: Point, style: TextStyle },
}

/// Keeps every operation in order, for inspecting what a renderer drew.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    dims: Dimensions,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text runs in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn fill_rects(&self) -> Vec<(Rect, &Paint)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, paint } => Some((*rect, paint)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn dimensions(&self) -> Dimensions {
        self.dims
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.ops.push(DrawOp::FillPath {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f64) {
        self.ops.push(DrawOp::StrokePath {
            path: path.clone(),
            color,
            width,
        });
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(DrawOp::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            style: *style,
        });
    }
}

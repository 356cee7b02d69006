//! Geometry shared by the chart renderers, plus the chart error type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Dataset is empty")]
    EmptyDataset,
    #[error("Value for {label:?} must be finite and non-negative, got {value}")]
    InvalidValue { label: String, value: f64 },
    #[error("Slice values sum to {0}, expected a positive total")]
    NonPositiveTotal(f64),
    #[error("Values are too large to scale onto the chart")]
    Overflow,
    #[error("Surface {width}x{height} leaves no room to plot")]
    SurfaceTooSmall { width: f64, height: f64 },
}

/// Reject empty datasets and negative or non-finite values.
pub(crate) fn check_values<'a>(
    values: impl ExactSizeIterator<Item = (&'a str, f64)>,
) -> Result<(), ChartError> {
    if values.len() == 0 {
        return Err(ChartError::EmptyDataset);
    }
    for (label, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidValue {
                label: label.to_string(),
                value,
            });
        }
    }
    Ok(())
}

/// Target surface size in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Logical size at a 1:1 pixel ratio.
    pub fn logical(width: f64, height: f64) -> Self {
        Self::new(width, height, 1.0)
    }

    /// Pixel size of the backing store.
    pub fn backing_size(&self) -> (u32, u32) {
        let scale = |v: f64| (v * self.device_pixel_ratio).ceil().max(0.0) as u32;
        (scale(self.width), scale(self.height))
    }

    pub(crate) fn too_small(&self) -> ChartError {
        ChartError::SurfaceTooSmall {
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `angle` radians (clockwise from +x, y pointing down) and `distance` from `self`.
    pub fn polar(self, angle: f64, distance: f64) -> Self {
        Self::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The area inside a chart's padding where data is plotted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    /// Inset `dims` by the given paddings; `None` when nothing is left.
    pub fn inset(dims: Dimensions, left: f64, top: f64, right: f64, bottom: f64) -> Option<Self> {
        let rect = Self {
            left,
            top,
            right: dims.width - right,
            bottom: dims.height - bottom,
        };
        (rect.width() > 0.0 && rect.height() > 0.0).then_some(rect)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width() / 2.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_size_scales_by_ratio() {
        assert_eq!(Dimensions::new(300.0, 150.5, 2.0).backing_size(), (600, 301));
        assert_eq!(Dimensions::new(10.0, 10.0, 1.5).backing_size(), (15, 15));
    }

    #[test]
    fn inset_rejects_empty_area() {
        let dims = Dimensions::logical(100.0, 100.0);
        assert!(PlotRect::inset(dims, 60.0, 60.0, 60.0, 60.0).is_none());
        let rect = PlotRect::inset(dims, 10.0, 20.0, 10.0, 30.0).unwrap();
        assert_eq!(rect.width(), 80.0);
        assert_eq!(rect.height(), 50.0);
        assert_eq!(rect.center_x(), 50.0);
    }

    #[test]
    fn check_values_rules() {
        let empty: [(&str, f64); 0] = [];
        assert_eq!(check_values(empty.into_iter()), Err(ChartError::EmptyDataset));
        assert!(check_values([("a", 0.0), ("b", 3.0)].into_iter()).is_ok());
        assert!(matches!(
            check_values([("a", 1.0), ("b", -1.0)].into_iter()),
            Err(ChartError::InvalidValue { ref label, .. }) if label == "b"
        ));
        assert!(check_values([("nan", f64::NAN)].into_iter()).is_err());
    }

    #[test]
    fn polar_goes_clockwise_on_screen() {
        let c = Point::new(0.0, 0.0);
        let down = c.polar(std::f64::consts::FRAC_PI_2, 10.0);
        assert!(down.x.abs() < 1e-9);
        assert!((down.y - 10.0).abs() < 1e-9);
    }
}

//! Line chart: a chronological series with gradient area fill.

use crate::charts::geometry::{check_values, ChartError, Dimensions, PlotRect, Point};
use crate::charts::surface::{Paint, Path, Surface, TextAlign, TextStyle};
use crate::config::LineChartConfig;
use crate::data::format::currency_thousands;
use crate::data::DataPoint;
use crate::theme::Color;

/// Distance of the X labels below the plot baseline.
const X_LABEL_OFFSET: f64 = 20.0;
/// Gap between the Y labels and the left axis.
const Y_LABEL_GAP: f64 = 10.0;
const Y_LABEL_BASELINE_SHIFT: f64 = 4.0;

/// Snap values within float noise of an integer, so `1100000 * 1.1` ceils to 1210000.
fn snap(x: f64) -> f64 {
    let r = x.round();
    if (x - r).abs() <= 1e-9 * r.abs().max(1.0) {
        r
    } else {
        x
    }
}

/// Computed geometry of a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub plot: PlotRect,
    pub min: f64,
    pub max: f64,
    /// One screen point per input point, in input order
    pub points: Vec<Point>,
}

impl LineLayout {
    pub fn y_for(&self, value: f64) -> f64 {
        self.plot.bottom - (value - self.min) / (self.max - self.min) * self.plot.height()
    }
}

pub struct LineChartRenderer {
    config: LineChartConfig,
}

impl LineChartRenderer {
    pub fn new(config: LineChartConfig) -> Self {
        Self { config }
    }

    /// Value-axis range with headroom below and above; never zero-width.
    pub fn value_range(&self, series: &[DataPoint]) -> (f64, f64) {
        let (lo, hi) = series.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });

        let min = snap(lo * self.config.low_headroom).floor().min(lo);
        let max = snap(hi * self.config.high_headroom).ceil().max(hi);
        if max - min > 0.0 {
            (min, max)
        } else {
            (min - 1.0, max + 1.0)
        }
    }

    pub fn layout(&self, dims: Dimensions, series: &[DataPoint]) -> Result<LineLayout, ChartError> {
        check_values(series.iter().map(|p| (p.label.as_str(), p.value)))?;

        let pad = self.config.padding;
        let plot = PlotRect::inset(dims, pad, pad, pad, pad).ok_or_else(|| dims.too_small())?;
        let (min, max) = self.value_range(series);
        if !(max - min).is_finite() {
            return Err(ChartError::Overflow);
        }

        let mut layout = LineLayout {
            plot,
            min,
            max,
            points: Vec::with_capacity(series.len()),
        };

        let last = series.len() - 1;
        for (i, p) in series.iter().enumerate() {
            let x = if last == 0 {
                plot.center_x()
            } else {
                plot.left + plot.width() / last as f64 * i as f64
            };
            let y = layout.y_for(p.value);
            layout.points.push(Point::new(x, y));
        }
        Ok(layout)
    }

    pub fn render(
        &self,
        surface: &mut dyn Surface,
        dims: Dimensions,
        series: &[DataPoint],
        color: Color,
    ) -> Result<(), ChartError> {
        let layout = self.layout(dims, series)?;
        let plot = layout.plot;
        let intervals = self.config.grid_lines;
        let step = plot.height() / intervals as f64;

        for i in 0..=intervals {
            let y = plot.top + step * i as f64;
            surface.stroke_path(
                &Path::line(Point::new(plot.left, y), Point::new(plot.right, y)),
                Color::GRID,
                1.0,
            );
        }

        surface.stroke_path(
            &Path::polyline(&[
                Point::new(plot.left, plot.top),
                Point::new(plot.left, plot.bottom),
                Point::new(plot.right, plot.bottom),
            ]),
            Color::SLATE,
            2.0,
        );

        let points = &layout.points;
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            let area = points
                .iter()
                .fold(Path::new().move_to(Point::new(first.x, plot.bottom)), |path, p| {
                    path.line_to(*p)
                })
                .line_to(Point::new(last.x, plot.bottom))
                .close();
            surface.fill_path(
                &area,
                &Paint::vertical(
                    0.0,
                    plot.top,
                    plot.bottom,
                    color.with_alpha(0.2),
                    color.with_alpha(0.05),
                ),
            );
        }

        surface.stroke_path(&Path::polyline(points), color, self.config.line_width);

        for p in points {
            let marker = Path::circle(*p, self.config.point_radius);
            surface.fill_path(&marker, &Paint::Solid(Color::WHITE));
            surface.stroke_path(&marker, color, self.config.line_width);
        }

        let label = TextStyle::new(self.config.font_size, Color::SLATE);
        let centered = label.align(TextAlign::Center);
        for (p, datum) in points.iter().zip(series) {
            surface.fill_text(
                &datum.label,
                Point::new(p.x, plot.bottom + X_LABEL_OFFSET),
                &centered,
            );
        }

        let right = label.align(TextAlign::Right);
        let value_step = (layout.max - layout.min) / intervals as f64;
        for i in 0..=intervals {
            let y = plot.top + step * i as f64;
            let value = layout.max - value_step * i as f64;
            surface.fill_text(
                &currency_thousands(value),
                Point::new(plot.left - Y_LABEL_GAP, y + Y_LABEL_BASELINE_SHIFT),
                &right,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::recording::{DrawOp, RecordingSurface};
    use crate::charts::surface::PathSegment;
    use crate::data::mock;

    fn renderer() -> LineChartRenderer {
        LineChartRenderer::new(LineChartConfig::default())
    }

    fn dims() -> Dimensions {
        Dimensions::logical(600.0, 300.0)
    }

    fn series(values: &[f64]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(format!("P{i}"), *v))
            .collect()
    }

    #[test]
    fn quarter_scenario_range_and_order() {
        let data = vec![
            DataPoint::new("Jan", 850_000.0),
            DataPoint::new("Feb", 920_000.0),
            DataPoint::new("Mar", 1_100_000.0),
        ];
        let layout = renderer().layout(dims(), &data).unwrap();
        assert_eq!(layout.min, 765_000.0);
        assert_eq!(layout.max, 1_210_000.0);

        let ys: Vec<f64> = layout.points.iter().map(|p| p.y).collect();
        assert!(ys[2] < ys[1] && ys[1] < ys[0], "Mar highest, Jan lowest: {ys:?}");
    }

    #[test]
    fn points_stay_inside_plot() {
        let cases = [
            mock::revenue_series(),
            series(&[0.0, 1.0, 1000.0]),
            series(&[0.0]),
            series(&[3.3, 3.3, 3.3, 3.3]),
            series(&[0.001, 987_654_321.0, 42.0]),
        ];
        for data in cases {
            let layout = renderer().layout(dims(), &data).unwrap();
            for p in &layout.points {
                assert!(p.x.is_finite() && p.y.is_finite());
                assert!(layout.plot.contains(*p), "{p:?} outside {:?}", layout.plot);
            }
        }
    }

    #[test]
    fn points_stay_inside_with_tight_headroom() {
        let config = LineChartConfig {
            low_headroom: 1.05,
            high_headroom: 1.05,
            ..LineChartConfig::default()
        };
        let layout = LineChartRenderer::new(config)
            .layout(dims(), &series(&[10.0, 20.0]))
            .unwrap();
        assert!(layout.points.iter().all(|p| layout.plot.contains(*p)));
    }

    #[test]
    fn single_point_sits_at_center() {
        let layout = renderer().layout(dims(), &series(&[500.0])).unwrap();
        assert_eq!(layout.points.len(), 1);
        assert_eq!(layout.points[0].x, layout.plot.center_x());
        assert!(layout.points[0].y.is_finite());
    }

    #[test]
    fn equal_values_draw_flat_line() {
        let layout = renderer().layout(dims(), &series(&[0.0, 0.0, 0.0])).unwrap();
        assert_eq!((layout.min, layout.max), (-1.0, 1.0));
        let y0 = layout.points[0].y;
        assert!(layout.points.iter().all(|p| p.y == y0));
        assert!((y0 - (layout.plot.top + layout.plot.height() / 2.0)).abs() < 1e-9);

        let layout = renderer().layout(dims(), &series(&[5.0, 5.0])).unwrap();
        assert_eq!((layout.min, layout.max), (4.0, 6.0));
        assert_eq!(layout.points[0].y, layout.points[1].y);
    }

    #[test]
    fn points_are_evenly_spaced() {
        let layout = renderer().layout(dims(), &series(&[1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();
        let xs: Vec<f64> = layout.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![60.0, 180.0, 300.0, 420.0, 540.0]);
    }

    #[test]
    fn degenerate_inputs_draw_nothing() {
        let mut surface = RecordingSurface::new(dims());
        let err = renderer().render(&mut surface, dims(), &[], Color::BLACK).unwrap_err();
        assert_eq!(err, ChartError::EmptyDataset);

        let err = renderer()
            .render(&mut surface, dims(), &series(&[1.0, -2.0]), Color::BLACK)
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidValue { .. }));

        let small = Dimensions::logical(100.0, 100.0);
        let err = renderer()
            .render(&mut surface, small, &series(&[1.0]), Color::BLACK)
            .unwrap_err();
        assert!(matches!(err, ChartError::SurfaceTooSmall { .. }));

        assert!(surface.ops().is_empty());
    }

    #[test]
    fn headroom_overflow_is_rejected() {
        let mut surface = RecordingSurface::new(dims());
        assert_eq!(
            renderer().layout(dims(), &series(&[1.0, 1.7e308])),
            Err(ChartError::Overflow)
        );
        let err = renderer()
            .render(&mut surface, dims(), &series(&[1.0, 1.7e308]), Color::BLACK)
            .unwrap_err();
        assert_eq!(err, ChartError::Overflow);
        assert!(surface.ops().is_empty());

        // Large values that survive the headroom keep max nearest the top.
        let layout = renderer().layout(dims(), &series(&[1.0, 1e307])).unwrap();
        assert!(layout.max.is_finite());
        assert!(layout.points[1].y < layout.points[0].y);
    }

    #[test]
    fn draws_grid_axes_area_line_markers_and_labels() {
        let data = vec![
            DataPoint::new("Jan", 850_000.0),
            DataPoint::new("Feb", 920_000.0),
            DataPoint::new("Mar", 1_100_000.0),
        ];
        let color = Color::rgb(0x25, 0x63, 0xeb);
        let mut surface = RecordingSurface::new(dims());
        renderer().render(&mut surface, dims(), &data, color).unwrap();

        let grid = surface.count(|op| matches!(op, DrawOp::StrokePath { color, .. } if *color == Color::GRID));
        assert_eq!(grid, 6);
        let axes = surface.count(|op| matches!(op, DrawOp::StrokePath { color, width, .. } if *color == Color::SLATE && *width == 2.0));
        assert_eq!(axes, 1);

        let gradient_fills: Vec<&Paint> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillPath {
                    paint: paint @ Paint::LinearGradient { .. },
                    ..
                } => Some(paint),
                _ => None,
            })
            .collect();
        assert_eq!(gradient_fills.len(), 1);
        if let Paint::LinearGradient { start, end, stops } = gradient_fills[0] {
            assert_eq!(start.y, 60.0);
            assert_eq!(end.y, 240.0);
            assert_eq!(stops[0].color, color.with_alpha(0.2));
            assert_eq!(stops[1].color, color.with_alpha(0.05));
        }

        let markers = surface.count(|op| {
            matches!(op, DrawOp::FillPath { paint: Paint::Solid(c), path } if *c == Color::WHITE
                && matches!(path.segments().first(), Some(PathSegment::Arc { .. })))
        });
        assert_eq!(markers, 3);

        assert_eq!(
            surface.texts(),
            vec!["Jan", "Feb", "Mar", "$1210K", "$1121K", "$1032K", "$943K", "$854K", "$765K"]
        );
    }

    #[test]
    fn area_is_closed_along_the_baseline() {
        let mut surface = RecordingSurface::new(dims());
        renderer()
            .render(&mut surface, dims(), &series(&[1.0, 2.0]), Color::BLACK)
            .unwrap();
        let area = surface
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::FillPath {
                    path,
                    paint: Paint::LinearGradient { .. },
                } => Some(path.clone()),
                _ => None,
            })
            .unwrap();
        let segs = area.segments();
        assert_eq!(segs.first(), Some(&PathSegment::MoveTo(Point::new(60.0, 240.0))));
        assert_eq!(segs[segs.len() - 2], PathSegment::LineTo(Point::new(540.0, 240.0)));
        assert_eq!(segs.last(), Some(&PathSegment::Close));
    }
}

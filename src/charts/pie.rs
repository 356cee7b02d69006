//! Pie chart with in-slice share labels and a legend.

use crate::charts::geometry::{check_values, ChartError, Dimensions, Point, Rect};
use crate::charts::surface::{Paint, Path, Surface, TextAlign, TextStyle};
use crate::config::PieChartConfig;
use crate::data::format::{percent_label, share_label};
use crate::data::CategoryDatum;
use crate::theme::Color;
use std::f64::consts::{FRAC_PI_2, TAU};

/// First slice starts at twelve o'clock.
pub const START_ANGLE: f64 = -FRAC_PI_2;
const RIM_ALPHA: u8 = 0x80;
/// Swatches sit this far above the legend text baseline.
const SWATCH_RISE: f64 = 10.0;
const SWATCH_TEXT_GAP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceGeometry {
    pub start_angle: f64,
    pub end_angle: f64,
    /// Where the share label is centered
    pub label_at: Point,
}

impl SliceGeometry {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    pub center: Point,
    pub radius: f64,
    pub total: f64,
    pub slices: Vec<SliceGeometry>,
}

pub struct PieChartRenderer {
    config: PieChartConfig,
}

impl PieChartRenderer {
    pub fn new(config: PieChartConfig) -> Self {
        Self { config }
    }

    pub fn layout(&self, dims: Dimensions, data: &[CategoryDatum]) -> Result<PieLayout, ChartError> {
        check_values(data.iter().map(|d| (d.label.as_str(), d.value)))?;

        let total: f64 = data.iter().map(|d| d.value).sum();
        if total <= 0.0 {
            return Err(ChartError::NonPositiveTotal(total));
        }
        if !total.is_finite() {
            return Err(ChartError::Overflow);
        }

        let radius = dims.width.min(dims.height) / 2.0 - self.config.margin;
        if radius <= 0.0 {
            return Err(dims.too_small());
        }
        let center = Point::new(dims.width / 2.0, dims.height / 2.0);

        // Boundaries come from the running sum so the last one lands on a full turn.
        let mut cumulative = 0.0;
        let slices = data
            .iter()
            .map(|d| {
                let start_angle = START_ANGLE + TAU * cumulative / total;
                cumulative += d.value;
                let end_angle = START_ANGLE + TAU * cumulative / total;
                let mid = (start_angle + end_angle) / 2.0;
                SliceGeometry {
                    start_angle,
                    end_angle,
                    label_at: center.polar(mid, radius * self.config.label_radius),
                }
            })
            .collect();

        Ok(PieLayout {
            center,
            radius,
            total,
            slices,
        })
    }

    pub fn render(
        &self,
        surface: &mut dyn Surface,
        dims: Dimensions,
        data: &[CategoryDatum],
    ) -> Result<(), ChartError> {
        let layout = self.layout(dims, data)?;
        let slice_label = TextStyle::new(self.config.font_size, Color::WHITE)
            .align(TextAlign::Center)
            .bold();

        for (slice, datum) in layout.slices.iter().zip(data) {
            if datum.value == 0.0 {
                continue;
            }
            let path = Path::new()
                .move_to(layout.center)
                .arc(layout.center, layout.radius, slice.start_angle, slice.end_angle)
                .close();
            surface.fill_path(
                &path,
                &Paint::radial(
                    layout.center,
                    layout.radius,
                    datum.color,
                    datum.color.with_alpha_u8(RIM_ALPHA),
                ),
            );
            surface.stroke_path(&path, Color::WHITE, self.config.border_width);

            surface.fill_text(
                &share_label(datum.value, layout.total),
                slice.label_at,
                &slice_label,
            );
        }

        self.draw_legend(surface, data);
        Ok(())
    }

    fn draw_legend(&self, surface: &mut dyn Surface, data: &[CategoryDatum]) {
        let cfg = &self.config;
        let text = TextStyle::new(cfg.font_size, Color::SLATE);
        let mut y = cfg.legend_y;

        for datum in data {
            surface.fill_rect(
                Rect::new(cfg.legend_x, y - SWATCH_RISE, cfg.swatch_size, cfg.swatch_size),
                &Paint::Solid(datum.color),
            );
            surface.fill_text(
                &format!("{} ({})", datum.label, percent_label(datum.value)),
                Point::new(cfg.legend_x + cfg.swatch_size + SWATCH_TEXT_GAP, y),
                &text,
            );
            y += cfg.legend_spacing;
        }
    }
}

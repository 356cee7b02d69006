//! Bar chart: one gradient bar per category with value and name labels.

use crate::charts::geometry::{check_values, ChartError, Dimensions, PlotRect, Point, Rect};
use crate::charts::surface::{Paint, Surface, TextAlign, TextStyle};
use crate::config::BarChartConfig;
use crate::data::format::percent_label;
use crate::data::CategoryDatum;
use crate::theme::Color;

const VALUE_LABEL_GAP: f64 = 5.0;
const CATEGORY_LABEL_OFFSET: f64 = 20.0;
/// Bottom opacity of the bar gradient (hex `80`).
const FADED_ALPHA: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarGeometry {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub plot: PlotRect,
    /// Value mapped to the full plot height
    pub max: f64,
    pub bars: Vec<BarGeometry>,
}

pub struct BarChartRenderer {
    config: BarChartConfig,
}

impl BarChartRenderer {
    pub fn new(config: BarChartConfig) -> Self {
        Self { config }
    }

    pub fn layout(&self, dims: Dimensions, data: &[CategoryDatum]) -> Result<BarLayout, ChartError> {
        check_values(data.iter().map(|d| (d.label.as_str(), d.value)))?;

        let pad = self.config.padding;
        let plot = PlotRect::inset(dims, pad, pad, pad, pad + self.config.label_reserve)
            .ok_or_else(|| dims.too_small())?;

        let peak = data.iter().map(|d| d.value).fold(0.0, f64::max) * self.config.headroom;
        if !peak.is_finite() {
            return Err(ChartError::Overflow);
        }
        let max = if peak > 0.0 { peak } else { 1.0 };

        let slot = plot.width() / data.len() as f64;
        let width = slot * self.config.bar_fraction;
        let bars = data
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let height = (d.value / max * plot.height()).clamp(0.0, plot.height());
                BarGeometry {
                    x: plot.left + slot * i as f64 + (slot - width) / 2.0,
                    y: plot.bottom - height,
                    width,
                    height,
                }
            })
            .collect();

        Ok(BarLayout { plot, max, bars })
    }

    pub fn render(
        &self,
        surface: &mut dyn Surface,
        dims: Dimensions,
        data: &[CategoryDatum],
    ) -> Result<(), ChartError> {
        let layout = self.layout(dims, data)?;
        let label = TextStyle::new(self.config.font_size, Color::SLATE).align(TextAlign::Center);

        for (bar, datum) in layout.bars.iter().zip(data) {
            surface.fill_rect(
                Rect::new(bar.x, bar.y, bar.width, bar.height),
                &Paint::vertical(
                    bar.x,
                    bar.y,
                    bar.y + bar.height,
                    datum.color,
                    datum.color.with_alpha_u8(FADED_ALPHA),
                ),
            );

            surface.fill_text(
                &percent_label(datum.value),
                Point::new(bar.center_x(), bar.y - VALUE_LABEL_GAP),
                &label,
            );
            surface.fill_text(
                &datum.label,
                Point::new(bar.center_x(), layout.plot.bottom + CATEGORY_LABEL_OFFSET),
                &label,
            );
        }

        Ok(())
    }
}

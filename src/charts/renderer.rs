//! Dashboard Renderer
//! Draws the three dashboard charts onto whatever surfaces the caller provides.
//!
//! Charts:
//! 1. Revenue: line chart over the monthly series
//! 2. Sales: bar chart per product category
//! 3. Demographics: pie chart per age bracket
//!
//! Every chart is independent. A missing surface skips that chart, and a failing
//! chart is logged without stopping the others.

use crate::charts::bar::BarChartRenderer;
use crate::charts::geometry::ChartError;
use crate::charts::line::LineChartRenderer;
use crate::charts::pie::PieChartRenderer;
use crate::charts::surface::Surface;
use crate::config::DashboardConfig;
use crate::data::DashboardData;
use crate::theme::Palette;
use log::{debug, info, warn};
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Revenue,
    Sales,
    Demographics,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Revenue, ChartKind::Sales, ChartKind::Demographics];

    /// Stable name, also used for exported file names.
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Revenue => "revenue",
            ChartKind::Sales => "sales",
            ChartKind::Demographics => "demographics",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Revenue => "Revenue Trend",
            ChartKind::Sales => "Sales by Category",
            ChartKind::Demographics => "Customer Demographics",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target surfaces, one per chart. `None` means the chart is not on screen.
#[derive(Default)]
pub struct ChartSurfaces<'a> {
    pub revenue: Option<&'a mut dyn Surface>,
    pub sales: Option<&'a mut dyn Surface>,
    pub demographics: Option<&'a mut dyn Surface>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartOutcome {
    Rendered,
    Skipped,
    Failed(ChartError),
}

impl ChartOutcome {
    fn from_result(result: Result<(), ChartError>) -> Self {
        match result {
            Ok(()) => ChartOutcome::Rendered,
            Err(e) => ChartOutcome::Failed(e),
        }
    }
}

/// What happened to each chart during one `render_all` pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub revenue: ChartOutcome,
    pub sales: ChartOutcome,
    pub demographics: ChartOutcome,
}

impl RenderReport {
    pub fn outcome(&self, kind: ChartKind) -> &ChartOutcome {
        match kind {
            ChartKind::Revenue => &self.revenue,
            ChartKind::Sales => &self.sales,
            ChartKind::Demographics => &self.demographics,
        }
    }

    pub fn rendered(&self) -> usize {
        ChartKind::ALL
            .iter()
            .filter(|k| *self.outcome(**k) == ChartOutcome::Rendered)
            .count()
    }

    pub fn failures(&self) -> Vec<(ChartKind, &ChartError)> {
        ChartKind::ALL
            .iter()
            .filter_map(|k| match self.outcome(*k) {
                ChartOutcome::Failed(e) => Some((*k, e)),
                _ => None,
            })
            .collect()
    }
}

pub struct DashboardRenderer {
    line: LineChartRenderer,
    bar: BarChartRenderer,
    pie: PieChartRenderer,
    palette: Palette,
}

impl DashboardRenderer {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            line: LineChartRenderer::new(config.charts.line.clone()),
            bar: BarChartRenderer::new(config.charts.bar.clone()),
            pie: PieChartRenderer::new(config.charts.pie.clone()),
            palette: config.palette.clone(),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Clear and redraw one chart.
    pub fn render_one(
        &self,
        kind: ChartKind,
        surface: &mut dyn Surface,
        data: &DashboardData,
    ) -> Result<(), ChartError> {
        let dims = surface.dimensions();
        surface.clear();
        match kind {
            ChartKind::Revenue => {
                self.line.render(surface, dims, &data.revenue, self.palette.primary)
            }
            ChartKind::Sales => self.bar.render(surface, dims, &data.sales),
            ChartKind::Demographics => self.pie.render(surface, dims, &data.demographics),
        }
    }

    fn render_slot(
        &self,
        kind: ChartKind,
        surface: Option<&mut dyn Surface>,
        data: &DashboardData,
    ) -> ChartOutcome {
        let Some(surface) = surface else {
            debug!("{} chart has no surface, skipping", kind);
            return ChartOutcome::Skipped;
        };

        let outcome = ChartOutcome::from_result(self.render_one(kind, surface, data));
        match &outcome {
            ChartOutcome::Failed(e) => warn!("{} chart failed to render: {}", kind, e),
            _ => debug!("{} chart rendered", kind),
        }
        outcome
    }

    /// Render every chart that has a surface.
    pub fn render_all(&self, surfaces: ChartSurfaces<'_>, data: &DashboardData) -> RenderReport {
        let started = Instant::now();

        let report = RenderReport {
            revenue: self.render_slot(ChartKind::Revenue, surfaces.revenue, data),
            sales: self.render_slot(ChartKind::Sales, surfaces.sales, data),
            demographics: self.render_slot(ChartKind::Demographics, surfaces.demographics, data),
        };

        info!(
            "Rendered {}/3 charts in {:.2}ms",
            report.rendered(),
            started.elapsed().as_secs_f64() * 1000.0
        );
        report
    }
}

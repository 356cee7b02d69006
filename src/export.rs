//! Headless chart export to PNG files.

use crate::charts::{
    ChartError, ChartKind, ChartOutcome, ChartSurfaces, DashboardRenderer, Dimensions, Fonts,
    PixmapSurface, RenderReport, Surface,
};
use crate::config::DashboardConfig;
use crate::data::DashboardData;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create output directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot allocate chart surface: {0}")]
    Surface(#[from] ChartError),
    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[derive(Debug)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub report: RenderReport,
}

/// Render every chart at `dims` and write `<out_dir>/<chart>.png` for each one
/// that rendered. Charts that fail are reported, not written.
pub fn export_charts(
    config: &DashboardConfig,
    data: &DashboardData,
    out_dir: &Path,
    dims: Dimensions,
    fonts: Option<&Fonts>,
) -> Result<ExportSummary, ExportError> {
    fs::create_dir_all(out_dir)?;

    let surface = || -> Result<PixmapSurface, ChartError> {
        Ok(PixmapSurface::new(dims)?.with_fonts(fonts.cloned()))
    };
    let mut revenue = surface()?;
    let mut sales = surface()?;
    let mut demographics = surface()?;

    let renderer = DashboardRenderer::new(config);
    let report = renderer.render_all(
        ChartSurfaces {
            revenue: Some(&mut revenue as &mut dyn Surface),
            sales: Some(&mut sales as &mut dyn Surface),
            demographics: Some(&mut demographics as &mut dyn Surface),
        },
        data,
    );

    let mut written = Vec::new();
    let surfaces = [
        (ChartKind::Revenue, &revenue),
        (ChartKind::Sales, &sales),
        (ChartKind::Demographics, &demographics),
    ];
    for (kind, surface) in surfaces {
        if *report.outcome(kind) != ChartOutcome::Rendered {
            continue;
        }
        let path = out_dir.join(format!("{}.png", kind.name()));
        surface
            .to_rgba_image()
            .save(&path)
            .map_err(|source| ExportError::Encode {
                path: path.clone(),
                source,
            })?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(ExportSummary { written, report })
}

//! BizDash - Business analytics dashboard
//!
//! Opens the dashboard window, or renders the charts to PNG files with `export`.

use anyhow::{bail, Context, Result};
use bizdash::charts::{Dimensions, Fonts};
use bizdash::cli::{Cli, Commands, ExportArgs};
use bizdash::config::DashboardConfig;
use bizdash::data::mock;
use bizdash::export::export_charts;
use bizdash::gui::DashboardApp;
use bizdash::prefs::PrefsStore;
use clap::Parser;
use eframe::egui;
use log::{info, warn};
use std::path::Path;

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    match path {
        Some(path) => {
            let config = DashboardConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(DashboardConfig::default()),
    }
}

fn run_export(config: &DashboardConfig, args: &ExportArgs) -> Result<()> {
    let dims = Dimensions::new(args.width, args.height, args.dpr);
    let fonts = if args.no_text {
        None
    } else {
        let fonts = Fonts::load_system();
        if fonts.is_none() {
            warn!("No usable system font found, labels will be omitted");
        }
        fonts
    };

    let data = mock::dashboard(&config.palette);
    let summary = export_charts(config, &data, &args.out, dims, fonts.as_ref())
        .with_context(|| format!("Export to {} failed", args.out.display()))?;

    for (kind, error) in summary.report.failures() {
        warn!("{} chart skipped: {}", kind, error);
    }
    if summary.written.is_empty() {
        bail!("No chart could be rendered");
    }
    println!(
        "Exported {} chart(s) to {}",
        summary.written.len(),
        args.out.display()
    );
    Ok(())
}

fn run_gui(config: DashboardConfig) -> Result<()> {
    let prefs = PrefsStore::open_default();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([360.0, 480.0])
            .with_title("BizDash"),
        ..Default::default()
    };

    eframe::run_native(
        "BizDash",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config, prefs)))),
    )
    .map_err(|e| anyhow::anyhow!("Window failed: {}", e))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Some(Commands::Export(args)) => run_export(&config, args),
        None => run_gui(config),
    }
}

//! Dashboard configuration.
//!
//! Every section carries `#[serde(default)]`, so a config file only needs the
//! keys it wants to change. Layout constants default to the values the
//! dashboard was designed with.

use crate::theme::Palette;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(field, format!("expected a finite value >= 0, got {value}")));
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, format!("expected a finite value > 0, got {value}")));
    }
    Ok(())
}

/// Line chart layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    pub padding: f64,
    /// Multiplier applied to the smallest value before flooring
    pub low_headroom: f64,
    /// Multiplier applied to the largest value before ceiling
    pub high_headroom: f64,
    pub grid_lines: usize,
    pub line_width: f64,
    pub point_radius: f64,
    pub font_size: f64,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            padding: 60.0,
            low_headroom: 0.9,
            high_headroom: 1.1,
            grid_lines: 5,
            line_width: 3.0,
            point_radius: 6.0,
            font_size: 12.0,
        }
    }
}

/// Bar chart layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartConfig {
    pub padding: f64,
    /// Extra space under the plot for category labels
    pub label_reserve: f64,
    pub headroom: f64,
    /// Share of each slot covered by its bar
    pub bar_fraction: f64,
    pub font_size: f64,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            label_reserve: 40.0,
            headroom: 1.2,
            bar_fraction: 0.6,
            font_size: 12.0,
        }
    }
}

/// Pie chart and legend layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieChartConfig {
    pub margin: f64,
    /// Distance of slice labels from the center, as a share of the radius
    pub label_radius: f64,
    pub border_width: f64,
    pub legend_x: f64,
    pub legend_y: f64,
    pub legend_spacing: f64,
    pub swatch_size: f64,
    pub font_size: f64,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            margin: 40.0,
            label_radius: 0.7,
            border_width: 2.0,
            legend_x: 20.0,
            legend_y: 30.0,
            legend_spacing: 20.0,
            swatch_size: 15.0,
            font_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub line: LineChartConfig,
    pub bar: BarChartConfig,
    pub pie: PieChartConfig,
}

/// Timings and breakpoints of the dashboard shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Simulated data source latency on startup
    pub api_delay_ms: u64,
    /// Simulated reload after the time filter changes
    pub filter_delay_ms: u64,
    pub resize_debounce_ms: u64,
    pub counter_duration_ms: u64,
    /// Widths at or below this use the mobile sidebar
    pub mobile_breakpoint: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_delay_ms: 1500,
            filter_delay_ms: 800,
            resize_debounce_ms: 250,
            counter_duration_ms: 1500,
            mobile_breakpoint: 768.0,
        }
    }
}

impl UiConfig {
    pub fn api_delay(&self) -> Duration {
        Duration::from_millis(self.api_delay_ms)
    }

    pub fn filter_delay(&self) -> Duration {
        Duration::from_millis(self.filter_delay_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub charts: ChartConfig,
    pub palette: Palette,
    pub ui: UiConfig,
}

impl DashboardConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let line = &self.charts.line;
        check_non_negative("charts.line.padding", line.padding)?;
        check_positive("charts.line.low_headroom", line.low_headroom)?;
        check_positive("charts.line.high_headroom", line.high_headroom)?;
        if line.low_headroom > line.high_headroom {
            return Err(invalid(
                "charts.line.low_headroom",
                "must not exceed charts.line.high_headroom",
            ));
        }
        if line.grid_lines == 0 {
            return Err(invalid("charts.line.grid_lines", "need at least one interval"));
        }
        check_positive("charts.line.line_width", line.line_width)?;
        check_non_negative("charts.line.point_radius", line.point_radius)?;
        check_positive("charts.line.font_size", line.font_size)?;

        let bar = &self.charts.bar;
        check_non_negative("charts.bar.padding", bar.padding)?;
        check_non_negative("charts.bar.label_reserve", bar.label_reserve)?;
        check_positive("charts.bar.headroom", bar.headroom)?;
        if !(bar.bar_fraction > 0.0 && bar.bar_fraction <= 1.0) {
            return Err(invalid("charts.bar.bar_fraction", "must be within (0, 1]"));
        }
        check_positive("charts.bar.font_size", bar.font_size)?;

        let pie = &self.charts.pie;
        check_non_negative("charts.pie.margin", pie.margin)?;
        if !(0.0..=1.0).contains(&pie.label_radius) {
            return Err(invalid("charts.pie.label_radius", "must be within [0, 1]"));
        }
        check_non_negative("charts.pie.border_width", pie.border_width)?;
        check_non_negative("charts.pie.legend_spacing", pie.legend_spacing)?;
        check_non_negative("charts.pie.swatch_size", pie.swatch_size)?;
        check_positive("charts.pie.font_size", pie.font_size)?;

        check_positive("ui.mobile_breakpoint", f64::from(self.ui.mobile_breakpoint))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        DashboardConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_json_gives_defaults() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config =
            DashboardConfig::from_json(r#"{"charts":{"line":{"padding":30}},"ui":{"resize_debounce_ms":100}}"#)
                .unwrap();
        assert_eq!(config.charts.line.padding, 30.0);
        assert_eq!(config.charts.line.high_headroom, 1.1);
        assert_eq!(config.charts.bar, BarChartConfig::default());
        assert_eq!(config.ui.resize_debounce(), Duration::from_millis(100));
    }

    #[test]
    fn inverted_headroom_is_rejected() {
        let err = DashboardConfig::from_json(
            r#"{"charts":{"line":{"low_headroom":1.2,"high_headroom":1.1}}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "charts.line.low_headroom",
                ..
            }
        ));
    }

    #[test]
    fn bar_fraction_out_of_range_is_rejected() {
        for fraction in ["0", "1.5", "-0.2"] {
            let json = format!(r#"{{"charts":{{"bar":{{"bar_fraction":{fraction}}}}}}}"#);
            let err = DashboardConfig::from_json(&json).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: "charts.bar.bar_fraction", .. }),
                "{fraction}: {err}"
            );
        }
    }

    #[test]
    fn bad_palette_color_fails_to_parse() {
        let err = DashboardConfig::from_json(r#"{"palette":{"primary":"blue"}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"charts":{{"pie":{{"margin":10}}}}}}"#).unwrap();
        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.charts.pie.margin, 10.0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DashboardConfig::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

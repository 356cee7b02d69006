//! Dashboard data model.

use crate::theme::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One point of a chronological series (line chart).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One category of a bar or pie chart. Order decides draw and legend order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDatum {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

impl CategoryDatum {
    pub fn new(label: impl Into<String>, value: f64, color: Color) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// Which prefix/suffix a summary figure is shown with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Currency,
    Plain,
    Percent,
}

/// A summary card figure with its period-over-period change.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetric {
    pub title: String,
    pub current: f64,
    pub previous: f64,
    /// Change in percent, as reported by the data source
    pub change: f64,
    pub format: ValueFormat,
    pub animate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Completed,
    Pending,
    Failed,
}

impl ActivityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityStatus::Completed => "completed",
            ActivityStatus::Pending => "pending",
            ActivityStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the recent-activity table.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub user: String,
    pub activity: String,
    pub time: String,
    pub status: ActivityStatus,
}

impl Activity {
    /// Case-insensitive match against user and activity text.
    /// `query` must already be lowercase.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty()
            || self.user.to_lowercase().contains(query)
            || self.activity.to_lowercase().contains(query)
    }
}

/// Everything one dashboard page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub summary: Vec<SummaryMetric>,
    pub revenue: Vec<DataPoint>,
    pub sales: Vec<CategoryDatum>,
    pub demographics: Vec<CategoryDatum>,
    pub activity: Vec<Activity>,
}

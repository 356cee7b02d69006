//! Data module - dashboard model, mock data and formatting

pub mod format;
pub mod mock;
mod model;

pub use model::{
    Activity, ActivityStatus, CategoryDatum, DashboardData, DataPoint, SummaryMetric, ValueFormat,
};

//! BizDash - Business analytics dashboard
//!
//! Summary cards, three raster charts (revenue line, sales bars, demographics pie)
//! and a recent-activity feed over mock data, shown in an egui window or exported
//! as PNG files.

pub mod charts;
pub mod cli;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod prefs;
pub mod theme;
pub mod timing;

//! GUI module - Dashboard window and widgets

mod activity_table;
mod app;
mod chart_panel;
mod header;
mod sidebar;
pub mod state;
mod summary_cards;

pub use app::DashboardApp;

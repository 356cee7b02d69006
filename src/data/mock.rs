//! Static mock data standing in for a data source.

use crate::data::model::{
    Activity, ActivityStatus, CategoryDatum, DashboardData, DataPoint, SummaryMetric, ValueFormat,
};
use crate::theme::{ColorRole, Palette};

/// Category colors for bar and pie charts, in draw order.
const CATEGORY_ROLES: [ColorRole; 5] = [
    ColorRole::Primary,
    ColorRole::Secondary,
    ColorRole::Accent,
    ColorRole::Danger,
    ColorRole::Purple,
];

pub fn summary_metrics() -> Vec<SummaryMetric> {
    let metric = |title: &str, current, previous, change, format, animate| SummaryMetric {
        title: title.to_string(),
        current,
        previous,
        change,
        format,
        animate,
    };

    vec![
        metric("Total Revenue", 1_250_000.0, 1_112_500.0, 12.5, ValueFormat::Currency, true),
        metric("Active Users", 45_672.0, 42_194.0, 8.2, ValueFormat::Plain, true),
        metric("Sales Today", 1_847.0, 1_886.0, -2.1, ValueFormat::Plain, false),
        metric("Growth Rate", 23.4, 20.3, 15.3, ValueFormat::Percent, false),
    ]
}

/// Monthly revenue, January through July.
pub fn revenue_series() -> Vec<DataPoint> {
    [
        ("Jan", 850_000.0),
        ("Feb", 920_000.0),
        ("Mar", 1_100_000.0),
        ("Apr", 980_000.0),
        ("May", 1_200_000.0),
        ("Jun", 1_350_000.0),
        ("Jul", 1_250_000.0),
    ]
    .into_iter()
    .map(|(label, value)| DataPoint::new(label, value))
    .collect()
}

fn categories(palette: &Palette, rows: [(&str, f64); 5]) -> Vec<CategoryDatum> {
    rows.into_iter()
        .zip(CATEGORY_ROLES)
        .map(|((label, value), role)| CategoryDatum::new(label, value, palette.get(role)))
        .collect()
}

/// Sales share per product category.
pub fn sales_by_category(palette: &Palette) -> Vec<CategoryDatum> {
    categories(
        palette,
        [
            ("Electronics", 35.0),
            ("Clothing", 25.0),
            ("Home & Garden", 20.0),
            ("Sports", 12.0),
            ("Books", 8.0),
        ],
    )
}

/// Customer share per age bracket.
pub fn demographics(palette: &Palette) -> Vec<CategoryDatum> {
    categories(
        palette,
        [
            ("18-25", 28.0),
            ("26-35", 35.0),
            ("36-45", 22.0),
            ("46-55", 10.0),
            ("55+", 5.0),
        ],
    )
}

pub fn recent_activity() -> Vec<Activity> {
    use ActivityStatus::{Completed, Failed, Pending};

    [
        ("John Smith", "Completed purchase", "2 minutes ago", Completed),
        ("Sarah Johnson", "Updated profile", "5 minutes ago", Completed),
        ("Mike Chen", "Failed payment", "8 minutes ago", Failed),
        ("Emma Wilson", "Started checkout", "12 minutes ago", Pending),
        ("David Brown", "Viewed products", "15 minutes ago", Completed),
        ("Lisa Garcia", "Added to cart", "18 minutes ago", Completed),
        ("Tom Anderson", "Registered account", "25 minutes ago", Completed),
        ("Amy Taylor", "Sent support ticket", "32 minutes ago", Pending),
    ]
    .into_iter()
    .map(|(user, activity, time, status)| Activity {
        user: user.to_string(),
        activity: activity.to_string(),
        time: time.to_string(),
        status,
    })
    .collect()
}

/// The whole mocked dashboard, colored with `palette`.
pub fn dashboard(palette: &Palette) -> DashboardData {
    DashboardData {
        summary: summary_metrics(),
        revenue: revenue_series(),
        sales: sales_by_category(palette),
        demographics: demographics(palette),
        activity: recent_activity(),
    }
}

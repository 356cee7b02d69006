//! Summary Cards Widget
//! Row of headline metrics with animated counters and change badges.

use crate::data::format::{format_change, format_value};
use crate::data::SummaryMetric;
use crate::gui::state::InputEvent;
use crate::theme::Palette;
use crate::timing::CounterTween;
use egui::{Color32, Frame, RichText, Sense};
use std::time::{Duration, Instant};

const CARD_MIN_WIDTH: f32 = 220.0;
const CARD_SPACING: f32 = 16.0;

/// Displayed value per card; animated cards count up from zero once data arrives.
#[derive(Debug, Default)]
pub struct CardCounters {
    tweens: Vec<Option<CounterTween>>,
    started: bool,
}

impl CardCounters {
    pub fn start(&mut self, metrics: &[SummaryMetric], duration: Duration, now: Instant) {
        self.tweens = metrics
            .iter()
            .map(|m| m.animate.then(|| CounterTween::new(0.0, m.current, duration, now)))
            .collect();
        self.started = true;
    }

    /// Value to show for card `index`; `None` before the data has loaded.
    pub fn value(&self, index: usize, metric: &SummaryMetric, now: Instant) -> Option<f64> {
        if !self.started {
            return None;
        }
        match self.tweens.get(index) {
            Some(Some(tween)) => Some(tween.value_at(now)),
            _ => Some(metric.current),
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tweens.iter().flatten().any(|t| !t.is_finished(now))
    }
}

pub fn show(
    ui: &mut egui::Ui,
    metrics: &[SummaryMetric],
    counters: &CardCounters,
    palette: &Palette,
    now: Instant,
    events: &mut Vec<InputEvent>,
) {
    let columns = ((ui.available_width() + CARD_SPACING) / (CARD_MIN_WIDTH + CARD_SPACING))
        .floor()
        .clamp(1.0, metrics.len().max(1) as f32) as usize;

    ui.columns(columns, |cols| {
        for (i, metric) in metrics.iter().enumerate() {
            let ui = &mut cols[i % columns];
            let value = counters.value(i, metric, now);
            if card(ui, metric, value, palette).clicked() {
                events.push(InputEvent::CardClicked(metric.title.clone()));
            }
            ui.add_space(CARD_SPACING);
        }
    });
}

fn card(
    ui: &mut egui::Ui,
    metric: &SummaryMetric,
    value: Option<f64>,
    palette: &Palette,
) -> egui::Response {
    let (badge_color, arrow) = if metric.change >= 0.0 {
        (Color32::from(palette.secondary), "⬆")
    } else {
        (Color32::from(palette.danger), "⬇")
    };

    Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(12.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&metric.title).size(13.0).color(Color32::GRAY));
            ui.add_space(6.0);
            let text = value
                .map(|v| format_value(v, metric.format))
                .unwrap_or_else(|| "--".to_string());
            ui.label(RichText::new(text).size(26.0).strong());
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("{} {} from last month", arrow, format_change(metric.change)))
                    .size(12.0)
                    .color(badge_color),
            );
        })
        .response
        .interact(Sense::click())
}

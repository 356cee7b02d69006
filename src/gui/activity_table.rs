//! Activity Table Widget
//! Recent user activity, filtered by the search box.

use crate::data::format::initials;
use crate::data::{Activity, ActivityStatus};
use crate::theme::Palette;
use egui::{Align2, Color32, FontId, Frame, Grid, Margin, RichText, Sense};

const AVATAR_SIZE: f32 = 28.0;

fn status_color(status: ActivityStatus, palette: &Palette) -> Color32 {
    match status {
        ActivityStatus::Completed => palette.secondary.into(),
        ActivityStatus::Pending => palette.accent.into(),
        ActivityStatus::Failed => palette.danger.into(),
    }
}

pub fn show(ui: &mut egui::Ui, rows: &[&Activity], palette: &Palette) {
    Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(12.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Recent Activity").size(16.0).strong());
            ui.add_space(8.0);

            if rows.is_empty() {
                ui.label(RichText::new("No matching activity").color(Color32::GRAY));
                return;
            }

            Grid::new("activity_table")
                .num_columns(4)
                .striped(true)
                .spacing([24.0, 10.0])
                .show(ui, |ui| {
                    for header in ["User", "Activity", "Time", "Status"] {
                        ui.label(RichText::new(header).strong().color(Color32::GRAY));
                    }
                    ui.end_row();

                    for row in rows {
                        ui.horizontal(|ui| {
                            avatar(ui, &row.user, palette);
                            ui.label(&row.user);
                        });
                        ui.label(&row.activity);
                        ui.label(RichText::new(&row.time).color(Color32::GRAY));
                        badge(ui, row.status, palette);
                        ui.end_row();
                    }
                });
        });
}

fn avatar(ui: &mut egui::Ui, name: &str, palette: &Palette) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, Color32::from(palette.primary));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        initials(name),
        FontId::proportional(11.0),
        Color32::WHITE,
    );
}

fn badge(ui: &mut egui::Ui, status: ActivityStatus, palette: &Palette) {
    let color = status_color(status, palette);
    Frame::none()
        .fill(color.gamma_multiply(0.15))
        .rounding(10.0)
        .inner_margin(Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(status.as_str()).size(11.0).color(color));
        });
}

//! Chart Panel Widget
//! Chart cards for the dashboard page. Charts are rasterized off-screen with
//! `PixmapSurface` and shown as textures sized to their card.

use crate::charts::{
    ChartKind, ChartOutcome, ChartSurfaces, DashboardRenderer, Dimensions, Fonts, PixmapSurface,
    Surface,
};
use crate::data::DashboardData;
use crate::gui::state::{InputEvent, TimeFilter};
use egui::load::SizedTexture;
use egui::{Color32, ComboBox, Frame, RichText, TextureHandle, TextureOptions, Vec2};
use log::warn;
use std::collections::HashMap;

pub const CHART_HEIGHT: f32 = 300.0;
const CARD_SPACING: f32 = 16.0;
const CARD_PADDING: f32 = 16.0;
const DEFAULT_WIDTH: f32 = 600.0;

/// Chart sizes for a content area `width` wide. Revenue spans the full width;
/// the other two share a row unless `stacked`.
pub fn slot_sizes(width: f32, stacked: bool) -> [(ChartKind, Vec2); 3] {
    let full = (width - 2.0 * CARD_PADDING).max(1.0);
    let half = if stacked {
        full
    } else {
        ((width - CARD_SPACING) / 2.0 - 2.0 * CARD_PADDING).max(1.0)
    };
    [
        (ChartKind::Revenue, Vec2::new(full, CHART_HEIGHT)),
        (ChartKind::Sales, Vec2::new(half, CHART_HEIGHT)),
        (ChartKind::Demographics, Vec2::new(half, CHART_HEIGHT)),
    ]
}

/// Rendered chart textures plus the slot each chart is laid out in.
#[derive(Default)]
pub struct ChartTextures {
    textures: HashMap<ChartKind, TextureHandle>,
    errors: HashMap<ChartKind, String>,
    slots: HashMap<ChartKind, Vec2>,
}

impl ChartTextures {
    fn slot(&self, kind: ChartKind) -> Vec2 {
        self.slots
            .get(&kind)
            .copied()
            .unwrap_or(Vec2::new(DEFAULT_WIDTH, CHART_HEIGHT))
    }

    /// Record this frame's layout. Returns true when any slot changed size.
    pub fn update_slots(&mut self, width: f32, stacked: bool) -> bool {
        let mut changed = false;
        for (kind, size) in slot_sizes(width, stacked) {
            let previous = self.slots.insert(kind, size);
            changed |= previous.map_or(true, |p| (p - size).length() > 0.5);
        }
        changed
    }

    fn surface_for(
        &mut self,
        kind: ChartKind,
        kinds: &[ChartKind],
        pixels_per_point: f64,
        fonts: Option<&Fonts>,
    ) -> Option<PixmapSurface> {
        if !kinds.contains(&kind) {
            return None;
        }
        let size = self.slot(kind);
        let dims = Dimensions::new(f64::from(size.x), f64::from(size.y), pixels_per_point);
        match PixmapSurface::new(dims) {
            Ok(surface) => Some(surface.with_fonts(fonts.cloned())),
            Err(e) => {
                warn!("Cannot allocate {} surface: {}", kind, e);
                self.errors.insert(kind, e.to_string());
                None
            }
        }
    }

    /// Re-render `kinds` and upload the results.
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        renderer: &DashboardRenderer,
        data: &DashboardData,
        kinds: &[ChartKind],
        fonts: Option<&Fonts>,
    ) {
        let ppp = f64::from(ctx.pixels_per_point());
        let mut revenue = self.surface_for(ChartKind::Revenue, kinds, ppp, fonts);
        let mut sales = self.surface_for(ChartKind::Sales, kinds, ppp, fonts);
        let mut demographics = self.surface_for(ChartKind::Demographics, kinds, ppp, fonts);

        let report = renderer.render_all(
            ChartSurfaces {
                revenue: revenue.as_mut().map(|s| s as &mut dyn Surface),
                sales: sales.as_mut().map(|s| s as &mut dyn Surface),
                demographics: demographics.as_mut().map(|s| s as &mut dyn Surface),
            },
            data,
        );

        let rendered = [
            (ChartKind::Revenue, revenue),
            (ChartKind::Sales, sales),
            (ChartKind::Demographics, demographics),
        ];
        for (kind, surface) in rendered {
            match (report.outcome(kind), surface) {
                (ChartOutcome::Rendered, Some(surface)) => {
                    self.errors.remove(&kind);
                    self.upload(ctx, kind, &surface);
                }
                (ChartOutcome::Failed(e), _) => {
                    self.textures.remove(&kind);
                    self.errors.insert(kind, e.to_string());
                }
                _ => {}
            }
        }
    }

    fn upload(&mut self, ctx: &egui::Context, kind: ChartKind, surface: &PixmapSurface) {
        let image = surface.to_rgba_image();
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());

        match self.textures.get_mut(&kind) {
            Some(handle) => handle.set(color_image, TextureOptions::LINEAR),
            None => {
                let handle = ctx.load_texture(kind.name(), color_image, TextureOptions::LINEAR);
                self.textures.insert(kind, handle);
            }
        }
    }

    fn show_chart(&self, ui: &mut egui::Ui, kind: ChartKind) {
        let size = self.slot(kind);
        if let Some(texture) = self.textures.get(&kind) {
            ui.add(egui::Image::new(SizedTexture::new(texture.id(), size)));
        } else if let Some(error) = self.errors.get(&kind) {
            ui.allocate_ui(size, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(format!("⚠ {}", error)).color(Color32::GRAY));
                });
            });
        } else {
            ui.allocate_ui(size, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            });
        }
    }
}

fn card(
    ui: &mut egui::Ui,
    title: &str,
    add_header: impl FnOnce(&mut egui::Ui),
    body: impl FnOnce(&mut egui::Ui),
) {
    Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(12.0)
        .inner_margin(CARD_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(title).size(16.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), add_header);
            });
            ui.add_space(8.0);
            body(ui);
        });
}

/// Draw the three chart cards. `stacked` puts every chart on its own row.
pub fn show(
    ui: &mut egui::Ui,
    textures: &ChartTextures,
    time_filter: TimeFilter,
    stacked: bool,
    events: &mut Vec<InputEvent>,
) {
    card(
        ui,
        ChartKind::Revenue.title(),
        |ui| {
            let mut selected = time_filter;
            ComboBox::from_id_salt("time_filter")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for option in TimeFilter::ALL {
                        ui.selectable_value(&mut selected, option, option.label());
                    }
                });
            if selected != time_filter {
                events.push(InputEvent::TimeFilterChanged(selected));
            }
        },
        |ui| textures.show_chart(ui, ChartKind::Revenue),
    );
    ui.add_space(CARD_SPACING);

    let side_cards = |ui: &mut egui::Ui, kind: ChartKind| {
        card(ui, kind.title(), |_| {}, |ui| textures.show_chart(ui, kind));
    };
    if stacked {
        side_cards(ui, ChartKind::Sales);
        ui.add_space(CARD_SPACING);
        side_cards(ui, ChartKind::Demographics);
    } else {
        ui.horizontal_top(|ui| {
            ui.spacing_mut().item_spacing.x = CARD_SPACING;
            side_cards(ui, ChartKind::Sales);
            side_cards(ui, ChartKind::Demographics);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_layout_shares_second_row() {
        let slots = slot_sizes(1016.0, false);
        assert_eq!(slots[0], (ChartKind::Revenue, Vec2::new(984.0, CHART_HEIGHT)));
        assert_eq!(slots[1].1, Vec2::new(468.0, CHART_HEIGHT));
        assert_eq!(slots[1].1, slots[2].1);
    }

    #[test]
    fn stacked_layout_uses_full_width() {
        let slots = slot_sizes(500.0, true);
        assert!(slots.iter().all(|(_, size)| size.x == 468.0));
    }

    #[test]
    fn tiny_widths_stay_positive() {
        assert!(slot_sizes(0.0, false).iter().all(|(_, s)| s.x >= 1.0));
    }

    #[test]
    fn slot_changes_are_detected() {
        let mut textures = ChartTextures::default();
        assert!(textures.update_slots(1000.0, false));
        assert!(!textures.update_slots(1000.0, false));
        assert!(textures.update_slots(900.0, false));
        assert!(textures.update_slots(900.0, true));
        assert_eq!(textures.slot(ChartKind::Sales).x, 868.0);
    }
}

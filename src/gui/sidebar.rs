//! Sidebar Widget
//! Brand header, section menu and the collapse toggle.

use crate::gui::state::{InputEvent, Section, SidebarMode};
use egui::{Color32, RichText};

pub const EXPANDED_WIDTH: f32 = 240.0;
pub const COLLAPSED_WIDTH: f32 = 64.0;

/// Panel width for `mode`; `None` when the sidebar is not shown.
pub fn width(mode: SidebarMode) -> Option<f32> {
    match mode {
        SidebarMode::Expanded | SidebarMode::Overlay => Some(EXPANDED_WIDTH),
        SidebarMode::Collapsed => Some(COLLAPSED_WIDTH),
        SidebarMode::Hidden => None,
    }
}

pub fn show(
    ui: &mut egui::Ui,
    mode: SidebarMode,
    active: Section,
    accent: Color32,
    events: &mut Vec<InputEvent>,
) {
    let compact = mode == SidebarMode::Collapsed;

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("📊").size(22.0).color(accent));
        if !compact {
            ui.label(RichText::new("BizDash").size(20.0).strong().color(accent));
        }
    });
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(5.0);

    for section in Section::ALL {
        let text = if compact {
            RichText::new(section.icon()).size(18.0)
        } else {
            RichText::new(format!("{}  {}", section.icon(), section.label())).size(14.0)
        };
        let text = if section == active {
            text.strong().color(accent)
        } else {
            text
        };

        let response = ui
            .add_sized(
                [ui.available_width(), 34.0],
                egui::SelectableLabel::new(section == active, text),
            )
            .on_hover_text(section.label());
        if response.clicked() {
            events.push(InputEvent::Navigate(section));
        }
    }

    if mode != SidebarMode::Overlay {
        ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
            ui.add_space(10.0);
            let (icon, hint) = if compact {
                ("»", "Expand sidebar")
            } else {
                ("«", "Collapse sidebar")
            };
            if ui
                .button(RichText::new(icon).size(16.0).color(Color32::GRAY))
                .on_hover_text(hint)
                .clicked()
            {
                events.push(InputEvent::ToggleSidebar);
            }
        });
    }
}

//! Header Widget
//! Top bar with the page title, search box and user menu.

use crate::gui::state::{InputEvent, Section, UiState};
use egui::{Align, Color32, Id, Layout, Order, RichText, TextEdit};
use log::debug;

const SEARCH_WIDTH: f32 = 260.0;
const MENU_WIDTH: f32 = 160.0;

pub fn show(ui: &mut egui::Ui, state: &UiState, focus_search: bool, events: &mut Vec<InputEvent>) {
    ui.horizontal(|ui| {
        if state.is_mobile() && ui.button(RichText::new("☰").size(18.0)).clicked() {
            events.push(InputEvent::ToggleMobileMenu);
        }
        ui.label(RichText::new(state.page_title()).size(22.0).strong());

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            user_menu(ui, state, events);
            ui.add_space(12.0);
            search_box(ui, state, focus_search, events);
        });
    });
}

fn search_box(ui: &mut egui::Ui, state: &UiState, focus: bool, events: &mut Vec<InputEvent>) {
    let mut query = state.search.clone();
    let width = if state.is_mobile() {
        SEARCH_WIDTH / 2.0
    } else {
        SEARCH_WIDTH
    };
    let response = ui.add(
        TextEdit::singleline(&mut query)
            .hint_text("🔍 Search... (Ctrl+K)")
            .desired_width(width),
    );
    if focus {
        response.request_focus();
    }
    if response.changed() {
        events.push(InputEvent::SearchChanged(query));
    }
}

fn user_menu(ui: &mut egui::Ui, state: &UiState, events: &mut Vec<InputEvent>) {
    let button = ui.button(RichText::new("👤 Admin ⏷").size(14.0));
    if button.clicked() {
        events.push(InputEvent::ToggleUserMenu);
    }
    if !state.user_menu_open() {
        return;
    }

    let menu = egui::Area::new(Id::new("user_dropdown"))
        .order(Order::Foreground)
        .fixed_pos(button.rect.right_bottom() + egui::vec2(-MENU_WIDTH, 4.0))
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(MENU_WIDTH);
                for item in ["Profile", "Settings", "Logout"] {
                    if ui.selectable_label(false, item).clicked() {
                        debug!("User menu: {}", item);
                        if item == "Settings" {
                            events.push(InputEvent::Navigate(Section::Settings));
                        }
                        events.push(InputEvent::ToggleUserMenu);
                    }
                }
                ui.separator();
                ui.label(RichText::new("admin@bizdash.local").size(11.0).color(Color32::GRAY));
            });
        });

    let menu_rect = menu.response.rect;
    let clicked_outside = ui.ctx().input(|i| {
        i.pointer.any_click()
            && i
                .pointer
                .interact_pos()
                .is_some_and(|p| !button.rect.contains(p) && !menu_rect.contains(p))
    });
    if clicked_outside {
        events.push(InputEvent::ClickOutsideUserMenu);
    }
}

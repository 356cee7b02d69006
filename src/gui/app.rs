//! BizDash Main Application
//! Main window with sidebar, header, summary cards, charts and activity table.

use crate::charts::{ChartKind, DashboardRenderer, Fonts};
use crate::config::DashboardConfig;
use crate::data::{mock, DashboardData};
use crate::gui::chart_panel::{self, ChartTextures};
use crate::gui::state::{Effect, InputEvent, SidebarMode, UiState};
use crate::gui::summary_cards::{self, CardCounters};
use crate::gui::{activity_table, header, sidebar};
use crate::prefs::PrefsStore;
use egui::{CentralPanel, Color32, Frame, Id, Key, Order, ScrollArea, SidePanel, TopBottomPanel};
use log::{info, warn};
use std::time::Instant;

/// Below this content width the side-by-side charts are stacked.
const STACK_BELOW: f32 = 700.0;
const SECTION_SPACING: f32 = 16.0;

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    renderer: DashboardRenderer,
    data: DashboardData,
    state: UiState,
    prefs: PrefsStore,
    fonts: Option<Fonts>,
    charts: ChartTextures,
    counters: CardCounters,
    focus_search: bool,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        prefs: PrefsStore,
    ) -> Self {
        let fonts = Fonts::load_system();
        if fonts.is_none() {
            warn!("No usable system font found, chart labels will be blank");
        }
        info!("Loading dashboard data...");

        Self {
            renderer: DashboardRenderer::new(&config),
            data: mock::dashboard(&config.palette),
            state: UiState::new(&config.ui, prefs.get(), Instant::now()),
            config,
            prefs,
            fonts,
            charts: ChartTextures::default(),
            counters: CardCounters::default(),
            focus_search: false,
        }
    }

    fn read_shortcuts(ctx: &egui::Context, events: &mut Vec<InputEvent>) {
        ctx.input(|i| {
            if i.modifiers.command && i.key_pressed(Key::K) {
                events.push(InputEvent::FocusSearch);
            }
            if i.key_pressed(Key::Escape) {
                events.push(InputEvent::Escape);
            }
        });
    }

    fn render_charts(&mut self, ctx: &egui::Context, kinds: &[ChartKind]) {
        self.charts
            .render(ctx, &self.renderer, &self.data, kinds, self.fonts.as_ref());
    }

    fn apply_effects(&mut self, ctx: &egui::Context, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::PersistSidebar(collapsed) => {
                    if let Err(e) = self.prefs.set_sidebar_collapsed(collapsed) {
                        warn!("Sidebar state not saved: {}", e);
                    }
                }
                Effect::FocusSearch => self.focus_search = true,
                Effect::DataLoaded => {
                    info!("Dashboard data loaded");
                    self.counters
                        .start(&self.data.summary, self.config.ui.counter_duration(), now);
                    self.render_charts(ctx, &ChartKind::ALL);
                }
                Effect::RenderAll => self.render_charts(ctx, &ChartKind::ALL),
                Effect::RenderRevenue => self.render_charts(ctx, &[ChartKind::Revenue]),
            }
        }
    }

    fn process(&mut self, ctx: &egui::Context, events: Vec<InputEvent>, now: Instant) {
        for event in events {
            let effects = self.state.apply(event, now);
            self.apply_effects(ctx, effects, now);
        }
    }

    fn show_sidebar(&self, ctx: &egui::Context, events: &mut Vec<InputEvent>) {
        let mode = self.state.sidebar_mode();
        let Some(width) = sidebar::width(mode) else {
            return;
        };
        let accent = Color32::from(self.config.palette.primary);

        if mode == SidebarMode::Overlay {
            egui::Area::new(Id::new("mobile_sidebar"))
                .order(Order::Foreground)
                .fixed_pos(egui::Pos2::ZERO)
                .show(ctx, |ui| {
                    Frame::side_top_panel(&ctx.style()).show(ui, |ui| {
                        ui.set_width(width);
                        ui.set_min_height(ctx.screen_rect().height());
                        sidebar::show(ui, mode, self.state.section, accent, events);
                    });
                });
        } else {
            SidePanel::left("sidebar")
                .resizable(false)
                .exact_width(width)
                .show(ctx, |ui| {
                    sidebar::show(ui, mode, self.state.section, accent, events);
                });
        }
    }

    fn show_loading_overlay(ctx: &egui::Context) {
        egui::Area::new(Id::new("loading_overlay"))
            .order(Order::Foreground)
            .fixed_pos(egui::Pos2::ZERO)
            .show(ctx, |ui| {
                let rect = ctx.screen_rect();
                ui.painter().rect_filled(rect, 0.0, Color32::from_black_alpha(120));
                ui.put(rect, egui::Spinner::new().size(48.0));
            });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Input that affects this frame's layout
        let mut events = vec![InputEvent::Resized {
            width: ctx.screen_rect().width(),
        }];
        Self::read_shortcuts(ctx, &mut events);
        self.process(ctx, events, now);
        let effects = self.state.tick(now);
        self.apply_effects(ctx, effects, now);

        // Widget interactions, applied after drawing
        let mut events = Vec::new();
        let focus_search = std::mem::take(&mut self.focus_search);

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            header::show(ui, &self.state, focus_search, &mut events);
            ui.add_space(8.0);
        });

        self.show_sidebar(ctx, &mut events);

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    summary_cards::show(
                        ui,
                        &self.data.summary,
                        &self.counters,
                        &self.config.palette,
                        now,
                        &mut events,
                    );
                    ui.add_space(SECTION_SPACING);

                    let width = ui.available_width();
                    let stacked = self.state.is_mobile() || width < STACK_BELOW;
                    if self.charts.update_slots(width, stacked) && self.state.data_ready() {
                        events.push(InputEvent::LayoutChanged);
                    }
                    chart_panel::show(
                        ui,
                        &self.charts,
                        self.state.time_filter,
                        stacked,
                        &mut events,
                    );
                    ui.add_space(SECTION_SPACING);

                    let rows = self.state.filtered_activity(&self.data.activity);
                    activity_table::show(ui, &rows, &self.config.palette);
                });
        });

        if self.state.is_loading() {
            Self::show_loading_overlay(ctx);
        }

        let had_events = !events.is_empty();
        self.process(ctx, events, now);

        if had_events || self.state.is_loading() || self.counters.is_animating(now) {
            ctx.request_repaint();
        } else if let Some(wait) = self.state.next_deadline(now) {
            ctx.request_repaint_after(wait);
        }
    }
}

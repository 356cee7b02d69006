//! Dashboard UI state.
//! Everything the widgets toggle lives here, driven by `InputEvent`s so it can be
//! exercised without a window.

use crate::config::UiConfig;
use crate::data::Activity;
use crate::prefs::Preferences;
use crate::timing::{Debouncer, Delay};
use log::{debug, info};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    Analytics,
    Sales,
    Reports,
    Settings,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Analytics,
        Section::Sales,
        Section::Reports,
        Section::Settings,
    ];

    /// Menu entry text.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Analytics => "Analytics",
            Section::Sales => "Sales",
            Section::Reports => "Reports",
            Section::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Dashboard => "🏠",
            Section::Analytics => "📈",
            Section::Sales => "🛒",
            Section::Reports => "📄",
            Section::Settings => "⚙",
        }
    }

    /// Page heading shown in the top bar.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard Overview",
            Section::Analytics => "Analytics",
            Section::Sales => "Sales Management",
            Section::Reports => "Reports",
            Section::Settings => "Settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    Last7Days,
    #[default]
    Last30Days,
    Last90Days,
    LastYear,
}

impl TimeFilter {
    pub const ALL: [TimeFilter; 4] = [
        TimeFilter::Last7Days,
        TimeFilter::Last30Days,
        TimeFilter::Last90Days,
        TimeFilter::LastYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeFilter::Last7Days => "Last 7 days",
            TimeFilter::Last30Days => "Last 30 days",
            TimeFilter::Last90Days => "Last 90 days",
            TimeFilter::LastYear => "Last year",
        }
    }
}

/// How the sidebar is laid out this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarMode {
    Expanded,
    /// Icons only
    Collapsed,
    /// Mobile width, menu closed
    Hidden,
    /// Mobile width, menu open over the content
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Loading {
    Initial,
    Filter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Navigate(Section),
    ToggleSidebar,
    ToggleMobileMenu,
    ToggleUserMenu,
    /// A click landed outside the user menu and its button.
    ClickOutsideUserMenu,
    Escape,
    FocusSearch,
    SearchChanged(String),
    TimeFilterChanged(TimeFilter),
    Resized { width: f32 },
    /// Chart slots changed size without the window resizing.
    LayoutChanged,
    CardClicked(String),
}

/// Work the app has to do in response to state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    PersistSidebar(bool),
    FocusSearch,
    /// Initial data arrived: draw every chart and start the counters.
    DataLoaded,
    RenderAll,
    RenderRevenue,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub section: Section,
    pub search: String,
    pub time_filter: TimeFilter,
    sidebar_collapsed: bool,
    mobile_menu_open: bool,
    user_menu_open: bool,
    viewport_width: f32,
    mobile_breakpoint: f32,
    filter_delay: Duration,
    loading: Delay,
    loading_kind: Option<Loading>,
    resize: Debouncer,
}

impl UiState {
    /// Fresh state with the simulated initial load already running.
    pub fn new(config: &UiConfig, prefs: Preferences, now: Instant) -> Self {
        let mut loading = Delay::default();
        loading.start(now, config.api_delay());
        Self {
            section: Section::default(),
            search: String::new(),
            time_filter: TimeFilter::default(),
            sidebar_collapsed: prefs.sidebar_collapsed,
            mobile_menu_open: false,
            user_menu_open: false,
            viewport_width: f32::INFINITY,
            mobile_breakpoint: config.mobile_breakpoint,
            filter_delay: config.filter_delay(),
            loading,
            loading_kind: Some(Loading::Initial),
            resize: Debouncer::new(config.resize_debounce()),
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport_width <= self.mobile_breakpoint
    }

    pub fn sidebar_mode(&self) -> SidebarMode {
        match (self.is_mobile(), self.mobile_menu_open, self.sidebar_collapsed) {
            (true, true, _) => SidebarMode::Overlay,
            (true, false, _) => SidebarMode::Hidden,
            (false, _, true) => SidebarMode::Collapsed,
            (false, _, false) => SidebarMode::Expanded,
        }
    }

    /// The saved desktop flag, regardless of the current width.
    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn user_menu_open(&self) -> bool {
        self.user_menu_open
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_running()
    }

    /// Whether the first simulated load has finished.
    pub fn data_ready(&self) -> bool {
        self.loading_kind != Some(Loading::Initial)
    }

    pub fn page_title(&self) -> &'static str {
        self.section.title()
    }

    /// Activity rows matching the search box.
    pub fn filtered_activity<'a>(&self, rows: &'a [Activity]) -> Vec<&'a Activity> {
        let query = self.search.trim().to_lowercase();
        rows.iter().filter(|row| row.matches(&query)).collect()
    }

    /// Earliest pending deadline, for scheduling a repaint.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        match (self.loading.remaining(now), self.resize.remaining(now)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn apply(&mut self, event: InputEvent, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            InputEvent::Navigate(section) => {
                self.section = section;
                self.mobile_menu_open = false;
                debug!("Navigated to {}", section.label());
            }
            InputEvent::ToggleSidebar => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                effects.push(Effect::PersistSidebar(self.sidebar_collapsed));
            }
            InputEvent::ToggleMobileMenu => {
                self.mobile_menu_open = !self.mobile_menu_open;
            }
            InputEvent::ToggleUserMenu => {
                self.user_menu_open = !self.user_menu_open;
            }
            InputEvent::ClickOutsideUserMenu => {
                self.user_menu_open = false;
            }
            InputEvent::Escape => {
                self.user_menu_open = false;
                if self.is_mobile() {
                    self.mobile_menu_open = false;
                }
            }
            InputEvent::FocusSearch => effects.push(Effect::FocusSearch),
            InputEvent::SearchChanged(query) => {
                debug!("Searching for: {}", query);
                self.search = query;
            }
            InputEvent::TimeFilterChanged(filter) => {
                if filter != self.time_filter {
                    info!("Time filter changed: {}", filter.label());
                    self.time_filter = filter;
                    // The initial load already ends in a full render.
                    if self.loading_kind != Some(Loading::Initial) {
                        self.loading.start(now, self.filter_delay);
                        self.loading_kind = Some(Loading::Filter);
                    }
                }
            }
            InputEvent::Resized { width } => {
                if width != self.viewport_width {
                    self.viewport_width = width;
                    self.mobile_menu_open = false;
                    self.resize.trigger(now);
                }
            }
            InputEvent::LayoutChanged => self.resize.trigger(now),
            InputEvent::CardClicked(title) => debug!("Card clicked: {}", title),
        }
        effects
    }

    /// Advance timers. Call once per frame.
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.loading.poll(now) {
            match self.loading_kind.take() {
                Some(Loading::Initial) => effects.push(Effect::DataLoaded),
                Some(Loading::Filter) => effects.push(Effect::RenderRevenue),
                None => {}
            }
        }
        // Resizes before the data arrives are covered by the initial render.
        if self.resize.poll(now) && self.data_ready() && !effects.contains(&Effect::DataLoaded) {
            effects.push(Effect::RenderAll);
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mock;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn state(now: Instant) -> UiState {
        UiState::new(&UiConfig::default(), Preferences::default(), now)
    }

    fn loaded(now: Instant) -> UiState {
        let mut s = state(now);
        assert_eq!(s.tick(now + ms(1500)), vec![Effect::DataLoaded]);
        s
    }

    #[test]
    fn initial_load_runs_for_api_delay() {
        let t0 = Instant::now();
        let mut s = state(t0);
        assert!(s.is_loading());
        assert!(!s.data_ready());
        assert!(s.tick(t0 + ms(1499)).is_empty());
        assert_eq!(s.tick(t0 + ms(1500)), vec![Effect::DataLoaded]);
        assert!(!s.is_loading());
        assert!(s.data_ready());
        assert!(s.tick(t0 + ms(3000)).is_empty());
    }

    #[test]
    fn navigation_sets_title_and_closes_mobile_menu() {
        let t0 = Instant::now();
        let mut s = state(t0);
        s.apply(InputEvent::Resized { width: 500.0 }, t0);
        s.apply(InputEvent::ToggleMobileMenu, t0);
        assert_eq!(s.sidebar_mode(), SidebarMode::Overlay);

        s.apply(InputEvent::Navigate(Section::Sales), t0);
        assert_eq!(s.page_title(), "Sales Management");
        assert_eq!(s.sidebar_mode(), SidebarMode::Hidden);
    }

    #[test]
    fn sidebar_toggle_persists() {
        let t0 = Instant::now();
        let mut s = state(t0);
        s.apply(InputEvent::Resized { width: 1400.0 }, t0);
        assert_eq!(s.sidebar_mode(), SidebarMode::Expanded);
        assert_eq!(
            s.apply(InputEvent::ToggleSidebar, t0),
            vec![Effect::PersistSidebar(true)]
        );
        assert_eq!(s.sidebar_mode(), SidebarMode::Collapsed);
    }

    #[test]
    fn mobile_ignores_collapsed_flag_and_desktop_restores_it() {
        let t0 = Instant::now();
        let prefs = Preferences {
            sidebar_collapsed: true,
        };
        let mut s = UiState::new(&UiConfig::default(), prefs, t0);

        s.apply(InputEvent::Resized { width: 768.0 }, t0);
        assert!(s.is_mobile());
        assert_eq!(s.sidebar_mode(), SidebarMode::Hidden);
        s.apply(InputEvent::ToggleMobileMenu, t0);
        assert_eq!(s.sidebar_mode(), SidebarMode::Overlay);

        s.apply(InputEvent::Resized { width: 769.0 }, t0);
        assert!(!s.is_mobile());
        assert_eq!(s.sidebar_mode(), SidebarMode::Collapsed);
    }

    #[test]
    fn escape_closes_menus() {
        let t0 = Instant::now();
        let mut s = state(t0);
        s.apply(InputEvent::Resized { width: 600.0 }, t0);
        s.apply(InputEvent::ToggleMobileMenu, t0);
        s.apply(InputEvent::ToggleUserMenu, t0);
        assert!(s.user_menu_open());

        s.apply(InputEvent::Escape, t0);
        assert!(!s.user_menu_open());
        assert_eq!(s.sidebar_mode(), SidebarMode::Hidden);
    }

    #[test]
    fn outside_click_closes_user_menu() {
        let t0 = Instant::now();
        let mut s = state(t0);
        s.apply(InputEvent::ToggleUserMenu, t0);
        s.apply(InputEvent::ClickOutsideUserMenu, t0);
        assert!(!s.user_menu_open());
        s.apply(InputEvent::ToggleUserMenu, t0);
        s.apply(InputEvent::ToggleUserMenu, t0);
        assert!(!s.user_menu_open());
    }

    #[test]
    fn search_filters_activity() {
        let t0 = Instant::now();
        let mut s = state(t0);
        let rows = mock::recent_activity();
        assert_eq!(s.filtered_activity(&rows).len(), rows.len());

        s.apply(InputEvent::SearchChanged("  PAYMENT ".into()), t0);
        let users: Vec<&str> = s.filtered_activity(&rows).iter().map(|a| a.user.as_str()).collect();
        assert_eq!(users, vec!["Mike Chen"]);

        s.apply(InputEvent::SearchChanged("zzz".into()), t0);
        assert!(s.filtered_activity(&rows).is_empty());
    }

    #[test]
    fn focus_shortcut_requests_focus() {
        let t0 = Instant::now();
        assert_eq!(
            state(t0).apply(InputEvent::FocusSearch, t0),
            vec![Effect::FocusSearch]
        );
    }

    #[test]
    fn time_filter_reloads_revenue_after_delay() {
        let t0 = Instant::now();
        let mut s = loaded(t0);
        let t1 = t0 + ms(2000);

        s.apply(InputEvent::TimeFilterChanged(TimeFilter::Last90Days), t1);
        assert!(s.is_loading());
        assert!(s.data_ready());
        assert!(s.tick(t1 + ms(799)).is_empty());
        assert_eq!(s.tick(t1 + ms(800)), vec![Effect::RenderRevenue]);
        assert!(!s.is_loading());

        // Selecting the current filter again is a no-op.
        s.apply(InputEvent::TimeFilterChanged(TimeFilter::Last90Days), t1);
        assert!(!s.is_loading());
    }

    #[test]
    fn filter_during_initial_load_keeps_initial_load() {
        let t0 = Instant::now();
        let mut s = state(t0);
        s.apply(InputEvent::TimeFilterChanged(TimeFilter::LastYear), t0 + ms(100));
        assert_eq!(s.time_filter, TimeFilter::LastYear);
        assert_eq!(s.tick(t0 + ms(1500)), vec![Effect::DataLoaded]);
    }

    #[test]
    fn resize_burst_renders_once() {
        let t0 = Instant::now();
        let mut s = loaded(t0);
        let t1 = t0 + ms(2000);

        for (i, w) in [1200.0, 1100.0, 1000.0].into_iter().enumerate() {
            s.apply(InputEvent::Resized { width: w }, t1 + ms(i as u64 * 100));
        }
        assert!(s.tick(t1 + ms(400)).is_empty());
        assert_eq!(s.tick(t1 + ms(450)), vec![Effect::RenderAll]);
        assert!(s.tick(t1 + ms(1000)).is_empty());

        // Same width again is not a resize.
        s.apply(InputEvent::Resized { width: 1000.0 }, t1 + ms(1000));
        assert!(s.tick(t1 + ms(2000)).is_empty());
    }

    #[test]
    fn resize_before_load_is_folded_into_initial_render() {
        let t0 = Instant::now();
        let mut s = state(t0);
        s.apply(InputEvent::Resized { width: 1300.0 }, t0);
        assert!(s.tick(t0 + ms(300)).is_empty());
        assert_eq!(s.tick(t0 + ms(1500)), vec![Effect::DataLoaded]);
    }

    #[test]
    fn layout_change_is_debounced_like_resize() {
        let t0 = Instant::now();
        let mut s = loaded(t0);
        let t1 = t0 + ms(2000);
        s.apply(InputEvent::LayoutChanged, t1);
        s.apply(InputEvent::LayoutChanged, t1 + ms(100));
        assert!(s.tick(t1 + ms(300)).is_empty());
        assert_eq!(s.tick(t1 + ms(350)), vec![Effect::RenderAll]);
    }

    #[test]
    fn next_deadline_is_earliest_timer() {
        let t0 = Instant::now();
        let mut s = state(t0);
        assert_eq!(s.next_deadline(t0), Some(ms(1500)));
        s.apply(InputEvent::Resized { width: 900.0 }, t0);
        assert_eq!(s.next_deadline(t0), Some(ms(250)));
    }
}

use crate::app::selector::{selector_rows, SelectorRow};
use canon_core::{CountryStore, Dashboard, DatasetError};
use canon_tui::{spawn_load, Settings};
use std::path::PathBuf;
use throbber_widgets_tui::ThrobberState;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Selector,
}

/// Which dashboard panel receives Up/Down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Poll,
    Rank,
    Chart,
}

impl Focus {
    pub const fn next(self) -> Self {
        match self {
            Self::Poll => Self::Rank,
            Self::Rank => Self::Chart,
            Self::Chart => Self::Poll,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Self::Poll => Self::Chart,
            Self::Rank => Self::Poll,
            Self::Chart => Self::Rank,
        }
    }
}

type PendingLoad = oneshot::Receiver<Result<CountryStore, DatasetError>>;

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub focus: Focus,
    pub dashboard: Dashboard,
    pub data_path: PathBuf,
    pub chart_index: usize,
    pub selector_index: usize,
    pub status_message: String,
    pub show_help: bool,
    pub throbber: ThrobberState,
    pub pending_load: Option<PendingLoad>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            focus: Focus::Chart,
            dashboard: Dashboard::new(settings.filters, settings.top_n),
            data_path: settings.data_path.clone(),
            chart_index: 0,
            selector_index: 0,
            status_message: String::new(),
            show_help: false,
            throbber: ThrobberState::default(),
            pending_load: None,
        }
    }

    /// Kicks off a background read of the country feed. Ignored while one
    /// is already running.
    pub fn request_load(&mut self) {
        if self.pending_load.is_some() {
            return;
        }
        self.dashboard.begin_loading();
        self.pending_load = Some(spawn_load(self.data_path.clone()));
    }

    pub fn on_tick(&mut self) {
        if self.dashboard.is_loading() {
            self.throbber.calc_next();
        }
    }

    pub fn open_selector(&mut self) {
        if self.dashboard.groups().is_empty() {
            self.status_message = "No countries to select under these filters".to_string();
            return;
        }
        self.dashboard.open_selector();
        self.selector_index = 0;
        self.screen = AppScreen::Selector;
    }

    pub fn close_selector(&mut self) {
        self.screen = AppScreen::Dashboard;
        self.selector_index = 0;
        self.clamp_chart_index();
    }

    /// Rows of the open selector tree, empty when it is closed
    pub fn selector_rows(&self) -> Vec<SelectorRow> {
        self.dashboard
            .selection()
            .dialog()
            .map(|dialog| selector_rows(dialog, self.dashboard.groups()))
            .unwrap_or_default()
    }

    pub fn clamp_chart_index(&mut self) {
        let rows = self.dashboard.chart_rows().len();
        self.chart_index = self.chart_index.min(rows.saturating_sub(1));
    }

    pub fn clamp_selector_index(&mut self) {
        let rows = self.selector_rows().len();
        self.selector_index = self.selector_index.min(rows.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_every_panel() {
        let mut focus = Focus::Poll;
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Poll);
        assert_eq!(Focus::Poll.previous(), Focus::Chart);
    }

    #[test]
    fn selector_needs_countries_to_open() {
        let mut app = App::new(&Settings::default());
        app.open_selector();
        assert_eq!(app.screen, AppScreen::Dashboard);
        assert!(!app.status_message.is_empty());
    }
}

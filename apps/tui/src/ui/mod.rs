// UI module for canon-tui
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::dashboard::render_dashboard(app, f);

    if app.screen == AppScreen::Selector {
        screens::selector::render_selector(app, f);
    }

    if app.show_help {
        screens::help::render_help_popup(f);
    }
}

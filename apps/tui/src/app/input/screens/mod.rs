use crate::app::state::{App, AppScreen};
use crossterm::event::KeyEvent;

mod dashboard;
mod help;
mod selector;

pub fn dispatch_input(app: &mut App, key: KeyEvent) {
    if help::handle_help_toggle(app, key.code) {
        return;
    }

    match app.screen {
        AppScreen::Dashboard => dashboard::handle_dashboard_input(app, key.code),
        AppScreen::Selector => selector::handle_selector_input(app, key),
    }
}

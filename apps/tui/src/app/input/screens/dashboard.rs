use crate::app::input::helpers::page_step;
use crate::app::state::{App, Focus};
use canon_core::{DEFAULT_TOP_N, TOP_N_PRESETS};
use crossterm::event::KeyCode;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
        }
        KeyCode::BackTab => {
            app.focus = app.focus.previous();
        }
        KeyCode::Char('p') => cycle_poll(app, true),
        KeyCode::Char('P') => cycle_poll(app, false),
        KeyCode::Char('r') => cycle_rank(app, true),
        KeyCode::Char('R') => cycle_rank(app, false),
        KeyCode::Char('t') => reset_to_top(app, DEFAULT_TOP_N),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            if let Some(n) = TOP_N_PRESETS.get(index) {
                reset_to_top(app, *n);
            }
        }
        KeyCode::Char('s') => app.open_selector(),
        KeyCode::Enter if app.focus == Focus::Chart => app.open_selector(),
        KeyCode::F(5) => {
            app.status_message = "Reloading country data...".to_string();
            app.request_load();
        }
        KeyCode::Up => move_focused(app, false),
        KeyCode::Down => move_focused(app, true),
        KeyCode::PageUp if app.focus == Focus::Chart => {
            let rows = app.dashboard.chart_rows().len();
            app.chart_index = page_step(app.chart_index, rows, 5, false);
        }
        KeyCode::PageDown if app.focus == Focus::Chart => {
            let rows = app.dashboard.chart_rows().len();
            app.chart_index = page_step(app.chart_index, rows, 5, true);
        }
        KeyCode::Home if app.focus == Focus::Chart => {
            app.chart_index = 0;
        }
        KeyCode::End if app.focus == Focus::Chart => {
            app.chart_index = app.dashboard.chart_rows().len().saturating_sub(1);
        }
        _ => {}
    }
}

fn move_focused(app: &mut App, forward: bool) {
    match app.focus {
        Focus::Poll => cycle_poll(app, forward),
        Focus::Rank => cycle_rank(app, forward),
        Focus::Chart => {
            let rows = app.dashboard.chart_rows().len();
            app.chart_index = page_step(app.chart_index, rows, 1, forward);
        }
    }
}

fn cycle_poll(app: &mut App, forward: bool) {
    app.dashboard.cycle_poll(forward);
    filters_changed(app);
}

fn cycle_rank(app: &mut App, forward: bool) {
    app.dashboard.cycle_rank(forward);
    filters_changed(app);
}

fn filters_changed(app: &mut App) {
    app.clamp_chart_index();
    app.status_message = format!("Filters: {}", app.dashboard.filters().description());
}

fn reset_to_top(app: &mut App, n: usize) {
    let count = app.dashboard.reset_to_top_n(n);
    app.chart_index = 0;
    app.status_message = format!("Showing top {count} countries");
}

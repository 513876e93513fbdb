use crate::app::input::helpers::{page_step, wrap_step};
use crate::app::selector::SelectorRow;
use crate::app::state::App;
use canon_core::{ContinentToggle, ToggleOutcome, MAX_SELECTION};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_selector_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('a') => apply(app),
            KeyCode::Char('x') => clear(app),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.dashboard.selection_mut().cancel();
            app.close_selector();
            app.status_message = "Selection unchanged".to_string();
        }
        KeyCode::Up => {
            let rows = app.selector_rows().len();
            app.selector_index = wrap_step(app.selector_index, rows, false);
        }
        KeyCode::Down => {
            let rows = app.selector_rows().len();
            app.selector_index = wrap_step(app.selector_index, rows, true);
        }
        KeyCode::PageUp => {
            let rows = app.selector_rows().len();
            app.selector_index = page_step(app.selector_index, rows, 10, false);
        }
        KeyCode::PageDown => {
            let rows = app.selector_rows().len();
            app.selector_index = page_step(app.selector_index, rows, 10, true);
        }
        KeyCode::Char(' ') => toggle_current(app),
        KeyCode::Left => set_current_expanded(app, false),
        KeyCode::Right => set_current_expanded(app, true),
        KeyCode::Backspace => {
            let mut query = current_query(app);
            query.pop();
            set_query(app, query);
        }
        KeyCode::Char(ch) => {
            let mut query = current_query(app);
            query.push(ch);
            set_query(app, query);
        }
        _ => {}
    }
}

fn apply(app: &mut App) {
    match app.dashboard.selection_mut().apply_selection() {
        Ok(count) => {
            app.close_selector();
            app.status_message = format!("Showing {count} selected countries");
        }
        Err(error) => {
            app.status_message = format!("Error: {error}");
        }
    }
}

fn clear(app: &mut App) {
    if let Some(dialog) = app.dashboard.selection_mut().dialog_mut() {
        dialog.clear_pending();
        app.status_message = "Cleared all pending countries".to_string();
    }
}

fn toggle_current(app: &mut App) {
    let Some(row) = app.selector_rows().into_iter().nth(app.selector_index) else {
        return;
    };
    let groups = app.dashboard.groups().to_vec();
    let Some(dialog) = app.dashboard.selection_mut().dialog_mut() else {
        return;
    };

    app.status_message = match row {
        SelectorRow::Country { name, .. } => match dialog.toggle_country(&name) {
            ToggleOutcome::Added => format!("Added {name} ({}/{MAX_SELECTION})", dialog.pending_count()),
            ToggleOutcome::Removed => {
                format!("Removed {name} ({}/{MAX_SELECTION})", dialog.pending_count())
            }
            ToggleOutcome::Rejected => format!("Maximum reached ({MAX_SELECTION}/{MAX_SELECTION})"),
        },
        SelectorRow::Continent { continent, .. } => {
            let visible = dialog.visible_groups(&groups);
            let Some(group) = visible.iter().find(|group| group.continent == continent) else {
                return;
            };
            match dialog.toggle_continent(group) {
                ContinentToggle::Selected(added) if dialog.is_full() => format!(
                    "Added {added} from {} - maximum reached ({MAX_SELECTION}/{MAX_SELECTION})",
                    continent.label()
                ),
                ContinentToggle::Selected(added) => {
                    format!("Added {added} from {}", continent.label())
                }
                ContinentToggle::Deselected(removed) => {
                    format!("Removed {removed} from {}", continent.label())
                }
            }
        }
    };
}

fn set_current_expanded(app: &mut App, expanded: bool) {
    let rows = app.selector_rows();
    let Some(continent) = rows.get(app.selector_index).map(SelectorRow::continent) else {
        return;
    };
    if let Some(dialog) = app.dashboard.selection_mut().dialog_mut() {
        dialog.set_expanded(continent, expanded);
    }

    // Keep the cursor on the continent header once its rows fold away
    if !expanded {
        let header = app.selector_rows().iter().position(
            |row| matches!(row, SelectorRow::Continent { continent: c, .. } if *c == continent),
        );
        app.selector_index = header.unwrap_or(0);
    }
    app.clamp_selector_index();
}

fn current_query(app: &App) -> String {
    app.dashboard
        .selection()
        .dialog()
        .map(|dialog| dialog.search_query().to_string())
        .unwrap_or_default()
}

fn set_query(app: &mut App, query: String) {
    let groups = app.dashboard.groups().to_vec();
    if let Some(dialog) = app.dashboard.selection_mut().dialog_mut() {
        dialog.set_query(query, &groups);
    }
    app.selector_index = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppScreen;
    use canon_core::{Continent, CountryRecord, CountryStore};
    use canon_tui::Settings;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn open_app() -> App {
        let store = CountryStore::from_records([
            CountryRecord::new("France", Continent::Europe, 980),
            CountryRecord::new("Italy", Continent::Europe, 500),
            CountryRecord::new("Japan", Continent::Asia, 512),
        ]);
        let mut app = App::new(&Settings::default());
        app.dashboard.load_finished(Ok(store));
        app.open_selector();
        app
    }

    fn pending(app: &App) -> usize {
        app.dashboard
            .selection()
            .dialog()
            .map_or(0, canon_core::SelectorDialog::pending_count)
    }

    #[test]
    fn space_on_a_continent_toggles_its_members() {
        let mut app = open_app();
        assert_eq!(pending(&app), 3);
        handle_selector_input(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(pending(&app), 1);
        assert_eq!(app.status_message, "Removed 2 from Europe");
    }

    #[test]
    fn clear_then_apply_is_rejected_and_keeps_the_dialog() {
        let mut app = open_app();
        handle_selector_input(&mut app, ctrl('x'));
        handle_selector_input(&mut app, ctrl('a'));
        assert!(app.status_message.starts_with("Error"));
        assert_eq!(app.screen, AppScreen::Selector);
        assert_eq!(app.dashboard.selection().committed().len(), 3);
    }

    #[test]
    fn apply_commits_the_pending_edit() {
        let mut app = open_app();
        handle_selector_input(&mut app, key(KeyCode::Down));
        handle_selector_input(&mut app, key(KeyCode::Char(' ')));
        handle_selector_input(&mut app, ctrl('a'));
        assert_eq!(app.screen, AppScreen::Dashboard);
        assert!(!app.dashboard.selection().is_committed("France"));
        assert_eq!(app.dashboard.chart_rows().len(), 2);
    }

    #[test]
    fn escape_discards_the_edit() {
        let mut app = open_app();
        handle_selector_input(&mut app, ctrl('x'));
        handle_selector_input(&mut app, key(KeyCode::Esc));
        assert_eq!(app.screen, AppScreen::Dashboard);
        assert!(!app.dashboard.selection().is_open());
        assert_eq!(app.dashboard.selection().committed().len(), 3);
    }

    #[test]
    fn typing_filters_the_tree() {
        let mut app = open_app();
        for ch in "jap".chars() {
            handle_selector_input(&mut app, key(KeyCode::Char(ch)));
        }
        let rows = app.selector_rows();
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[1], SelectorRow::Country { ref name, .. } if name == "Japan"));

        handle_selector_input(&mut app, key(KeyCode::Backspace));
        assert_eq!(current_query(&app), "ja");
    }

    #[test]
    fn left_collapses_and_parks_on_the_header() {
        let mut app = open_app();
        handle_selector_input(&mut app, key(KeyCode::Down));
        handle_selector_input(&mut app, key(KeyCode::Left));
        assert_eq!(app.selector_index, 0);
        assert_eq!(app.selector_rows().len(), 3);
    }
}

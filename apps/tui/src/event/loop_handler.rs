use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;

use crate::app::{handle_input, App};
use crate::ui;
use canon_core::CountryStore;
use canon_tui::{try_finish, LoadError};

// States of the background dataset load
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug)]
enum LoadEvent {
    Start,
    Finished(Result<CountryStore, LoadError>),
}

impl LoadEvent {
    const fn name(&self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Finished(Ok(_)) => "Finished(Ok)",
            Self::Finished(Err(_)) => "Finished(Err)",
        }
    }
}

#[derive(Debug)]
struct StateTransitionError {
    from: LoadState,
    event: &'static str,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

struct LoadMachine {
    state: LoadState,
}

impl LoadMachine {
    const fn new(initial_state: LoadState) -> Self {
        Self {
            state: initial_state,
        }
    }

    const fn state(&self) -> LoadState {
        self.state
    }

    fn process_event(
        &mut self,
        event: LoadEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        tracing::debug!(from = %self.state, to = %next_state.0, "load state changed");
        self.state = next_state.0;
        Ok(())
    }
}

struct NextState(LoadState);

impl TryFrom<(LoadState, LoadEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (LoadState, LoadEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        match (current_state, event) {
            (LoadState::Idle | LoadState::Ready | LoadState::Failed, LoadEvent::Start) => {
                app.status_message = "Loading country data...".to_string();
                Ok(Self(LoadState::Loading))
            }
            (LoadState::Loading, LoadEvent::Finished(Ok(store))) => {
                let countries = store.len();
                let warnings = store.warnings().len();
                app.dashboard.load_finished(Ok(store));
                app.clamp_chart_index();
                app.status_message = if warnings == 0 {
                    format!("Loaded {countries} countries")
                } else {
                    format!("Loaded {countries} countries ({warnings} data warnings, see log)")
                };
                Ok(Self(LoadState::Ready))
            }
            (LoadState::Loading, LoadEvent::Finished(Err(error))) => {
                app.status_message = format!("Error: {error}");
                match error {
                    LoadError::Dataset(error) => app.dashboard.load_finished(Err(error)),
                    other @ LoadError::Interrupted => app.dashboard.load_failed(other),
                }
                app.clamp_chart_index();
                Ok(Self(LoadState::Failed))
            }
            (from, event) => Err(StateTransitionError {
                from,
                event: event.name(),
            }),
        }
    }
}

/// Moves a requested or finished load through the state machine
fn drive_load(machine: &mut LoadMachine, app: &mut App) {
    if app.pending_load.is_some() && machine.state() != LoadState::Loading {
        if let Err(error) = machine.process_event(LoadEvent::Start, app) {
            tracing::warn!(%error, "load not started");
        }
    }

    let finished = app.pending_load.as_mut().and_then(try_finish);
    if let Some(result) = finished {
        app.pending_load = None;
        if let Err(error) = machine.process_event(LoadEvent::Finished(result), app) {
            tracing::warn!(%error, "load result ignored");
        }
    }
}

/// Run the main application event loop
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut load_machine = LoadMachine::new(LoadState::Idle);

    while app.running {
        drive_load(&mut load_machine, app);
        app.on_tick();

        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| color_eyre::eyre::eyre!("Terminal draw error: {e}"))?;

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key);
                }
                Ok(Event::Resize(_, _)) => {
                    // Next iteration redraws at the new size
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "failed to read terminal event"),
            }
        }

        // Let the loader task make progress between frames
        tokio::task::yield_now().await;
    }

    tracing::info!("event loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canon_core::{Continent, CountryRecord, DatasetError};
    use canon_tui::Settings;

    fn store() -> CountryStore {
        CountryStore::from_records([CountryRecord::new("France", Continent::Europe, 980)])
    }

    #[test]
    fn successful_load_reaches_ready() {
        let mut app = App::new(&Settings::default());
        let mut machine = LoadMachine::new(LoadState::Idle);

        assert!(machine.process_event(LoadEvent::Start, &mut app).is_ok());
        assert_eq!(machine.state(), LoadState::Loading);
        assert!(machine
            .process_event(LoadEvent::Finished(Ok(store())), &mut app)
            .is_ok());
        assert_eq!(machine.state(), LoadState::Ready);
        assert_eq!(app.status_message, "Loaded 1 countries");
        assert_eq!(app.dashboard.chart_rows().len(), 1);
    }

    #[test]
    fn failed_load_marks_the_dashboard_unavailable() {
        let mut app = App::new(&Settings::default());
        let mut machine = LoadMachine::new(LoadState::Loading);
        let error = LoadError::Dataset(DatasetError::UnknownPollYear {
            country: "France".to_string(),
            year: "1999".to_string(),
        });

        assert!(machine
            .process_event(LoadEvent::Finished(Err(error)), &mut app)
            .is_ok());
        assert_eq!(machine.state(), LoadState::Failed);
        assert!(app.status_message.starts_with("Error"));
        assert!(app.dashboard.unavailable_reason().is_some());
    }

    #[tokio::test]
    async fn failed_reload_keeps_the_chart() {
        let mut app = App::new(&Settings::default());
        app.dashboard.load_finished(Ok(store()));
        let mut machine = LoadMachine::new(LoadState::Ready);

        app.request_load();
        drive_load(&mut machine, &mut app);
        assert_eq!(machine.state(), LoadState::Loading);
        assert_eq!(app.dashboard.chart_rows().len(), 1);

        app.pending_load = None;
        let error = LoadError::Dataset(DatasetError::UnknownPollYear {
            country: "France".to_string(),
            year: "1999".to_string(),
        });
        assert!(machine
            .process_event(LoadEvent::Finished(Err(error)), &mut app)
            .is_ok());
        assert!(app.status_message.starts_with("Error"));
        assert!(app.dashboard.unavailable_reason().is_none());
        assert_eq!(app.dashboard.chart_rows().len(), 1);
    }

    #[test]
    fn result_without_a_load_is_rejected() {
        let mut app = App::new(&Settings::default());
        let mut machine = LoadMachine::new(LoadState::Idle);
        let result = machine.process_event(LoadEvent::Finished(Ok(store())), &mut app);
        assert!(result.is_err());
        assert_eq!(machine.state(), LoadState::Idle);
    }
}

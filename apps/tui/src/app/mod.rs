// App module for canon-tui
// Handles application state and key handling

pub mod input;
pub mod selector;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen, Focus};

mod settings;

pub use settings::{init_settings, Settings, DEFAULT_DATA_PATH, DEFAULT_LOG_FILE};

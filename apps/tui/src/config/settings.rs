use canon_core::{Filters, PollSelector, RankRange, DEFAULT_TOP_N};
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_PATH: &str = "public/data/countries.json";
pub const DEFAULT_LOG_FILE: &str = "canon-atlas.log";

/// Runtime configuration, resolved from `.env`, the process environment and
/// any CLI overrides already written back into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub log_file: PathBuf,
    pub filters: Filters,
    pub top_n: usize,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            filters: Filters::default(),
            top_n: DEFAULT_TOP_N,
            debug: false,
        }
    }
}

impl Settings {
    /// Builds settings from any key lookup. Missing or unparsable values keep
    /// their defaults; unknown poll and rank values resolve to "all".
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_path = lookup("CANON_DATA_PATH").map_or(defaults.data_path, PathBuf::from);
        let log_file = lookup("CANON_LOG_FILE").map_or(defaults.log_file, PathBuf::from);

        let poll = lookup("CANON_DEFAULT_POLL")
            .map_or(defaults.filters.poll, |value| PollSelector::parse(&value));
        let rank = lookup("CANON_DEFAULT_RANK")
            .map_or(defaults.filters.rank, |value| RankRange::parse(&value));

        let top_n = lookup("CANON_TOP_N")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.top_n);

        let debug = lookup("DEBUG").is_some_and(|value| matches!(value.trim(), "1" | "true"));

        Self {
            data_path,
            log_file,
            filters: Filters::new(poll, rank),
            top_n,
            debug,
        }
    }

    /// Anchors relative paths at `base`
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.data_path.is_relative() {
            self.data_path = base.join(&self.data_path);
        }
        if self.log_file.is_relative() {
            self.log_file = base.join(&self.log_file);
        }
        self
    }
}

/// Initializes the application configuration
pub fn init_settings() -> color_eyre::eyre::Result<Settings> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_dir = env::current_dir()?;
    Ok(Settings::from_lookup(|key| env::var(key).ok()).relative_to(&base_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use canon_core::PollYear;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        assert_eq!(Settings::from_lookup(|_| None), Settings::default());
    }

    #[test]
    fn environment_values_are_applied() {
        let settings = Settings::from_lookup(lookup(&[
            ("CANON_DATA_PATH", "/srv/canon/countries.json"),
            ("CANON_DEFAULT_POLL", "2012"),
            ("CANON_DEFAULT_RANK", "top250"),
            ("CANON_TOP_N", "25"),
            ("DEBUG", "1"),
        ]));

        assert_eq!(settings.data_path, PathBuf::from("/srv/canon/countries.json"));
        assert_eq!(settings.filters.poll, PollSelector::Year(PollYear::Y2012));
        assert_eq!(settings.filters.rank, RankRange::Top250);
        assert_eq!(settings.top_n, 25);
        assert!(settings.debug);
    }

    #[test]
    fn bad_values_fall_back() {
        let settings = Settings::from_lookup(lookup(&[
            ("CANON_DEFAULT_POLL", "1999"),
            ("CANON_DEFAULT_RANK", "top42"),
            ("CANON_TOP_N", "zero"),
        ]));
        assert_eq!(settings.filters, Filters::default());
        assert_eq!(settings.top_n, DEFAULT_TOP_N);

        let zero = Settings::from_lookup(lookup(&[("CANON_TOP_N", "0")]));
        assert_eq!(zero.top_n, DEFAULT_TOP_N);
    }

    #[test]
    fn relative_paths_are_anchored() {
        let settings = Settings::default().relative_to(Path::new("/work"));
        assert_eq!(
            settings.data_path,
            PathBuf::from("/work/public/data/countries.json")
        );
        assert_eq!(settings.log_file, PathBuf::from("/work/canon-atlas.log"));

        let absolute = Settings::from_lookup(lookup(&[("CANON_DATA_PATH", "/data/c.json")]))
            .relative_to(Path::new("/work"));
        assert_eq!(absolute.data_path, PathBuf::from("/data/c.json"));
    }
}

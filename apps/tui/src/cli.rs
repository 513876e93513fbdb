use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "canon-tui",
    version,
    about = "Films by country of origin in the Sight & Sound polls"
)]
pub struct CliArgs {
    /// Print the report and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Path to countries.json
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Initial poll: 2022 ... 1952, or "all"
    #[arg(long, value_name = "YEAR")]
    pub poll: Option<String>,

    /// Initial rank range: all, top100, top250, top500, top1000
    #[arg(long, value_name = "RANGE")]
    pub rank: Option<String>,

    /// Countries shown before any selection is made
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Log file for interactive runs
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    /// Writes flags back into the environment so `.env`, env vars and flags
    /// resolve through one path. Flags win.
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.data {
            std::env::set_var("CANON_DATA_PATH", path);
        }
        if let Some(poll) = &self.poll {
            std::env::set_var("CANON_DEFAULT_POLL", poll);
        }
        if let Some(rank) = &self.rank {
            std::env::set_var("CANON_DEFAULT_RANK", rank);
        }
        if let Some(top) = self.top {
            std::env::set_var("CANON_TOP_N", top.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("CANON_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_flag() {
        let args = CliArgs::try_parse_from([
            "canon-tui",
            "--headless",
            "--json",
            "--data",
            "feed.json",
            "--poll",
            "2012",
            "--rank",
            "top250",
            "--top",
            "15",
        ]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert!(args.headless && args.json);
            assert_eq!(args.data, Some(PathBuf::from("feed.json")));
            assert_eq!(args.poll.as_deref(), Some("2012"));
            assert_eq!(args.top, Some(15));
        }
    }

    #[test]
    fn help_mentions_the_data_flag() {
        assert!(CliArgs::help_text().contains("--data"));
    }
}

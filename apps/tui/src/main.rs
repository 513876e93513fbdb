mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let settings = canon_tui::config::init_settings()?;

    // Headless when asked, or when stdout is not a terminal
    if args.headless || !is_terminal() {
        logging::init_stderr_logging(settings.debug)?;
        tracing::debug!(?settings, "running headless");
        return event::run_headless(&settings, args.json).await;
    }

    logging::init_file_logging(&settings.log_file, settings.debug)?;
    tracing::info!(data = %settings.data_path.display(), "starting dashboard");

    let mut app = App::new(&settings);
    app.request_load();

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup_terminal_state(true, true);

    if let Err(error) = &result {
        tracing::error!(%error, "dashboard exited with an error");
    }
    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

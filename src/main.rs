use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};
use tripplan::app::{App, Tui};
use tripplan::config::PlannerConfig;
use tripplan::error::user_friendly_message;
use tripplan::models::TravelMood;
use tripplan::{logging, PlannerError, Result};

/// Terminal travel-planning wizard
#[derive(Debug, Parser)]
#[command(name = "tripplan", version, about)]
struct Cli {
    /// Config file to use instead of the standard location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// How long the analysis screen stays up, e.g. "3s" or "800ms"
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    analysis_delay: Option<Duration>,

    /// Append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    /// List destinations of this mood first (beach or city)
    #[arg(long, value_name = "MOOD")]
    mood: Option<TravelMood>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::load_from(path)?,
            None => PlannerConfig::load()?,
        };
        if let Some(delay) = self.analysis_delay {
            config = config.with_analysis_delay(delay);
        }
        if let Some(path) = &self.log_file {
            config = config.with_log_file(path.clone());
        }
        if self.dark {
            config = config.with_dark_mode(true);
        }
        if let Some(mood) = self.mood {
            config = config.with_preferred_mood(mood);
        }
        config.validate()?;
        Ok(config)
    }

    /// Keep display preferences changed on the Home screen for next time
    fn save_preferences(&self, started: &PlannerConfig, finished: &PlannerConfig) {
        if started.dark_mode == finished.dark_mode
            && started.preferred_mood == finished.preferred_mood
        {
            return;
        }
        let saved = match &self.config {
            Some(path) => finished.save_preferences_to(path),
            None => finished.save_preferences(),
        };
        match saved {
            Ok(true) => info!("display preferences saved"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "could not save display preferences"),
        }
    }
}

/// Run the wizard and hand back the config it finished with
async fn run(config: PlannerConfig) -> Result<PlannerConfig> {
    let mut tui = Tui::new(config.tick_rate)?;
    tui.init()?;
    if !tui.is_size_adequate()? {
        tui.restore()?;
        return Err(PlannerError::Tui(
            "terminal too small, at least 80x24 is required".to_string(),
        ));
    }

    let mut app = App::new(config);
    let outcome = app.run(&mut tui).await;
    tui.restore()?;
    outcome.map(|()| app.config().clone())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", user_friendly_message(&e));
            return ExitCode::FAILURE;
        }
    };

    if cli.print_config {
        return match toml::to_string_pretty(&config) {
            Ok(text) => {
                print!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", user_friendly_message(&PlannerError::from(e)));
                ExitCode::FAILURE
            }
        };
    }

    let log_path = match config.resolved_log_file() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{}", user_friendly_message(&e));
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init_file_logging(&log_path) {
        eprintln!("{}", user_friendly_message(&e));
        return ExitCode::FAILURE;
    }
    info!(log = %log_path.display(), delay = ?config.analysis_delay, "tripplan starting");

    match run(config.clone()).await {
        Ok(finished) => {
            cli.save_preferences(&config, &finished);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "tripplan failed");
            eprintln!("{}", user_friendly_message(&e));
            ExitCode::FAILURE
        }
    }
}

mod answer;
mod app;
mod calendar;
mod config;
mod console;
mod quiz;
mod record;
mod ui;

use calendar::DateSampler;
use clap::Parser;
use config::{Cli, UserConfig};
use console::ConsolePresenter;
use log::{error, info, warn};
use quiz::{Quiz, QuizOutcome};
use rand::thread_rng;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::error::Error;
use std::fs::{self, File};
use std::process::ExitCode;
use ui::DialogPresenter;

fn init_logging() {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let log_file = dirs::data_local_dir()
        .map(|dir| dir.join("weekday_quiz"))
        .and_then(|dir| fs::create_dir_all(&dir).ok().map(|_| dir.join("weekday_quiz.log")))
        .and_then(|path| File::options().create(true).append(true).open(path).ok());
    if let Some(file) = log_file {
        loggers.push(WriteLogger::new(LevelFilter::Info, Config::default(), file));
    }

    // Diagnostics are optional; the quiz runs without them
    let _ = CombinedLogger::init(loggers);
}

fn run(cli: &Cli) -> Result<QuizOutcome, Box<dyn Error>> {
    let mut config = UserConfig::load();
    config.apply(cli);
    if cli.save_config {
        if let Err(e) = config.save() {
            warn!("could not save settings: {}", e);
        }
    }

    let mut quiz = Quiz::new(DateSampler::new(thread_rng()), config.target_correct);
    if let Some(log) = config.attempt_log() {
        info!("logging attempts to {}", log.path().display());
        quiz = quiz.with_recorder(log);
    }

    if config.use_console {
        quiz.run(&mut ConsolePresenter::stdio())
    } else {
        quiz.run(&mut DialogPresenter)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(outcome) => {
            info!(
                "finished in state {:?}, score {} / {} over {} attempts",
                outcome.state, outcome.score, outcome.target_correct, outcome.attempts
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

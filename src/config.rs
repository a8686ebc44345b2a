use crate::record::AttemptLog;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "userconfig.cfg";

/// name the weekday of random dates from the last hundred years
#[derive(Parser, Debug, Clone, Default)]
#[clap(version, about)]
pub struct Cli {
    /// number of correct answers that ends the quiz
    #[clap(short = 't', long)]
    pub target: Option<u32>,

    /// do not append attempts to the CSV log
    #[clap(long)]
    pub no_log: bool,

    /// write the attempt log here instead of next to the executable
    #[clap(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// ask in the terminal instead of opening dialog windows
    #[clap(long)]
    pub console: bool,

    /// remember these settings for later runs
    #[clap(long)]
    pub save_config: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub target_correct: u32,
    pub log_attempts: bool,
    pub log_file: Option<PathBuf>,
    pub use_console: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            target_correct: 3,
            log_attempts: true,
            log_file: None,
            use_console: false,
        }
    }
}

impl UserConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("weekday_quiz").join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Command-line flags win over stored values.
    pub fn apply(&mut self, cli: &Cli) {
        if let Some(target) = cli.target {
            self.target_correct = target;
        }
        if cli.no_log {
            self.log_attempts = false;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = Some(path.clone());
        }
        if cli.console {
            self.use_console = true;
        }
        self.target_correct = self.target_correct.max(1);
    }

    pub fn attempt_log(&self) -> Option<AttemptLog> {
        if !self.log_attempts {
            return None;
        }
        Some(match &self.log_file {
            Some(path) => AttemptLog::new(path),
            None => AttemptLog::beside_executable(),
        })
    }
}

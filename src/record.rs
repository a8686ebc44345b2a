use chrono::{DateTime, Local, NaiveDate};
use csv::WriterBuilder;
use serde::{Serialize, Serializer};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub const LOG_FILE_NAME: &str = "weekday_quiz_attempts.csv";

/// One row of the attempt log. Field order is the column order.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    pub started_at: DateTime<Local>,
    pub question: String,
    #[serde(serialize_with = "three_decimals")]
    pub duration_seconds: f64,
    pub date_iso: NaiveDate,
    pub expected_weekday: &'static str,
    pub answer: String,
    pub is_correct: bool,
}

fn three_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.3}", value))
}

/// Append-only CSV log of attempts.
#[derive(Debug, Clone)]
pub struct AttemptLog {
    path: PathBuf,
}

impl AttemptLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `weekday_quiz_attempts.csv` next to the running executable, or in the
    /// working directory when the executable path is unavailable.
    pub fn beside_executable() -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(LOG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &AttemptRecord) -> Result<(), csv::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let needs_header = needs_header(&self.path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

/// Header only goes into a missing or empty file. Any other metadata failure
/// is returned so an existing log never gains a second header.
fn needs_header(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len() == 0),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e),
    }
}

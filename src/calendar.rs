use chrono::{Datelike, Days, Local, NaiveDate};
use rand::Rng;

/// Roughly one hundred years, counted in days so leap days never need special handling.
pub const WINDOW_DAYS: u64 = 36525;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weekday {
    /// 0 = Sunday .. 6 = Saturday
    pub index: usize,
    pub name: &'static str,
}

pub fn resolve_weekday(date: NaiveDate) -> Weekday {
    let index = date.weekday().num_days_from_sunday() as usize;
    Weekday {
        index,
        name: WEEKDAY_NAMES[index],
    }
}

/// Anything that can hand the quiz its next question date.
pub trait DateSource {
    fn next_date(&mut self) -> NaiveDate;
}

pub struct DateSampler<R> {
    rng: R,
    window_days: u64,
}

impl<R: Rng> DateSampler<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            window_days: WINDOW_DAYS,
        }
    }

    /// Uniform pick from `[today - window_days, today]`, both ends included.
    pub fn sample_from(&mut self, today: NaiveDate) -> NaiveDate {
        let offset = self.rng.gen_range(0..=self.window_days);
        today - Days::new(offset)
    }
}

impl<R: Rng> DateSource for DateSampler<R> {
    fn next_date(&mut self) -> NaiveDate {
        self.sample_from(Local::now().date_naive())
    }
}

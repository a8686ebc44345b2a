use crate::answer::{answer_to_index, normalize_answer};
use crate::calendar::{resolve_weekday, DateSource};
use crate::record::{AttemptLog, AttemptRecord};
use crate::ui::{NoticeLevel, Presenter, Prompt};
use chrono::Local;
use log::{debug, info, warn};
use std::error::Error;
use std::time::Instant;

pub const PROMPT_TITLE: &str = "Date → Weekday";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    AwaitingAnswer,
    Scoring,
    Continue,
    Finished,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub state: QuizState,
    pub score: u32,
    pub target_correct: u32,
    pub attempts: u32,
}

/// A single play session. The score only grows and stops at `target_correct`.
pub struct Quiz<D> {
    dates: D,
    recorder: Option<AttemptLog>,
    target_correct: u32,
    score: u32,
    attempts: u32,
    state: QuizState,
}

impl<D: DateSource> Quiz<D> {
    pub fn new(dates: D, target_correct: u32) -> Self {
        Self {
            dates,
            recorder: None,
            target_correct: target_correct.max(1),
            score: 0,
            attempts: 0,
            state: QuizState::AwaitingAnswer,
        }
    }

    pub fn with_recorder(mut self, recorder: AttemptLog) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn outcome(&self) -> QuizOutcome {
        QuizOutcome {
            state: self.state,
            score: self.score,
            target_correct: self.target_correct,
            attempts: self.attempts,
        }
    }

    /// Plays rounds until the target is reached or the player cancels.
    pub fn run(&mut self, presenter: &mut dyn Presenter) -> Result<QuizOutcome, Box<dyn Error>> {
        info!("quiz started, target {} correct", self.target_correct);

        loop {
            match self.play_round(presenter)? {
                QuizState::Finished => {
                    presenter.notify(
                        NoticeLevel::Info,
                        "All Done",
                        &format!("All done — {0}/{0}!", self.target_correct),
                    );
                    break;
                }
                QuizState::Cancelled => break,
                _ => {}
            }
        }

        info!(
            "quiz ended {:?} with {} / {} after {} attempts",
            self.state, self.score, self.target_correct, self.attempts
        );
        Ok(self.outcome())
    }

    fn play_round(&mut self, presenter: &mut dyn Presenter) -> Result<QuizState, Box<dyn Error>> {
        let date = self.dates.next_date();
        let expected = resolve_weekday(date);
        let prompt = Prompt::for_date(PROMPT_TITLE, date);
        let started_at = Local::now();
        let timer = Instant::now();

        self.state = QuizState::AwaitingAnswer;
        let raw = loop {
            match presenter.ask(&prompt)? {
                None => {
                    self.state = QuizState::Cancelled;
                    presenter.notify(
                        NoticeLevel::Info,
                        "Quit",
                        &format!(
                            "Quiz cancelled. Final score: {} / {}",
                            self.score, self.target_correct
                        ),
                    );
                    return Ok(self.state);
                }
                Some(text) if normalize_answer(&text).is_empty() => {
                    presenter.notify(
                        NoticeLevel::Info,
                        "Answer Required",
                        "Please enter a weekday (e.g., Mon or Monday).",
                    );
                }
                Some(text) => break text,
            }
        };

        self.state = QuizState::Scoring;
        let duration_seconds = timer.elapsed().as_secs_f64();
        let is_correct = answer_to_index(&raw) == Some(expected.index);
        self.attempts += 1;
        if is_correct {
            self.score += 1;
        }
        debug!(
            "attempt {}: {} answered {:?}, expected {}, correct={}",
            self.attempts, date, raw, expected.name, is_correct
        );

        self.record(AttemptRecord {
            started_at,
            question: prompt.question,
            duration_seconds,
            date_iso: date,
            expected_weekday: expected.name,
            answer: raw.clone(),
            is_correct,
        });

        if is_correct {
            presenter.notify(
                NoticeLevel::Info,
                "Correct",
                &format!(
                    "Correct! {} / {}\n{} → {}",
                    self.score, self.target_correct, date, expected.name
                ),
            );
        } else {
            presenter.notify(
                NoticeLevel::Warning,
                "Incorrect",
                &format!(
                    "You answered: {}\nFor {}, correct is: {}. Score: {} / {}",
                    raw, date, expected.name, self.score, self.target_correct
                ),
            );
        }

        self.state = if self.score >= self.target_correct {
            QuizState::Finished
        } else {
            QuizState::Continue
        };
        Ok(self.state)
    }

    fn record(&self, record: AttemptRecord) {
        let Some(log) = &self.recorder else {
            return;
        };
        // Logging never interrupts play
        if let Err(e) = log.append(&record) {
            warn!("could not append to {}: {}", log.path().display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::HINT;
    use chrono::NaiveDate;
    use std::collections::VecDeque;
    use std::fs;
    use tempfile::tempdir;

    struct FixedDates {
        dates: Vec<NaiveDate>,
        next: usize,
    }

    impl FixedDates {
        fn new(dates: &[(i32, u32, u32)]) -> Self {
            Self {
                dates: dates
                    .iter()
                    .map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
                    .collect(),
                next: 0,
            }
        }
    }

    impl DateSource for FixedDates {
        fn next_date(&mut self) -> NaiveDate {
            let date = self.dates[self.next % self.dates.len()];
            self.next += 1;
            date
        }
    }

    /// Replays canned answers; an exhausted script behaves like a cancel.
    #[derive(Default)]
    struct ScriptedPresenter {
        answers: VecDeque<Option<String>>,
        questions: Vec<String>,
        notices: Vec<(NoticeLevel, String, String)>,
    }

    impl ScriptedPresenter {
        fn new(answers: &[Option<&str>]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
                ..Default::default()
            }
        }

        fn titles(&self) -> Vec<&str> {
            self.notices.iter().map(|(_, title, _)| title.as_str()).collect()
        }
    }

    impl Presenter for ScriptedPresenter {
        fn ask(&mut self, prompt: &Prompt) -> Result<Option<String>, Box<dyn Error>> {
            assert_eq!(prompt.title, PROMPT_TITLE);
            assert_eq!(prompt.hint, HINT);
            self.questions.push(prompt.question.clone());
            Ok(self.answers.pop_front().flatten())
        }

        fn notify(&mut self, level: NoticeLevel, title: &str, message: &str) {
            self.notices.push((level, title.to_string(), message.to_string()));
        }
    }

    // Monday, Tuesday, Sunday
    const DATES: &[(i32, u32, u32)] = &[(2024, 1, 1), (2000, 2, 29), (1969, 7, 20)];

    #[test]
    fn three_correct_answers_finish() {
        let mut quiz = Quiz::new(FixedDates::new(DATES), 3);
        let mut presenter = ScriptedPresenter::new(&[Some("Mon"), Some("Tues."), Some("sunday")]);

        let outcome = quiz.run(&mut presenter).unwrap();

        assert_eq!(outcome.state, QuizState::Finished);
        assert_eq!(outcome.score, 3);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(presenter.titles(), ["Correct", "Correct", "Correct", "All Done"]);
        assert_eq!(presenter.notices[3].2, "All done — 3/3!");
        assert_eq!(presenter.questions[0], "What day of the week is 2024-01-01?");
        assert_eq!(presenter.notices[0].2, "Correct! 1 / 3\n2024-01-01 → Monday");
    }

    #[test]
    fn cancel_on_first_prompt() {
        let mut quiz = Quiz::new(FixedDates::new(DATES), 3);
        let mut presenter = ScriptedPresenter::new(&[None]);

        let outcome = quiz.run(&mut presenter).unwrap();

        assert_eq!(outcome.state, QuizState::Cancelled);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.attempts, 0);
        assert_eq!(presenter.titles(), ["Quit"]);
        assert!(presenter.notices[0].2.ends_with("0 / 3"), "{}", presenter.notices[0].2);
    }

    #[test]
    fn blank_answers_reprompt_same_date() {
        let mut quiz = Quiz::new(FixedDates::new(DATES), 1);
        let mut presenter = ScriptedPresenter::new(&[Some(""), Some("   "), Some("m")]);

        let outcome = quiz.run(&mut presenter).unwrap();

        assert_eq!(outcome.state, QuizState::Finished);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(presenter.questions.len(), 3);
        assert!(presenter.questions.iter().all(|q| q.contains("2024-01-01")));
        assert_eq!(
            presenter.titles(),
            ["Answer Required", "Answer Required", "Correct", "All Done"]
        );
    }

    #[test]
    fn unrecognized_answer_counts_as_incorrect() {
        let mut quiz = Quiz::new(FixedDates::new(DATES), 3);
        let mut presenter = ScriptedPresenter::new(&[Some("xyz"), None]);

        let outcome = quiz.run(&mut presenter).unwrap();

        assert_eq!(outcome.state, QuizState::Cancelled);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.score, 0);
        let (level, title, message) = &presenter.notices[0];
        assert_eq!(*level, NoticeLevel::Warning);
        assert_eq!(title, "Incorrect");
        assert!(message.starts_with("You answered: xyz\nFor 2024-01-01, correct is: Monday."));
    }

    #[test]
    fn score_only_grows_and_stops_at_target() {
        let mut quiz = Quiz::new(FixedDates::new(DATES), 2);
        // Mon ok, Tue wrong, Sun wrong, Mon ok -> finished; trailing answers unused
        let mut presenter = ScriptedPresenter::new(&[
            Some("monday"),
            Some("wed"),
            Some("sat"),
            Some("MON"),
            Some("tue"),
            Some("sun"),
        ]);

        let outcome = quiz.run(&mut presenter).unwrap();

        assert_eq!(outcome.state, QuizState::Finished);
        assert_eq!(outcome.score, 2);
        assert_eq!(outcome.attempts, 4);
        assert_eq!(presenter.answers.len(), 2);

        let scores: Vec<u32> = presenter
            .notices
            .iter()
            .filter_map(|(_, _, message)| message.split(" / ").next())
            .filter_map(|head| head.rsplit(' ').next()?.parse().ok())
            .collect();
        assert_eq!(scores, [1, 1, 1, 2]);
    }

    #[test]
    fn attempts_are_logged_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attempts.csv");
        let mut quiz = Quiz::new(FixedDates::new(DATES), 3).with_recorder(AttemptLog::new(&path));
        let mut presenter = ScriptedPresenter::new(&[Some("Mon"), Some(" "), Some("Fri"), None]);

        let outcome = quiz.run(&mut presenter).unwrap();
        assert_eq!(outcome.state, QuizState::Cancelled);
        assert_eq!(outcome.score, 1);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "What day of the week is 2024-01-01?");
        assert_eq!(&rows[0][3], "2024-01-01");
        assert_eq!(&rows[0][4], "Monday");
        assert_eq!(&rows[0][5], "Mon");
        assert_eq!(&rows[0][6], "true");
        assert_eq!(&rows[1][4], "Tuesday");
        assert_eq!(&rows[1][5], "Fri");
        assert_eq!(&rows[1][6], "false");
        for row in &rows {
            let duration = &row[2];
            assert_eq!(duration.split('.').nth(1).map(str::len), Some(3), "{duration}");
        }
    }

    #[test]
    fn broken_log_does_not_stop_quiz() {
        let dir = tempdir().unwrap();
        let mut quiz = Quiz::new(FixedDates::new(DATES), 1).with_recorder(AttemptLog::new(dir.path()));
        let mut presenter = ScriptedPresenter::new(&[Some("mon")]);

        let outcome = quiz.run(&mut presenter).unwrap();

        assert_eq!(outcome.state, QuizState::Finished);
        assert_eq!(presenter.titles(), ["Correct", "All Done"]);
    }

    #[test]
    fn zero_target_is_raised_to_one() {
        let outcome = Quiz::new(FixedDates::new(DATES), 0).outcome();
        assert_eq!(outcome.target_correct, 1);
        assert_eq!(outcome.state, QuizState::AwaitingAnswer);
        assert_eq!(outcome.score, 0);
    }
}

use crate::ui::{NoticeLevel, Presenter, Prompt};
use std::error::Error;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Line-based presenter for terminals. End of input counts as cancelling.
pub struct ConsolePresenter<R, W> {
    input: R,
    output: W,
}

impl ConsolePresenter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Presenter for ConsolePresenter<R, W> {
    fn ask(&mut self, prompt: &Prompt) -> Result<Option<String>, Box<dyn Error>> {
        writeln!(self.output, "== {} ==", prompt.title)?;
        writeln!(self.output, "{}", prompt.question)?;
        writeln!(self.output, "({})", prompt.hint)?;
        write!(self.output, "> ")?;
        self.output.flush()?;

        // Undecodable bytes become U+FFFD and score as an unrecognized answer
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        let text = String::from_utf8_lossy(&line);
        Ok(Some(text.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn notify(&mut self, level: NoticeLevel, title: &str, message: &str) {
        let marker = match level {
            NoticeLevel::Info => "",
            NoticeLevel::Warning => "!",
        };
        // A closed stdout must not end the quiz
        let _ = writeln!(self.output, "[{}{}] {}", marker, title, message);
        let _ = self.output.flush();
    }
}

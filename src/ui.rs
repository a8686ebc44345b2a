use crate::app::PromptApp;
use chrono::NaiveDate;
use eframe::egui;
use egui::{Color32, RichText, Ui};
use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

pub const HINT: &str = "Examples: Mon, Tue, Wed, Thu, Fri, Sat, Sun or full names";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub question: String,
    pub hint: &'static str,
}

impl Prompt {
    pub fn for_date(title: &str, date: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            question: format!("What day of the week is {}?", date),
            hint: HINT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Synchronous request/response surface the quiz talks to.
pub trait Presenter {
    /// Blocks until the player answers. `Ok(None)` means the player dismissed the prompt.
    fn ask(&mut self, prompt: &Prompt) -> Result<Option<String>, Box<dyn Error>>;

    /// Blocks until the player acknowledges the message.
    fn notify(&mut self, level: NoticeLevel, title: &str, message: &str);
}

#[derive(Debug, PartialEq, Eq)]
pub enum PromptAction {
    None,
    Submit,
    Cancel,
}

#[derive(Default)]
pub struct PromptUI {
    pub answer: String,
    focused: bool,
}

impl PromptUI {
    pub fn show_prompt(&mut self, ui: &mut Ui, prompt: &Prompt) -> PromptAction {
        let mut action = PromptAction::None;

        ui.add(egui::Label::new(prompt.question.as_str()).wrap(true));
        ui.add_space(6.0);
        ui.add(egui::Label::new(RichText::new(prompt.hint).color(Color32::from_gray(0x66))).wrap(true));
        ui.add_space(8.0);

        let response = ui.add(
            egui::TextEdit::singleline(&mut self.answer).desired_width(f32::INFINITY),
        );
        if !self.focused {
            response.request_focus();
            self.focused = true;
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.add(egui::Button::new("OK").min_size(egui::vec2(64.0, 0.0))).clicked() {
                action = PromptAction::Submit;
            }
            if ui.add(egui::Button::new("Cancel").min_size(egui::vec2(64.0, 0.0))).clicked() {
                action = PromptAction::Cancel;
            }
        });

        // Enter makes the text field give up focus, so check the key itself
        ui.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                action = PromptAction::Cancel;
            } else if i.key_pressed(egui::Key::Enter) {
                action = PromptAction::Submit;
            }
        });

        action
    }
}

/// Modal windows: an egui prompt per question and native message boxes for feedback.
#[derive(Default)]
pub struct DialogPresenter;

impl Presenter for DialogPresenter {
    fn ask(&mut self, prompt: &Prompt) -> Result<Option<String>, Box<dyn Error>> {
        let outcome = Rc::new(RefCell::new(None));
        let app_outcome = Rc::clone(&outcome);
        let app_prompt = prompt.clone();

        let options = eframe::NativeOptions {
            initial_window_size: Some(egui::vec2(420.0, 160.0)),
            resizable: false,
            always_on_top: true,
            run_and_return: true,
            ..Default::default()
        };

        eframe::run_native(
            &prompt.title,
            options,
            Box::new(move |cc| {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
                Box::new(PromptApp::new(app_prompt, app_outcome))
            }),
        )?;

        let answer = outcome.borrow_mut().take();
        Ok(answer)
    }

    fn notify(&mut self, level: NoticeLevel, title: &str, message: &str) {
        let level = match level {
            NoticeLevel::Info => rfd::MessageLevel::Info,
            NoticeLevel::Warning => rfd::MessageLevel::Warning,
        };
        // Only one button, nothing to read back
        let _ = rfd::MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

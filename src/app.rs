use crate::ui::{Prompt, PromptAction, PromptUI};
use eframe::egui;
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// One modal question window. Writes the typed answer into `outcome` and closes;
/// closing any other way leaves `outcome` empty, which reads as a cancel.
pub struct PromptApp {
    prompt: Prompt,
    ui: PromptUI,
    outcome: Rc<RefCell<Option<String>>>,
    placed: bool,
}

impl PromptApp {
    pub fn new(prompt: Prompt, outcome: Rc<RefCell<Option<String>>>) -> Self {
        Self {
            prompt,
            ui: PromptUI::default(),
            outcome,
            placed: false,
        }
    }

    /// Stores the result of `action` in `outcome`. Returns true when the window should close.
    fn settle(&mut self, action: PromptAction) -> bool {
        let answer = match action {
            PromptAction::Submit => Some(std::mem::take(&mut self.ui.answer)),
            PromptAction::Cancel => None,
            PromptAction::None => return false,
        };
        *self.outcome.borrow_mut() = answer;
        true
    }
}

/// Horizontally centred, a third of the way down the monitor.
fn place_window(frame: &mut eframe::Frame) -> Result<(), &'static str> {
    let info = frame.info();
    let monitor = info
        .window_info
        .monitor_size
        .ok_or("monitor size unknown")?;
    let size = info.window_info.size;
    let x = ((monitor.x - size.x) / 2.0).max(0.0);
    let y = ((monitor.y - size.y) / 3.0).max(0.0);
    frame.set_window_pos(egui::pos2(x, y));
    Ok(())
}

impl eframe::App for PromptApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        if !self.placed {
            self.placed = true;
            if let Err(reason) = place_window(frame) {
                debug!("prompt window left where it opened: {}", reason);
            }
        }

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| self.ui.show_prompt(ui, &self.prompt))
            .inner;

        if self.settle(action) {
            frame.close();
        }
    }
}

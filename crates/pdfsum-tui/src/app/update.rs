use super::{App, Screen};
use crate::action::Action;

impl App {
    /// Apply one action. True once the app should exit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::ForceQuit => {
                self.should_quit = true;
                return true;
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                return false;
            }
            Action::Resize(_w, h) => {
                self.visible_rows = (h as usize).saturating_sub(12).max(1);
                return false;
            }
            _ => {}
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return false;
        }

        // Alert modal blocks everything until acknowledged
        if self.session.alert.is_some() {
            if matches!(action, Action::DrillIn | Action::NavigateBack) {
                self.session.dismiss_alert();
            }
            return false;
        }

        if self.show_help {
            if matches!(action, Action::ToggleHelp | Action::NavigateBack) {
                self.show_help = false;
            }
            return false;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
                return false;
            }
            Action::ToggleHelp => {
                self.show_help = true;
                return false;
            }
            Action::Paste(text) => {
                self.handle_paste(&text);
                return false;
            }
            _ => {}
        }

        match self.screen {
            Screen::FilePicker => self.handle_file_picker_action(action),
            Screen::Main => self.handle_main_action(action),
        }
        false
    }

    fn handle_main_action(&mut self, action: Action) {
        match action {
            Action::OpenPicker => {
                if !self.session.loading {
                    self.file_picker.refresh_entries();
                    self.screen = Screen::FilePicker;
                }
            }
            Action::DrillIn | Action::Summarize => self.start_processing(),
            Action::Clear => self.clear(),
            Action::ToggleBenchmarks => self.toggle_benchmarks(),
            Action::MoveDown => {
                self.summary_scroll = self.summary_scroll.saturating_add(1);
            }
            Action::MoveUp => {
                self.summary_scroll = self.summary_scroll.saturating_sub(1);
            }
            Action::PageDown => {
                let page = self.visible_rows.max(1) as u16;
                self.summary_scroll = self.summary_scroll.saturating_add(page);
            }
            Action::PageUp => {
                let page = self.visible_rows.max(1) as u16;
                self.summary_scroll = self.summary_scroll.saturating_sub(page);
            }
            Action::GoTop => {
                self.summary_scroll = 0;
            }
            Action::GoBottom => {
                // Clamped to the last line on the next render
                self.summary_scroll = u16::MAX;
            }
            _ => {}
        }
    }
}

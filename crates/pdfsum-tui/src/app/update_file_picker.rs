use super::{App, Screen};
use crate::action::Action;

impl App {
    pub(super) fn handle_file_picker_action(&mut self, action: Action) {
        let page = self.visible_rows.max(1) as isize;
        let picker = &mut self.file_picker;
        match action {
            Action::NavigateBack => self.screen = Screen::Main,
            Action::ParentDir => picker.go_parent(),
            Action::MoveDown => picker.move_cursor(1),
            Action::MoveUp => picker.move_cursor(-1),
            Action::PageDown => picker.move_cursor(page),
            Action::PageUp => picker.move_cursor(-page),
            Action::GoTop => picker.cursor = 0,
            Action::GoBottom => picker.move_cursor(isize::MAX),
            Action::DrillIn => self.open_picker_entry(),
            _ => {}
        }
    }

    /// Enter on a directory opens it; on a PDF selects it and returns to the
    /// main screen. A rejected file keeps the picker open with the message.
    fn open_picker_entry(&mut self) {
        if self.file_picker.enter_directory() {
            return;
        }
        let Some(path) = self.file_picker.current().map(|e| e.path.clone()) else {
            return;
        };
        if self.select_path(&path) {
            self.screen = Screen::Main;
        }
    }
}

/// Everything the user can ask the app to do, after key/mouse/paste mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Ask to quit (opens the confirmation dialog, or confirms it).
    Quit,
    /// Quit immediately.
    ForceQuit,
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    GoTop,
    GoBottom,
    /// Enter: summarize on the main screen, open/select in the picker.
    DrillIn,
    /// Esc: close popups, leave the picker.
    NavigateBack,
    /// Backspace in the picker.
    ParentDir,
    OpenPicker,
    Summarize,
    Clear,
    ToggleBenchmarks,
    ToggleHelp,
    /// Bracketed paste, typically a file dragged onto the terminal.
    Paste(String),
    Tick,
    Resize(u16, u16),
    None,
}

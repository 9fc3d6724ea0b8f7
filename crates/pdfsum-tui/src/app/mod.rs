mod backend;
mod update;
mod update_file_picker;

use std::path::{Path, PathBuf};

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc;

use pdfsum_core::charts::ChartGallery;
use pdfsum_core::evaluation::EvaluationTable;
use pdfsum_core::intake::{is_pdf_path, parse_dropped_paths, select_one};
use pdfsum_core::{Session, StartError};

use crate::config_file::Settings;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Main,
    FilePicker,
}

/// Directory browser used to pick a PDF.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    pub current_dir: PathBuf,
    /// Directories first, then PDFs. Other files are not listed.
    pub entries: Vec<FileEntry>,
    pub cursor: usize,
}

#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl FilePickerState {
    pub fn new(dir: PathBuf) -> Self {
        let mut state = Self {
            current_dir: dir,
            entries: Vec::new(),
            cursor: 0,
        };
        state.refresh_entries();
        state
    }

    /// Re-read the current directory and reset the cursor.
    pub fn refresh_entries(&mut self) {
        let parent = self.current_dir.parent().map(|p| FileEntry {
            name: "..".to_string(),
            path: p.to_path_buf(),
            is_dir: true,
        });
        let listed = list_dir(&self.current_dir).unwrap_or_else(|e| {
            tracing::warn!(dir = %self.current_dir.display(), error = %e, "cannot list directory");
            Vec::new()
        });
        self.entries = parent.into_iter().chain(listed).collect();
        self.cursor = 0;
    }

    pub fn current(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    /// Move the cursor by `delta` rows, clamped to the listing.
    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.entries.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Open the directory under the cursor. False when it is a file.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_dir
        {
            self.current_dir = entry.path.clone();
            self.refresh_entries();
            return true;
        }
        false
    }

    /// Go up one level with the cursor on the directory just left.
    pub fn go_parent(&mut self) {
        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let left = std::mem::replace(&mut self.current_dir, parent);
        self.refresh_entries();
        if let Some(i) = self.entries.iter().position(|e| e.path == left) {
            self.cursor = i;
        }
    }
}

/// Visible subdirectories, then PDFs, each group sorted case-insensitively.
/// Dotfiles and non-PDF files are left out.
fn list_dir(dir: &Path) -> std::io::Result<Vec<FileEntry>> {
    let (mut dirs, mut pdfs): (Vec<FileEntry>, Vec<FileEntry>) = std::fs::read_dir(dir)?
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            let is_dir = path.is_dir();
            let keep = !name.starts_with('.') && (is_dir || is_pdf_path(&path));
            keep.then_some(FileEntry { name, path, is_dir })
        })
        .partition(|e| e.is_dir);
    dirs.sort_by_key(|e| e.name.to_lowercase());
    pdfs.sort_by_key(|e| e.name.to_lowercase());
    dirs.append(&mut pdfs);
    Ok(dirs)
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub session: Session,
    /// Mounted while the benchmark section is visible.
    pub table: Option<EvaluationTable>,
    pub charts: Option<ChartGallery>,
    /// Last mount id handed out; each appearance of the section gets a new one.
    pub(super) mount_seq: u64,
    pub api_url: String,
    pub model: String,
    pub max_length: Option<u32>,
    pub theme: Theme,
    /// Inline feedback from the last rejected selection.
    pub intake_message: Option<String>,
    pub summary_scroll: u16,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    /// Height of the summary body (set on render, used for page up/down).
    pub visible_rows: usize,
    pub file_picker: FilePickerState,
    /// Set once the backend listener is running.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(settings: &Settings, theme: Theme) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            screen: Screen::Main,
            session: Session::new(),
            table: None,
            charts: None,
            mount_seq: 0,
            api_url: settings.api_url.clone(),
            model: settings.model.clone(),
            max_length: settings.max_length,
            theme,
            intake_message: None,
            summary_scroll: 0,
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            visible_rows: 10,
            file_picker: FilePickerState::new(cwd),
            backend_cmd_tx: None,
        }
    }

    fn send(&self, cmd: BackendCommand) {
        match &self.backend_cmd_tx {
            Some(tx) => {
                if tx.send(cmd).is_err() {
                    tracing::error!("backend listener is gone");
                }
            }
            None => tracing::warn!(?cmd, "no backend attached, command dropped"),
        }
    }

    /// Select a single path as the current file. Rejections only set the
    /// inline intake message.
    pub fn select_path(&mut self, path: &Path) -> bool {
        self.select_paths(&[path.to_path_buf()])
    }

    fn select_paths(&mut self, paths: &[PathBuf]) -> bool {
        if self.session.loading {
            return false;
        }
        match select_one(paths) {
            Ok(file) => {
                tracing::info!(file = %file.name, size = file.size, "file selected");
                self.session.select_file(file);
                self.intake_message = None;
                self.summary_scroll = 0;
                self.sync_benchmarks();
                true
            }
            Err(e) => {
                tracing::info!(error = %e, "selection rejected");
                self.intake_message = Some(e.to_string());
                false
            }
        }
    }

    /// Treat pasted text as a drag-and-drop of files.
    pub(super) fn handle_paste(&mut self, text: &str) {
        let paths = parse_dropped_paths(text);
        if paths.is_empty() {
            return;
        }
        if self.select_paths(&paths) {
            self.screen = Screen::Main;
        }
    }

    pub(super) fn clear(&mut self) {
        if self.session.loading {
            return;
        }
        self.session.clear();
        self.intake_message = None;
        self.summary_scroll = 0;
        self.sync_benchmarks();
    }

    pub(super) fn start_processing(&mut self) {
        match self.session.begin_process(&self.model, self.max_length) {
            Ok(ticket) => {
                tracing::info!(file = %ticket.file.name, model = %ticket.model, "processing started");
                self.summary_scroll = 0;
                self.sync_benchmarks();
                self.send(BackendCommand::Process(ticket));
            }
            Err(StartError::NoFile) => {}
            Err(StartError::Busy) => {
                tracing::debug!("process requested while a run is in flight");
            }
        }
    }

    /// The benchmark toggle only exists once a summary is on screen.
    pub fn benchmarks_available(&self) -> bool {
        !self.session.summary.is_empty()
    }

    pub(super) fn toggle_benchmarks(&mut self) {
        if !self.benchmarks_available() {
            return;
        }
        match self.session.begin_evaluation() {
            pdfsum_core::EvaluationStart::Started(ticket) => {
                self.send(BackendCommand::Evaluate(ticket));
            }
            pdfsum_core::EvaluationStart::Hidden => self.sync_benchmarks(),
            pdfsum_core::EvaluationStart::Busy => {}
        }
    }

    /// Mount or unmount the table and charts. The section is only mounted
    /// while a summary is on screen and benchmarks are shown, so a new run
    /// unmounts it and its summary mounts it again with a fresh fetch.
    pub(super) fn sync_benchmarks(&mut self) {
        if !self.benchmarks_available() || !self.session.show_benchmarks {
            self.table = None;
            self.charts = None;
            return;
        }

        if self.table.is_none() {
            self.mount_seq += 1;
            let mount = self.mount_seq;
            self.table = Some(EvaluationTable::new(mount));
            self.send(BackendCommand::LoadEvaluationTable { mount });
        }

        let timestamp = self.session.eval_timestamp;
        if self.charts.as_ref().is_none_or(|c| c.timestamp != timestamp) {
            let gallery = ChartGallery::new(&self.api_url, timestamp);
            let urls = gallery.urls();
            self.charts = Some(gallery);
            self.send(BackendCommand::LoadCharts { timestamp, urls });
        }
    }

    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        if self.screen == Screen::FilePicker {
            crate::view::file_picker::render_in(f, self, area);
        } else {
            let chunks = Layout::vertical([
                Constraint::Length(1), // header
                Constraint::Min(8),    // body
                Constraint::Length(1), // footer
            ])
            .split(area);

            f.render_widget(Paragraph::new(self.header_line()), chunks[0]);
            self.render_body(f, chunks[1]);
            f.render_widget(
                Paragraph::new(self.footer_line()).style(self.theme.hint_bar_style()),
                chunks[2],
            );
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
        if let Some(message) = &self.session.alert {
            crate::view::dialog::render_alert(f, &self.theme, message);
        }
        if self.confirm_quit {
            crate::view::dialog::render_quit_confirm(f, &self.theme);
        }
    }

    fn render_body(&mut self, f: &mut ratatui::Frame, area: Rect) {
        let (top, bottom) = if self.benchmarks_available() {
            let height = if self.session.show_benchmarks {
                area.height / 2
            } else {
                2
            };
            let chunks =
                Layout::vertical([Constraint::Min(6), Constraint::Length(height)]).split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let columns =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(top);
        crate::view::intake::render_in(f, self, columns[0]);

        let stats_height = if self.session.stats.is_some() { 4 } else { 0 };
        let right = Layout::vertical([Constraint::Length(stats_height), Constraint::Min(3)])
            .split(columns[1]);
        if let Some(stats) = &self.session.stats {
            crate::view::stats::render_in(f, &self.theme, stats, right[0]);
        }
        crate::view::summary::render_in(f, self, right[1]);

        if let Some(bottom) = bottom {
            crate::view::benchmarks::render_in(f, self, bottom);
        }
    }

    fn header_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(" PDF Summarizer ", self.theme.title_style()),
            Span::styled(
                " Private, local document summarization powered by Ollama.",
                ratatui::style::Style::default().fg(self.theme.dim),
            ),
            Span::styled(
                format!("  model: {}", self.model),
                ratatui::style::Style::default().fg(self.theme.active),
            ),
        ])
    }

    fn footer_line(&self) -> Line<'static> {
        let mut hints = vec![" o:open"];
        if self.session.file.is_some() && !self.session.loading {
            hints.extend(["Enter:summarize", "x:clear"]);
        }
        if self.benchmarks_available() {
            hints.push("b:benchmarks");
        }
        hints.extend(["j/k:scroll", "?:help", "q:quit"]);
        Line::from(hints.join("  "))
    }
}

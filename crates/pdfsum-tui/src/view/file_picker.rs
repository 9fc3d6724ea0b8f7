use std::path::Path;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use pdfsum_core::intake::ADVISORY_MAX_BYTES;

use crate::app::{App, FileEntry};
use crate::theme::Theme;

/// Render the file picker screen into the given area.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let picker = &app.file_picker;

    let chunks = Layout::vertical([
        Constraint::Length(1), // header
        Constraint::Length(1), // current dir
        Constraint::Min(5),    // file list
        Constraint::Length(3), // current selection / message
        Constraint::Length(1), // footer
    ])
    .split(area);

    let header = Line::from(vec![
        Span::styled(" Files ", theme.title_style()),
        Span::styled(
            " > Select a PDF to summarize",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let dir_line = Line::from(vec![
        Span::styled(" \u{1F4C1} ", Style::default().fg(theme.active)),
        Span::styled(
            picker.current_dir.display().to_string(),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(dir_line), chunks[1]);

    let current_path = app.session.file.as_ref().map(|sel| sel.path.as_path());
    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|entry| entry_item(entry, current_path, theme))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(format!(" {} entries ", picker.entries.len())),
        )
        .highlight_style(theme.cursor_style());

    // ListState keeps the cursor row in view
    let mut state = ListState::default().with_selected(Some(picker.cursor));
    f.render_stateful_widget(list, chunks[2], &mut state);

    let summary_lines = if let Some(msg) = &app.intake_message {
        vec![Line::from(Span::styled(
            format!("  {msg}"),
            Style::default().fg(theme.error),
        ))]
    } else if let Some(file) = &app.session.file {
        vec![
            Line::from(Span::styled(
                "  Selected: ",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("  {} ({})", file.name, file.size_label()),
                Style::default().fg(theme.text),
            )),
        ]
    } else {
        vec![
            Line::from(Span::styled(
                "  No file selected",
                Style::default().fg(theme.dim),
            )),
            Line::from(Span::styled(
                format!(
                    "  Navigate to a PDF (max {} MB) and press Enter",
                    ADVISORY_MAX_BYTES / 1024 / 1024
                ),
                Style::default().fg(theme.dim),
            )),
        ]
    };
    let summary = Paragraph::new(summary_lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(theme.border_style()),
    );
    f.render_widget(summary, chunks[3]);

    let footer = Line::from(Span::styled(
        " j/k:navigate  Enter:open dir / select PDF  Backspace:parent  Esc:back  ?:help  q:quit",
        theme.hint_bar_style(),
    ));
    f.render_widget(Paragraph::new(footer), chunks[4]);
}

/// Directories in the accent color; PDFs with their size, the selected one
/// checked, oversized ones flagged.
fn entry_item<'a>(entry: &'a FileEntry, current: Option<&Path>, theme: &Theme) -> ListItem<'a> {
    if entry.is_dir {
        let style = Style::default().fg(theme.active);
        return ListItem::new(Line::from(vec![
            Span::styled("\u{1F4C1} ", style),
            Span::styled(entry.name.as_str(), style),
        ]));
    }

    let selected = current == Some(entry.path.as_path());
    let (icon, style) = if selected {
        (
            "\u{2713} ",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        )
    } else {
        ("\u{1F4C4} ", Style::default().fg(theme.text))
    };
    let mut spans = vec![Span::styled(icon, style), Span::styled(entry.name.as_str(), style)];
    if let Ok(meta) = std::fs::metadata(&entry.path) {
        let size = meta.len();
        spans.push(Span::styled(
            format!("  {:.2} MB", size as f64 / 1024.0 / 1024.0),
            Style::default().fg(theme.dim),
        ));
        if size > ADVISORY_MAX_BYTES {
            spans.push(Span::styled("  over 10 MB", Style::default().fg(theme.warning)));
        }
    }
    ListItem::new(Line::from(spans))
}

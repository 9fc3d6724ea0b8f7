use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::theme::Theme;
use crate::view::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Document",
        &[
            ("o / a", "Open file picker"),
            ("paste / drop", "Select a dropped PDF"),
            ("Enter / s", "Summarize PDF"),
            ("x / Del", "Clear selection"),
            ("b", "View / hide historical benchmarks"),
        ],
    ),
    (
        "Summary",
        &[
            ("j k \u{2193} \u{2191}", "Scroll"),
            ("Ctrl+d / PgDn", "Page down"),
            ("Ctrl+u / PgUp", "Page up"),
            ("g / G", "Top / bottom"),
        ],
    ),
    (
        "File picker",
        &[
            ("Enter", "Open directory / select PDF"),
            ("Backspace", "Parent directory"),
            ("Esc", "Back"),
        ],
    ),
    (
        "Global",
        &[("?", "Toggle this help"), ("q", "Quit"), ("Ctrl+c", "Force quit")],
    ),
];

/// Keyboard reference, grouped by where the keys apply.
pub fn render(f: &mut Frame, theme: &Theme) {
    let mut lines = Vec::new();
    for (title, keys) in SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!(" {title}"),
            Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
        )));
        for (key, desc) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("   {key:<16}"), Style::default().fg(theme.text)),
                Span::styled(*desc, Style::default().fg(theme.dim)),
            ]));
        }
    }

    let height = (lines.len() as u16 + 2).min(f.area().height);
    let popup = centered_rect(56.min(f.area().width), height, f.area());
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(" Keyboard Shortcuts ", theme.title_style())),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

//! Modal popups drawn over the main screen.

use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Key, label and key color for the hint line.
type Hint<'a> = (&'a str, &'a str, Color);

fn render_dialog(
    f: &mut Frame,
    theme: &Theme,
    title: &str,
    message: &str,
    hints: &[Hint<'_>],
    accent: Color,
) {
    let area = f.area();
    let width = 60.min(area.width);
    // message wraps inside the borders and the two-space indent
    let inner = width.saturating_sub(4).max(1) as usize;
    let message_rows = message.chars().count().div_ceil(inner).max(1) as u16;
    let popup = centered_rect(width, message_rows + 5, area);

    let mut hint_spans = vec![Span::raw(" ")];
    for (key, label, color) in hints {
        hint_spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        hint_spans.push(Span::styled(format!(": {label}  "), Style::default().fg(theme.dim)));
    }

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(hint_spans),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .title(format!(" {title} ")),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

/// Blocking error, dismissed with Enter or Esc.
pub fn render_alert(f: &mut Frame, theme: &Theme, message: &str) {
    render_dialog(
        f,
        theme,
        "Error",
        message,
        &[("Enter", "OK", theme.active)],
        theme.error,
    );
}

pub fn render_quit_confirm(f: &mut Frame, theme: &Theme) {
    render_dialog(
        f,
        theme,
        "Confirm Quit",
        "Quit pdfsum?",
        &[("q", "quit", theme.error), ("Esc", "cancel", theme.active)],
        theme.error,
    );
}

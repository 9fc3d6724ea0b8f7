use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::view::{spinner_char, truncate};

/// Characters of extracted text shown in the preview.
const PREVIEW_CHARS: usize = 500;

/// First 500 characters of the extracted text, always followed by `...`.
pub fn text_preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Left column: the upload card and, once available, the extracted text preview.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let has_text = !app.session.extracted_text.is_empty();
    let chunks = if has_text {
        Layout::vertical([Constraint::Length(11), Constraint::Min(3)]).split(area)
    } else {
        Layout::vertical([Constraint::Min(11), Constraint::Length(0)]).split(area)
    };

    render_upload(f, app, chunks[0]);
    if has_text {
        render_preview(f, app, chunks[1]);
    }
}

fn render_upload(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let session = &app.session;
    let inner_width = area.width.saturating_sub(4) as usize;

    let mut lines = vec![Line::from(Span::styled(
        "Select a PDF file to analyze. Max 10MB.",
        Style::default().fg(theme.dim),
    ))];
    lines.push(Line::from(""));

    match &session.file {
        Some(file) => {
            let name_style = if session.loading {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                Span::styled("\u{1F4C4} ", Style::default().fg(theme.active)),
                Span::styled(truncate(&file.name, inner_width.saturating_sub(3)), name_style),
            ]));
            let mut size = vec![Span::styled(
                format!("   {}", file.size_label()),
                Style::default().fg(theme.dim),
            )];
            if file.exceeds_advisory_limit() {
                size.push(Span::styled(
                    "  (over 10 MB)",
                    Style::default().fg(theme.warning),
                ));
            }
            lines.push(Line::from(size));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Press o to browse, or drop a PDF onto the terminal.",
                Style::default().fg(theme.text),
            )));
            lines.push(Line::from(Span::styled(
                "PDF only",
                Style::default().fg(theme.dim),
            )));
        }
    }

    if let Some(msg) = &app.intake_message {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(theme.error),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));

    // The "button": spinner and status while busy, plain label otherwise.
    if session.loading {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", spinner_char(app.tick)),
                Style::default().fg(theme.spinner),
            ),
            Span::styled(session.status.clone(), Style::default().fg(theme.active)),
        ]));
    } else {
        let enabled = session.file.is_some();
        let style = if enabled {
            theme.title_style()
        } else {
            Style::default().fg(theme.dim)
        };
        lines.push(Line::from(vec![
            Span::styled(" Summarize PDF \u{2192} ", style),
            Span::styled(
                if enabled { "  Enter" } else { "" },
                Style::default().fg(theme.dim),
            ),
        ]));
        if !session.status.is_empty() {
            lines.push(Line::from(Span::styled(
                session.status.clone(),
                Style::default().fg(theme.status_color(&session.status)),
            )));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Upload Document "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_preview(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let paragraph = Paragraph::new(text_preview(&app.session.extracted_text))
        .style(Style::default().fg(theme.dim))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Extracted Text Preview "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_at_500_chars() {
        let text = "é".repeat(600);
        let preview = text_preview(&text);
        assert_eq!(preview.chars().count(), 503);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn short_text_still_gets_ellipsis() {
        assert_eq!(text_preview("abc"), "abc...");
    }
}

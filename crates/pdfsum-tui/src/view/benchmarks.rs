use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::view::spinner_char;

/// Label of the benchmark toggle for the current flags.
pub fn toggle_label(evaluating: bool, visible: bool) -> &'static str {
    if evaluating {
        "Running Benchmarks..."
    } else if visible {
        "Hide Historical Benchmarks"
    } else {
        "View Historical Benchmarks"
    }
}

/// Bottom section, shown once a summary exists: the toggle bar and, when
/// revealed, the table and charts.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let session = &app.session;

    let rows = if session.show_benchmarks {
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(6),
        ])
        .split(area)
    } else {
        Layout::vertical([Constraint::Length(2)]).split(area)
    };

    let bar = Layout::horizontal([Constraint::Min(20), Constraint::Length(34)]).split(rows[0]);
    let title = vec![
        Line::from(Span::styled(
            "Model Performance",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Real-time stats from this run.",
            Style::default().fg(theme.dim),
        )),
    ];
    f.render_widget(Paragraph::new(title), bar[0]);

    let mut button = Vec::new();
    if session.evaluating {
        button.push(Span::styled(
            format!("{} ", spinner_char(app.tick)),
            Style::default().fg(theme.spinner),
        ));
    }
    button.push(Span::styled(
        format!(" {} ", toggle_label(session.evaluating, session.show_benchmarks)),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ));
    if !session.evaluating {
        button.push(Span::styled(" b", Style::default().fg(theme.dim)));
    }
    f.render_widget(
        Paragraph::new(Line::from(button)).alignment(Alignment::Right),
        bar[1],
    );

    if !session.show_benchmarks {
        return;
    }

    let divider = Line::from(Span::styled(
        "\u{2500}\u{2500} EVALUATION & METRICS (REFERENCE SET) \u{2500}\u{2500}",
        Style::default().fg(theme.dim),
    ))
    .alignment(Alignment::Center);
    f.render_widget(Paragraph::new(divider), rows[1]);

    if let Some(table) = &app.table {
        crate::view::evaluation::render_in(f, theme, table, app.tick, rows[2]);
    }
    if let Some(charts) = &app.charts {
        crate::view::charts::render_in(f, theme, charts, app.tick, rows[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_label_follows_flags() {
        assert_eq!(toggle_label(true, false), "Running Benchmarks...");
        assert_eq!(toggle_label(false, true), "Hide Historical Benchmarks");
        assert_eq!(toggle_label(false, false), "View Historical Benchmarks");
    }
}

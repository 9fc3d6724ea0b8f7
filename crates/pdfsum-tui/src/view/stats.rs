use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use pdfsum_core::RunStats;

use crate::theme::Theme;

/// (label, value, unit) for each card, values printed as the backend sent them.
pub fn stat_cards(stats: &RunStats) -> [(&'static str, String, &'static str); 3] {
    [
        ("SPEED", stats.speed_tokens_per_sec.to_string(), " tokens/s"),
        ("TIME", format!("{}s", stats.runtime_sec), ""),
        ("GENERATED", stats.tokens_generated.to_string(), " words"),
    ]
}

/// Three cards side by side. Only called once stats exist.
pub fn render_in(f: &mut Frame, theme: &Theme, stats: &RunStats, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);
    let accents: [Color; 3] = [theme.active, theme.spinner, theme.success];

    for (((label, value, unit), accent), col) in stat_cards(stats)
        .into_iter()
        .zip(accents)
        .zip(columns.iter())
    {
        let lines = vec![
            Line::from(Span::styled(label, Style::default().fg(theme.dim))),
            Line::from(vec![
                Span::styled(
                    value,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(unit, Style::default().fg(theme.dim)),
            ]),
        ];
        let card = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
        );
        f.render_widget(card, *col);
    }
}

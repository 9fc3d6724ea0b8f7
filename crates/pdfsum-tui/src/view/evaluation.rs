use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use pdfsum_core::evaluation::{EvaluationTable, TableView};

use crate::theme::Theme;
use crate::view::spinner_char;

const HEADERS: [&str; 7] = [
    "Model",
    "Runtime (s) \u{2193}",
    "Tokens",
    "Memory (MB) \u{2193}",
    "ROUGE-1 \u{2191}",
    "ROUGE-L \u{2191}",
    "BERTScore \u{2191}",
];

const GUIDE: [(&str, &str); 4] = [
    ("Runtime:", "Time taken to summarize (Lower is faster \u{2193})"),
    ("Memory:", "RAM usage during generation (Lower is lighter \u{2193})"),
    ("ROUGE:", "Word overlap accuracy (Higher is better \u{2191})"),
    ("BERTScore:", "Semantic meaning accuracy (Higher is better \u{2191})"),
];

pub fn render_in(f: &mut Frame, theme: &Theme, table: &EvaluationTable, tick: usize, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Evaluation Benchmarks ");

    let rows = match table.view() {
        TableView::Spinner => {
            let p = Paragraph::new(Span::styled(
                format!("{} Loading evaluation results...", spinner_char(tick)),
                Style::default().fg(theme.spinner),
            ))
            .block(block);
            f.render_widget(p, area);
            return;
        }
        TableView::Error(msg) => {
            let p = Paragraph::new(Span::styled(msg.to_string(), Style::default().fg(theme.error)))
                .block(block);
            f.render_widget(p, area);
            return;
        }
        TableView::Empty(msg) => {
            let p = Paragraph::new(Span::styled(msg.to_string(), Style::default().fg(theme.dim)))
                .wrap(Wrap { trim: false })
                .block(block);
            f.render_widget(p, area);
            return;
        }
        TableView::Rows(rows) => rows,
    };

    let inner = block.inner(area);
    f.render_widget(block, area);
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(2)]).split(inner);

    // Guide to Metrics, two entries per line
    let mut guide = vec![Line::from(Span::styled(
        "Guide to Metrics:",
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ))];
    for pair in GUIDE.chunks(2) {
        let mut spans = Vec::new();
        for (term, desc) in pair {
            spans.push(Span::styled(
                format!("{term} "),
                Style::default().fg(theme.text),
            ));
            spans.push(Span::styled(
                format!("{desc}   "),
                Style::default().fg(theme.dim),
            ));
        }
        guide.push(Line::from(spans));
    }
    f.render_widget(Paragraph::new(guide), chunks[0]);

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(theme.title_style());
    let body: Vec<Row> = rows
        .into_iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.model).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(r.runtime),
                Cell::from(r.tokens),
                Cell::from(r.memory),
                Cell::from(r.rouge1).style(
                    Style::default()
                        .fg(theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(r.rougel),
                Cell::from(r.bertscore),
            ])
            .style(Style::default().fg(theme.text))
        })
        .collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Length(13),
        Constraint::Length(7),
        Constraint::Length(13),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
    ];
    f.render_widget(Table::new(body, widths).header(header), chunks[1]);
}

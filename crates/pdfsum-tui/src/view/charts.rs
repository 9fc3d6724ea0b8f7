use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use pdfsum_core::charts::{ChartGallery, ChartImage, ChartState};

use crate::theme::Theme;
use crate::view::spinner_char;

/// One-line description of a chart's load state.
pub fn chart_caption(image: &ChartImage) -> String {
    match &image.state {
        ChartState::Loading => "loading".to_string(),
        ChartState::Loaded {
            bytes,
            dimensions: Some((w, h)),
        } => format!("{w}\u{00D7}{h} px, {:.1} KB", *bytes as f64 / 1024.0),
        ChartState::Loaded {
            bytes,
            dimensions: None,
        } => format!("{:.1} KB", *bytes as f64 / 1024.0),
        ChartState::Fallback => "Chart Not Found".to_string(),
    }
}

/// Three cards, one per chart, each showing its source URL and load state.
pub fn render_in(f: &mut Frame, theme: &Theme, charts: &ChartGallery, tick: usize, area: Rect) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    for (image, col) in charts.images.iter().zip(columns.iter()) {
        let color = theme.chart_color(&image.state);
        let prefix = match image.state {
            ChartState::Loading => format!("{} ", spinner_char(tick)),
            _ => String::new(),
        };
        let caption_style = Style::default().fg(color);
        let border = if image.state == ChartState::Loading {
            theme.border
        } else {
            color
        };
        let lines = vec![
            Line::from(Span::styled(
                format!("{prefix}{}", chart_caption(image)),
                caption_style,
            )),
            Line::from(Span::styled(
                image.source().to_string(),
                Style::default().fg(theme.dim),
            )),
        ];
        let card = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(format!(" {} ", image.title)),
            );
        f.render_widget(card, *col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(state: ChartState) -> ChartImage {
        ChartImage {
            title: "Memory Usage",
            url: "http://h/static/memory_usage.png?t=1".into(),
            state,
        }
    }

    #[test]
    fn captions() {
        assert_eq!(chart_caption(&image(ChartState::Loading)), "loading");
        assert_eq!(
            chart_caption(&image(ChartState::Loaded {
                bytes: 2048,
                dimensions: Some((400, 300)),
            })),
            "400\u{00D7}300 px, 2.0 KB"
        );
        assert_eq!(chart_caption(&image(ChartState::Fallback)), "Chart Not Found");
    }
}

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::theme::Theme;
use crate::view::spinner_char;

/// Right column body: placeholder, spinner, or the rendered summary plus keywords.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Document Summary ");
    let inner = block.inner(area);
    app.visible_rows = inner.height.max(1) as usize;

    let session = &app.session;
    let theme = &app.theme;

    if session.summary.is_empty() {
        let (text, style) = if session.loading {
            (
                format!("{} Generating summary...", spinner_char(app.tick)),
                Style::default().fg(theme.spinner),
            )
        } else {
            (
                "Upload a PDF to see the summary here".to_string(),
                Style::default().fg(theme.dim),
            )
        };
        let top_pad = inner.height.saturating_sub(1) / 2;
        let mut lines = vec![Line::from(""); top_pad as usize];
        lines.push(Line::from(Span::styled(text, style)));
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    let mut lines = markdown_lines(&session.summary, theme);
    if !session.keywords.is_empty() {
        lines.push(Line::from(""));
        lines.push(keyword_line(&session.keywords, theme));
    }

    // Clamp scroll to the wrapped height so G lands on the last line.
    let width = inner.width.max(1) as usize;
    let wrapped: usize = lines.iter().map(|l| l.width().max(1).div_ceil(width)).sum();
    let max_scroll = wrapped.saturating_sub(inner.height as usize);
    app.summary_scroll = app.summary_scroll.min(max_scroll.min(u16::MAX as usize) as u16);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.summary_scroll, 0));
    f.render_widget(paragraph, area);
}

fn keyword_line(keywords: &[String], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(keywords.len() * 2);
    for (i, k) in keywords.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("#{k}"),
            Style::default()
                .fg(theme.keyword)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

/// An inline run of text with its emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

/// Split a line into `**bold**`, `*italic*` and `` `code` `` runs.
///
/// A marker with no closer later in the line is kept as literal text.
pub fn parse_inline(text: &str) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut buf = String::new();
    let (mut bold, mut italic, mut code) = (false, false, false);
    let mut i = 0;

    // Start of the last occurrence of each marker; a closer exists after
    // `from` exactly when that start is at or past `from`.
    let last_start = |pat: &[char]| chars.windows(pat.len()).rposition(|w| w == pat);
    let (last_tick, last_pair, last_star) = (
        last_start(&['`'][..]),
        last_start(&['*', '*'][..]),
        last_start(&['*'][..]),
    );
    let closes_after = |last: Option<usize>, from: usize| last.is_some_and(|p| p >= from);

    while i < chars.len() {
        let c = chars[i];
        let flush = |buf: &mut String, segs: &mut Vec<Segment>, bold, italic, code| {
            if !buf.is_empty() {
                segs.push(Segment {
                    text: std::mem::take(buf),
                    bold,
                    italic,
                    code,
                });
            }
        };

        if c == '`' && (code || closes_after(last_tick, i + 1)) {
            flush(&mut buf, &mut segments, bold, italic, code);
            code = !code;
            i += 1;
            continue;
        }
        if code {
            buf.push(c);
            i += 1;
            continue;
        }
        if c == '*' && chars.get(i + 1) == Some(&'*') && (bold || closes_after(last_pair, i + 2)) {
            flush(&mut buf, &mut segments, bold, italic, code);
            bold = !bold;
            i += 2;
            continue;
        }
        if c == '*'
            && (italic || (chars.get(i + 1) != Some(&'*') && closes_after(last_star, i + 1)))
        {
            flush(&mut buf, &mut segments, bold, italic, code);
            italic = !italic;
            i += 1;
            continue;
        }
        buf.push(c);
        i += 1;
    }
    if !buf.is_empty() {
        segments.push(Segment {
            text: buf,
            bold,
            italic,
            code,
        });
    }
    segments
}

fn inline_spans(text: &str, base: Style, theme: &Theme) -> Vec<Span<'static>> {
    parse_inline(text)
        .into_iter()
        .map(|seg| {
            let mut style = base;
            if seg.bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            if seg.italic {
                style = style.add_modifier(Modifier::ITALIC);
            }
            if seg.code {
                style = style.fg(theme.active);
            }
            Span::styled(seg.text, style)
        })
        .collect()
}

/// Leading `N. ` of an ordered list item: (number, rest).
fn ordered_item(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix(". ")?;
    Some((&line[..digits], rest))
}

/// Render summary markdown into styled lines: headings, bullet and numbered
/// lists, block quotes, fenced code, rules and inline emphasis.
pub fn markdown_lines(src: &str, theme: &Theme) -> Vec<Line<'static>> {
    let text = Style::default().fg(theme.text);
    let mut lines = Vec::new();
    let mut in_fence = false;

    for raw in src.lines() {
        let trimmed = raw.trim_start();
        let indent = " ".repeat((raw.len() - trimmed.len()).min(8));

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            lines.push(Line::from(Span::styled(
                format!("  {raw}"),
                Style::default().fg(theme.active),
            )));
            continue;
        }

        if trimmed.is_empty() {
            lines.push(Line::from(""));
        } else if let Some(level) = heading_level(trimmed) {
            let title = trimmed[level..].trim();
            let mut style = Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD);
            if level == 1 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            lines.push(Line::from(inline_spans(title, style, theme)));
        } else if matches!(trimmed, "---" | "***" | "___") {
            lines.push(Line::from(Span::styled(
                "\u{2500}".repeat(24),
                Style::default().fg(theme.dim),
            )));
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
            .or_else(|| trimmed.strip_prefix("+ "))
        {
            let mut spans = vec![Span::styled(
                format!("{indent}\u{2022} "),
                Style::default().fg(theme.active),
            )];
            spans.extend(inline_spans(item, text, theme));
            lines.push(Line::from(spans));
        } else if let Some((num, item)) = ordered_item(trimmed) {
            let mut spans = vec![Span::styled(
                format!("{indent}{num}. "),
                Style::default().fg(theme.active),
            )];
            spans.extend(inline_spans(item, text, theme));
            lines.push(Line::from(spans));
        } else if let Some(quote) = trimmed.strip_prefix('>') {
            let mut spans = vec![Span::styled("\u{2502} ", Style::default().fg(theme.dim))];
            spans.extend(inline_spans(
                quote.trim_start(),
                Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
                theme,
            ));
            lines.push(Line::from(spans));
        } else {
            lines.push(Line::from(inline_spans(trimmed, text, theme)));
        }
    }
    lines
}

/// `#` to `######` followed by a space.
fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&level) && line[level..].starts_with(' ') {
        Some(level)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, bold: bool, italic: bool) -> Segment {
        Segment {
            text: text.to_string(),
            bold,
            italic,
            code: false,
        }
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn inline_bold_and_italic() {
        assert_eq!(
            parse_inline("a **b** *c* d"),
            vec![
                seg("a ", false, false),
                seg("b", true, false),
                seg(" ", false, false),
                seg("c", false, true),
                seg(" d", false, false),
            ]
        );
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(parse_inline("2 * 3"), vec![seg("2 * 3", false, false)]);
        assert_eq!(parse_inline("**open"), vec![seg("**open", false, false)]);
    }

    #[test]
    fn closer_must_come_after_the_marker() {
        assert_eq!(
            parse_inline("`a` b `c"),
            vec![
                Segment {
                    text: "a".into(),
                    bold: false,
                    italic: false,
                    code: true,
                },
                seg(" b `c", false, false),
            ]
        );
        assert_eq!(parse_inline("x** y"), vec![seg("x** y", false, false)]);
    }

    #[test]
    fn long_lines_parse_every_span() {
        let segs = parse_inline(&"**x** ".repeat(10_000));
        assert_eq!(segs.len(), 20_000);
        assert_eq!(segs[0], seg("x", true, false));
        assert_eq!(segs[19_999], seg(" ", false, false));
    }

    #[test]
    fn code_span_ignores_emphasis() {
        let segs = parse_inline("use `a*b*c` here");
        assert_eq!(segs[1].text, "a*b*c");
        assert!(segs[1].code);
        assert!(!segs[1].italic);
    }

    #[test]
    fn block_structure() {
        let theme = Theme::hacker();
        let lines = markdown_lines(
            "# Title\n\nIntro **key**.\n- first\n  * nested\n2. second\n> quoted\n---",
            &theme,
        );
        let text: Vec<String> = lines.iter().map(plain).collect();
        let rule = "\u{2500}".repeat(24);
        assert_eq!(
            text,
            vec![
                "Title",
                "",
                "Intro key.",
                "\u{2022} first",
                "  \u{2022} nested",
                "2. second",
                "\u{2502} quoted",
                rule.as_str(),
            ]
        );
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn hashtag_without_space_is_not_a_heading() {
        let theme = Theme::hacker();
        let lines = markdown_lines("#notaheading", &theme);
        assert_eq!(plain(&lines[0]), "#notaheading");
        assert_eq!(heading_level("### x"), Some(3));
    }

    #[test]
    fn fenced_code_is_verbatim() {
        let theme = Theme::hacker();
        let lines = markdown_lines("```\n# not heading\n```", &theme);
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), "  # not heading");
    }
}

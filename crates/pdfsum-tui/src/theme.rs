use ratatui::style::{Color, Modifier, Style};

use pdfsum_core::ChartState;
use pdfsum_core::session::STATUS_DONE;

/// Palette used by every view.
pub struct Theme {
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub keyword: Color,

    pub title_fg: Color,
    pub title_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub cursor_bg: Color,
    pub active: Color,
    pub spinner: Color,
    pub hint_fg: Color,
    pub hint_bg: Color,
}

impl Theme {
    /// Theme by config name; unknown names get the hacker palette.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("modern") {
            Self::modern()
        } else {
            if !name.eq_ignore_ascii_case("hacker") {
                tracing::warn!(theme = name, "unknown theme, using hacker");
            }
            Self::hacker()
        }
    }

    /// Green on black.
    pub fn hacker() -> Self {
        Self {
            success: Color::Rgb(0, 210, 0),
            error: Color::Red,
            warning: Color::Yellow,
            keyword: Color::Cyan,

            title_fg: Color::Black,
            title_bg: Color::Rgb(0, 210, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            cursor_bg: Color::Rgb(25, 55, 25),
            active: Color::Rgb(0, 255, 160),
            spinner: Color::Cyan,
            hint_fg: Color::DarkGray,
            hint_bg: Color::Reset,
        }
    }

    /// Slate background accents with blue highlights, closer to the web UI.
    pub fn modern() -> Self {
        Self {
            success: Color::Rgb(34, 197, 94),
            error: Color::Rgb(239, 68, 68),
            warning: Color::Rgb(234, 179, 8),
            keyword: Color::Rgb(96, 165, 250),

            title_fg: Color::White,
            title_bg: Color::Rgb(37, 99, 235),
            border: Color::Rgb(71, 85, 105),
            text: Color::Rgb(241, 245, 249),
            dim: Color::Rgb(148, 163, 184),
            cursor_bg: Color::Rgb(30, 41, 59),
            active: Color::Rgb(59, 130, 246),
            spinner: Color::Rgb(59, 130, 246),
            hint_fg: Color::Rgb(148, 163, 184),
            hint_bg: Color::Reset,
        }
    }

    /// Status line color: errors red, "Done!" green, progress in the accent.
    pub fn status_color(&self, status: &str) -> Color {
        if status.starts_with("Error") {
            self.error
        } else if status == STATUS_DONE {
            self.success
        } else {
            self.active
        }
    }

    pub fn chart_color(&self, state: &ChartState) -> Color {
        match state {
            ChartState::Loading => self.spinner,
            ChartState::Loaded { .. } => self.success,
            ChartState::Fallback => self.warning,
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title_fg)
            .bg(self.title_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default().bg(self.cursor_bg).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn hint_bar_style(&self) -> Style {
        Style::default().fg(self.hint_fg).bg(self.hint_bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive_with_hacker_fallback() {
        assert_eq!(Theme::from_name("Modern").title_bg, Theme::modern().title_bg);
        assert_eq!(Theme::from_name("neon").title_bg, Theme::hacker().title_bg);
    }

    #[test]
    fn status_colors() {
        let t = Theme::hacker();
        assert_eq!(t.status_color("Error: boom"), t.error);
        assert_eq!(t.status_color(STATUS_DONE), t.success);
        assert_eq!(t.status_color("Extracting text from PDF..."), t.active);
    }
}

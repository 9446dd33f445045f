use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{GameConfig, Theme};

const SEPARATOR: &str = " │ ";

/// Values displayed by the HUD row.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub score: u32,
    pub high_score: u32,
    pub length: usize,
    pub config: GameConfig,
    pub theme: &'a Theme,
}

/// Renders the one-line HUD and returns the remaining play area below it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: &HudInfo<'_>) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(info)).alignment(Alignment::Center),
        hud_area,
    );

    play_area
}

fn info_line(info: &HudInfo<'_>) -> Line<'static> {
    let value = Style::new()
        .fg(info.theme.hud_score)
        .add_modifier(Modifier::BOLD);
    let muted = Style::new().fg(info.theme.hud_muted);

    Line::from(vec![
        Span::styled("Score: ", muted),
        Span::styled(info.score.to_string(), value),
        Span::styled(SEPARATOR, muted),
        Span::styled("High Score: ", muted),
        Span::styled(info.high_score.to_string(), value),
        Span::styled(SEPARATOR, muted),
        Span::styled("Length: ", muted),
        Span::styled(info.length.to_string(), value),
        Span::styled(SEPARATOR, muted),
        Span::styled(
            format!("{} · {}", info.config.difficulty, info.config.mode),
            muted,
        ),
    ])
}

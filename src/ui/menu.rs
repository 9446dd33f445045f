use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::catalog::{CATALOG, GameCard, truncate_to_width};
use crate::config::{GameConfig, Theme};
use crate::game::DeathReason;

/// Draws the start screen: game list, selectors and the matching high score.
pub fn render_start_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    selection: GameConfig,
    high_score: u32,
    theme: &Theme,
) {
    let popup = centered_popup(area, 90, 80);
    frame.render_widget(Clear, popup);

    let [title_row, cards_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(card_rows()),
        Constraint::Min(6),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE ARCADE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let card_width = usize::from(cards_row.width.saturating_sub(4));
    let mut cards = Vec::new();
    for card in CATALOG {
        cards.extend(card_lines(card, card_width, theme));
    }
    frame.render_widget(
        Paragraph::new(cards).block(Block::bordered().title(" games ")),
        cards_row,
    );

    let body = vec![
        selector_line("Difficulty", selection.difficulty.as_str()),
        selector_line("Mode", selection.mode.as_str()),
        Line::from(""),
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("[Enter] Start   [Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from(
            "Arrows/WASD or drag to steer, Space or tap to pause",
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.menu_footer)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            "PAUSED",
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("[Enter]/[Space] Resume"),
        Line::from("[Esc]/[M] Main Menu"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    new_record: bool,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 45);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Final score: {score}")),
        Line::from(format!("High score: {high_score}")),
        Line::from(death_reason.map_or(String::new(), |reason| {
            format!("Cause: {}", reason.describe())
        })),
        Line::from(if new_record { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Enter] Play Again"),
        Line::from("[Esc]/[M] Main Menu"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn selector_line(label: &str, value: &str) -> Line<'static> {
    Line::from(format!("{label}: < {value} >"))
}

/// Three lines per card plus the border.
fn card_rows() -> u16 {
    u16::try_from(CATALOG.len() * 3 + 2).unwrap_or(u16::MAX)
}

fn card_lines(card: &GameCard, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let action_style = if card.coming_soon {
        Style::default().fg(theme.menu_footer)
    } else {
        Style::default()
            .fg(theme.menu_title)
            .add_modifier(Modifier::BOLD)
    };

    vec![
        Line::from(Span::styled(
            truncate_to_width(&card.heading(), width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(truncate_to_width(card.description, width)),
        Line::from(Span::styled(
            format!("[{}]", card.action_label()),
            action_style,
        )),
    ]
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

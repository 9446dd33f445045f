use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, GameStatus};
use crate::config::{CELL_WIDTH, GLYPH_CELL, GLYPH_FOOD, GLYPH_PORTAL, GridSize, THEME, Theme};
use crate::game::GameSession;
use crate::score::ScorePersistence;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render<S: ScorePersistence>(frame: &mut Frame<'_>, app: &App<S>) {
    let theme = &THEME;
    let area = frame.area();
    let config = app.session().map_or(app.selection(), GameSession::config);

    let play_area = render_hud(
        frame,
        area,
        &HudInfo {
            score: app.score(),
            high_score: app.high_score(),
            length: app.session().map_or(0, |session| session.snake.len()),
            config,
            theme,
        },
    );

    let bounds = GridSize::STANDARD;
    let Some(board) = board_rect(play_area, bounds) else {
        render_too_small(frame, play_area, bounds);
        return;
    };

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.border_fg).bg(theme.play_bg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    if let Some(session) = app.session() {
        render_obstacles(frame, inner, session, theme);
        render_portals(frame, inner, session, theme);
        render_food(frame, inner, session, theme);
        render_snake(frame, inner, session, theme);
    }

    match app.status() {
        GameStatus::NotStarted => {
            render_start_menu(frame, board, app.selection(), app.high_score(), theme);
        }
        GameStatus::Paused => render_pause_menu(frame, board, theme),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            board,
            app.score(),
            app.high_score(),
            app.is_new_record(),
            app.session().and_then(|session| session.death_reason),
            theme,
        ),
        GameStatus::Running => {}
    }
}

/// Centers the bordered board inside `area`, or `None` when it does not fit.
fn board_rect(area: Rect, bounds: GridSize) -> Option<Rect> {
    let width = bounds.width * CELL_WIDTH + 2;
    let height = bounds.height + 2;
    if area.width < width || area.height < height {
        return None;
    }

    Some(Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    })
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, bounds: GridSize) {
    let needed = format!(
        "Terminal too small: need {}x{}",
        bounds.width * CELL_WIDTH + 2,
        bounds.height + 3
    );
    let [_, row, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(needed)
            .alignment(Alignment::Center)
            .style(Style::new().fg(THEME.menu_footer)),
        row,
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, session: &GameSession, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for (index, segment) in session.snake.segments().enumerate() {
        let Some((x, y)) = cell_to_terminal(inner, session.bounds(), *segment) else {
            continue;
        };

        let mut style = Style::new()
            .fg(theme.snake[index % theme.snake.len()])
            .bg(theme.play_bg);
        if index == 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, session: &GameSession, theme: &Theme) {
    let Some((x, y)) = cell_to_terminal(inner, session.bounds(), session.food.position) else {
        return;
    };

    let shade = (session.tick_count % theme.food.len() as u64) as usize;
    let style = Style::new()
        .fg(theme.food[shade])
        .bg(theme.play_bg)
        .add_modifier(Modifier::BOLD);
    frame.buffer_mut().set_string(x, y, GLYPH_FOOD, style);
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, session: &GameSession, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for obstacle in session.obstacles.iter() {
        if let Some((x, y)) = cell_to_terminal(inner, session.bounds(), *obstacle) {
            buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(theme.obstacle));
        }
    }
}

fn render_portals(frame: &mut Frame<'_>, inner: Rect, session: &GameSession, theme: &Theme) {
    let Some(portals) = session.portals else {
        return;
    };

    let buffer = frame.buffer_mut();
    for (end, color) in portals.ends().into_iter().zip(theme.portals) {
        if let Some((x, y)) = cell_to_terminal(inner, session.bounds(), end) {
            buffer.set_string(x, y, GLYPH_PORTAL, Style::new().fg(color).bg(theme.play_bg));
        }
    }
}

/// Maps a logical cell to the terminal column/row of its left half.
fn cell_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

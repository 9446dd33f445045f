use std::cell::Cell;
use std::time::{Duration, Instant};

use snake_arcade::app::{App, Command, GameStatus};
use snake_arcade::config::{Difficulty, GameConfig, GameMode};
use snake_arcade::food::Food;
use snake_arcade::game::{DeathReason, GameSession};
use snake_arcade::hazards::Portals;
use snake_arcade::input::{Direction, GameInput};
use snake_arcade::score::{HighScoreKey, HighScoreTable, ScorePersistence};
use snake_arcade::snake::{Position, Snake};

#[derive(Default)]
struct CountingStore {
    saves: Cell<usize>,
}

impl ScorePersistence for CountingStore {
    fn load(&self) -> HighScoreTable {
        HighScoreTable::default()
    }

    fn save(&self, _table: &HighScoreTable) {
        self.saves.set(self.saves.get() + 1);
    }
}

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut game =
        GameSession::new_with_seed(GameConfig::new(Difficulty::Medium, GameMode::Normal), 42)
            .expect("empty field has room");

    game.snake = Snake::new(Position::new(28, 1));
    game.food = Food::new(Position::new(29, 1));
    game.steer(Direction::Right);

    let outcome = game.step();
    assert_eq!(outcome.terminal, None);
    assert_eq!(game.score, 1);
    assert_eq!(game.snake.len(), 2);
    assert_eq!(game.snake.head(), Position::new(29, 1));

    game.food = Food::new(Position::new(10, 20));
    game.steer(Direction::Up);
    game.step();
    assert_eq!(game.snake.head(), Position::new(29, 0));
    assert_eq!(game.snake.len(), 2);

    let outcome = game.step();
    assert_eq!(outcome.terminal, Some(DeathReason::WallCollision));
    assert_eq!(game.score, 1);
}

#[test]
fn length_grows_exactly_when_food_is_eaten() {
    let mut game =
        GameSession::new_with_seed(GameConfig::new(Difficulty::Easy, GameMode::Portal), 99)
            .expect("empty field has room");
    game.portals = None;
    game.steer(Direction::Right);

    for _ in 0..500 {
        let before = game.snake.len();
        let food = game.food.position;
        let outcome = game.step();
        if outcome.terminal.is_some() {
            break;
        }

        let ate = game.snake.head() == food;
        assert_eq!(game.snake.len(), before + usize::from(ate));
        assert_eq!(outcome.score_delta, u32::from(ate));
        assert!(game.snake.head().is_within_bounds(game.bounds()));
        assert!(!game.snake.occupies(game.food.position));
    }
}

#[test]
fn portal_round_trip_through_app() {
    let start = Instant::now();
    let tick = Duration::from_millis(100);
    let mut app = App::new(
        CountingStore::default(),
        GameConfig::new(Difficulty::Medium, GameMode::Portal),
    )
    .with_seed(5);

    app.handle_input(GameInput::Confirm, start);
    assert_eq!(app.status(), GameStatus::Running);

    if let Some(session) = app.session_mut() {
        session.portals = Some(Portals::new(Position::new(5, 5), Position::new(20, 20)));
        session.snake = Snake::new(Position::new(5, 6));
        session.food = Food::new(Position::new(0, 29));
    }
    app.handle_input(GameInput::Direction(Direction::Up), start);

    assert!(app.update(start + tick));
    let session = app.session().expect("game is running");
    assert_eq!(session.snake.head(), Position::new(20, 20));
    assert_eq!(session.score, 0);

    app.handle_input(GameInput::PauseToggle, start + tick);
    assert_eq!(app.status(), GameStatus::Paused);
    app.handle_input(GameInput::Menu, start + tick);
    assert_eq!(app.status(), GameStatus::NotStarted);
    assert!(app.session().is_none());
}

#[test]
fn game_over_keeps_best_score_per_key() {
    let start = Instant::now();
    let tick = Duration::from_millis(150);
    let mut app = App::new(CountingStore::default(), GameConfig::default()).with_seed(8);
    app.dispatch(Command::Start, start);

    if let Some(session) = app.session_mut() {
        session.snake = Snake::new(Position::new(1, 0));
        session.food = Food::new(Position::new(0, 0));
    }
    app.dispatch(Command::Steer(Direction::Left), start);

    app.update(start + tick);
    assert_eq!(app.score(), 1);
    app.update(start + tick * 2);

    assert_eq!(app.status(), GameStatus::GameOver);
    let key = HighScoreKey {
        difficulty: Difficulty::Easy,
        mode: GameMode::Normal,
    };
    assert_eq!(app.high_scores().get(key), 1);
    assert_eq!(app.high_score(), 1);
    assert!(app.is_new_record());

    // A worse game leaves the record alone.
    app.dispatch(Command::Restart, start + tick * 3);
    if let Some(session) = app.session_mut() {
        session.snake = Snake::new(Position::new(0, 5));
        session.food = Food::new(Position::new(20, 20));
    }
    app.dispatch(Command::Steer(Direction::Left), start + tick * 3);
    app.update(start + tick * 4);

    assert_eq!(app.status(), GameStatus::GameOver);
    assert_eq!(app.score(), 0);
    assert_eq!(app.high_scores().get(key), 1);
    assert!(!app.is_new_record());
}

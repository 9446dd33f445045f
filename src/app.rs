use std::time::{Duration, Instant};

use log::{info, warn};

use crate::config::{Difficulty, GameConfig, GameMode};
use crate::game::GameSession;
use crate::input::{Direction, GameInput};
use crate::scheduler::TickScheduler;
use crate::score::{HighScoreKey, HighScoreTable, ScorePersistence, ScoreStore};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Discrete UI actions driving the state machine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Start,
    PauseToggle,
    Resume,
    Restart,
    ReturnToMenu,
    Steer(Direction),
    SelectDifficulty(Difficulty),
    SelectMode(GameMode),
}

/// Translates a raw input into the command it means in `status`.
///
/// `Quit` never maps to a command; the caller handles it.
#[must_use]
pub fn command_for(input: GameInput, status: GameStatus, selection: GameConfig) -> Option<Command> {
    use GameInput as I;
    use GameStatus as S;

    match (status, input) {
        (S::NotStarted, I::Confirm) => Some(Command::Start),
        (S::NotStarted, I::Direction(Direction::Left)) => {
            Some(Command::SelectDifficulty(selection.difficulty.previous()))
        }
        (S::NotStarted, I::Direction(Direction::Right)) => {
            Some(Command::SelectDifficulty(selection.difficulty.next()))
        }
        (S::NotStarted, I::Direction(Direction::Up)) => {
            Some(Command::SelectMode(selection.mode.previous()))
        }
        (S::NotStarted, I::Direction(Direction::Down)) => {
            Some(Command::SelectMode(selection.mode.next()))
        }
        (S::Running, I::Direction(direction) | I::Swipe(direction)) => {
            Some(Command::Steer(direction))
        }
        (S::Running, I::PauseToggle | I::Menu) => Some(Command::PauseToggle),
        (S::Paused, I::PauseToggle) => Some(Command::PauseToggle),
        (S::Paused, I::Confirm) => Some(Command::Resume),
        (S::GameOver, I::Confirm) => Some(Command::Restart),
        (S::Paused | S::GameOver, I::Menu) => Some(Command::ReturnToMenu),
        _ => None,
    }
}

/// Owns the state machine, the active game, the tick timer and the high scores.
pub struct App<S: ScorePersistence = ScoreStore> {
    status: GameStatus,
    selection: GameConfig,
    session: Option<GameSession>,
    scheduler: TickScheduler,
    high_scores: HighScoreTable,
    store: S,
    new_record: bool,
    seed: Option<u64>,
}

impl<S: ScorePersistence> App<S> {
    /// Loads the high-score table and opens on the start screen.
    pub fn new(store: S, selection: GameConfig) -> Self {
        let high_scores = store.load();
        Self {
            status: GameStatus::NotStarted,
            selection,
            session: None,
            scheduler: TickScheduler::default(),
            high_scores,
            store,
            new_record: false,
            seed: None,
        }
    }

    /// Seeds every game this app starts, for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Feeds a raw input through [`command_for`] and dispatches the result.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) {
        if let Some(command) = command_for(input, self.status, self.selection) {
            self.dispatch(command, now);
        }
    }

    /// Applies one command. Commands that make no sense in the current state are ignored.
    pub fn dispatch(&mut self, command: Command, now: Instant) {
        match command {
            Command::Start => self.start(now),
            Command::PauseToggle => match self.status {
                GameStatus::Running => self.pause(),
                GameStatus::Paused => self.resume(now),
                _ => {}
            },
            Command::Resume => self.resume(now),
            Command::Restart => {
                if self.status == GameStatus::GameOver {
                    self.return_to_menu();
                    self.start(now);
                }
            }
            Command::ReturnToMenu => {
                if matches!(self.status, GameStatus::Paused | GameStatus::GameOver) {
                    self.return_to_menu();
                }
            }
            Command::Steer(direction) => {
                if self.status == GameStatus::Running {
                    if let Some(session) = self.session.as_mut() {
                        session.steer(direction);
                    }
                }
            }
            Command::SelectDifficulty(difficulty) => {
                if self.status == GameStatus::NotStarted {
                    self.selection.difficulty = difficulty;
                }
            }
            Command::SelectMode(mode) => {
                if self.status == GameStatus::NotStarted {
                    self.selection.mode = mode;
                }
            }
        }
    }

    /// Runs a simulation tick if the timer is due. Returns true when one ran.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.status != GameStatus::Running || !self.scheduler.poll(now) {
            return false;
        }

        self.tick();
        true
    }

    /// How long the event loop may block before the next tick is due.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    /// Flushes the high-score table; call before exiting.
    pub fn shutdown(&mut self) {
        self.scheduler.cancel();
        self.store.save(&self.high_scores);
    }

    fn start(&mut self, now: Instant) {
        if self.status != GameStatus::NotStarted {
            return;
        }

        let created = match self.seed {
            Some(seed) => GameSession::new_with_seed(self.selection, seed),
            None => GameSession::new(self.selection),
        };

        match created {
            Ok(session) => {
                self.session = Some(session);
                self.new_record = false;
                self.scheduler.start(now, self.selection.tick_interval());
                self.status = GameStatus::Running;
                info!(
                    "game started: difficulty={} mode={}",
                    self.selection.difficulty, self.selection.mode
                );
            }
            Err(error) => warn!("cannot start game: {error}"),
        }
    }

    fn pause(&mut self) {
        self.scheduler.cancel();
        self.status = GameStatus::Paused;
        info!("game paused");
    }

    fn resume(&mut self, now: Instant) {
        if self.status != GameStatus::Paused {
            return;
        }

        self.scheduler.start(now, self.selection.tick_interval());
        self.status = GameStatus::Running;
        info!("game resumed");
    }

    fn return_to_menu(&mut self) {
        self.scheduler.cancel();
        self.session = None;
        self.new_record = false;
        self.status = GameStatus::NotStarted;
    }

    fn tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let outcome = session.step();
        self.reconcile_high_score();

        if let Some(reason) = outcome.terminal {
            self.scheduler.cancel();
            self.status = GameStatus::GameOver;
            info!("game over ({}), score {}", reason.describe(), self.score());
            self.reconcile_high_score();
        }
    }

    /// Writes a new record through to the store as soon as it happens.
    fn reconcile_high_score(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let key = HighScoreKey::from(session.config());
        if self.high_scores.record(key, session.score) {
            self.new_record = true;
            info!("new high score for {key}: {}", session.score);
            self.store.save(&self.high_scores);
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Difficulty and mode chosen on the start screen.
    #[must_use]
    pub fn selection(&self) -> GameConfig {
        self.selection
    }

    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |session| session.score)
    }

    /// High score for the running game, or for the selection on the start screen.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        let config = self
            .session
            .as_ref()
            .map_or(self.selection, GameSession::config);
        self.high_scores.get(HighScoreKey::from(config))
    }

    /// True once the current game has beaten the previous record.
    #[must_use]
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScoreTable {
        &self.high_scores
    }

    #[must_use]
    pub fn tick_active(&self) -> bool {
        self.scheduler.is_active()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::{Duration, Instant};

    use super::{App, Command, GameStatus, command_for};
    use crate::config::{Difficulty, GameConfig, GameMode};
    use crate::food::Food;
    use crate::hazards::{Obstacles, Portals};
    use crate::input::{Direction, GameInput};
    use crate::score::{HighScoreKey, HighScoreTable, ScorePersistence};
    use crate::snake::{Position, Snake};

    #[derive(Default)]
    struct MemoryStore {
        initial: HighScoreTable,
        saves: RefCell<Vec<HighScoreTable>>,
    }

    impl ScorePersistence for MemoryStore {
        fn load(&self) -> HighScoreTable {
            self.initial.clone()
        }

        fn save(&self, table: &HighScoreTable) {
            self.saves.borrow_mut().push(table.clone());
        }
    }

    const EASY: Duration = Duration::from_millis(150);

    fn app() -> App<MemoryStore> {
        App::new(MemoryStore::default(), GameConfig::default()).with_seed(17)
    }

    fn started(now: Instant) -> App<MemoryStore> {
        let mut app = app();
        app.dispatch(Command::Start, now);
        app
    }

    #[test]
    fn start_runs_and_arms_timer() {
        let now = Instant::now();
        let app = started(now);

        assert_eq!(app.status(), GameStatus::Running);
        assert!(app.tick_active());
        assert_eq!(app.score(), 0);
        assert_eq!(app.time_until_tick(now), Some(EASY));
    }

    #[test]
    fn start_is_ignored_while_running() {
        let now = Instant::now();
        let mut app = started(now);
        app.dispatch(Command::Steer(Direction::Right), now);
        app.update(now + EASY);
        let head = app.session().map(|session| session.snake.head());

        app.dispatch(Command::Start, now + EASY);

        assert_eq!(app.session().map(|session| session.snake.head()), head);
    }

    type Frozen = (Snake, Food, Obstacles, Option<Portals>, u32, u64);

    fn frozen(app: &App<MemoryStore>) -> Option<Frozen> {
        app.session().map(|session| {
            (
                session.snake.clone(),
                session.food,
                session.obstacles.clone(),
                session.portals,
                session.score,
                session.tick_count,
            )
        })
    }

    fn assert_pause_round_trip(mode: GameMode) {
        let now = Instant::now();
        let config = GameConfig::new(Difficulty::Easy, mode);
        let mut app = App::new(MemoryStore::default(), config).with_seed(17);
        app.dispatch(Command::Start, now);
        if let Some(session) = app.session_mut() {
            session.snake = Snake::new(Position::new(10, 10));
            session.food = Food::new(Position::new(11, 10));
            match mode {
                GameMode::Obstacles => {
                    session.obstacles =
                        Obstacles::from_cells(vec![Position::new(2, 2), Position::new(25, 3)]);
                }
                GameMode::Portal => {
                    session.portals =
                        Some(Portals::new(Position::new(3, 25), Position::new(25, 25)));
                }
                GameMode::Normal => {}
            }
        }
        app.dispatch(Command::Steer(Direction::Right), now);
        assert!(app.update(now + EASY));
        assert_eq!(app.score(), 1);

        app.dispatch(Command::PauseToggle, now + EASY);
        let snapshot = frozen(&app);

        assert_eq!(app.status(), GameStatus::Paused);
        assert!(!app.tick_active());
        assert!(!app.update(now + EASY * 10));
        assert_eq!(frozen(&app), snapshot);

        // Input while paused is dropped.
        app.handle_input(GameInput::Direction(Direction::Up), now + EASY * 10);
        app.handle_input(GameInput::Swipe(Direction::Down), now + EASY * 11);
        assert_eq!(app.session().map(|session| session.pending_turns()), Some(0));

        let resumed_at = now + EASY * 20;
        app.dispatch(Command::Resume, resumed_at);
        assert_eq!(app.status(), GameStatus::Running);
        assert_eq!(frozen(&app), snapshot);
        assert_eq!(app.session().map(|session| session.config().mode), Some(mode));

        // No catch-up ticks after resuming.
        assert!(!app.update(resumed_at));
        assert!(app.update(resumed_at + EASY));
        assert_eq!(app.session().map(|session| session.tick_count), Some(2));
    }

    #[test]
    fn pause_freezes_state_and_resume_restores_it() {
        assert_pause_round_trip(GameMode::Normal);
    }

    #[test]
    fn pause_keeps_obstacle_layout() {
        assert_pause_round_trip(GameMode::Obstacles);
    }

    #[test]
    fn pause_keeps_portal_pair() {
        assert_pause_round_trip(GameMode::Portal);
    }

    #[test]
    fn wall_hit_ends_game_and_halts_timer() {
        let now = Instant::now();
        let mut app = started(now);
        if let Some(session) = app.session_mut() {
            session.snake = Snake::new(Position::new(0, 10));
            session.food = Food::new(Position::new(20, 20));
        }
        app.dispatch(Command::Steer(Direction::Left), now);

        assert!(app.update(now + EASY));

        assert_eq!(app.status(), GameStatus::GameOver);
        assert!(!app.tick_active());
        assert!(!app.update(now + EASY * 2));
    }

    #[test]
    fn new_record_is_written_through_immediately() {
        let now = Instant::now();
        let mut app = started(now);
        if let Some(session) = app.session_mut() {
            session.snake = Snake::new(Position::new(10, 10));
            session.food = Food::new(Position::new(11, 10));
        }
        app.dispatch(Command::Steer(Direction::Right), now);

        app.update(now + EASY);

        let key = HighScoreKey {
            difficulty: Difficulty::Easy,
            mode: GameMode::Normal,
        };
        assert_eq!(app.score(), 1);
        assert_eq!(app.high_score(), 1);
        assert!(app.is_new_record());
        let saves = app.store.saves.borrow();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].get(key), 1);
    }

    #[test]
    fn score_below_record_is_not_saved() {
        let mut initial = HighScoreTable::default();
        let key = HighScoreKey {
            difficulty: Difficulty::Easy,
            mode: GameMode::Normal,
        };
        initial.record(key, 5);
        let store = MemoryStore {
            initial,
            ..MemoryStore::default()
        };
        let now = Instant::now();
        let mut app = App::new(store, GameConfig::default()).with_seed(3);
        app.dispatch(Command::Start, now);
        if let Some(session) = app.session_mut() {
            session.snake = Snake::new(Position::new(10, 10));
            session.food = Food::new(Position::new(11, 10));
        }
        app.dispatch(Command::Steer(Direction::Right), now);

        app.update(now + EASY);

        assert_eq!(app.score(), 1);
        assert_eq!(app.high_score(), 5);
        assert!(!app.is_new_record());
        assert!(app.store.saves.borrow().is_empty());
    }

    #[test]
    fn restart_from_game_over_starts_fresh() {
        let now = Instant::now();
        let mut app = started(now);
        if let Some(session) = app.session_mut() {
            session.snake = Snake::new(Position::new(0, 10));
            session.food = Food::new(Position::new(20, 20));
            session.score = 3;
        }
        app.dispatch(Command::Steer(Direction::Left), now);
        app.update(now + EASY);
        assert_eq!(app.status(), GameStatus::GameOver);

        let later = now + EASY * 4;
        app.dispatch(Command::Restart, later);

        assert_eq!(app.status(), GameStatus::Running);
        assert_eq!(app.score(), 0);
        assert_eq!(app.time_until_tick(later), Some(EASY));
        assert_eq!(
            app.session().map(|session| session.snake.head()),
            Some(Position::new(10, 10))
        );
    }

    #[test]
    fn return_to_menu_discards_game() {
        let now = Instant::now();
        let mut app = started(now);
        app.dispatch(Command::PauseToggle, now);

        app.dispatch(Command::ReturnToMenu, now);

        assert_eq!(app.status(), GameStatus::NotStarted);
        assert!(app.session().is_none());
        assert!(!app.tick_active());
    }

    #[test]
    fn return_to_menu_is_ignored_while_running() {
        let now = Instant::now();
        let mut app = started(now);

        app.dispatch(Command::ReturnToMenu, now);

        assert_eq!(app.status(), GameStatus::Running);
    }

    #[test]
    fn selection_changes_only_on_start_screen() {
        let now = Instant::now();
        let mut app = app();
        app.dispatch(Command::SelectDifficulty(Difficulty::Hard), now);
        app.dispatch(Command::SelectMode(GameMode::Portal), now);
        assert_eq!(app.selection(), GameConfig::new(Difficulty::Hard, GameMode::Portal));

        app.dispatch(Command::Start, now);
        app.dispatch(Command::SelectDifficulty(Difficulty::Easy), now);

        assert_eq!(app.selection().difficulty, Difficulty::Hard);
        assert_eq!(app.time_until_tick(now), Some(Duration::from_millis(70)));
    }

    #[test]
    fn shutdown_flushes_table() {
        let mut app = app();
        app.shutdown();
        assert_eq!(app.store.saves.borrow().len(), 1);
    }

    #[test]
    fn inputs_map_per_state() {
        let selection = GameConfig::default();

        assert_eq!(
            command_for(GameInput::Confirm, GameStatus::NotStarted, selection),
            Some(Command::Start)
        );
        assert_eq!(
            command_for(
                GameInput::Direction(Direction::Right),
                GameStatus::NotStarted,
                selection
            ),
            Some(Command::SelectDifficulty(Difficulty::Medium))
        );
        assert_eq!(
            command_for(
                GameInput::Direction(Direction::Down),
                GameStatus::NotStarted,
                selection
            ),
            Some(Command::SelectMode(GameMode::Obstacles))
        );
        assert_eq!(
            command_for(
                GameInput::Direction(Direction::Up),
                GameStatus::Running,
                selection
            ),
            Some(Command::Steer(Direction::Up))
        );
        assert_eq!(
            command_for(GameInput::PauseToggle, GameStatus::Paused, selection),
            Some(Command::PauseToggle)
        );
        assert_eq!(
            command_for(GameInput::Confirm, GameStatus::GameOver, selection),
            Some(Command::Restart)
        );
        assert_eq!(
            command_for(GameInput::Menu, GameStatus::GameOver, selection),
            Some(Command::ReturnToMenu)
        );
        assert_eq!(
            command_for(GameInput::PauseToggle, GameStatus::NotStarted, selection),
            None
        );
        assert_eq!(
            command_for(GameInput::Quit, GameStatus::Running, selection),
            None
        );
    }

    #[test]
    fn swipes_only_steer_a_running_game() {
        let selection = GameConfig::default();
        let swipe = GameInput::Swipe(Direction::Right);

        assert_eq!(
            command_for(swipe, GameStatus::Running, selection),
            Some(Command::Steer(Direction::Right))
        );
        for status in [GameStatus::NotStarted, GameStatus::Paused, GameStatus::GameOver] {
            assert_eq!(command_for(swipe, status, selection), None);
        }
    }

    #[test]
    fn swipe_on_start_screen_keeps_selection() {
        let now = Instant::now();
        let mut app = app();

        app.handle_input(GameInput::Swipe(Direction::Right), now);
        app.handle_input(GameInput::Swipe(Direction::Down), now);

        assert_eq!(app.selection(), GameConfig::default());
        assert_eq!(app.status(), GameStatus::NotStarted);
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game-state model and the per-tick transition engine.
//!
//! A [`GameState`] is an immutable snapshot: advancing the game means
//! consuming the current state and producing its successor via
//! [`GameState::next_state`]. Touching a cell enqueues deferred
//! [`Command`] values; a single interpreter applies them in order during the
//! same tick, before input dispatch and movement. Randomness is threaded
//! explicitly as a seeded generator carried inside the state, so identical
//! seeds replay identical games.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use snake_core::{Cell, Command, Direction, GridVector, InputEvent, PlacementError};

pub mod board;
pub mod score;
pub mod snake;

pub use board::Board;
pub use score::Score;
pub use snake::Snake;

use board::MAX_SPAWN_ATTEMPTS;

/// Game-over taunts; one is picked per game when the state is seeded.
const TAUNTS: [&str; 9] = [
    "haha u suck",
    "lol get rekt",
    "lol ur ded",
    "and the apples lived peacefully.",
    "well, that's that.",
    "don't you have work to do?",
    "the apples are safe...for now.",
    "wow...you really suck at this!",
    "sucks to suck.",
];

/// Initial configuration consumed when seeding a new game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Board width in cells.
    pub width: i32,
    /// Board height in cells.
    pub height: i32,
    /// Points awarded per apple.
    pub apple_points: i64,
    /// Growth steps granted per apple.
    pub growth_per_apple: u32,
    /// Apples to eat before the level advances.
    pub apples_per_level: u32,
    /// Ticks a candidate spawn is simulated forward before it is accepted.
    pub safety_lookahead: u32,
    /// Wall-clock interval between driver ticks.
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            apple_points: 100,
            growth_per_apple: 5,
            apples_per_level: 10,
            safety_lookahead: 10,
            tick_interval: Duration::from_millis(100),
        }
    }
}

/// Default level layout: the bounding perimeter plus five plus-shaped
/// obstacles, one large at the center and four smaller at the quarter
/// points. Obstacle arms falling outside the grid are dropped.
#[must_use]
pub fn default_wall_layout(width: i32, height: i32) -> std::collections::HashSet<GridVector> {
    let mut walls = Board::bounding_walls(width, height);
    let center = GridVector::new(width / 2, height / 2);
    place_plus(&mut walls, center, 10);
    for (dx, dy) in [(-10, -10), (10, -10), (-10, 10), (10, 10)] {
        place_plus(&mut walls, center.plus(GridVector::new(dx, dy)), 5);
    }
    walls
}

fn place_plus(walls: &mut std::collections::HashSet<GridVector>, center: GridVector, arm: i32) {
    let _ = walls.insert(center);
    for n in 1..arm {
        for direction in Direction::ALL {
            let _ = walls.insert(center.plus(direction.offset().times(n)));
        }
    }
}

/// Shared handle to the pending-input queue.
///
/// Input producers (a UI thread, a stdin reader) push events asynchronously
/// while the engine pops at most one per tick; the mutex makes the
/// pause-time clear atomic with respect to producers. Clones share the same
/// underlying queue.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    events: Arc<Mutex<VecDeque<InputEvent>>>,
}

impl InputQueue {
    /// Creates a new, empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<InputEvent>> {
        // The queue holds plain data; a poisoned lock is still usable.
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an event to the back of the queue.
    pub fn push(&self, event: InputEvent) {
        self.lock().push_back(event);
    }

    /// Pops the oldest pending event, if any.
    pub fn pop(&self) -> Option<InputEvent> {
        self.lock().pop_front()
    }

    /// Drops every pending event.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// An immutable snapshot of the whole game at one moment in time.
///
/// The snapshot owns its board; successors take ownership of it rather than
/// sharing mutable references. The input queue and the deferred-command
/// queue are threaded from state to state.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    snake: Snake,
    score: Score,
    level: u32,
    apples_remaining: u32,
    done: bool,
    paused: bool,
    taunt: &'static str,
    input: InputQueue,
    deferred: VecDeque<Command>,
    config: GameConfig,
    rng: ChaCha8Rng,
}

impl GameState {
    /// Seeds a fresh game: the default wall layout, a safely placed baby
    /// snake, and one apple on a random empty cell.
    ///
    /// Fails only when the board admits no safe spawn.
    pub fn initial(config: GameConfig, rng: ChaCha8Rng) -> Result<Self, PlacementError> {
        Self::initial_with_queue(config, rng, InputQueue::new())
    }

    fn initial_with_queue(
        config: GameConfig,
        mut rng: ChaCha8Rng,
        input: InputQueue,
    ) -> Result<Self, PlacementError> {
        if config.width < 1 || config.height < 1 {
            return Err(PlacementError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        let mut board = Board::new(
            config.width,
            config.height,
            default_wall_layout(config.width, config.height),
        );
        let snake = board.baby_snake(&mut rng, config.safety_lookahead)?;
        if let Some(position) = random_empty_cell(&board, &snake, &mut rng) {
            let _ = board.put(
                position,
                Cell::Apple {
                    points: config.apple_points,
                    growth: config.growth_per_apple,
                },
            );
        }
        input.clear();
        Ok(Self::assemble(board, snake, config, rng, input))
    }

    /// Builds a state around an explicit board and snake, placing no apple.
    ///
    /// This is how scripted scenarios start from a known configuration
    /// instead of a randomized one.
    #[must_use]
    pub fn start_with(board: Board, snake: Snake, config: GameConfig, rng: ChaCha8Rng) -> Self {
        Self::assemble(board, snake, config, rng, InputQueue::new())
    }

    fn assemble(
        board: Board,
        snake: Snake,
        config: GameConfig,
        mut rng: ChaCha8Rng,
        input: InputQueue,
    ) -> Self {
        let taunt = TAUNTS[rng.gen_range(0..TAUNTS.len())];
        Self {
            board,
            snake,
            score: Score::new(),
            level: 1,
            apples_remaining: config.apples_per_level,
            done: false,
            paused: false,
            taunt,
            input,
            deferred: VecDeque::new(),
            config,
            rng,
        }
    }

    /// The board carried by this snapshot.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The snake carried by this snapshot.
    #[must_use]
    pub const fn snake(&self) -> &Snake {
        &self.snake
    }

    /// The score carried by this snapshot.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Apples left to eat before the level advances.
    #[must_use]
    pub const fn apples_remaining(&self) -> u32 {
        self.apples_remaining
    }

    /// Reports whether the driver should stop.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Reports whether the game is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Taunt chosen for this game's game-over screen.
    #[must_use]
    pub const fn taunt(&self) -> &'static str {
        self.taunt
    }

    /// Configuration this game was seeded with.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shared handle to the pending-input queue; producers keep it across
    /// state transitions, including an [`InputEvent::PlayAgain`] restart.
    #[must_use]
    pub fn input_queue(&self) -> InputQueue {
        self.input.clone()
    }

    /// Queues an input event for upcoming ticks to dispatch.
    pub fn queue_input_event(&self, event: InputEvent) {
        self.input.push(event);
    }

    /// Reports whether the game has been lost, evaluated fresh from the
    /// current snake and board: head out of bounds, head on a wall, or
    /// self-collision.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self.board.in_bounds(self.snake.head())
            || self.board.is_wall(self.snake.head())
            || self.snake.is_crashed_into_self()
    }

    /// Reports whether no further gameplay transitions apply.
    #[must_use]
    pub fn is_terminal_state(&self) -> bool {
        self.is_done() || self.is_game_over()
    }

    /// Reports whether enough apples have been eaten to pass the level.
    #[must_use]
    pub const fn is_level_passed(&self) -> bool {
        self.apples_remaining < 1
    }

    /// Computes the successor state for one tick.
    ///
    /// Order is fixed: touch dispatch, deferred-command flush, level check,
    /// at most one input event, then movement. A level transition skips the
    /// input and movement phases for its tick.
    #[must_use]
    pub fn next_state(self) -> Self {
        let state = self.touch_current_cell();
        let state = state.flush_deferred();
        if !state.is_terminal_state() && state.is_level_passed() {
            return state.next_level();
        }
        let state = state.dispatch_one_input();
        let moved = state.snake.move_forward();
        state.with_snake(moved)
    }

    /// Replaces the snake, unless the state is terminal or paused, in which
    /// case the state is returned unchanged.
    #[must_use]
    pub fn with_snake(self, snake: Snake) -> Self {
        if self.is_terminal_state() || self.paused {
            self
        } else {
            Self { snake, ..self }
        }
    }

    /// Replaces the score, with the same guard as [`GameState::with_snake`].
    #[must_use]
    pub fn with_score(self, score: Score) -> Self {
        if self.is_terminal_state() || self.paused {
            self
        } else {
            Self { score, ..self }
        }
    }

    /// Flips the pause flag, unless the game is done. Entering a pause
    /// drops all in-flight input atomically.
    #[must_use]
    pub fn toggle_paused(self) -> Self {
        if self.done {
            return self;
        }
        let paused = !self.paused;
        if paused {
            self.input.clear();
        }
        Self { paused, ..self }
    }

    /// Marks the game as done; the driver stops after this state.
    #[must_use]
    pub fn mark_done(self) -> Self {
        if self.done {
            self
        } else {
            Self { done: true, ..self }
        }
    }

    fn touch_current_cell(mut self) -> Self {
        if self.is_terminal_state() {
            return self;
        }
        let head = self.snake.head();
        // The terminal guard above keeps the head in bounds here.
        let Ok(cell) = self.board.cell(head) else {
            return self;
        };
        if let Cell::Apple { points, growth } = cell {
            self.deferred.extend([
                Command::RemoveCell { position: head },
                Command::SpawnApple { points, growth },
                Command::AddScore { points },
                Command::GrowSnake { steps: growth },
                Command::ConsumeApple,
            ]);
        }
        self
    }

    fn flush_deferred(mut self) -> Self {
        while let Some(command) = self.deferred.pop_front() {
            self = apply_command(self, command);
        }
        self
    }

    fn next_level(mut self) -> Self {
        self.level += 1;
        self.apples_remaining = self.config.apples_per_level;
        self
    }

    fn dispatch_one_input(self) -> Self {
        match self.input.pop() {
            Some(event) => apply_input(self, event),
            None => self,
        }
    }

    fn play_again(self) -> Self {
        match Self::initial_with_queue(self.config, self.rng.clone(), self.input.clone()) {
            Ok(state) => state,
            // The board admits no safe spawn; stay on the game-over screen.
            Err(_) => self,
        }
    }
}

/// Applies one deferred command to the state.
///
/// Commands enqueued before a game over must not fire after one, so
/// terminality is re-checked here rather than trusted from enqueue time.
fn apply_command(mut state: GameState, command: Command) -> GameState {
    if state.is_terminal_state() {
        return state;
    }
    match command {
        Command::RemoveCell { position } => {
            let _ = state.board.remove(position);
        }
        Command::SpawnApple { points, growth } => {
            if let Some(position) = random_empty_cell(&state.board, &state.snake, &mut state.rng) {
                let _ = state.board.put(position, Cell::Apple { points, growth });
            }
        }
        Command::AddScore { points } => {
            let score = state.score.plus(points);
            state = state.with_score(score);
        }
        Command::GrowSnake { steps } => {
            state.snake = state.snake.grow_by(steps);
        }
        Command::ConsumeApple => {
            state.apples_remaining = state.apples_remaining.saturating_sub(1);
        }
    }
    state
}

/// Applies one input event's guarded handler to the state.
fn apply_input(state: GameState, event: InputEvent) -> GameState {
    match event {
        InputEvent::MoveUp
        | InputEvent::MoveDown
        | InputEvent::MoveLeft
        | InputEvent::MoveRight => {
            if state.is_terminal_state() || state.is_paused() {
                return state;
            }
            let Some(direction) = event.direction() else {
                return state;
            };
            let turned = state.snake.with_direction(direction);
            state.with_snake(turned)
        }
        InputEvent::TogglePaused => state.toggle_paused(),
        InputEvent::PlayAgain => {
            if state.is_game_over() {
                state.play_again()
            } else {
                state
            }
        }
        InputEvent::QuitGame => state.mark_done(),
    }
}

/// Samples a random cell that is empty on the board and not occupied by the
/// snake. Gives up after the spawn retry budget, which only happens when
/// the snake has nearly filled the board.
fn random_empty_cell(board: &Board, snake: &Snake, rng: &mut impl Rng) -> Option<GridVector> {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let position = board.random_position(rng);
        if board.is_empty_cell(position) && !snake.contains(position) {
            return Some(position);
        }
    }
    None
}

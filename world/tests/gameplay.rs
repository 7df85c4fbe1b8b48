use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_core::{Cell, Direction, GridVector, InputEvent, PlacementError};
use snake_world::{Board, GameConfig, GameState, Snake};

#[test]
fn eating_an_apple_scores_grows_and_respawns() {
    let mut state = eastbound_game(GridVector::new(5, 5), Some(GridVector::new(7, 5)));

    // Two ticks put the head on the apple; the third consumes it.
    state = state.next_state();
    state = state.next_state();
    assert_eq!(state.snake().head(), GridVector::new(7, 5));
    state = state.next_state();

    assert_eq!(state.snake().head(), GridVector::new(8, 5));
    assert_eq!(state.score().points(), 100);
    assert_eq!(state.snake().growth_steps_remaining(), 4);
    assert_eq!(state.snake().len(), 3);
    assert_eq!(state.board().apple_count(), 1, "a new apple must respawn");
    assert!(!state.is_game_over());
}

#[test]
fn respawned_apple_lands_on_an_empty_cell() {
    let mut state = eastbound_game(GridVector::new(2, 5), Some(GridVector::new(4, 5)));
    for _ in 0..3 {
        state = state.next_state();
    }
    let (position, _) = state
        .board()
        .occupied()
        .find(|(_, cell)| cell.is_apple())
        .expect("one apple on the board");
    assert!(!state.board().is_wall(position));
    assert!(!state.snake().contains(position));
}

#[test]
fn crashing_into_a_wall_freezes_the_game() {
    let mut state = eastbound_game(GridVector::new(5, 5), None);
    for _ in 0..4 {
        state = state.next_state();
    }
    assert!(state.is_game_over());
    assert_eq!(state.snake().head(), GridVector::new(9, 5));

    // Further ticks leave the lost game untouched.
    let score = state.score();
    for _ in 0..5 {
        state = state.next_state();
    }
    assert!(state.is_game_over());
    assert_eq!(state.snake().head(), GridVector::new(9, 5));
    assert_eq!(state.score(), score);
    assert!(!state.taunt().is_empty());
}

#[test]
fn play_again_recovers_from_a_lost_game() {
    let mut state = eastbound_game(GridVector::new(5, 5), None);
    for _ in 0..4 {
        state = state.next_state();
    }
    assert!(state.is_game_over());

    state.queue_input_event(InputEvent::PlayAgain);
    state = state.next_state();

    assert!(!state.is_game_over());
    assert!(!state.is_done());
    assert_eq!(state.score().points(), 0);
    assert_eq!(state.snake().len(), 2);
    assert_eq!(state.board().apple_count(), 1);
}

#[test]
fn pausing_discards_every_queued_event() {
    let state = eastbound_game(GridVector::new(3, 5), None);
    state.queue_input_event(InputEvent::TogglePaused);
    state.queue_input_event(InputEvent::MoveUp);
    state.queue_input_event(InputEvent::MoveDown);
    state.queue_input_event(InputEvent::MoveLeft);

    let state = state.next_state();

    assert!(state.is_paused());
    assert!(
        state.input_queue().is_empty(),
        "entering a pause must drop already queued events"
    );
    assert_eq!(state.snake().direction(), Direction::East);
}

#[test]
fn exactly_one_apple_exists_throughout_a_seeded_game() {
    let mut state = GameState::initial(GameConfig::default(), ChaCha8Rng::seed_from_u64(21))
        .expect("default board has safe spawns");
    for _ in 0..50 {
        state = state.next_state();
        assert_eq!(state.board().apple_count(), 1);
    }
}

#[test]
fn seeding_a_zero_area_board_fails_with_an_error() {
    for (width, height) in [(0, 0), (0, 40), (40, -1)] {
        let config = GameConfig {
            width,
            height,
            ..GameConfig::default()
        };
        let error = GameState::initial(config, ChaCha8Rng::seed_from_u64(1))
            .expect_err("boards without area must be rejected");
        assert_eq!(error, PlacementError::InvalidDimensions { width, height });
    }
}

#[test]
fn turning_back_on_yourself_is_rejected() {
    let mut state = eastbound_game(GridVector::new(3, 5), None);
    state.queue_input_event(InputEvent::MoveLeft);
    state = state.next_state();
    assert_eq!(state.snake().direction(), Direction::East);
    assert_eq!(state.snake().head(), GridVector::new(4, 5));
}

/// A 10x10 bounded board with an eastbound two-segment snake and, when
/// requested, a 100-point growth-5 apple.
fn eastbound_game(head: GridVector, apple: Option<GridVector>) -> GameState {
    let mut board = Board::new(10, 10, Board::bounding_walls(10, 10));
    if let Some(position) = apple {
        board
            .put(
                position,
                Cell::Apple {
                    points: 100,
                    growth: 5,
                },
            )
            .expect("apple position is in bounds");
    }
    let tail = head.plus(GridVector::new(-1, 0));
    let snake = Snake::baby(Direction::East, head, tail);
    let config = GameConfig {
        width: 10,
        height: 10,
        safety_lookahead: 2,
        ..GameConfig::default()
    };
    GameState::start_with(board, snake, config, ChaCha8Rng::seed_from_u64(7))
}

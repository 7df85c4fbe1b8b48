#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for the game's display adapters.
//!
//! Backends implement [`RenderSink`] and receive draw calls in a fixed
//! order from [`present`], so every adapter shows the same frame for the
//! same state.

use anyhow::Result as AnyResult;
use snake_core::{Cell, GridVector, GAME_OVER_HEADLINE};
use snake_world::{GameState, Score};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Fixed palette shared by all display adapters.
pub mod palette {
    use super::Color;

    /// Frame clear color.
    pub const BACKGROUND: Color = Color::from_rgb_u8(0, 0, 0);
    /// Grid lines drawn over the play area.
    pub const GRID: Color = Color::from_rgb_u8(0, 0, 0);
    /// Wall cells.
    pub const WALL: Color = Color::from_rgb_u8(0, 0, 255);
    /// Apple cells.
    pub const APPLE: Color = Color::from_rgb_u8(255, 0, 0);
    /// The snake's head segment.
    pub const SNAKE_HEAD: Color = Color::from_rgb_u8(0, 255, 0);
    /// The snake's tail segments.
    pub const SNAKE_TAIL: Color = Color::from_rgb_u8(0, 178, 0);
    /// The score readout.
    pub const SCORE: Color = Color::from_rgb_u8(255, 255, 0);
    /// The game-over headline.
    pub const GAME_OVER: Color = Color::from_rgb_u8(255, 0, 0);
    /// The game-over taunt line.
    pub const TAUNT: Color = Color::from_rgb_u8(0, 255, 255);
}

/// Display backend capable of presenting game frames.
///
/// Draw calls arrive between an implicit frame start and the final
/// [`RenderSink::draw_score`]; a backend that buffers may flush there.
pub trait RenderSink {
    /// Selects the color used by subsequent draw calls.
    fn set_color(&mut self, color: Color) -> AnyResult<()>;

    /// Fills the cell at the given grid position with the current color.
    fn draw_cell_at(&mut self, position: GridVector) -> AnyResult<()>;

    /// Draws the score readout. This is always the final call of a frame.
    fn draw_score(&mut self, score: Score) -> AnyResult<()>;

    /// Draws the game-over headline and taunt.
    fn draw_game_over(&mut self, headline: &str, taunt: &str) -> AnyResult<()>;

    /// Draws grid lines over the play area. Optional; defaults to a no-op.
    fn draw_grid(&mut self, width: i32, height: i32) -> AnyResult<()> {
        let _ = (width, height);
        Ok(())
    }
}

/// Presents one frame of the given state on the sink.
///
/// A lost game shows only the game-over message and the score. A live game
/// draws board cells first, then the snake tail, then the head, then the
/// grid, and finishes with the score.
pub fn present<S: RenderSink>(state: &GameState, sink: &mut S) -> AnyResult<()> {
    if state.is_game_over() {
        sink.set_color(palette::GAME_OVER)?;
        sink.draw_game_over(GAME_OVER_HEADLINE, state.taunt())?;
        sink.set_color(palette::SCORE)?;
        sink.draw_score(state.score())?;
        return Ok(());
    }

    for (position, cell) in state.board().occupied() {
        let color = match cell {
            Cell::Wall => palette::WALL,
            Cell::Apple { .. } => palette::APPLE,
            Cell::Empty => continue,
        };
        sink.set_color(color)?;
        sink.draw_cell_at(position)?;
    }

    sink.set_color(palette::SNAKE_TAIL)?;
    for segment in state.snake().tail() {
        sink.draw_cell_at(segment)?;
    }
    sink.set_color(palette::SNAKE_HEAD)?;
    sink.draw_cell_at(state.snake().head())?;

    sink.set_color(palette::GRID)?;
    sink.draw_grid(state.board().width(), state.board().height())?;

    sink.set_color(palette::SCORE)?;
    sink.draw_score(state.score())
}

#[cfg(test)]
mod tests {
    use super::{palette, present, Color, RenderSink};
    use anyhow::Result as AnyResult;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use snake_core::{Cell, Direction, GridVector};
    use snake_world::{Board, GameConfig, GameState, Score, Snake};

    #[derive(Debug, PartialEq)]
    enum Call {
        SetColor(Color),
        Cell(GridVector),
        Score(i64),
        GameOver(String, String),
        Grid(i32, i32),
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<Call>,
    }

    impl RenderSink for RecordingSink {
        fn set_color(&mut self, color: Color) -> AnyResult<()> {
            self.calls.push(Call::SetColor(color));
            Ok(())
        }

        fn draw_cell_at(&mut self, position: GridVector) -> AnyResult<()> {
            self.calls.push(Call::Cell(position));
            Ok(())
        }

        fn draw_score(&mut self, score: Score) -> AnyResult<()> {
            self.calls.push(Call::Score(score.points()));
            Ok(())
        }

        fn draw_game_over(&mut self, headline: &str, taunt: &str) -> AnyResult<()> {
            self.calls
                .push(Call::GameOver(headline.to_owned(), taunt.to_owned()));
            Ok(())
        }

        fn draw_grid(&mut self, width: i32, height: i32) -> AnyResult<()> {
            self.calls.push(Call::Grid(width, height));
            Ok(())
        }
    }

    fn live_state() -> GameState {
        let mut board = Board::new(10, 10, Board::bounding_walls(10, 10));
        board
            .put(
                GridVector::new(7, 5),
                Cell::Apple {
                    points: 100,
                    growth: 5,
                },
            )
            .expect("in bounds");
        let snake = Snake::baby(
            Direction::East,
            GridVector::new(5, 5),
            GridVector::new(4, 5),
        );
        let config = GameConfig {
            width: 10,
            height: 10,
            safety_lookahead: 2,
            ..GameConfig::default()
        };
        GameState::start_with(board, snake, config, ChaCha8Rng::seed_from_u64(5))
    }

    #[test]
    fn live_frame_draws_cells_snake_grid_then_score() {
        let state = live_state();
        let mut sink = RecordingSink::default();
        present(&state, &mut sink).expect("recording sink never fails");

        assert!(sink
            .calls
            .contains(&Call::SetColor(palette::WALL)));
        assert!(sink.calls.contains(&Call::Cell(GridVector::new(7, 5))));
        assert!(sink.calls.contains(&Call::Cell(GridVector::new(5, 5))));

        let head_index = sink
            .calls
            .iter()
            .position(|call| *call == Call::Cell(GridVector::new(5, 5)))
            .expect("head cell drawn");
        let tail_index = sink
            .calls
            .iter()
            .position(|call| *call == Call::Cell(GridVector::new(4, 5)))
            .expect("tail cell drawn");
        assert!(tail_index < head_index, "tail draws before the head");

        assert_eq!(sink.calls.last(), Some(&Call::Score(0)));
        assert!(sink.calls.contains(&Call::Grid(10, 10)));
        assert!(!sink
            .calls
            .iter()
            .any(|call| matches!(call, Call::GameOver(..))));
    }

    #[test]
    fn lost_frame_draws_only_message_and_score() {
        let mut state = live_state();
        for _ in 0..4 {
            state = state.next_state();
        }
        assert!(state.is_game_over());

        let mut sink = RecordingSink::default();
        present(&state, &mut sink).expect("recording sink never fails");

        assert_eq!(sink.calls.len(), 4);
        assert_eq!(sink.calls[0], Call::SetColor(palette::GAME_OVER));
        assert!(matches!(&sink.calls[1], Call::GameOver(headline, taunt)
            if headline == "Game Over!" && !taunt.is_empty()));
        assert_eq!(sink.calls[2], Call::SetColor(palette::SCORE));
        assert!(matches!(sink.calls[3], Call::Score(_)));
    }

    #[test]
    fn byte_colors_map_onto_unit_channels() {
        let color = Color::from_rgb_u8(255, 0, 51);
        assert_eq!(color.red, 1.0);
        assert_eq!(color.green, 0.0);
        assert!((color.blue - 0.2).abs() < 1e-3);
        assert_eq!(color.alpha, 1.0);
    }
}

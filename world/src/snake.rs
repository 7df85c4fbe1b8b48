//! The player snake as an immutable segment chain.

use std::collections::VecDeque;

use snake_core::{Direction, GridVector};

/// The snake: a head, an ordered tail, a travel direction, and a pending
/// growth counter.
///
/// Every operation returns a new snake value; nothing mutates in place. The
/// tail is ordered front-to-back by distance from the head and holds no
/// duplicate positions while the snake is alive — self-collision is exactly
/// the head appearing in the tail, checked once per tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    direction: Direction,
    head: GridVector,
    tail: VecDeque<GridVector>,
    growth_steps_remaining: u32,
}

impl Snake {
    /// Creates the minimal two-segment snake used to seed a new game.
    #[must_use]
    pub fn baby(direction: Direction, head: GridVector, tail: GridVector) -> Self {
        Self {
            direction,
            head,
            tail: VecDeque::from([tail]),
            growth_steps_remaining: 0,
        }
    }

    /// Direction the snake is currently traveling.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Position of the snake's head.
    #[must_use]
    pub const fn head(&self) -> GridVector {
        self.head
    }

    /// Tail positions in order of increasing distance from the head.
    pub fn tail(&self) -> impl Iterator<Item = GridVector> + '_ {
        self.tail.iter().copied()
    }

    /// Total number of segments, head included.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Growth steps the snake has yet to go through.
    #[must_use]
    pub const fn growth_steps_remaining(&self) -> u32 {
        self.growth_steps_remaining
    }

    /// Moves the snake one cell forward in its travel direction.
    ///
    /// The old head becomes the nearest tail segment. While the growth
    /// counter is positive the far end of the tail is kept (and the counter
    /// decrements); otherwise the far end is dropped, keeping the length
    /// constant.
    #[must_use]
    pub fn move_forward(&self) -> Self {
        let mut tail = self.tail.clone();
        tail.push_front(self.head);
        let growth_steps_remaining = if self.growth_steps_remaining > 0 {
            self.growth_steps_remaining - 1
        } else {
            let _ = tail.pop_back();
            0
        };
        Self {
            direction: self.direction,
            head: self.head.plus(self.direction.offset()),
            tail,
            growth_steps_remaining,
        }
    }

    /// Steers the snake toward `direction` if the turn makes sense.
    ///
    /// Only turns perpendicular to the current direction are accepted; a
    /// repeat or a 180° reversal returns the snake unchanged. An accepted
    /// turn may still drive the snake into a game over — that is the
    /// player's problem, not this method's.
    #[must_use]
    pub fn with_direction(&self, direction: Direction) -> Self {
        if self.direction.is_perpendicular_to(direction) {
            Self {
                direction,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }

    /// Directs the snake to grow by `steps` segments over the coming moves.
    ///
    /// Zero steps is a no-op.
    #[must_use]
    pub fn grow_by(&self, steps: u32) -> Self {
        if steps == 0 {
            self.clone()
        } else {
            Self {
                growth_steps_remaining: self.growth_steps_remaining + steps,
                ..self.clone()
            }
        }
    }

    /// Reports whether the snake occupies the given position, head included.
    #[must_use]
    pub fn contains(&self, position: GridVector) -> bool {
        self.head == position || self.tail.contains(&position)
    }

    /// Reports whether the snake has crashed into its own tail.
    #[must_use]
    pub fn is_crashed_into_self(&self) -> bool {
        self.tail.contains(&self.head)
    }

    /// Lazy sequence of `n + 1` snakes: this one followed by each successive
    /// [`Snake::move_forward`] result.
    ///
    /// Used by the safe-spawn lookahead to simulate straight-line movement.
    pub fn moves(&self, n: u32) -> impl Iterator<Item = Snake> {
        std::iter::successors(Some(self.clone()), |snake| Some(snake.move_forward()))
            .take(n as usize + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::Snake;
    use snake_core::{Direction, GridVector};

    fn eastbound_baby() -> Snake {
        Snake::baby(
            Direction::East,
            GridVector::new(5, 5),
            GridVector::new(4, 5),
        )
    }

    #[test]
    fn move_advances_head_by_direction_offset() {
        let snake = eastbound_baby();
        let moved = snake.move_forward();
        assert_eq!(moved.head(), snake.head().plus(Direction::East.offset()));
    }

    #[test]
    fn move_threads_the_old_head_into_the_tail() {
        let moved = eastbound_baby().move_forward();
        let tail: Vec<GridVector> = moved.tail().collect();
        assert_eq!(tail, vec![GridVector::new(5, 5)]);
    }

    #[test]
    fn growth_keeps_the_tail_end_and_decrements_the_counter() {
        let snake = eastbound_baby().grow_by(3);
        let moved = snake.move_forward();
        assert_eq!(moved.len(), snake.len() + 1);
        assert_eq!(moved.growth_steps_remaining(), 2);
    }

    #[test]
    fn move_without_growth_preserves_length() {
        let snake = eastbound_baby();
        let moved = snake.move_forward();
        assert_eq!(moved.len(), snake.len());
        assert_eq!(moved.growth_steps_remaining(), 0);
    }

    #[test]
    fn perpendicular_turns_are_accepted() {
        let snake = eastbound_baby();
        assert_eq!(
            snake.with_direction(Direction::South).direction(),
            Direction::South
        );
        assert_eq!(
            snake.with_direction(Direction::North).direction(),
            Direction::North
        );
    }

    #[test]
    fn reversal_and_repeat_turns_are_ignored() {
        let snake = eastbound_baby();
        assert_eq!(snake.with_direction(Direction::West), snake);
        assert_eq!(snake.with_direction(Direction::East), snake);
    }

    #[test]
    fn grow_by_zero_is_a_no_op() {
        let snake = eastbound_baby();
        assert_eq!(snake.grow_by(0), snake);
    }

    #[test]
    fn contains_covers_head_and_tail() {
        let snake = eastbound_baby();
        assert!(snake.contains(GridVector::new(5, 5)));
        assert!(snake.contains(GridVector::new(4, 5)));
        assert!(!snake.contains(GridVector::new(6, 5)));
    }

    #[test]
    fn circling_back_onto_the_tail_is_a_self_collision() {
        // Grow enough that no segment is dropped, then walk a tight square
        // back onto the starting cell, which is still part of the tail.
        let snake = eastbound_baby()
            .grow_by(4)
            .move_forward()
            .with_direction(Direction::South)
            .move_forward()
            .with_direction(Direction::West)
            .move_forward()
            .with_direction(Direction::North)
            .move_forward();
        assert_eq!(snake.head(), GridVector::new(5, 5));
        assert!(snake.is_crashed_into_self());
    }

    #[test]
    fn baby_snake_is_not_self_collided() {
        assert!(!eastbound_baby().is_crashed_into_self());
    }

    #[test]
    fn moves_yields_n_plus_one_states_and_is_restartable() {
        let snake = eastbound_baby();
        assert_eq!(snake.moves(10).count(), 11);
        assert_eq!(snake.moves(0).count(), 1);

        let heads: Vec<GridVector> = snake.moves(2).map(|s| s.head()).collect();
        assert_eq!(
            heads,
            vec![
                GridVector::new(5, 5),
                GridVector::new(6, 5),
                GridVector::new(7, 5)
            ]
        );
        // The sequence restarts from the original snake each time.
        assert_eq!(snake.moves(2).map(|s| s.head()).collect::<Vec<_>>(), heads);
    }
}

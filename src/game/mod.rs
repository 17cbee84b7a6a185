mod direction;
pub(crate) mod grid;
mod snake;
pub(crate) use self::direction::Direction;
use self::grid::{Bounds, Cell, Grid};
use self::snake::Snake;
use crate::consts;
use rand::Rng;
use std::fmt;

/// Board size used for actual play
const BOARD_BOUNDS: Bounds = Bounds {
    width: consts::BOARD_WIDTH,
    height: consts::BOARD_HEIGHT,
};

/// The complete state of one game: the board, the snake on it, and the source
/// of randomness for apple placement
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    snake: Snake,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(rng: R) -> Game<R> {
        Game::with_bounds(BOARD_BOUNDS, rng)
    }

    pub(crate) fn with_bounds(bounds: Bounds, rng: R) -> Game<R> {
        let mut game = Game {
            rng,
            grid: Grid::new(bounds),
            snake: Snake::new(bounds.center()),
        };
        game.reset();
        game
    }

    /// Start over with a one-segment snake in the center of the board and a
    /// single apple
    pub(crate) fn reset(&mut self) {
        self.grid.reset();
        self.snake = Snake::new(self.grid.bounds().center());
        self.grid.set(self.snake.head(), Cell::Head);
        let apple = self.grid.place_apple(&mut self.rng);
        tracing::debug!(?apple, "Placed initial apple");
    }

    /// Advance the game by one tick with the player steering in `requested`.
    ///
    /// The order of operations is significant: an apple is eaten before the
    /// tail is trimmed, and the tail is trimmed before checking for a
    /// collision with the body, so the head may move into the cell the tail
    /// is just leaving.
    pub(crate) fn step(&mut self, requested: Direction) -> StepOutcome {
        let direction = self.snake.resolve(requested);
        let Some(head) = direction.advance(self.snake.head(), self.grid.bounds()) else {
            return StepOutcome::Dead(Death::Wall);
        };
        self.snake.push_head(head);
        if self.grid.get(head) == Cell::Apple {
            self.snake.grow();
            let apple = self.grid.place_apple(&mut self.rng);
            tracing::debug!(
                target_len = self.snake.target_len(),
                ?apple,
                "Snake ate an apple"
            );
            if apple.is_none() {
                self.stamp_snake();
                return StepOutcome::BoardFull;
            }
        } else if self.snake.len() > self.snake.target_len() {
            if let Some(tail) = self.snake.pop_tail() {
                self.grid.set(tail, Cell::Empty);
            }
        }
        if self.grid.get(head) == Cell::Body {
            return StepOutcome::Dead(Death::SelfCollision);
        }
        self.stamp_snake();
        StepOutcome::Alive
    }
}

impl<R> Game<R> {
    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    /// The player's score, i.e., the snake's target length
    pub(crate) fn score(&self) -> usize {
        self.snake.target_len()
    }

    fn stamp_snake(&mut self) {
        let head = self.snake.head();
        for &pos in self.snake.segments() {
            let cell = if pos == head { Cell::Head } else { Cell::Body };
            self.grid.set(pos, cell);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StepOutcome {
    Alive,
    Dead(Death),
    /// The snake ate an apple and there is no empty cell left to put the
    /// next one in
    BoardFull,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Death {
    /// The snake tried to move off the edge of the board
    Wall,
    /// The snake's head moved onto its body
    SelfCollision,
}

impl fmt::Display for Death {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Death::Wall => write!(f, "hit the wall"),
            Death::SelfCollision => write!(f, "ran into itself"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Position;
    use rstest::rstest;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn pos(x: u16, y: u16) -> Position {
        Position::new(x, y)
    }

    /// Build a game on the standard board with the snake occupying `cells`
    /// (tail first), the given target length, and an apple at `apple` (or no
    /// apple at all)
    fn game_with(
        cells: &[(u16, u16)],
        target_len: usize,
        apple: Option<(u16, u16)>,
    ) -> Game<ChaCha12Rng> {
        let mut game = Game::new(ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.grid.reset();
        game.snake = Snake {
            segments: cells.iter().map(|&(x, y)| pos(x, y)).collect(),
            target_len,
        };
        game.stamp_snake();
        if let Some((x, y)) = apple {
            game.grid.set(pos(x, y), Cell::Apple);
        }
        game
    }

    fn segments(game: &Game<ChaCha12Rng>) -> Vec<(u16, u16)> {
        game.snake.segments().iter().map(|p| (p.x, p.y)).collect()
    }

    fn assert_consistent(game: &Game<ChaCha12Rng>) {
        let census = game.grid.census();
        assert_eq!(census[Cell::Head], 1);
        assert_eq!(census[Cell::Body] + census[Cell::Head], game.snake.len());
        assert!(census[Cell::Apple] <= 1, "more than one apple on the board");
        assert_eq!(game.grid.get(game.snake.head()), Cell::Head);
        for (a, b) in game.snake.segments().iter().zip(game.snake.segments().iter().skip(1)) {
            assert!(
                Direction::between(*a, *b).is_some(),
                "segments {a:?} and {b:?} are not adjacent"
            );
        }
    }

    #[test]
    fn new_game() {
        let game = Game::new(ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(segments(&game), [(10, 7)]);
        assert_eq!(game.score(), 1);
        let census = game.grid().census();
        assert_eq!(census[Cell::Head], 1);
        assert_eq!(census[Cell::Body], 0);
        assert_eq!(census[Cell::Apple], 1);
        assert_eq!(census[Cell::Empty], 298);
    }

    #[test]
    fn reset_after_play() {
        let mut game = game_with(&[(3, 3), (4, 3), (5, 3)], 8, Some((0, 0)));
        game.reset();
        assert_eq!(segments(&game), [(10, 7)]);
        assert_eq!(game.score(), 1);
        assert_consistent(&game);
        assert_eq!(game.grid().census()[Cell::Apple], 1);
    }

    #[test]
    fn move_right_three_times() {
        let mut game = game_with(&[(10, 7)], 1, None);
        for expected in [(11, 7), (12, 7), (13, 7)] {
            assert_eq!(game.step(Direction::East), StepOutcome::Alive);
            assert_eq!(segments(&game), [expected]);
            assert_eq!(game.grid().get(pos(10, 7)), Cell::Empty);
            assert_consistent(&game);
        }
        assert_eq!(game.score(), 1);
    }

    #[rstest]
    #[case(&[(0, 7)], Direction::West)]
    #[case(&[(19, 7)], Direction::East)]
    #[case(&[(4, 0)], Direction::North)]
    #[case(&[(4, 14)], Direction::South)]
    #[case(&[(1, 0), (0, 0)], Direction::West)]
    #[case(&[(0, 1), (0, 0)], Direction::North)]
    #[case(&[(17, 14), (18, 14), (19, 14)], Direction::South)]
    fn leaving_the_board(#[case] cells: &[(u16, u16)], #[case] requested: Direction) {
        let mut game = game_with(cells, cells.len(), Some((5, 5)));
        let before = game.clone();
        assert_eq!(game.step(requested), StepOutcome::Dead(Death::Wall));
        assert_eq!(game, before);
    }

    #[test]
    fn reversal_is_ignored() {
        let mut game = game_with(&[(8, 7), (9, 7), (10, 7)], 3, None);
        for expected_head in [(11, 7), (12, 7), (13, 7), (14, 7)] {
            assert_eq!(game.step(Direction::West), StepOutcome::Alive);
            assert_eq!(game.snake.head(), pos(expected_head.0, expected_head.1));
            assert_consistent(&game);
        }
        assert_eq!(segments(&game), [(12, 7), (13, 7), (14, 7)]);
    }

    #[test]
    fn reversal_after_perpendicular_turn() {
        let mut game = game_with(&[(9, 7), (10, 7)], 2, None);
        assert_eq!(game.step(Direction::North), StepOutcome::Alive);
        assert_eq!(segments(&game), [(10, 7), (10, 6)]);
        assert_eq!(game.step(Direction::West), StepOutcome::Alive);
        assert_eq!(segments(&game), [(10, 6), (9, 6)]);
        assert_consistent(&game);
    }

    #[test]
    fn single_segment_can_turn_around() {
        let mut game = game_with(&[(10, 7)], 1, None);
        assert_eq!(game.step(Direction::East), StepOutcome::Alive);
        assert_eq!(game.step(Direction::West), StepOutcome::Alive);
        assert_eq!(segments(&game), [(10, 7)]);
    }

    #[test]
    fn eat_apple() {
        let mut game = game_with(&[(10, 7)], 1, Some((11, 7)));
        assert_eq!(game.step(Direction::East), StepOutcome::Alive);
        assert_eq!(game.score(), 6);
        assert_eq!(segments(&game), [(10, 7), (11, 7)]);
        assert_eq!(game.grid().get(pos(10, 7)), Cell::Body);
        assert_eq!(game.grid().get(pos(11, 7)), Cell::Head);
        assert_eq!(game.grid().census()[Cell::Apple], 1);
        assert_consistent(&game);
    }

    #[test]
    fn grow_to_target_then_hold() {
        let mut game = game_with(&[(2, 7)], 1, Some((3, 7)));
        assert_eq!(game.step(Direction::East), StepOutcome::Alive);
        // Keep the new apple out of the way of the snake's path
        let apple = game
            .grid()
            .bounds()
            .positions()
            .find(|&p| game.grid().get(p) == Cell::Apple)
            .unwrap();
        game.grid.set(apple, Cell::Empty);
        game.grid.set(pos(0, 0), Cell::Apple);
        let mut lengths = Vec::new();
        for _ in 0..8 {
            assert_eq!(game.step(Direction::East), StepOutcome::Alive);
            lengths.push(game.snake.len());
        }
        assert_eq!(lengths, [3, 4, 5, 6, 6, 6, 6, 6]);
        assert_consistent(&game);
    }

    #[test]
    fn eating_skips_trim_when_at_target() {
        let mut game = game_with(&[(8, 7), (9, 7), (10, 7)], 3, Some((11, 7)));
        assert_eq!(game.step(Direction::East), StepOutcome::Alive);
        assert_eq!(segments(&game), [(8, 7), (9, 7), (10, 7), (11, 7)]);
        assert_eq!(game.score(), 8);
    }

    #[test]
    fn follow_own_tail() {
        let mut game = game_with(&[(10, 7), (11, 7), (11, 8), (10, 8)], 4, None);
        assert_eq!(game.step(Direction::North), StepOutcome::Alive);
        assert_eq!(segments(&game), [(11, 7), (11, 8), (10, 8), (10, 7)]);
        assert_consistent(&game);
        // Keep chasing the tail around the square
        for _ in 0..8 {
            let requested = game.snake.direction().unwrap();
            let next = match requested {
                Direction::North => Direction::East,
                Direction::East => Direction::South,
                Direction::South => Direction::West,
                Direction::West => Direction::North,
            };
            assert_eq!(game.step(next), StepOutcome::Alive);
            assert_consistent(&game);
        }
    }

    #[test]
    fn tail_is_not_vacated_while_growing() {
        let mut game = game_with(&[(10, 7), (11, 7), (11, 8), (10, 8)], 6, None);
        assert_eq!(
            game.step(Direction::North),
            StepOutcome::Dead(Death::SelfCollision)
        );
    }

    #[test]
    fn run_into_body() {
        let mut game = game_with(&[(9, 7), (10, 7), (11, 7), (11, 8), (10, 8)], 5, None);
        assert_eq!(
            game.step(Direction::North),
            StepOutcome::Dead(Death::SelfCollision)
        );
    }

    #[test]
    fn fill_the_board() {
        let bounds = Bounds {
            width: 3,
            height: 1,
        };
        let mut game = Game::with_bounds(bounds, ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.grid.reset();
        game.snake = Snake {
            segments: VecDeque::from([pos(0, 0)]),
            target_len: 1,
        };
        game.stamp_snake();
        game.grid.set(pos(1, 0), Cell::Apple);
        assert_eq!(game.step(Direction::East), StepOutcome::Alive);
        assert_eq!(game.grid().get(pos(2, 0)), Cell::Apple);
        assert_eq!(game.step(Direction::East), StepOutcome::BoardFull);
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.grid().census()[Cell::Empty], 0);
        assert_eq!(game.grid().get(pos(2, 0)), Cell::Head);
    }

    #[test]
    fn random_walk_keeps_board_consistent() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFF);
        for _ in 0..20 {
            let mut game = Game::new(ChaCha12Rng::seed_from_u64(rng.random()));
            loop {
                let before_len = game.snake.len();
                let before_score = game.score();
                let requested = match rng.random_range(0..4) {
                    0 => Direction::North,
                    1 => Direction::East,
                    2 => Direction::South,
                    _ => Direction::West,
                };
                match game.step(requested) {
                    StepOutcome::Alive => {
                        assert_consistent(&game);
                        if game.score() > before_score {
                            assert_eq!(game.score(), before_score + consts::APPLE_REWARD);
                            assert_eq!(game.snake.len(), before_len + 1);
                            assert_eq!(game.grid().census()[Cell::Apple], 1);
                        } else {
                            assert!(
                                game.snake.len() == before_len
                                    || game.snake.len() == before_len + 1,
                                "length changed by more than one"
                            );
                            assert!(game.snake.len() <= game.score());
                        }
                    }
                    StepOutcome::Dead(_) | StepOutcome::BoardFull => break,
                }
            }
        }
    }
}

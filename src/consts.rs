//! Assorted constants & hard-coded configuration
use std::time::Duration;

/// Number of columns on the board
pub(crate) const BOARD_WIDTH: u16 = 20;

/// Number of rows on the board
pub(crate) const BOARD_HEIGHT: u16 = 15;

/// Time budget for a single tick of the game loop.  Whatever part of it is
/// not spent on input, update, and drawing is slept away.
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(70);

/// How long to wait after the snake dies before discarding buffered input, so
/// that held-down keys don't immediately restart the game
pub(crate) const SETTLE_PERIOD: Duration = Duration::from_millis(200);

/// Target length of a freshly-spawned snake
pub(crate) const INITIAL_TARGET_LENGTH: usize = 1;

/// How much the target length increases upon eating an apple
pub(crate) const APPLE_REWARD: usize = 5;

/// Token for an empty cell (blue)
pub(crate) const EMPTY_TOKEN: &str = "\x1B[37;44m  ";

/// Token for a cell of the snake's body (green)
pub(crate) const BODY_TOKEN: &str = "\x1B[37;42m  ";

/// Token for the apple (red)
pub(crate) const APPLE_TOKEN: &str = "\x1B[37;41m  ";

/// Token for the snake's head (yellow)
pub(crate) const HEAD_TOKEN: &str = "\x1B[37;43m  ";

/// Emitted after the last cell of each row.  The terminal is in raw mode, so
/// a bare `\n` would not return the carriage.
pub(crate) const END_OF_ROW_TOKEN: &str = "\x1B[37;40m\r\n";

/// Shown before the first game
pub(crate) const START_PROMPT: &str = "Press any key to start...";

/// Shown on the game-over screen
pub(crate) const RESTART_PROMPT: &str = "Press any key to restart...";

//! Serialization of the game state into ANSI-colored text
use crate::consts;
use crate::game::grid::{Cell, Grid};
use enum_map::{enum_map, EnumMap};
use std::fmt;
use std::time::Duration;

fn palette() -> EnumMap<Cell, &'static str> {
    enum_map! {
        Cell::Empty => consts::EMPTY_TOKEN,
        Cell::Body => consts::BODY_TOKEN,
        Cell::Apple => consts::APPLE_TOKEN,
        Cell::Head => consts::HEAD_TOKEN,
    }
}

/// One full frame of the playing screen: the board followed by a status line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Frame<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) score: usize,
    pub(crate) length: usize,
    /// How long the previous tick took to process
    pub(crate) lag: Duration,
}

impl Frame<'_> {
    fn status_line(&self) -> String {
        format!(
            "<<Score: {} | Length: {} | Lag: {}ms>>",
            self.score,
            self.length,
            self.lag.as_millis()
        )
    }
}

impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let palette = palette();
        for row in self.grid.rows() {
            for &cell in row {
                f.write_str(palette[cell])?;
            }
            f.write_str(consts::END_OF_ROW_TOKEN)?;
        }
        // Each cell is two columns wide
        let board_width = usize::from(self.grid.bounds().width) * 2;
        let status = self.status_line();
        // Centered over the drawn width of the board, not its cell count
        let indent = board_width.saturating_sub(status.len()) / 2;
        write!(f, "{:indent$}{status}\r\n", "")
    }
}

/// The screen shown over the board once a game has ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameOverScreen {
    pub(crate) won: bool,
    pub(crate) score: usize,
    pub(crate) length: usize,
}

impl fmt::Display for GameOverScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.won {
            f.write_str("You win!\r\n")?;
        } else {
            f.write_str("Game Over!\r\n")?;
        }
        write!(f, "Score: {}\r\n", self.score)?;
        write!(f, "Length: {}\r\n", self.length)?;
        write!(f, "{}\r\n", consts::RESTART_PROMPT)
    }
}

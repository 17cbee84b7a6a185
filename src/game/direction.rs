use super::grid::Bounds;
use crate::command::Command;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that cell lies outside of `bounds`
    pub(super) fn advance(self, pos: Position, bounds: Bounds) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => y = y.checked_sub(1)?,
            Direction::East => x = x.checked_add(1).filter(|&x2| x2 < bounds.width)?,
            Direction::South => y = y.checked_add(1).filter(|&y2| y2 < bounds.height)?,
            Direction::West => x = x.checked_sub(1)?,
        }
        Some(Position { x, y })
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Determine the direction of travel from `from` to the adjacent cell
    /// `to`.  Returns `None` if the cells are not orthogonally adjacent.
    pub(super) fn between(from: Position, to: Position) -> Option<Direction> {
        match (i32::from(to.x) - i32::from(from.x), i32::from(to.y) - i32::from(from.y)) {
            (0, -1) => Some(Direction::North),
            (1, 0) => Some(Direction::East),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }
}

impl TryFrom<Command> for Direction {
    type Error = Command;

    fn try_from(cmd: Command) -> Result<Direction, Command> {
        match cmd {
            Command::Up => Ok(Direction::North),
            Command::Right => Ok(Direction::East),
            Command::Down => Ok(Direction::South),
            Command::Left => Ok(Direction::West),
            other => Err(other),
        }
    }
}

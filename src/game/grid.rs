use enum_map::Enum;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Positions, Rect, Size};

/// The state of a single cell of the board
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
pub(crate) enum Cell {
    #[default]
    Empty,
    Body,
    Apple,
    Head,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Iterate over every position within the bounds in row-major order
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// A fixed-size board of cells.
///
/// `get()` and `set()` do no bounds checking of their own beyond the panic
/// from indexing; callers are expected to only pass positions produced by
/// [`Direction::advance()`][super::direction::Direction::advance] or
/// [`Bounds::positions()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Grid {
    pub(crate) fn new(bounds: Bounds) -> Grid {
        Grid {
            bounds,
            cells: vec![Cell::Empty; bounds.area()],
        }
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Mark every cell as empty
    pub(crate) fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub(crate) fn get(&self, pos: Position) -> Cell {
        self.cells[self.index(pos)]
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        let i = self.index(pos);
        self.cells[i] = cell;
    }

    /// Iterate over the rows of the board from top to bottom
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.bounds.width))
    }

    /// Count how many cells are in each state
    #[cfg(test)]
    pub(crate) fn census(&self) -> enum_map::EnumMap<Cell, usize> {
        let mut counts = enum_map::EnumMap::default();
        for &c in &self.cells {
            counts[c] += 1;
        }
        counts
    }

    /// Turn a uniformly-chosen empty cell into an apple and return its
    /// position.  Returns `None`, leaving the grid untouched, if there are no
    /// empty cells.
    pub(crate) fn place_apple<R: Rng>(&mut self, rng: &mut R) -> Option<Position> {
        let pos = self
            .bounds
            .positions()
            .filter(|&p| self.get(p) == Cell::Empty)
            .choose(rng)?;
        self.set(pos, Cell::Apple);
        Some(pos)
    }

    fn index(&self, pos: Position) -> usize {
        usize::from(pos.y) * usize::from(self.bounds.width) + usize::from(pos.x)
    }
}

use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// Segments are stored tail-first, so the head is always at the back.  There
/// is no stored heading; the direction of travel is derived from the last two
/// segments.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The positions of all of the snake's segments, from tail to head.
    /// Never empty.
    pub(super) segments: VecDeque<Position>,

    /// The length that the snake is growing towards.  This is also the
    /// player's score.
    pub(super) target_len: usize,
}

impl Snake {
    /// Create a new one-segment snake at `head`
    pub(super) fn new(head: Position) -> Snake {
        Snake {
            segments: VecDeque::from([head]),
            target_len: consts::INITIAL_TARGET_LENGTH,
        }
    }

    pub(crate) fn head(&self) -> Position {
        *self
            .segments
            .back()
            .expect("snake should always have at least one segment")
    }

    /// Return the segment immediately behind the head, if any
    pub(super) fn neck(&self) -> Option<Position> {
        self.segments
            .len()
            .checked_sub(2)
            .and_then(|i| self.segments.get(i))
            .copied()
    }

    /// The direction in which the snake last moved, or `None` for a snake
    /// with only one segment
    pub(super) fn direction(&self) -> Option<Direction> {
        Direction::between(self.neck()?, self.head())
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn target_len(&self) -> usize {
        self.target_len
    }

    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    /// Pick the direction to actually move in when the player asks for
    /// `requested`.  A request to double back onto the neck is replaced by
    /// the current direction of travel.
    pub(super) fn resolve(&self, requested: Direction) -> Direction {
        match self.direction() {
            Some(current) if requested == current.reverse() => current,
            _ => requested,
        }
    }

    pub(super) fn push_head(&mut self, pos: Position) {
        self.segments.push_back(pos);
    }

    /// Remove and return the tail segment, unless it is the only one
    pub(super) fn pop_tail(&mut self) -> Option<Position> {
        if self.segments.len() > 1 {
            self.segments.pop_front()
        } else {
            None
        }
    }

    /// Extend the target length in response to eating an apple
    pub(super) fn grow(&mut self) {
        self.target_len += consts::APPLE_REWARD;
    }
}

use std::collections::{HashSet, VecDeque};

use super::types::Cell;

/// Head-first body with an occupancy index kept in lockstep.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    body_set: HashSet<Cell>,
}

impl Snake {
    pub fn new(start: Cell) -> Self {
        Self::from_cells([start])
    }

    /// Builds a body from head-first cells, skipping duplicates.
    pub(crate) fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            body_set: HashSet::new(),
        };
        for cell in cells {
            if snake.body_set.insert(cell) {
                snake.body.push_back(cell);
            }
        }
        snake
    }

    pub fn head(&self) -> Cell {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Cell {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body_set.contains(cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    pub(super) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
        self.body_set.insert(cell);
    }

    pub(super) fn pop_tail(&mut self) -> Option<Cell> {
        let tail = self.body.pop_back()?;
        self.body_set.remove(&tail);
        Some(tail)
    }
}

#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub mines: CellCount,
    pub flag_reveal: FlagRevealRule,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            flag_reveal: FlagRevealRule::Permissive,
        }
    }

    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants a playable board requires: a positive side
    /// length and at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    pub fn with_flag_reveal(mut self, flag_reveal: FlagRevealRule) -> Self {
        self.flag_reveal = flag_reveal;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked(20, 40)
    }
}

/// What revealing a flagged cell does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagRevealRule {
    /// Flags do not block reveal; the flag is cleared and the reveal
    /// proceeds.
    Permissive,
    /// A flagged cell must be unflagged before it can be revealed.
    Blocking,
}

impl Default for FlagRevealRule {
    fn default() -> Self {
        Self::Permissive
    }
}

/// Immutable mine placement, fixed once at board construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// The mask must be square; its dimensions become the board size.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Side length of the square grid.
    pub fn size(&self) -> Coord {
        self.mine_mask.dim().0.try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// On-demand count of mines among the up-to-8 neighbors of `coords`.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count()
            .try_into()
            .unwrap()
    }

    /// Precomputes the whole-board adjacency map: every mine increments the
    /// count of each of its in-bounds neighbors.
    pub fn adjacency_counts(&self) -> Array2<u8> {
        let mut counts: Array2<u8> = Array2::default(self.mine_mask.raw_dim());
        let size = self.size();

        for row in 0..size {
            for col in 0..size {
                if self[(row, col)] {
                    for pos in self.iter_neighbors((row, col)) {
                        counts[pos.to_nd_index()] += 1;
                    }
                }
            }
        }

        counts
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }

    pub fn iter_orthogonal(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_orthogonal(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mine_mask[(row as usize, col as usize)]
    }
}

/// Outcome of a flag or unflag action.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of a reveal action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Cell revealed (or nothing to do), no special consequence.
    Continue,
    /// The target had no adjacent mines; flood expansion revealed every
    /// listed coordinate, the target included.
    Expanded(BTreeSet<Coord2>),
    /// A mine was revealed and the game is lost.
    Detonated,
}

impl RevealOutcome {
    pub const fn is_detonation(&self) -> bool {
        matches!(self, Self::Detonated)
    }
}

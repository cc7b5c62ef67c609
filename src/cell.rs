use serde::{Deserialize, Serialize};

/// Player-visible lifecycle of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed,
    Flagged,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Projection of a single cell for a presentation layer.
///
/// `adjacent_mines` is present only for revealed safe cells (mine cells carry
/// no meaningful count); `is_mine` only once the cell is revealed or the game
/// has ended. Hidden cells never leak their contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub state: CellState,
    pub adjacent_mines: Option<u8>,
    pub is_mine: Option<bool>,
}

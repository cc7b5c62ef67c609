use alloc::collections::{BTreeSet, VecDeque};
use core::num::Saturating;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BoardState {
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Gameplay engine over an immutable mine layout.
///
/// The board exclusively owns every cell; a presentation layer interacts
/// through coordinate-addressed queries and actions only. Mine placement and
/// the adjacency map are fixed at construction, cell visibility is the only
/// state that moves afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    layout: MineLayout,
    adjacency: Array2<u8>,
    grid: Array2<CellState>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    state: BoardState,
    triggered_mine: Option<Coord2>,
    flag_reveal: FlagRevealRule,
}

impl Board {
    pub fn new(layout: MineLayout) -> Result<Self> {
        Self::with_rules(layout, FlagRevealRule::default())
    }

    pub fn with_rules(layout: MineLayout, flag_reveal: FlagRevealRule) -> Result<Self> {
        if layout.total_cells() == 0 {
            return Err(GameError::InvalidSize);
        }
        if layout.safe_cell_count() == 0 {
            return Err(GameError::TooManyMines);
        }

        let adjacency = layout.adjacency_counts();
        let grid = Array2::default(adjacency.raw_dim());

        Ok(Self {
            layout,
            adjacency,
            grid,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
            flag_reveal,
        })
    }

    /// Validates `config`, draws a mine layout from `seed`, and builds the
    /// board: the whole construction pipeline in one call.
    pub fn generate(config: BoardConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let layout = RandomLayoutGenerator::new(seed).generate(config);
        Self::with_rules(layout, config.flag_reveal)
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// True when every non-mine cell has been revealed.
    pub fn is_won(&self) -> bool {
        matches!(self.state, BoardState::Won)
    }

    pub fn size(&self) -> Coord {
        self.layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// `total_mines - flagged_count`; negative when over-flagged. How to
    /// display that is the caller's concern.
    pub fn mines_left(&self) -> isize {
        (self.layout.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Projection of one cell that never exposes hidden mine identities or
    /// counts before reveal (or game end, for mine identities).
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.layout.validate_coords(coords)?;
        let state = self.cell_state(coords);
        let is_mine = self.layout.contains_mine(coords);
        let revealed = matches!(state, CellState::Revealed);
        let exposed = revealed || self.state.is_finished();

        Ok(CellView {
            state,
            adjacent_mines: (revealed && !is_mine).then(|| self.adjacency[coords.to_nd_index()]),
            is_mine: exposed.then_some(is_mine),
        })
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;
        use FlagOutcome::*;

        let coords = self.layout.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(match self.cell_state(coords) {
            Hidden => {
                self.grid[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                Changed
            }
            Flagged | Revealed => NoChange,
        })
    }

    pub fn unflag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;
        use FlagOutcome::*;

        let coords = self.layout.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(match self.cell_state(coords) {
            Flagged => {
                self.grid[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Hidden | Revealed => NoChange,
        })
    }

    /// Opens a cell. Revealing an already revealed cell is a no-op; a
    /// flagged target follows the configured [`FlagRevealRule`].
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use CellState::*;

        let coords = self.layout.validate_coords(coords)?;

        match self.cell_state(coords) {
            Revealed => Ok(RevealOutcome::Continue),
            Flagged if matches!(self.flag_reveal, FlagRevealRule::Blocking) => {
                Ok(RevealOutcome::Continue)
            }
            Flagged => {
                self.check_not_finished()?;
                self.flagged_count -= 1;
                Ok(self.reveal_target(coords))
            }
            Hidden => {
                self.check_not_finished()?;
                Ok(self.reveal_target(coords))
            }
        }
    }

    fn reveal_target(&mut self, coords: Coord2) -> RevealOutcome {
        self.grid[coords.to_nd_index()] = CellState::Revealed;

        if self.layout.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return RevealOutcome::Detonated;
        }

        self.revealed_count += 1;
        let adjacent_mines = self.adjacency[coords.to_nd_index()];
        log::debug!("revealed {:?}, adjacent mines: {}", coords, adjacent_mines);

        let outcome = if adjacent_mines == 0 {
            RevealOutcome::Expanded(self.flood_expand(coords))
        } else {
            RevealOutcome::Continue
        };

        if self.revealed_count == Saturating(self.layout.safe_cell_count()) {
            self.end_game(true);
        } else {
            self.mark_started();
        }

        outcome
    }

    /// Breadth-first expansion through the 4-connected zero region around
    /// `start`. The explicit worklist keeps stack use bounded no matter how
    /// large the connected empty region is.
    fn flood_expand(&mut self, start: Coord2) -> BTreeSet<Coord2> {
        let mut revealed = BTreeSet::from([start]);
        let mut visited: HashSet<Coord2> = HashSet::new();
        visited.insert(start);

        let mut to_visit: VecDeque<Coord2> = self
            .layout
            .iter_orthogonal(start)
            .filter(|&pos| matches!(self.cell_state(pos), CellState::Hidden))
            .collect();
        log::trace!("flood expansion from {:?}, frontier: {:?}", start, to_visit);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            // flagged cells and cells opened earlier in the sweep stay put
            if !matches!(self.cell_state(visit_coords), CellState::Hidden) {
                continue;
            }

            self.grid[visit_coords.to_nd_index()] = CellState::Revealed;
            self.revealed_count += 1;
            revealed.insert(visit_coords);

            let adjacent_mines = self.adjacency[visit_coords.to_nd_index()];
            log::trace!(
                "flood revealed {:?}, adjacent mines: {}",
                visit_coords,
                adjacent_mines
            );

            // only zero cells seed further expansion; numbered border cells
            // are revealed above and stop the walk
            if adjacent_mines == 0 {
                to_visit.extend(
                    self.layout
                        .iter_orthogonal(visit_coords)
                        .filter(|&pos| matches!(self.cell_state(pos), CellState::Hidden))
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        revealed
    }

    fn cell_state(&self, coords: Coord2) -> CellState {
        self.grid[coords.to_nd_index()]
    }

    fn mark_started(&mut self) {
        if matches!(self.state, BoardState::Ready) {
            self.state = BoardState::Active;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            BoardState::Won
        } else {
            BoardState::Lost
        };
        log::debug!("game over, won: {}", won);
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

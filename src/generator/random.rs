use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Seeded placement that draws a uniform, non-repeating subset of the cell
/// index space. Every subset of `config.mines` distinct cells is equally
/// likely.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout {
        use rand::prelude::*;

        let size = config.size;
        let total = config.total_cells();

        // partial Fisher-Yates over the flat index space: after `mines`
        // draws the prefix is a sample without replacement
        let mut indices: Vec<CellCount> = (0..total).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for draw in 0..config.mines {
            let pick = rng.random_range(draw..total);
            indices.swap(draw as usize, pick as usize);
        }

        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        for &flat in &indices[..config.mines as usize] {
            let row = flat / size as CellCount;
            let col = flat % size as CellCount;
            mine_mask[[row as usize, col as usize]] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "generated layout mine count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        } else {
            log::debug!("placed {} mines on a {}x{} board", config.mines, size, size);
        }

        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mine_count() {
        let config = BoardConfig::new(9, 10).unwrap();

        let layout = RandomLayoutGenerator::new(7).generate(config);

        assert_eq!(layout.mine_count(), 10);
        assert_eq!(layout.size(), 9);
        assert_eq!(layout.safe_cell_count(), 71);
    }

    #[test]
    fn same_seed_produces_the_same_layout() {
        let config = BoardConfig::new(9, 10).unwrap();

        let first = RandomLayoutGenerator::new(42).generate(config);
        let second = RandomLayoutGenerator::new(42).generate(config);

        assert_eq!(first, second);
    }

    #[test]
    fn zero_mines_leaves_the_board_clear() {
        let config = BoardConfig::new(4, 0).unwrap();

        let layout = RandomLayoutGenerator::new(1).generate(config);

        assert_eq!(layout.mine_count(), 0);
        assert_eq!(layout.safe_cell_count(), 16);
    }

    #[test]
    fn nearly_full_board_keeps_one_safe_cell() {
        let config = BoardConfig::new(3, 8).unwrap();

        let layout = RandomLayoutGenerator::new(5).generate(config);

        assert_eq!(layout.mine_count(), 8);
        assert_eq!(layout.safe_cell_count(), 1);
    }
}

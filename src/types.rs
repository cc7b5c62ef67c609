use ndarray::Array2;

/// Single coordinate axis used for the board side length and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`, 0-indexed.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// All 8 surrounding displacements, the connectivity mine counting uses.
const ADJACENT: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Up, right, down, left. Flood expansion walks these only.
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: &'static [(isize, isize)],
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2, deltas: &'static [(isize, isize)]) -> Self {
        Self {
            center,
            bounds,
            deltas,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= self.deltas.len() {
                return None;
            }

            let next_item = apply_delta(self.center, self.deltas[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

pub trait NeighborIterExt {
    /// Up to 8 in-bounds surrounding coordinates of `index`.
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;

    /// Up to 4 in-bounds orthogonal coordinates of `index`.
    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(index, bounds, &ADJACENT)
    }

    fn iter_orthogonal(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(index, bounds, &ORTHOGONAL)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn center_cell_has_eight_neighbors() {
        let grid: Array2<bool> = Array2::default([3, 3]);

        let neighbors: Vec<Coord2> = grid.iter_neighbors((1, 1)).collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
    }

    #[test]
    fn corner_neighbors_are_clipped_at_the_boundary() {
        let grid: Array2<bool> = Array2::default([3, 3]);

        let neighbors: Vec<Coord2> = grid.iter_neighbors((0, 0)).collect();

        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_cell_has_five_neighbors() {
        let grid: Array2<bool> = Array2::default([3, 3]);

        assert_eq!(grid.iter_neighbors((0, 1)).count(), 5);
    }

    #[test]
    fn orthogonal_walk_is_up_right_down_left() {
        let grid: Array2<bool> = Array2::default([3, 3]);

        let neighbors: Vec<Coord2> = grid.iter_orthogonal((1, 1)).collect();

        assert_eq!(neighbors, [(0, 1), (1, 2), (2, 1), (1, 0)]);
    }

    #[test]
    fn orthogonal_walk_clips_out_of_bounds_candidates() {
        let grid: Array2<bool> = Array2::default([3, 3]);

        let neighbors: Vec<Coord2> = grid.iter_orthogonal((0, 0)).collect();

        assert_eq!(neighbors, [(0, 1), (1, 0)]);
    }
}

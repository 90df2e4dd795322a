use crate::error::SwapError;
use crate::moves::MoveSequence;
use crate::pair::SwapPair;
use itertools::Itertools;
use std::fmt;
use tracing::debug;

/// Column and row counts of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Grid { cols, rows }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn num_tiles(&self) -> usize {
        self.cols * self.rows
    }

    /// The highest move code a move sequence on this grid may hold.
    pub fn max_move_code(&self) -> usize {
        (2 * self.num_tiles()).saturating_sub(3)
    }

    /// True when both positions of the pair lie on the grid and differ.
    pub fn contains(&self, pair: SwapPair) -> bool {
        pair.pos1() != pair.pos2() && pair.pos2() < self.num_tiles()
    }
}

/// The tile arrangement of a puzzle and the moves that led to it.
///
/// `tiles[position]` is the zero-based tile at that position; the puzzle is
/// solved when every tile sits at the position equal to its number. Tiles only
/// ever move through [`PuzzleModel::try_swap_tiles`], which keeps them a
/// permutation and records each move.
#[derive(Debug, Clone)]
pub struct PuzzleModel {
    grid: Grid,
    tiles: Vec<usize>,
    moves: MoveSequence,
}

impl PuzzleModel {
    /// Creates a puzzle in its starting (fully reversed) arrangement.
    pub fn new(cols: usize, rows: usize) -> Self {
        let grid = Grid::new(cols, rows);
        let mut model = PuzzleModel {
            grid,
            tiles: Vec::with_capacity(grid.num_tiles()),
            moves: MoveSequence::new(grid),
        };
        model.reset();
        model
    }

    /// Puts the tiles back in reverse order and forgets all moves.
    pub fn reset(&mut self) {
        let num_tiles = self.grid.num_tiles();
        self.tiles.clear();
        self.tiles.extend((0..num_tiles).rev());
        self.moves.reset();
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn num_tiles(&self) -> usize {
        self.grid.num_tiles()
    }

    pub fn tiles(&self) -> &[usize] {
        &self.tiles
    }

    pub fn moves(&self) -> &MoveSequence {
        &self.moves
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().enumerate().all(|(pos, &tile)| pos == tile)
    }

    /// The zero-based tile at a position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn tile_at(&self, pos: usize) -> usize {
        self.tiles[pos]
    }

    /// The number painted on the tile at a position (1-based).
    pub fn tile_value_at(&self, pos: usize) -> usize {
        self.tile_at(pos) + 1
    }

    /// Checks the swap rule: the two tile values must sum to a multiple of 3 or 5.
    pub fn can_swap_tiles(&self, pair: SwapPair) -> bool {
        self.check_swap(pair).is_ok()
    }

    /// Swaps two tiles if the rule allows it and records the move.
    ///
    /// An illegal swap changes nothing.
    pub fn try_swap_tiles(&mut self, pair: SwapPair) -> Result<(), SwapError> {
        self.check_swap(pair)?;
        self.swap_tiles(pair);
        self.moves.add_move(pair);
        debug!(%pair, moves = self.moves.num_moves(), "swapped tiles");
        Ok(())
    }

    fn check_swap(&self, pair: SwapPair) -> Result<(), SwapError> {
        if !self.grid.contains(pair) {
            return Err(SwapError::OutOfBounds {
                pair,
                num_tiles: self.num_tiles(),
            });
        }
        let sum = self.tile_value_at(pair.pos1()) + self.tile_value_at(pair.pos2());
        if sum % 3 == 0 || sum % 5 == 0 {
            Ok(())
        } else {
            Err(SwapError::Illegal { pair, sum })
        }
    }

    fn swap_tiles(&mut self, pair: SwapPair) {
        self.tiles.swap(pair.pos1(), pair.pos2());
    }
}

impl fmt::Display for PuzzleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles.iter().chunks(self.grid.cols().max(1)) {
            writeln!(f, "{}", row.map(|tile| tile + 1).join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(model: &PuzzleModel) -> Vec<usize> {
        (0..model.num_tiles())
            .map(|pos| model.tile_value_at(pos))
            .collect()
    }

    #[test]
    fn test_new_puzzle_is_reversed() {
        let model = PuzzleModel::new(3, 3);
        assert_eq!(values(&model), vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(!model.is_solved());
        assert!(model.moves().is_empty());
    }

    #[test]
    fn test_illegal_swap_changes_nothing() {
        // Values 9 and 8 sum to 17.
        let mut model = PuzzleModel::new(3, 3);
        let err = model.try_swap_tiles(SwapPair::new(0, 1)).unwrap_err();
        assert_eq!(
            err,
            SwapError::Illegal {
                pair: SwapPair::new(0, 1),
                sum: 17
            }
        );
        assert_eq!(values(&model), vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(model.moves().is_empty());
    }

    #[test]
    fn test_legal_swap_records_move() {
        // Values 8 and 7 sum to 15.
        let mut model = PuzzleModel::new(3, 3);
        assert!(model.can_swap_tiles(SwapPair::new(2, 1)));
        model.try_swap_tiles(SwapPair::new(1, 2)).unwrap();
        assert_eq!(values(&model), vec![9, 7, 8, 6, 5, 4, 3, 2, 1]);
        assert_eq!(model.moves().num_moves(), 1);
        assert_eq!(model.moves().to_string(), "B");
    }

    #[test]
    fn test_same_swap_twice_restores_everything() {
        let mut model = PuzzleModel::new(3, 3);
        model.try_swap_tiles(SwapPair::new(1, 2)).unwrap();
        model.try_swap_tiles(SwapPair::new(1, 2)).unwrap();
        assert_eq!(values(&model), vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(model.moves().is_empty());
    }

    #[test]
    fn test_out_of_bounds_pairs_are_rejected() {
        let mut model = PuzzleModel::new(3, 3);
        assert!(!model.can_swap_tiles(SwapPair::new(8, 9)));
        assert!(!model.can_swap_tiles(SwapPair::new(4, 4)));
        assert_eq!(
            model.try_swap_tiles(SwapPair::new(7, 10)),
            Err(SwapError::OutOfBounds {
                pair: SwapPair::new(7, 10),
                num_tiles: 9
            })
        );
    }

    #[test]
    fn test_vertical_swap() {
        // Values 9 and 6 sum to 15.
        let mut model = PuzzleModel::new(3, 3);
        model.try_swap_tiles(SwapPair::new(0, 3)).unwrap();
        assert_eq!(model.tile_value_at(0), 6);
        assert_eq!(model.tile_value_at(3), 9);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut model = PuzzleModel::new(3, 3);
        model.try_swap_tiles(SwapPair::new(1, 2)).unwrap();
        model.reset();
        assert_eq!(values(&model), vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        assert!(model.moves().is_empty());
    }

    #[test]
    fn test_solved_after_reversing_a_scramble() {
        // Two tiles: values 2 and 1 sum to 3, so the single swap solves it.
        let mut model = PuzzleModel::new(2, 1);
        assert!(!model.is_solved());
        model.try_swap_tiles(SwapPair::new(0, 1)).unwrap();
        assert!(model.is_solved());
    }

    #[test]
    fn test_large_grid_history() {
        // Values 46 and 44 sum to 90.
        let mut model = PuzzleModel::new(2, 60);
        model.try_swap_tiles(SwapPair::new(74, 76)).unwrap();
        assert_eq!(model.moves().last_move(), Some(SwapPair::new(74, 76)));
        assert_eq!(model.moves().to_string(), "\u{102}");
    }

    #[test]
    fn test_display() {
        let model = PuzzleModel::new(3, 3);
        assert_eq!(model.to_string(), "9 8 7\n6 5 4\n3 2 1\n");
    }
}

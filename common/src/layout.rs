use crate::model::Grid;
use crate::pair::SwapPair;

// Sizes relative to the tile size.
const TILE_SEPARATION: f64 = 0.46;
const BORDER_SEPARATION: f64 = 0.54;
const FRAME_SEPARATION: f64 = 0.35;
const DOT_INSET: f64 = 0.23;
const TILE_RADIUS: f64 = 0.25;
const DOT_RADIUS: f64 = 0.09;
const FRAME_RADIUS: f64 = 0.50;

/// Pixel geometry of the puzzle for a given view width.
///
/// Tile positions are the centres of the tiles. The layout knows nothing about
/// which tile is where; it only maps grid positions to pixels and back.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    grid: Grid,
    pub tile_size: f64,
    /// Distance between the centres of neighbouring tiles.
    pub tile_distance: f64,
    /// Centre coordinate of the first row and column.
    pub tile_pos0: f64,
    pub tile_radius: f64,
    pub dot_radius: f64,
    /// Offset of the first dot from the tile's top-left corner.
    pub dot_pos0: f64,
    pub dot_distance: f64,
    pub frame_pos0: f64,
    pub frame_width: f64,
    pub frame_height: f64,
    pub frame_radius: f64,
}

impl Layout {
    pub fn new(grid: Grid, view_width: f64) -> Self {
        let cols = grid.cols() as f64;
        let rows = grid.rows() as f64;

        let tile_size =
            view_width / (cols + (cols - 1.0) * TILE_SEPARATION + 2.0 * BORDER_SEPARATION);
        let tile_distance = tile_size * (1.0 + TILE_SEPARATION);
        let frame_margin = tile_size * (1.0 + 2.0 * FRAME_SEPARATION);

        Layout {
            grid,
            tile_size,
            tile_distance,
            tile_pos0: tile_size * (0.5 + BORDER_SEPARATION),
            tile_radius: tile_size * TILE_RADIUS,
            dot_radius: tile_size * DOT_RADIUS,
            dot_pos0: tile_size * DOT_INSET,
            dot_distance: tile_size * (1.0 - 2.0 * DOT_INSET) / 2.0,
            frame_pos0: tile_size * (BORDER_SEPARATION - FRAME_SEPARATION),
            frame_width: frame_margin + (cols - 1.0) * tile_distance,
            frame_height: frame_margin + (rows - 1.0) * tile_distance,
            frame_radius: tile_size * FRAME_RADIUS,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn view_width(&self) -> f64 {
        2.0 * self.tile_pos0 + (self.grid.cols() as f64 - 1.0) * self.tile_distance
    }

    pub fn view_height(&self) -> f64 {
        2.0 * self.tile_pos0 + (self.grid.rows() as f64 - 1.0) * self.tile_distance
    }

    /// Centre of the tile at a grid position.
    pub fn tile_center(&self, pos: usize) -> (f64, f64) {
        let cols = self.grid.cols();
        (
            self.tile_pos0 + (pos % cols) as f64 * self.tile_distance,
            self.tile_pos0 + (pos / cols) as f64 * self.tile_distance,
        )
    }

    /// The pair of tiles on either side of the gap under a point.
    ///
    /// A point in the gap between two rows selects the vertical pair it
    /// separates, and a point between two columns selects the horizontal pair.
    /// The gap right of the last column pairs the row's last tile with the
    /// first tile of the next row. Points on a tile, on a gap crossing or
    /// outside the grid select nothing.
    pub fn swap_pair_at(&self, x: f64, y: f64) -> Option<SwapPair> {
        let x = x - self.tile_pos0 + self.tile_size / 2.0;
        let y = y - self.tile_pos0 + self.tile_size / 2.0;
        if x < 0.0 || y < 0.0 {
            return None;
        }

        let on_col = x % self.tile_distance < self.tile_size;
        let on_row = y % self.tile_distance < self.tile_size;
        let col = (x / self.tile_distance) as usize;
        let row = (y / self.tile_distance) as usize;

        let cols = self.grid.cols();
        if col >= cols || row >= self.grid.rows() {
            return None;
        }
        let pos = col + row * cols;
        match (on_col, on_row) {
            (true, false) if row + 1 < self.grid.rows() => Some(SwapPair::new(pos, pos + cols)),
            (false, true) if pos + 1 < self.grid.num_tiles() => Some(SwapPair::new(pos, pos + 1)),
            _ => None,
        }
    }
}

//! Things that can be drawn at a position and rotation: tiles, and the pivot
//! that carries two tiles around their shared centre during a swap.

use crate::layout::Layout;
use crate::model::PuzzleModel;

const TILE_FILL: &str = "#FF0000";
const TILE_STROKE: &str = "#800000";
const DOT_FILL: &str = "#FFFFFF";

/// Dot positions (cells of a 3x3 pattern) for the tile values 1 through 9.
const DOTS_FOR_TILES: [&[u8]; 9] = [
    &[4],
    &[0, 8],
    &[0, 4, 8],
    &[0, 2, 6, 8],
    &[0, 2, 4, 6, 8],
    &[0, 2, 3, 5, 6, 8],
    &[0, 2, 3, 4, 5, 6, 8],
    &[0, 1, 2, 3, 5, 6, 7, 8],
    &[0, 1, 2, 3, 4, 5, 6, 7, 8],
];
const DOT_COLUMNS: u8 = 3;

/// Drawing primitives a renderer offers to sprites.
///
/// Transformations stack the way a 2D canvas context does: `save` pushes the
/// current transform and `restore` pops it.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, radians: f64);
    /// Fills the whole surface.
    fn clear(&mut self, width: f64, height: f64, color: &str);
    /// Fills and outlines a box with rounded corners.
    #[allow(clippy::too_many_arguments)]
    fn rounded_box(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: &str,
        stroke: &str,
    );
    fn dot(&mut self, x: f64, y: f64, radius: f64, fill: &str);
}

/// Where a sprite sits; rotation is in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// What a sprite needs to know about its surroundings to draw itself.
pub struct Scene<'a> {
    pub layout: &'a Layout,
    pub sprites: &'a [TileSprite],
}

/// A sprite: something with a placement and contents drawn around its origin.
pub trait Drawable {
    fn placement(&self) -> Placement;

    /// Draws the contents centred on the origin, unrotated.
    fn draw_contents<C: Canvas>(&self, canvas: &mut C, scene: &Scene<'_>);

    fn draw<C: Canvas>(&self, canvas: &mut C, scene: &Scene<'_>) {
        draw_placed(self, self.placement(), canvas, scene);
    }
}

fn draw_placed<D: Drawable + ?Sized, C: Canvas>(
    sprite: &D,
    placement: Placement,
    canvas: &mut C,
    scene: &Scene<'_>,
) {
    canvas.save();
    canvas.translate(placement.x, placement.y);
    canvas.rotate(placement.rotation.to_radians());
    sprite.draw_contents(canvas, scene);
    canvas.restore();
}

/// The visual of one numbered tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSprite {
    pub placement: Placement,
    pivoting: bool,
    dots: &'static [u8],
}

impl TileSprite {
    fn new(tile: usize) -> Self {
        TileSprite {
            placement: Placement::default(),
            pivoting: false,
            dots: DOTS_FOR_TILES.get(tile).copied().unwrap_or(&[]),
        }
    }

    /// True while the tile is carried by a pivot and not drawn at its grid position.
    pub fn is_pivoting(&self) -> bool {
        self.pivoting
    }
}

impl Drawable for TileSprite {
    fn placement(&self) -> Placement {
        self.placement
    }

    fn draw_contents<C: Canvas>(&self, canvas: &mut C, scene: &Scene<'_>) {
        let layout = scene.layout;
        let pos0 = -layout.tile_size / 2.0;
        canvas.rounded_box(
            pos0,
            pos0,
            layout.tile_size,
            layout.tile_size,
            layout.tile_radius,
            TILE_FILL,
            TILE_STROKE,
        );

        let dot_pos0 = pos0 + layout.dot_pos0;
        for &dot in self.dots {
            let x = dot_pos0 + f64::from(dot % DOT_COLUMNS) * layout.dot_distance;
            let y = dot_pos0 + f64::from(dot / DOT_COLUMNS) * layout.dot_distance;
            canvas.dot(x, y, layout.dot_radius, DOT_FILL);
        }
    }
}

/// A tile carried by a pivot, with its offset from the pivot centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotMember {
    pub tile: usize,
    pub x: f64,
    pub y: f64,
}

/// Two tiles grouped around their shared centre while they swap places.
///
/// Building a pivot marks both tiles as pivoting so the board stops placing
/// them on the grid; [`Pivot::dissolve`] hands them back.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    pub placement: Placement,
    pub members: [PivotMember; 2],
}

impl Pivot {
    pub fn new(board: &mut Board, tile1: usize, tile2: usize) -> Self {
        let p1 = board.sprites[tile1].placement;
        let p2 = board.sprites[tile2].placement;
        let x = (p1.x + p2.x) / 2.0;
        let y = (p1.y + p2.y) / 2.0;

        let members = [tile1, tile2].map(|tile| {
            let sprite = &mut board.sprites[tile];
            sprite.pivoting = true;
            PivotMember {
                tile,
                x: sprite.placement.x - x,
                y: sprite.placement.y - y,
            }
        });

        Pivot {
            placement: Placement { x, y, rotation: 0.0 },
            members,
        }
    }

    /// Releases both tiles back to grid placement.
    pub fn dissolve(self, board: &mut Board) {
        for member in self.members {
            board.sprites[member.tile].pivoting = false;
        }
    }
}

impl Drawable for Pivot {
    fn placement(&self) -> Placement {
        self.placement
    }

    fn draw_contents<C: Canvas>(&self, canvas: &mut C, scene: &Scene<'_>) {
        for member in &self.members {
            let sprite = &scene.sprites[member.tile];
            let placement = Placement {
                x: member.x,
                y: member.y,
                rotation: sprite.placement.rotation,
            };
            draw_placed(sprite, placement, canvas, scene);
        }
    }
}

/// The tile sprites of a session, indexed by tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    sprites: Vec<TileSprite>,
}

impl Board {
    pub fn new(num_tiles: usize) -> Self {
        Board {
            sprites: (0..num_tiles).map(TileSprite::new).collect(),
        }
    }

    pub fn sprites(&self) -> &[TileSprite] {
        &self.sprites
    }

    pub fn sprite(&self, tile: usize) -> &TileSprite {
        &self.sprites[tile]
    }

    pub fn sprite_mut(&mut self, tile: usize) -> &mut TileSprite {
        &mut self.sprites[tile]
    }

    /// Moves every tile that is not pivoting to the centre of its grid position.
    pub fn sync(&mut self, model: &PuzzleModel, layout: &Layout) {
        for (pos, &tile) in model.tiles().iter().enumerate() {
            let sprite = &mut self.sprites[tile];
            if !sprite.pivoting {
                (sprite.placement.x, sprite.placement.y) = layout.tile_center(pos);
            }
        }
    }
}

//! A tile swap puzzle.
//!
//! The numbered tiles of a grid start in descending order and must be sorted
//! ascending. Two neighbouring tiles may trade places only when their values
//! sum to a multiple of 3 or 5. Moves are recorded as a history that can be
//! undone, replayed and shared as a short code.
//!
//! The crate holds the whole game without any platform code: hosts supply a
//! [`Renderer`] (and through it a [`Canvas`]) plus a [`Clock`], forward clicks
//! and call [`PuzzleController::tick`] while an animation runs.

mod animation;
mod config;
mod controller;
mod error;
mod layout;
mod model;
mod moves;
mod pair;
mod render;
mod sprite;

pub use animation::{Animation, Progress, SolveAnimation, Step, SwapAnimation, SwapPhase, move_delta};
pub use config::{Config, MAX_TILES};
pub use controller::{PuzzleController, Status};
pub use error::{CodeError, ConfigError, MoveTextError, SwapError};
pub use layout::Layout;
pub use model::{Grid, PuzzleModel};
pub use moves::{MAX_CODE_MOVES, MoveSequence};
pub use pair::SwapPair;
pub use render::{Clock, Frame, ManualClock, Renderer};
pub use sprite::{Board, Canvas, Drawable, Pivot, PivotMember, Placement, Scene, TileSprite};

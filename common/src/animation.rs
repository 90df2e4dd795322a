//! Tick-driven animations.
//!
//! An animation is pure state: every call to `step` advances it by exactly one
//! tick, whatever the wall-clock time between ticks.

use crate::config::Config;
use crate::model::PuzzleModel;
use crate::pair::SwapPair;
use crate::sprite::{Board, Pivot};
use tracing::{debug, trace};

/// Whether an animation has more steps to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Running,
    Done,
}

/// The phases of a swap: move the tiles together, turn them half a circle
/// about their shared centre, move them apart again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapPhase {
    Connecting,
    Rotating,
    Returning,
    Done,
}

/// How far each tile of a pair moves towards the other along one axis.
///
/// Tiles further apart than one tile size close the gap to touching (or, for
/// a pair that wraps to the next row, move towards each other by the same
/// rule); closer tiles do not move and just turn in place.
pub fn move_delta(coord1: f64, coord2: f64, tile_size: f64) -> f64 {
    let delta = coord2 - coord1;
    if delta > tile_size {
        (delta - tile_size) / 2.0
    } else if -delta > tile_size {
        (delta + tile_size) / 2.0
    } else {
        0.0
    }
}

/// Animates two tiles trading places.
///
/// Created right after the model swap, when the tiles now owning the pair's
/// positions are still drawn at their old places. The animation owns the
/// pivot that carries them until it is done, then releases both tiles back to
/// grid placement.
#[derive(Debug, Clone)]
pub struct SwapAnimation {
    pivot: Option<Pivot>,
    phase: SwapPhase,
    phase_steps: u32,
    delta_x: f64,
    delta_y: f64,
    connect_steps: u32,
    rotate_steps: u32,
}

impl SwapAnimation {
    pub fn new(
        board: &mut Board,
        model: &PuzzleModel,
        pair: SwapPair,
        tile_size: f64,
        config: &Config,
    ) -> Self {
        let tile1 = model.tile_at(pair.pos1());
        let tile2 = model.tile_at(pair.pos2());
        let p1 = board.sprite(tile1).placement;
        let p2 = board.sprite(tile2).placement;

        SwapAnimation {
            delta_x: move_delta(p1.x, p2.x, tile_size),
            delta_y: move_delta(p1.y, p2.y, tile_size),
            pivot: Some(Pivot::new(board, tile1, tile2)),
            phase: SwapPhase::Connecting,
            phase_steps: 0,
            connect_steps: config.connect_steps,
            rotate_steps: config.rotate_steps,
        }
    }

    pub fn phase(&self) -> SwapPhase {
        self.phase
    }

    /// The pivot carrying the two tiles, until the animation is done.
    pub fn pivot(&self) -> Option<&Pivot> {
        self.pivot.as_ref()
    }

    pub fn step(&mut self, board: &mut Board) -> Progress {
        match self.phase {
            SwapPhase::Connecting => {
                if self.move_tiles_step(1.0) {
                    self.enter(SwapPhase::Rotating);
                }
            }
            SwapPhase::Rotating => {
                if self.swap_tiles_step() {
                    self.enter(SwapPhase::Returning);
                }
            }
            SwapPhase::Returning => {
                if self.move_tiles_step(-1.0) {
                    self.enter(SwapPhase::Done);
                    if let Some(pivot) = self.pivot.take() {
                        pivot.dissolve(board);
                    }
                }
            }
            SwapPhase::Done => {}
        }

        if self.phase == SwapPhase::Done {
            Progress::Done
        } else {
            Progress::Running
        }
    }

    fn enter(&mut self, phase: SwapPhase) {
        debug!(from = ?self.phase, to = ?phase, "swap animation phase");
        self.phase = phase;
        self.phase_steps = 0;
    }

    /// Moves the tiles towards (`direction` 1) or away from (-1) each other.
    fn move_tiles_step(&mut self, direction: f64) -> bool {
        self.phase_steps += 1;
        let total = f64::from(self.connect_steps);
        let dx = direction * self.delta_x / total;
        let dy = direction * self.delta_y / total;
        if let Some(pivot) = self.pivot.as_mut() {
            let [first, second] = &mut pivot.members;
            first.x += dx;
            second.x -= dx;
            first.y += dy;
            second.y -= dy;
        }
        self.phase_steps >= self.connect_steps
    }

    fn swap_tiles_step(&mut self) -> bool {
        self.phase_steps += 1;
        if let Some(pivot) = self.pivot.as_mut() {
            pivot.placement.rotation =
                180.0 * f64::from(self.phase_steps) / f64::from(self.rotate_steps);
        }
        self.phase_steps >= self.rotate_steps
    }
}

/// Spins every tile a few full turns, neighbours in opposite directions.
#[derive(Debug, Clone)]
pub struct SolveAnimation {
    steps: u32,
    total_steps: u32,
    turns: u32,
}

impl SolveAnimation {
    pub fn new(config: &Config) -> Self {
        SolveAnimation {
            steps: 0,
            total_steps: config.solve_steps,
            turns: config.solve_turns,
        }
    }

    pub fn step(&mut self, board: &mut Board) -> Progress {
        self.steps += 1;
        let degrees_per_step = 360.0 * f64::from(self.turns) / f64::from(self.total_steps);
        for tile in 0..board.sprites().len() {
            let sign = if tile % 2 == 1 { 1.0 } else { -1.0 };
            board.sprite_mut(tile).placement.rotation =
                f64::from(self.steps) * sign * degrees_per_step;
        }
        trace!(step = self.steps, "solve animation");

        if self.steps >= self.total_steps {
            Progress::Done
        } else {
            Progress::Running
        }
    }
}

#[derive(Debug, Clone)]
enum AnimationKind {
    Swap(SwapAnimation),
    Solve(SolveAnimation),
}

/// Result of advancing an [`Animation`] by one tick.
#[derive(Debug)]
pub enum Step<T> {
    /// The animation continues; keep it for the next tick.
    Running(Animation<T>),
    /// The animation is over and yields its continuation.
    Finished(T),
}

/// An animation together with what should happen once it completes.
///
/// Stepping consumes the animation and hands it back while it runs, so the
/// continuation can only ever be delivered once.
#[derive(Debug, Clone)]
pub struct Animation<T> {
    kind: AnimationKind,
    then: T,
}

impl<T> Animation<T> {
    pub fn swap(animation: SwapAnimation, then: T) -> Self {
        Animation {
            kind: AnimationKind::Swap(animation),
            then,
        }
    }

    pub fn solve(animation: SolveAnimation, then: T) -> Self {
        Animation {
            kind: AnimationKind::Solve(animation),
            then,
        }
    }

    /// The pivot the renderer should draw, if this is a swap in progress.
    pub fn pivot(&self) -> Option<&Pivot> {
        match &self.kind {
            AnimationKind::Swap(swap) => swap.pivot(),
            AnimationKind::Solve(_) => None,
        }
    }

    pub fn step(mut self, board: &mut Board) -> Step<T> {
        let progress = match &mut self.kind {
            AnimationKind::Swap(swap) => swap.step(board),
            AnimationKind::Solve(solve) => solve.step(board),
        };
        match progress {
            Progress::Running => Step::Running(self),
            Progress::Done => Step::Finished(self.then),
        }
    }
}

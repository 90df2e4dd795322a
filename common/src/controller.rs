use crate::animation::{Animation, SolveAnimation, Step, SwapAnimation};
use crate::config::Config;
use crate::error::{CodeError, ConfigError};
use crate::model::PuzzleModel;
use crate::moves::MoveSequence;
use crate::pair::SwapPair;
use crate::render::{Clock, Frame, Renderer};
use crate::sprite::Board;
use derive_more::Display;
use tracing::{debug, info, warn};

/// The status line shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Status {
    #[display("Try me!")]
    Welcome,
    #[display("{_0} moves")]
    Moves(usize),
    #[display("Well done!")]
    WellDone,
    #[display("Solved in {_0} moves!")]
    Solved(usize),
    #[display("Try again!")]
    TryAgain,
    #[display("Replaying move {_0}")]
    Replaying(usize),
    #[display("Replay stopped at move {_0}")]
    ReplayStopped(usize),
    #[display("Invalid moves")]
    InvalidMoves,
    #[display("Invalid code")]
    InvalidCode,
}

/// The state of one game: the model, the tile sprites and the settings.
#[derive(Debug, Clone)]
struct Session {
    model: PuzzleModel,
    board: Board,
    config: Config,
}

impl Session {
    fn new(config: Config) -> Self {
        let model = PuzzleModel::new(config.cols, config.rows);
        let board = Board::new(model.num_tiles());
        Session {
            model,
            board,
            config,
        }
    }
}

/// What to do once the running animation completes.
#[derive(Debug, Clone)]
enum Continuation {
    SwapDone,
    SolveDone,
    Replay(Replay),
}

/// A replay in progress: the moves to play and the index of the next one.
#[derive(Debug, Clone)]
struct Replay {
    moves: MoveSequence,
    next: usize,
}

/// Turns player actions into model changes and animations.
///
/// At most one animation runs at a time. While it runs, every player action
/// is ignored and the host is expected to call [`PuzzleController::tick`] on
/// the schedule the controller requested from its clock.
pub struct PuzzleController<R: Renderer, C: Clock> {
    session: Session,
    renderer: R,
    clock: C,
    ticking: Option<C::Handle>,
    animation: Option<Animation<Continuation>>,
    status: Status,
    moves_text: String,
    solve_code: String,
}

impl<R: Renderer, C: Clock> PuzzleController<R, C> {
    /// Starts a session and draws the initial puzzle.
    ///
    /// Fails without drawing anything when the config does not validate.
    pub fn new(config: Config, renderer: R, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut controller = PuzzleController {
            session: Session::new(config),
            renderer,
            clock,
            ticking: None,
            animation: None,
            status: Status::Welcome,
            moves_text: String::new(),
            solve_code: String::new(),
        };
        controller.redraw();
        Ok(controller)
    }

    pub fn model(&self) -> &PuzzleModel {
        &self.session.model
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// The move symbols as last published, or as edited by the player.
    pub fn moves_text(&self) -> &str {
        &self.moves_text
    }

    pub fn set_moves_text(&mut self, text: impl Into<String>) {
        self.moves_text = text.into();
    }

    /// The share code of the last solve, or the code last loaded.
    pub fn solve_code(&self) -> &str {
        &self.solve_code
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Tries the swap under a point of the drawing.
    pub fn handle_click(&mut self, x: f64, y: f64) {
        if self.is_animating() {
            return;
        }
        if let Some(pair) = self.renderer.swap_pair_at(x, y) {
            self.try_swap_tiles(pair);
        }
    }

    /// Swaps two tiles if the rule allows it and animates the swap.
    ///
    /// Returns false, changing nothing, when the swap is illegal or an
    /// animation is already running.
    pub fn try_swap_tiles(&mut self, pair: SwapPair) -> bool {
        self.try_swap_then(pair, Continuation::SwapDone)
    }

    /// Puts the puzzle back in its starting arrangement.
    pub fn reset_puzzle(&mut self) {
        if self.is_animating() {
            return;
        }
        info!("resetting puzzle");
        self.session.model.reset();
        self.redraw();
        self.status = Status::TryAgain;
    }

    /// Takes back the last move by doing it again.
    pub fn undo_move(&mut self) {
        if self.is_animating() {
            return;
        }
        if let Some(pair) = self.session.model.moves().last_move() {
            debug!(%pair, "undoing");
            self.try_swap_tiles(pair);
        }
    }

    /// Resets the puzzle and plays the moves text one animated move at a time.
    pub fn replay_moves(&mut self) {
        if self.is_animating() {
            return;
        }
        self.reset_puzzle();

        match MoveSequence::parse(self.session.model.grid(), &self.moves_text) {
            Ok(moves) => {
                info!(moves = moves.num_moves(), "replaying");
                self.replay_next_move(Replay { moves, next: 0 });
            }
            Err(err) => {
                warn!(%err, "cannot replay moves text");
                self.status = Status::InvalidMoves;
            }
        }
    }

    /// Fills the moves text from a share code; a later replay plays it.
    ///
    /// Returns `Ok(false)` without touching anything while an animation runs,
    /// and `Ok(true)` once the code is loaded.
    pub fn load_code(&mut self, code: &str) -> Result<bool, CodeError> {
        if self.is_animating() {
            return Ok(false);
        }
        self.solve_code = code.to_string();
        let mut moves = MoveSequence::new(self.session.model.grid());
        let result = moves.from_compact_code(code);
        self.moves_text = moves.to_string();
        if result.is_err() {
            self.status = Status::InvalidCode;
        }
        result?;
        debug!(moves = %self.moves_text, "loaded share code");
        Ok(true)
    }

    /// Advances the running animation by one step and redraws.
    ///
    /// When the animation completes, the final frame is drawn without the
    /// pivot and the clock is cancelled before the animation's continuation
    /// runs. Returns whether an animation is still running.
    pub fn tick(&mut self) -> bool {
        let Some(animation) = self.animation.take() else {
            return false;
        };
        match animation.step(&mut self.session.board) {
            Step::Running(animation) => {
                self.animation = Some(animation);
                self.redraw();
            }
            Step::Finished(then) => {
                self.redraw();
                if let Some(handle) = self.ticking.take() {
                    self.clock.cancel(handle);
                }
                self.complete(then);
            }
        }
        self.is_animating()
    }

    fn try_swap_then(&mut self, pair: SwapPair, then: Continuation) -> bool {
        if self.is_animating() {
            return false;
        }
        debug!(%pair, "trying swap");
        if let Err(err) = self.session.model.try_swap_tiles(pair) {
            debug!(%err, "swap rejected");
            return false;
        }

        let Session { model, board, config } = &mut self.session;
        let swap = SwapAnimation::new(board, model, pair, self.renderer.layout().tile_size, config);
        self.start(Animation::swap(swap, then));
        true
    }

    fn start(&mut self, animation: Animation<Continuation>) {
        self.animation = Some(animation);
        if self.ticking.is_none() {
            let interval = self.session.config.tick_interval();
            self.ticking = Some(self.clock.schedule_repeating(interval));
        }
    }

    fn complete(&mut self, then: Continuation) {
        match then {
            Continuation::SwapDone => self.swap_done(),
            Continuation::SolveDone => self.solve_done(),
            Continuation::Replay(replay) => self.replay_next_move(replay),
        }
    }

    fn swap_done(&mut self) {
        let moves = self.session.model.moves();
        self.moves_text = moves.to_string();
        if !self.session.model.is_solved() {
            self.status = Status::Moves(moves.num_moves());
            return;
        }

        info!(moves = moves.num_moves(), "puzzle solved");
        self.status = Status::WellDone;
        if self.session.config.celebrate {
            let solve = SolveAnimation::new(&self.session.config);
            self.start(Animation::solve(solve, Continuation::SolveDone));
        } else {
            self.solve_done();
        }
    }

    fn solve_done(&mut self) {
        let moves = self.session.model.moves();
        self.status = Status::Solved(moves.num_moves());
        self.solve_code = moves.to_compact_code();
    }

    fn replay_next_move(&mut self, mut replay: Replay) {
        let Some(pair) = replay.moves.move_at(replay.next) else {
            self.swap_done();
            return;
        };
        replay.next += 1;
        let number = replay.next;
        self.status = Status::Replaying(number);
        if !self.try_swap_then(pair, Continuation::Replay(replay)) {
            warn!(number, %pair, "replay stopped at an illegal move");
            self.status = Status::ReplayStopped(number);
            self.moves_text = self.session.model.moves().to_string();
        }
    }

    fn redraw(&mut self) {
        let layout = self.renderer.layout();
        self.session.board.sync(&self.session.model, layout);
        let frame = Frame {
            model: &self.session.model,
            board: &self.session.board,
            pivot: self.animation.as_ref().and_then(Animation::pivot),
        };
        self.renderer.render_frame(&frame);
    }
}

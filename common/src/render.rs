//! The collaborators the controller drives: a renderer that draws frames and
//! resolves clicks, and a clock that tells the host when to tick.

use crate::layout::Layout;
use crate::model::PuzzleModel;
use crate::pair::SwapPair;
use crate::sprite::{Board, Canvas, Drawable, Pivot, Scene};
use std::time::Duration;

const BACKGROUND: &str = "#FFFFFF";
const FRAME_FILL: &str = "#000000";
const FRAME_STROKE: &str = "#808080";

/// Everything needed to draw the puzzle at one moment.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub model: &'a PuzzleModel,
    pub board: &'a Board,
    /// The pivot of the running swap animation, if any.
    pub pivot: Option<&'a Pivot>,
}

impl Frame<'_> {
    /// True when no tiles are in motion between grid positions.
    pub fn is_settled(&self) -> bool {
        self.pivot.is_none()
    }

    /// Draws background, frame, the resting tiles and then the pivot on top.
    pub fn draw<C: Canvas>(&self, canvas: &mut C, layout: &Layout) {
        canvas.clear(layout.view_width(), layout.view_height(), BACKGROUND);
        canvas.rounded_box(
            layout.frame_pos0,
            layout.frame_pos0,
            layout.frame_width,
            layout.frame_height,
            layout.frame_radius,
            FRAME_FILL,
            FRAME_STROKE,
        );

        let scene = Scene {
            layout,
            sprites: self.board.sprites(),
        };
        for &tile in self.model.tiles() {
            let sprite = self.board.sprite(tile);
            if !sprite.is_pivoting() {
                sprite.draw(canvas, &scene);
            }
        }
        if let Some(pivot) = self.pivot {
            pivot.draw(canvas, &scene);
        }
    }
}

/// Draws frames and maps points on the drawing to tile pairs.
pub trait Renderer {
    fn layout(&self) -> &Layout;

    fn swap_pair_at(&self, x: f64, y: f64) -> Option<SwapPair> {
        self.layout().swap_pair_at(x, y)
    }

    fn render_frame(&mut self, frame: &Frame<'_>);
}

/// Schedules the repeating tick that drives animations.
///
/// The host calls the controller's `tick` on every period while a schedule is
/// active; the controller cancels the schedule once the animation is done.
pub trait Clock {
    type Handle;

    fn schedule_repeating(&mut self, interval: Duration) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

/// A clock for hosts that poll: it only remembers whether ticks are wanted.
#[derive(Debug, Default)]
pub struct ManualClock {
    active: Option<(u64, Duration)>,
    next_handle: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick period requested by the running schedule.
    pub fn interval(&self) -> Option<Duration> {
        self.active.map(|(_, interval)| interval)
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
}

impl Clock for ManualClock {
    type Handle = u64;

    fn schedule_repeating(&mut self, interval: Duration) -> u64 {
        self.next_handle += 1;
        self.active = Some((self.next_handle, interval));
        self.next_handle
    }

    fn cancel(&mut self, handle: u64) {
        if matches!(self.active, Some((active, _)) if active == handle) {
            self.active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Grid;
    use crate::sprite::tests::RecordingCanvas;

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new();
        assert!(!clock.is_running());

        let first = clock.schedule_repeating(Duration::from_millis(5));
        assert_eq!(clock.interval(), Some(Duration::from_millis(5)));

        let second = clock.schedule_repeating(Duration::from_millis(7));
        // A stale handle does not stop the newer schedule.
        clock.cancel(first);
        assert!(clock.is_running());

        clock.cancel(second);
        assert!(!clock.is_running());
        assert_eq!(clock.interval(), None);
    }

    #[test]
    fn test_frame_draws_every_tile_once() {
        let model = PuzzleModel::new(3, 3);
        let layout = Layout::new(Grid::new(3, 3), 500.0);
        let mut board = Board::new(9);
        board.sync(&model, &layout);

        let frame = Frame {
            model: &model,
            board: &board,
            pivot: None,
        };
        assert!(frame.is_settled());

        let mut canvas = RecordingCanvas::default();
        frame.draw(&mut canvas, &layout);
        assert_eq!(canvas.calls[0], "clear 500 500 #FFFFFF");
        // Frame plus nine tiles.
        assert_eq!(canvas.count("box"), 10);
        assert_eq!(canvas.count("dot"), 45);
    }

    #[test]
    fn test_frame_draws_pivot_members_once() {
        let model = PuzzleModel::new(3, 3);
        let layout = Layout::new(Grid::new(3, 3), 500.0);
        let mut board = Board::new(9);
        board.sync(&model, &layout);
        let pivot = Pivot::new(&mut board, 8, 7);

        let frame = Frame {
            model: &model,
            board: &board,
            pivot: Some(&pivot),
        };
        assert!(!frame.is_settled());

        let mut canvas = RecordingCanvas::default();
        frame.draw(&mut canvas, &layout);
        assert_eq!(canvas.count("box"), 10);
        assert_eq!(canvas.count("dot"), 45);
    }
}

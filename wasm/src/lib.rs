use std::f64::consts::TAU;
use std::io;
use tileswap as ts;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, console};

/// Collects one formatted log line and hands it to the browser console.
#[derive(Default)]
struct ConsoleWriter(Vec<u8>);

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.0);
        let line = line.trim_end();
        if !line.is_empty() {
            console::log_1(&JsValue::from_str(line));
        }
    }
}

fn init_logging(filter: &str) {
    // A second puzzle on the page keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(ConsoleWriter::default)
        .without_time()
        .with_ansi(false)
        .try_init();
}

/// Logs a failed drawing call; a broken frame is not worth aborting for.
fn check(result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn!(?err, "canvas call failed");
    }
}

/// Drawing primitives over a 2D canvas context.
struct ContextCanvas {
    ctx: CanvasRenderingContext2d,
}

impl ContextCanvas {
    fn rounded_path(&self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let (right, bottom) = (x + width, y + height);
        self.ctx.begin_path();
        self.ctx.move_to(x + radius, y);
        check(self.ctx.arc_to(right, y, right, bottom, radius));
        check(self.ctx.arc_to(right, bottom, x, bottom, radius));
        check(self.ctx.arc_to(x, bottom, x, y, radius));
        check(self.ctx.arc_to(x, y, right, y, radius));
        self.ctx.close_path();
    }
}

impl ts::Canvas for ContextCanvas {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        check(self.ctx.translate(x, y));
    }

    fn rotate(&mut self, radians: f64) {
        check(self.ctx.rotate(radians));
    }

    fn clear(&mut self, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

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
    ) {
        self.rounded_path(x, y, width, height, radius);
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.stroke();
    }

    fn dot(&mut self, x: f64, y: f64, radius: f64, fill: &str) {
        self.ctx.begin_path();
        check(self.ctx.arc(x, y, radius, 0.0, TAU));
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
    }
}

/// Draws frames on a canvas sized to the layout.
struct CanvasRenderer {
    canvas: ContextCanvas,
    layout: ts::Layout,
}

impl ts::Renderer for CanvasRenderer {
    fn layout(&self) -> &ts::Layout {
        &self.layout
    }

    fn render_frame(&mut self, frame: &ts::Frame<'_>) {
        frame.draw(&mut self.canvas, &self.layout);
    }
}

/// A tile swap puzzle drawn on a canvas.
///
/// The page forwards clicks and, while `tickInterval()` is non-zero, calls
/// `tick()` on that period.
#[wasm_bindgen]
pub struct TileSwap {
    controller: ts::PuzzleController<CanvasRenderer, ts::ManualClock>,
}

#[wasm_bindgen]
impl TileSwap {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<TileSwap, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => {
                ts::Config::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => ts::Config::default(),
        };
        init_logging(&config.log_filter);

        let layout = ts::Layout::new(ts::Grid::new(config.cols, config.rows), config.view_width);
        canvas.set_width(layout.view_width().ceil() as u32);
        canvas.set_height(layout.view_height().ceil() as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let renderer = CanvasRenderer {
            canvas: ContextCanvas { ctx },
            layout,
        };
        let controller = ts::PuzzleController::new(config, renderer, ts::ManualClock::new())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(TileSwap { controller })
    }

    /// Handles a click at canvas pixel coordinates.
    pub fn click(&mut self, x: f64, y: f64) {
        self.controller.handle_click(x, y);
    }

    /// Advances the running animation; returns whether it is still running.
    pub fn tick(&mut self) -> bool {
        self.controller.tick()
    }

    /// Milliseconds between ticks, or 0 when nothing is animating.
    #[wasm_bindgen(js_name = tickInterval)]
    pub fn tick_interval(&self) -> u32 {
        self.controller
            .clock()
            .interval()
            .map_or(0, |interval| interval.as_millis() as u32)
    }

    pub fn reset(&mut self) {
        self.controller.reset_puzzle();
    }

    pub fn undo(&mut self) {
        self.controller.undo_move();
    }

    pub fn replay(&mut self) {
        self.controller.replay_moves();
    }

    /// Loads a share code into the moves text.
    ///
    /// Returns false when the code was ignored because an animation is
    /// running; throws when the code is malformed.
    #[wasm_bindgen(js_name = loadCode)]
    pub fn load_code(&mut self, code: &str) -> Result<bool, String> {
        self.controller.load_code(code).map_err(|e| e.to_string())
    }

    pub fn moves(&self) -> String {
        self.controller.moves_text().to_string()
    }

    #[wasm_bindgen(js_name = setMoves)]
    pub fn set_moves(&mut self, text: String) {
        self.controller.set_moves_text(text);
    }

    #[wasm_bindgen(js_name = solveCode)]
    pub fn solve_code(&self) -> String {
        self.controller.solve_code().to_string()
    }

    pub fn status(&self) -> String {
        self.controller.status().to_string()
    }
}

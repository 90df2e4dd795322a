use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::thread;
use tileswap::*;
use tracing_subscriber::EnvFilter;

/// Replays tile swap moves headlessly and prints the puzzle as it changes.
#[derive(Debug, Parser)]
#[command(name = "tileswap", version)]
struct Cli {
    /// JSON file with puzzle settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Move symbols to replay, e.g. "BHIJ".
    #[arg(long, conflicts_with = "code")]
    moves: Option<String>,

    /// Share code to decode and replay.
    #[arg(long)]
    code: Option<String>,

    /// Number of moves to take back after the replay.
    #[arg(long, default_value_t = 0)]
    undo: usize,

    /// Wait one tick interval between animation steps.
    #[arg(long)]
    watch: bool,
}

/// Prints the puzzle whenever a settled frame shows a new arrangement.
struct TerminalRenderer {
    layout: Layout,
    shown: Vec<usize>,
}

impl Renderer for TerminalRenderer {
    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn render_frame(&mut self, frame: &Frame<'_>) {
        if frame.is_settled() && frame.model.tiles() != self.shown.as_slice() {
            self.shown = frame.model.tiles().to_vec();
            println!("{}", frame.model);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    // --- 1. Settings ---
    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Config::from_json(&json).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };
    let interval = config.tick_interval();

    let renderer = TerminalRenderer {
        layout: Layout::new(Grid::new(config.cols, config.rows), config.view_width),
        shown: Vec::new(),
    };
    let mut controller = PuzzleController::new(config, renderer, ManualClock::new())
        .context("invalid settings")?;
    println!("{}", controller.status());

    // --- 2. Moves to replay ---
    if let Some(code) = &cli.code {
        controller.load_code(code).context("decoding share code")?;
    } else if let Some(moves) = &cli.moves {
        controller.set_moves_text(moves.as_str());
    }

    let drive = |controller: &mut PuzzleController<TerminalRenderer, ManualClock>| {
        while controller.tick() {
            if cli.watch {
                thread::sleep(interval);
            }
        }
    };

    controller.replay_moves();
    drive(&mut controller);
    println!("{}", controller.status());

    // --- 3. Take moves back ---
    for _ in 0..cli.undo {
        if controller.model().moves().is_empty() {
            break;
        }
        controller.undo_move();
        drive(&mut controller);
    }
    if cli.undo > 0 {
        println!("{}", controller.status());
    }

    // --- 4. Result ---
    println!("moves: {}", controller.moves_text());
    if controller.model().is_solved() {
        println!("code: {}", controller.solve_code());
    }
    Ok(())
}

use crate::error::ConfigError;
use std::time::Duration;

/// Tile glyphs exist for the values 1 through 9.
pub const MAX_TILES: usize = 9;

/// Settings of a puzzle session.
///
/// Every field has a default, so a JSON config only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub cols: usize,
    pub rows: usize,
    /// Width of the drawing surface in pixels; all geometry scales from it.
    pub view_width: f64,
    /// How often the host should tick a running animation.
    pub tick_interval_ms: u32,
    /// Steps spent moving two tiles together before (and apart after) a swap.
    pub connect_steps: u32,
    /// Steps spent turning the pair half a circle.
    pub rotate_steps: u32,
    /// Steps of the spin played when the puzzle is solved.
    pub solve_steps: u32,
    /// Full turns each tile makes during the solve spin.
    pub solve_turns: u32,
    /// Play the solve spin before announcing the result.
    pub celebrate: bool,
    /// `tracing` filter directive for hosts that install a subscriber.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cols: 3,
            rows: 3,
            view_width: 400.0,
            tick_interval_ms: 5,
            connect_steps: 30,
            rotate_steps: 100,
            solve_steps: 1000,
            solve_turns: 5,
            celebrate: true,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses a JSON config and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let num_tiles = self.cols * self.rows;
        if !(2..=MAX_TILES).contains(&num_tiles) {
            return invalid(format!(
                "a {}x{} grid has {num_tiles} tiles; between 2 and {MAX_TILES} are supported",
                self.cols, self.rows
            ));
        }
        if !(self.view_width.is_finite() && self.view_width > 0.0) {
            return invalid(format!("view width {} must be positive", self.view_width));
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick interval must be at least 1 ms".to_string());
        }
        if self.connect_steps == 0 || self.rotate_steps == 0 || self.solve_steps == 0 {
            return invalid("animation step counts must be positive".to_string());
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_interval_ms))
    }
}

fn invalid(reason: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid { reason })
}

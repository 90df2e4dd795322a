//! Error types for the puzzle core.
//!
//! None of these are fatal. The controller absorbs each of them and reflects
//! it in the status line or simply leaves the puzzle untouched.

use crate::pair::SwapPair;
use derive_more::{Display, Error};

/// A swap the model refused to perform.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SwapError {
    /// The tile values do not sum to a multiple of 3 or 5.
    #[display("swap {pair} is illegal: tile values sum to {sum}")]
    Illegal { pair: SwapPair, sum: usize },

    /// One of the positions is outside the grid, or both positions are the same.
    #[display("swap {pair} does not fit a grid of {num_tiles} tiles")]
    OutOfBounds { pair: SwapPair, num_tiles: usize },
}

/// A compact share code that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CodeError {
    /// The text is not standard base64.
    #[display("code is not valid base64: {source}")]
    InvalidBase64 { source: base64::DecodeError },

    /// Salt and length bytes are missing.
    #[display("code is too short ({len} bytes)")]
    TooShort { len: usize },

    /// The length byte promises more moves than the code holds.
    #[display("code declares {declared} moves but holds only {available} packed bytes")]
    MissingMoves { declared: usize, available: usize },

    /// A nibble decodes to a move the grid cannot have.
    #[display("code contains unknown move code {code}")]
    InvalidMove { code: u8 },
}

/// User-edited move text that contains something other than move symbols.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveTextError {
    #[display("unknown move symbol {symbol:?} at index {index}")]
    InvalidSymbol { index: usize, symbol: char },
}

/// Configuration that could not be loaded.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("config is not valid JSON: {source}")]
    Parse { source: serde_json::Error },

    #[display("invalid config: {reason}")]
    Invalid { reason: String },
}

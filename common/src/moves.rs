use crate::error::{CodeError, MoveTextError};
use crate::model::Grid;
use crate::pair::SwapPair;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt;
use tracing::{debug, warn};

/// The first move symbol. A move code `c` is shown as `FIRST_SYMBOL + c`.
const FIRST_SYMBOL: u32 = 'A' as u32;

/// The length field of a compact code is a single byte.
pub const MAX_CODE_MOVES: usize = 255;

/// Move codes are packed two per byte, so each must fit in a nibble.
const NIBBLE: u8 = 0x0f;
const MAX_NIBBLE_CODE: usize = NIBBLE as usize;

/// The reduced history of swaps performed on a puzzle.
///
/// Each move is a single code: `0..=num_tiles-2` for a swap of position `c`
/// with `c + 1`, and `num_tiles-1..=2*num_tiles-3` for a swap of position
/// `c - (num_tiles-1)` with the tile one row below it. Recording a move equal
/// to the last one removes the last one instead, because the same swap done
/// twice in a row leaves the puzzle unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSequence {
    grid: Grid,
    codes: Vec<usize>,
}

impl MoveSequence {
    pub fn new(grid: Grid) -> Self {
        MoveSequence {
            grid,
            codes: Vec::new(),
        }
    }

    /// Builds a sequence from user-edited symbol text.
    ///
    /// The symbols are taken verbatim: repeated symbols are not cancelled
    /// here, they will cancel when the moves are replayed.
    pub fn parse(grid: Grid, text: &str) -> Result<Self, MoveTextError> {
        let max_code = grid.max_move_code();
        let codes = text
            .trim()
            .chars()
            .enumerate()
            .map(|(index, symbol)| {
                u32::from(symbol)
                    .checked_sub(FIRST_SYMBOL)
                    .and_then(|code| usize::try_from(code).ok())
                    .filter(|&code| code <= max_code)
                    .ok_or(MoveTextError::InvalidSymbol { index, symbol })
            })
            .collect::<Result<Vec<usize>, _>>()?;
        Ok(MoveSequence { grid, codes })
    }

    pub fn num_moves(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The move code of a swap; the inverse of [`MoveSequence::decode`].
    pub fn encode(&self, pair: SwapPair) -> usize {
        if pair.is_horizontal() {
            pair.pos1()
        } else {
            pair.pos1() + self.grid.num_tiles() - 1
        }
    }

    /// The swap a move code stands for.
    pub fn decode(&self, code: usize) -> SwapPair {
        let horizontal_codes = self.grid.num_tiles() - 1;
        if code >= horizontal_codes {
            let pos = code - horizontal_codes;
            SwapPair::new(pos, pos + self.grid.cols())
        } else {
            SwapPair::new(code, code + 1)
        }
    }

    /// Records a swap, cancelling it against the previous move if they are the same.
    pub fn add_move(&mut self, pair: SwapPair) {
        let code = self.encode(pair);
        if self.codes.last() == Some(&code) {
            self.codes.pop();
        } else {
            self.codes.push(code);
        }
    }

    pub fn move_at(&self, index: usize) -> Option<SwapPair> {
        self.codes.get(index).map(|&code| self.decode(code))
    }

    pub fn last_move(&self) -> Option<SwapPair> {
        self.codes.last().map(|&code| self.decode(code))
    }

    pub fn reset(&mut self) {
        self.codes.clear();
    }

    /// The move symbols in order.
    ///
    /// Symbols run from `'A'` upwards through Unicode. A code with no scalar
    /// value of its own, which takes a grid of well over ten thousand tiles,
    /// shows as U+FFFD and cannot be parsed back.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.codes.iter().map(|&code| symbol(code))
    }

    /// Encodes the moves as a shareable code under a random salt.
    ///
    /// See [`MoveSequence::to_compact_code_with_salt`] for the format and its limits.
    pub fn to_compact_code(&self) -> String {
        self.to_compact_code_with_salt(rand::random())
    }

    /// Encodes the moves as `base64([salt][length][packed moves])`.
    ///
    /// Every packed byte holds two move codes, the earlier one in the high
    /// nibble, and is XORed with `salt`. Only the first 255 moves fit in the
    /// length byte; the rest are dropped.
    ///
    /// Precondition: every move code is below 16. That holds for any grid of
    /// at most 9 tiles. Larger codes are masked to four bits, so the code no
    /// longer decodes to the same moves.
    pub fn to_compact_code_with_salt(&self, salt: u8) -> String {
        let count = self.codes.len().min(MAX_CODE_MOVES);
        if count < self.codes.len() {
            debug!(moves = self.codes.len(), "truncating compact code to {MAX_CODE_MOVES} moves");
        }
        if let Some(&code) = self.codes[..count].iter().find(|&&code| code > MAX_NIBBLE_CODE) {
            warn!(code, "move code does not fit four bits; compact code will be lossy");
        }

        let mut bytes = Vec::with_capacity(2 + count.div_ceil(2));
        bytes.push(salt);
        bytes.push(count as u8);
        for chunk in self.codes[..count].chunks(2) {
            let high = nibble(chunk[0]) << 4;
            let low = chunk.get(1).map_or(0, |&code| nibble(code));
            bytes.push((high | low) ^ salt);
        }
        STANDARD.encode(bytes)
    }

    /// Replaces the moves with the ones held by a compact code.
    ///
    /// On failure the sequence is left empty.
    pub fn from_compact_code(&mut self, code: &str) -> Result<(), CodeError> {
        self.codes.clear();
        let result = self.decode_compact(code);
        match result {
            Ok(codes) => {
                self.codes = codes;
                Ok(())
            }
            Err(err) => {
                warn!(%err, "malformed compact code");
                Err(err)
            }
        }
    }

    fn decode_compact(&self, code: &str) -> Result<Vec<usize>, CodeError> {
        let bytes = STANDARD
            .decode(code.trim())
            .map_err(|source| CodeError::InvalidBase64 { source })?;
        let [salt, count, packed @ ..] = bytes.as_slice() else {
            return Err(CodeError::TooShort { len: bytes.len() });
        };
        let count = usize::from(*count);
        if packed.len() < count.div_ceil(2) {
            return Err(CodeError::MissingMoves {
                declared: count,
                available: packed.len(),
            });
        }

        let max_code = self.grid.max_move_code();
        packed
            .iter()
            .flat_map(|&byte| {
                let byte = byte ^ salt;
                [byte >> 4, byte & NIBBLE]
            })
            .take(count)
            .map(|code| {
                if usize::from(code) <= max_code {
                    Ok(usize::from(code))
                } else {
                    Err(CodeError::InvalidMove { code })
                }
            })
            .collect()
    }
}

fn symbol(code: usize) -> char {
    u32::try_from(code)
        .ok()
        .and_then(|code| code.checked_add(FIRST_SYMBOL))
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// The low four bits of a move code.
fn nibble(code: usize) -> u8 {
    (code & MAX_NIBBLE_CODE) as u8
}

impl fmt::Display for MoveSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols().try_for_each(|symbol| write!(f, "{symbol}"))
    }
}

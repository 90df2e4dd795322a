//! Property-based tests for the puzzle model and move history.
//!
//! 1. A freshly reset puzzle is never solved
//! 2. Undoing the recorded history brings back the starting arrangement
//! 3. An illegal swap changes nothing
//! 4. Repeating a move cancels it
//! 5. Move codes survive decode and re-encode
//! 6. Compact codes round-trip under any salt
//! 7. Malformed compact codes leave an empty sequence and an error
//! 8. Undoing a scramble of the solved puzzle solves it again

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use proptest::prelude::*;
use tileswap::{CodeError, Grid, MAX_CODE_MOVES, MoveSequence, PuzzleModel, SwapPair};

// ── Strategies ──────────────────────────────────────────────────────────

/// Grids of 2 to 9 tiles.
fn grid_strategy() -> impl Strategy<Value = Grid> {
    (1usize..=9, 1usize..=9)
        .prop_filter("2 to 9 tiles", |(cols, rows)| (2..=9).contains(&(cols * rows)))
        .prop_map(|(cols, rows)| Grid::new(cols, rows))
}

/// Grids where horizontal and vertical neighbours never coincide.
fn two_dimensional_grid_strategy() -> impl Strategy<Value = Grid> {
    prop_oneof![
        Just(Grid::new(2, 2)),
        Just(Grid::new(2, 3)),
        Just(Grid::new(3, 2)),
        Just(Grid::new(2, 4)),
        Just(Grid::new(4, 2)),
        Just(Grid::new(3, 3)),
    ]
}

/// A grid together with a list of move codes valid for it.
fn grid_and_codes(max_len: usize) -> impl Strategy<Value = (Grid, Vec<usize>)> {
    grid_strategy().prop_flat_map(move |grid| {
        let codes = prop::collection::vec(0..=grid.max_move_code(), 0..=max_len);
        (Just(grid), codes)
    })
}

/// A grid together with a pair of distinct positions inside it.
fn grid_and_pair() -> impl Strategy<Value = (Grid, SwapPair)> {
    grid_strategy().prop_flat_map(|grid| {
        let n = grid.num_tiles();
        (Just(grid), 0..n, 0..n)
            .prop_filter("distinct positions", |(_, a, b)| a != b)
            .prop_map(|(grid, a, b)| (grid, SwapPair::new(a, b)))
    })
}

/// A shortest solution of the 3x3 puzzle from its starting arrangement.
const SOLUTION: &str = "BHIJKEFMDCINKEJABCNK";

fn solved_three_by_three() -> PuzzleModel {
    let mut model = PuzzleModel::new(3, 3);
    let moves = MoveSequence::parse(model.grid(), SOLUTION).expect("solution symbols are valid");
    for index in 0..moves.num_moves() {
        let pair = moves.move_at(index).expect("index is in range");
        model.try_swap_tiles(pair).expect("every solution move is legal");
    }
    model
}

fn model_for(grid: Grid) -> PuzzleModel {
    PuzzleModel::new(grid.cols(), grid.rows())
}

/// Tries the swap behind every code; illegal ones are skipped.
fn play(model: &mut PuzzleModel, codes: &[usize]) {
    for &code in codes {
        let pair = model.moves().decode(code);
        let _ = model.try_swap_tiles(pair);
    }
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn reset_puzzle_is_not_solved(grid in grid_strategy()) {
        let mut model = model_for(grid);
        prop_assert!(!model.is_solved());
        model.reset();
        prop_assert!(!model.is_solved());
        prop_assert!(model.moves().is_empty());
    }

    #[test]
    fn undoing_history_restores_start((grid, codes) in grid_and_codes(60)) {
        let mut model = model_for(grid);
        let start = model.tiles().to_vec();
        play(&mut model, &codes);

        while let Some(pair) = model.moves().last_move() {
            let before = model.moves().num_moves();
            prop_assert!(model.try_swap_tiles(pair).is_ok());
            prop_assert_eq!(model.moves().num_moves(), before - 1);
        }
        prop_assert_eq!(model.tiles(), start.as_slice());
    }

    #[test]
    fn illegal_swap_changes_nothing(
        (grid, pair) in grid_and_pair(),
        codes in prop::collection::vec(0usize..16, 0..20),
    ) {
        let mut model = model_for(grid);
        let valid: Vec<usize> = codes.into_iter().filter(|&code| code <= grid.max_move_code()).collect();
        play(&mut model, &valid);

        let tiles = model.tiles().to_vec();
        let history = model.moves().to_string();
        if model.can_swap_tiles(pair) {
            prop_assert!(model.try_swap_tiles(pair).is_ok());
        } else {
            prop_assert!(model.try_swap_tiles(pair).is_err());
            prop_assert_eq!(model.tiles(), tiles.as_slice());
            prop_assert_eq!(model.moves().to_string(), history);
        }
    }

    #[test]
    fn repeated_move_cancels((grid, codes) in grid_and_codes(40), pick in any::<prop::sample::Index>()) {
        let mut moves = MoveSequence::new(grid);
        for &code in &codes {
            moves.add_move(moves.decode(code));
        }
        let before = moves.to_string();

        let code = pick.index(grid.max_move_code() + 1);
        let pair = moves.decode(code);
        moves.add_move(pair);
        moves.add_move(pair);
        prop_assert_eq!(moves.to_string(), before);
    }

    #[test]
    fn move_codes_survive_reencoding(grid in two_dimensional_grid_strategy()) {
        for code in 0..=grid.max_move_code() {
            let mut moves = MoveSequence::new(grid);
            moves.add_move(moves.decode(code));
            let pair = moves.move_at(0);
            prop_assert_eq!(pair, Some(moves.decode(code)));
            prop_assert_eq!(moves.encode(moves.decode(code)), code);
            prop_assert_eq!(moves.symbols().next(), char::from_u32('A' as u32 + code as u32));
        }
    }

    #[test]
    fn compact_code_round_trips((grid, codes) in grid_and_codes(MAX_CODE_MOVES), salt in any::<u8>()) {
        let mut moves = MoveSequence::new(grid);
        for &code in &codes {
            moves.add_move(moves.decode(code));
        }
        let code = moves.to_compact_code_with_salt(salt);

        let mut decoded = MoveSequence::new(grid);
        prop_assert!(decoded.from_compact_code(&code).is_ok());
        prop_assert_eq!(decoded.to_string(), moves.to_string());
    }

    #[test]
    fn short_codes_are_rejected(grid in grid_strategy(), bytes in prop::collection::vec(any::<u8>(), 0..2)) {
        let mut moves = MoveSequence::new(grid);
        moves.add_move(moves.decode(0));
        let err = moves.from_compact_code(&STANDARD.encode(&bytes));
        prop_assert_eq!(err, Err(CodeError::TooShort { len: bytes.len() }));
        prop_assert!(moves.is_empty());
    }

    #[test]
    fn non_base64_codes_are_rejected(grid in grid_strategy(), text in "[A-Za-z0-9]{0,8}[!?*#][A-Za-z0-9]{0,8}") {
        let mut moves = MoveSequence::new(grid);
        moves.add_move(moves.decode(0));
        let result = moves.from_compact_code(&text);
        prop_assert!(matches!(result, Err(CodeError::InvalidBase64 { .. })), "expected invalid base64, got {:?}", result);
        prop_assert!(moves.is_empty());
    }

    #[test]
    fn truncated_codes_are_rejected(grid in grid_strategy(), salt in any::<u8>(), declared in 3u8..=255) {
        // Room for one packed byte, two moves, at most.
        let code = STANDARD.encode([salt, declared, salt]);
        let mut moves = MoveSequence::new(grid);
        let result = moves.from_compact_code(&code);
        prop_assert!(matches!(result, Err(CodeError::MissingMoves { .. })), "expected missing moves, got {:?}", result);
        prop_assert!(moves.is_empty());
    }

    #[test]
    fn out_of_range_nibbles_are_rejected(
        (grid, nibble) in prop_oneof![
            Just(Grid::new(2, 1)),
            Just(Grid::new(1, 2)),
            Just(Grid::new(3, 1)),
            Just(Grid::new(2, 2)),
            Just(Grid::new(3, 2)),
        ]
        .prop_flat_map(|grid| (Just(grid), (grid.max_move_code() as u8 + 1)..16)),
        salt in any::<u8>(),
    ) {
        let code = STANDARD.encode([salt, 1, (nibble << 4) ^ salt]);
        let mut moves = MoveSequence::new(grid);
        moves.add_move(moves.decode(0));
        let result = moves.from_compact_code(&code);
        prop_assert_eq!(result, Err(CodeError::InvalidMove { code: nibble }));
        prop_assert!(moves.is_empty());
    }

    #[test]
    fn undoing_a_scramble_of_the_solved_puzzle_solves_it(
        codes in prop::collection::vec(0..=Grid::new(3, 3).max_move_code(), 0..80),
    ) {
        let mut model = solved_three_by_three();
        prop_assert!(model.is_solved());

        let mut scramble = Vec::new();
        for &code in &codes {
            let pair = model.moves().decode(code);
            if model.try_swap_tiles(pair).is_ok() {
                scramble.push(pair);
            }
        }
        for &pair in scramble.iter().rev() {
            prop_assert!(model.try_swap_tiles(pair).is_ok());
        }
        prop_assert!(model.is_solved());
        prop_assert_eq!(model.moves().to_string(), SOLUTION);
    }
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn three_by_three_scenarios() {
    let mut model = PuzzleModel::new(3, 3);

    // Values 9 and 8 sum to 17.
    assert!(model.try_swap_tiles(SwapPair::new(0, 1)).is_err());

    // Values 8 and 7 sum to 15.
    model.try_swap_tiles(SwapPair::new(1, 2)).unwrap();
    let values: Vec<usize> = (0..9).map(|pos| model.tile_value_at(pos)).collect();
    assert_eq!(values, vec![9, 7, 8, 6, 5, 4, 3, 2, 1]);
    assert_eq!(model.moves().to_string(), "B");

    model.try_swap_tiles(SwapPair::new(1, 2)).unwrap();
    assert_eq!(model.tiles(), PuzzleModel::new(3, 3).tiles());
    assert!(model.moves().is_empty());
}

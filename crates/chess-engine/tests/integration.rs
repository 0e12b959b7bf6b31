//! Integration tests for chess-engine: whole games through the public API.

use chess_core::{Color, Move, PieceKind, Square};
use chess_engine::{all_moves, candidate_moves, rules, Board, Game, Outcome};
use proptest::prelude::*;

fn play(board: &mut Board, moves: &[&str]) {
    let size = board.size();
    for text in moves {
        let mov = Move::from_coordinate(text, size).unwrap();
        assert!(board.move_piece(mov.from, mov.to), "move {} rejected", text);
    }
}

#[test]
fn scholars_mate() {
    let mut board = Board::standard(8).unwrap();
    play(
        &mut board,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );

    assert!(rules::is_check(&board, Color::Black));
    assert!(rules::is_checkmate(&mut board, Color::Black));
    assert!(!rules::is_checkmate(&mut board, Color::White));
    assert_eq!(board.history().last().map(String::as_str), Some("Qh5xf7"));
}

#[test]
fn fools_mate() {
    let mut board = Board::standard(8).unwrap();
    play(&mut board, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(rules::is_checkmate(&mut board, Color::White));
    assert!(!rules::is_checkmate(&mut board, Color::Black));
}

#[test]
fn starting_position_on_every_size() {
    for size in (8..=16).step_by(2) {
        let board = Board::standard(size).unwrap();
        for color in Color::BOTH {
            assert!(!rules::is_check(&board, color), "size {}", size);
            assert!(!all_moves(&board, color).is_empty(), "size {}", size);
        }
    }
}

#[test]
fn castling_relocates_rook_and_marks_both_moved() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let sq = |s: &str| Square::from_notation(s, 8).unwrap();

    assert!(candidate_moves(&board, sq("e1")).contains(&sq("c1")));
    assert!(board.move_piece(sq("e1"), sq("c1")));

    let king = board.piece_at(sq("c1")).unwrap();
    let rook = board.piece_at(sq("d1")).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(king.has_moved && rook.has_moved);
    assert!(board.piece_at(sq("a1")).is_none());
    assert!(board.to_fen(Color::Black).contains(" kq "));
}

#[test]
fn game_session_plays_to_mate() {
    let mut game = Game::new(8).unwrap();
    game.start();
    for mv in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
        game.play_coordinate(mv).unwrap();
    }
    assert_eq!(
        game.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
    let pgn = game.to_pgn(&Default::default());
    assert!(pgn.contains("4. Qh5xf7 1-0"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Random walks of real moves never leave the board inconsistent, and
    /// trial moves on top of them are fully undone.
    #[test]
    fn random_games_keep_board_consistent(
        half in 4usize..=6,
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..24),
    ) {
        let mut board = Board::standard(half * 2).unwrap();
        let mut color = Color::White;
        for pick in picks {
            let moves = all_moves(&board, color);
            if moves.is_empty() {
                break;
            }
            let mov = moves[pick.index(moves.len())];

            let before = board.clone();
            let undo = board.make_move(mov).unwrap();
            board.unmake_move(undo);
            prop_assert_eq!(&board, &before);

            prop_assert!(board.move_piece(mov.from, mov.to));
            prop_assert!(board.piece_at(mov.to).is_some_and(|p| p.has_moved));
            prop_assert!(board.piece_at(mov.from).is_none());
            color = color.opposite();
        }
        prop_assert_eq!(board.history().len(), board.records().len());
    }

    #[test]
    fn fen_round_trips_after_random_play(
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..12),
    ) {
        let mut board = Board::standard(8).unwrap();
        let mut color = Color::White;
        for pick in picks {
            let moves = all_moves(&board, color);
            if moves.is_empty() {
                break;
            }
            let mov = moves[pick.index(moves.len())];
            board.move_piece(mov.from, mov.to);
            color = color.opposite();
        }
        let reloaded = Board::from_fen(&board.to_fen(color)).unwrap();
        for row in 0..8 {
            for col in 0..8 {
                let a = board.get_piece(row, col).map(|p| (p.kind, p.color));
                let b = reloaded.get_piece(row, col).map(|p| (p.kind, p.color));
                prop_assert_eq!(a, b);
            }
        }
    }
}

//! FEN import and export for [`Board`].
//!
//! FEN carries no per-piece move flags, so they are derived on import:
//! pawns off their start row have moved, and kings and rooks are unmoved
//! exactly when the castling field still grants the matching right.

use crate::{Board, BoardError};
use chess_core::{Color, FenParser, Piece, PieceKind, Square};

fn castling_letters(color: Color) -> (char, char) {
    match color {
        Color::White => ('K', 'Q'),
        Color::Black => ('k', 'q'),
    }
}

impl Board {
    /// Builds a board from a FEN string. The board size is the rank count.
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let parsed = FenParser::parse(fen)?;
        let size = parsed.size();
        let mut board = Board::new(size)?;

        for (row, rank) in parsed.ranks.iter().enumerate() {
            for (col, cell) in rank.iter().enumerate() {
                let (Some((kind, color)), Some(sq)) = (cell, Square::new(row, col, size)) else {
                    continue;
                };
                let mut piece = Piece::new(*kind, *color);
                if *kind == PieceKind::Pawn {
                    piece.has_moved = row != color.pawn_row(size);
                }
                board.set_piece(sq, Some(piece));
            }
        }

        for color in Color::BOTH {
            let (kingside, queenside) = castling_letters(color);
            let kingside = parsed.has_castling_right(kingside);
            let queenside = parsed.has_castling_right(queenside);
            let king = board.king_square(color);

            for (sq, mut piece) in board.pieces(color).collect::<Vec<_>>() {
                piece.has_moved = match piece.kind {
                    PieceKind::King => !(kingside || queenside),
                    PieceKind::Rook => match king {
                        Some(k) if k.row == sq.row && sq.col > k.col => !kingside,
                        Some(k) if k.row == sq.row && sq.col < k.col => !queenside,
                        _ => true,
                    },
                    _ => continue,
                };
                board.set_piece(sq, Some(piece));
            }
        }

        Ok(board)
    }

    /// Encodes the position as FEN with `side_to_move` to play.
    ///
    /// En passant is always `-` and the halfmove clock `0`; the fullmove
    /// number follows the recorded history.
    pub fn to_fen(&self, side_to_move: Color) -> String {
        let size = self.size();
        let mut placement = String::new();
        for row in 0..size {
            if row > 0 {
                placement.push('/');
            }
            let mut empty = 0;
            for col in 0..size {
                match self.get_piece(row, col) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
        }

        let mut castling = String::new();
        for color in Color::BOTH {
            let (kingside, queenside) = castling_letters(color);
            if let Some(k) = self.king_square(color) {
                if self.piece_at(k).is_some_and(|p| !p.has_moved) {
                    let rooks: Vec<Square> = self
                        .pieces(color)
                        .filter(|(sq, p)| {
                            p.kind == PieceKind::Rook && !p.has_moved && sq.row == k.row
                        })
                        .map(|(sq, _)| sq)
                        .collect();
                    if rooks.iter().any(|r| r.col > k.col) {
                        castling.push(kingside);
                    }
                    if rooks.iter().any(|r| r.col < k.col) {
                        castling.push(queenside);
                    }
                }
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let active = match side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let fullmove = self.records().len() / 2 + 1;

        format!("{} {} {} - 0 {}", placement, active, castling, fullmove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col, 8).unwrap()
    }

    #[test]
    fn startpos_round_trip() {
        let board = Board::standard(8).unwrap();
        assert_eq!(board.to_fen(Color::White), FenParser::STARTPOS);
        assert_eq!(Board::from_fen(FenParser::STARTPOS).unwrap(), board);
    }

    #[test]
    fn fen_after_moves() {
        let mut board = Board::standard(8).unwrap();
        board.move_piece(sq(6, 4), sq(4, 4));
        assert_eq!(
            board.to_fen(Color::Black),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
        board.move_piece(sq(1, 4), sq(3, 4));
        board.move_piece(sq(7, 4), sq(6, 4));
        assert_eq!(
            board.to_fen(Color::Black),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPPKPPP/RNBQ1BNR b kq - 0 2"
        );
    }

    #[test]
    fn derives_move_flags() {
        let board = Board::from_fen("r3k2r/8/8/8/8/4P3/P7/R3K2R w Kq - 0 1").unwrap();
        assert!(!board.get_piece(7, 4).unwrap().has_moved);
        assert!(!board.get_piece(7, 7).unwrap().has_moved);
        assert!(board.get_piece(7, 0).unwrap().has_moved);
        assert!(!board.get_piece(0, 0).unwrap().has_moved);
        assert!(board.get_piece(0, 7).unwrap().has_moved);
        assert!(!board.get_piece(6, 0).unwrap().has_moved);
        assert!(board.get_piece(5, 4).unwrap().has_moved);
    }

    #[test]
    fn wide_board_round_trip() {
        let board = Board::standard(10).unwrap();
        let fen = board.to_fen(Color::White);
        assert!(fen.starts_with("rnbqkbnr2/pppppppppp/10/"));
        assert_eq!(Board::from_fen(&fen).unwrap(), board);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8 w - - 0 1"),
            Err(BoardError::UnsupportedSize(6))
        ));
        assert!(matches!(
            Board::from_fen("not a fen"),
            Err(BoardError::Fen(_))
        ));
    }
}

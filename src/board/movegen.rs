/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Bitboard, Board, Color, Piece, PieceKind, Rank, Square};

/// Deltas for the movement of the Queen.
const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the Knight.
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// Computes the pseudo-legal targets of whatever piece stands on `square`.
///
/// These are the squares the piece's movement geometry reaches on this board, before
/// removing captures of its own pieces and before considering whether its king is left attacked.
/// If `square` is empty, the result is empty.
///
/// # Example
/// ```
/// # use caissa::{pseudo_legal_targets, Bitboard, Board, Square};
/// let board = Board::default();
/// let knight = pseudo_legal_targets(&board, Square::G1);
/// assert_eq!(knight, Bitboard::from(Square::E2) | Square::F3 | Square::H3);
///
/// assert!(pseudo_legal_targets(&board, Square::E4).is_empty());
/// ```
pub fn pseudo_legal_targets(board: &Board, square: Square) -> Bitboard {
    match board.piece_at(square) {
        Some(piece) => targets_for(board, piece, square),
        None => Bitboard::EMPTY_BOARD,
    }
}

/// Computes the pseudo-legal targets of `piece` as if it stood on `square` of `board`.
///
/// Sliding pieces stop at, and include, the first occupied square in each direction,
/// regardless of who owns it.
pub fn targets_for(board: &Board, piece: Piece, square: Square) -> Bitboard {
    match piece.kind() {
        PieceKind::Pawn => {
            pawn_pushes(board, square, piece.color()) | pawn_attacks(board, square, piece.color())
        }
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(board, square),
        PieceKind::Rook => rook_attacks(board, square),
        PieceKind::Queen => queen_attacks(board, square),
        PieceKind::King => king_attacks(square),
    }
}

/// Fetch the raw, unblocked attacks for a knight on the provided square.
///
/// # Example
/// ```
/// # use caissa::{knight_attacks, Square};
/// assert_eq!(knight_attacks(Square::A1).population(), 2);
/// assert_eq!(knight_attacks(Square::D4).population(), 8);
/// ```
#[inline(always)]
pub fn knight_attacks(square: Square) -> Bitboard {
    leaper_mobility(square, &KNIGHT_DELTAS)
}

/// Fetch the raw, unblocked attacks for a king on the provided square.
#[inline(always)]
pub fn king_attacks(square: Square) -> Bitboard {
    leaper_mobility(square, &QUEEN_DELTAS)
}

/// Computes the possible moves for a Rook at a given [`Square`] on the provided board.
///
/// This will yield a [`Bitboard`] that allows the Rook to capture the first blocker.
#[inline(always)]
pub fn rook_attacks(board: &Board, square: Square) -> Bitboard {
    rider_mobility(board, square, &ROOK_DELTAS)
}

/// Computes the possible moves for a Bishop at a given [`Square`] on the provided board.
///
/// This will yield a [`Bitboard`] that allows the Bishop to capture the first blocker.
#[inline(always)]
pub fn bishop_attacks(board: &Board, square: Square) -> Bitboard {
    rider_mobility(board, square, &BISHOP_DELTAS)
}

/// Computes the possible moves for a Queen at a given [`Square`] on the provided board.
///
/// This is the union of [`rook_attacks`] and [`bishop_attacks`].
#[inline(always)]
pub fn queen_attacks(board: &Board, square: Square) -> Bitboard {
    rook_attacks(board, square) | bishop_attacks(board, square)
}

/// Computes the forward pushes of a `color` pawn on `square`.
///
/// A pawn may step forward one square if it is empty. From its home rank (rank 2 for White,
/// rank 7 for Black) it may instead advance two squares, but only if both squares are empty.
///
/// # Example
/// ```
/// # use caissa::{pawn_pushes, Bitboard, Board, Color, Square};
/// let board = Board::default();
/// let pushes = pawn_pushes(&board, Square::E2, Color::White);
/// assert_eq!(pushes, Bitboard::from(Square::E3) | Square::E4);
/// ```
pub fn pawn_pushes(board: &Board, square: Square, color: Color) -> Bitboard {
    let mut pushes = Bitboard::EMPTY_BOARD;

    let Some(single) = square.forward_by(color, 1).filter(|sq| !board.has(*sq)) else {
        return pushes;
    };
    pushes.set(single);

    if square.rank() == Rank::second(color) {
        if let Some(double) = square.forward_by(color, 2).filter(|sq| !board.has(*sq)) {
            pushes.set(double);
        }
    }

    pushes
}

/// Computes the diagonal captures of a `color` pawn on `square`.
///
/// A forward diagonal is only included when an opponent's piece stands on it.
///
/// # Example
/// ```
/// # use caissa::{pawn_attacks, Bitboard, Board, Color, Square};
/// let board = Board::from_fen("8/8/8/3p1P2/4P3/8/8/8").unwrap();
/// assert_eq!(pawn_attacks(&board, Square::E4, Color::White), Bitboard::from(Square::D5));
/// ```
pub fn pawn_attacks(board: &Board, square: Square, color: Color) -> Bitboard {
    let forward = color.negation_multiplier();

    [-1, 1]
        .into_iter()
        .filter_map(|df| square.offset(df, forward))
        .filter(|sq| board.color_at(*sq) == Some(color.opponent()))
        .collect()
}

/// Moves for the "Leaper" pieces.
/// Leapers may "leap" or "jump" to a square a specified distance away.
///
/// In standard chess, the Leapers are the King and Knight.
fn leaper_mobility(square: Square, deltas: &[(i8, i8)]) -> Bitboard {
    deltas
        .iter()
        .filter_map(|&(df, dr)| square.offset(df, dr))
        .collect()
}

/// Moves for the "Rider" pieces.
/// Riders may "ride" or "slide" an unlimited number of squares in a direction.
///
/// In standard chess, the Riders are the Rook, Bishop, and Queen.
fn rider_mobility(board: &Board, square: Square, deltas: &[(i8, i8)]) -> Bitboard {
    let mut movement = Bitboard::EMPTY_BOARD;

    for &(df, dr) in deltas {
        let mut ray = square;

        // Extend the ray until it leaves the board or hits a piece, which is included
        while let Some(shifted) = ray.offset(df, dr) {
            movement.set(shifted);
            if board.has(shifted) {
                break;
            }
            ray = shifted;
        }
    }

    movement
}

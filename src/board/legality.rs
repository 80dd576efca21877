/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::ops::Deref;

use log::trace;

use super::{pseudo_legal_targets, Bitboard, Board, Color, MoveMap, Piece, Square};

/// Maps every occupied square of `board` to its pseudo-legal targets.
///
/// Nothing is filtered: pieces of both colors are present, and targets may land on friendly pieces.
///
/// # Example
/// ```
/// # use caissa::{pseudo_legal_moves, Board};
/// let moves = pseudo_legal_moves(&Board::default());
/// assert_eq!(moves.len(), 32);
/// ```
pub fn pseudo_legal_moves(board: &Board) -> MoveMap {
    board
        .iter()
        .map(|(square, _)| (square, pseudo_legal_targets(board, square)))
        .collect()
}

/// Removes every move from `moves` that `side` is not allowed to make on ownership grounds.
///
/// Sources that do not hold a piece of `side` keep their entry, but with an empty target set.
/// For the rest, targets occupied by another piece of `side` are removed.
pub fn filter_ownership(board: &Board, side: Color, moves: &mut MoveMap) {
    let own = board.color(side);

    for (&from, targets) in moves.iter_mut() {
        if board.color_at(from) == Some(side) {
            *targets &= !own;
        } else {
            *targets = Bitboard::EMPTY_BOARD;
        }
    }
}

/// Computes every square that `attacker` threatens on `board`.
///
/// This is the union of the ownership-filtered pseudo-legal targets of all of `attacker`'s pieces.
/// Pawns threaten only the diagonals holding an enemy piece, and their pushes count as well,
/// since both come from the same pseudo-legal target set.
///
/// # Example
/// ```
/// # use caissa::{attacked_squares, Board, Color, Square};
/// let board = Board::default();
/// let attacks = attacked_squares(&board, Color::White);
/// assert!(attacks.contains(Square::F3));
/// assert!(!attacks.contains(Square::E5));
/// ```
pub fn attacked_squares(board: &Board, attacker: Color) -> Bitboard {
    let own = board.color(attacker);

    board
        .iter()
        .filter(|(_, piece)| piece.color() == attacker)
        .fold(Bitboard::EMPTY_BOARD, |attacks, (square, _)| {
            attacks | (pseudo_legal_targets(board, square) & !own)
        })
}

/// Returns `true` if `color`'s king stands on a square the opponent attacks.
///
/// # Panics
/// A board without a king of `color` has nothing to defend, and asking about it is a caller error.
/// This function will panic if `color` has no king on `board`.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    let Some(king) = board.king(color) else {
        panic!("Cannot test the safety of {color}'s king: there is no {color} king on {board:?}");
    };

    attacked_squares(board, color.opponent()).contains(king)
}

/// Removes every move from `moves` that would leave `side`'s own king attacked.
///
/// Each remaining move is tried on a scratch copy of `board` and undone afterwards.
///
/// # Panics
/// See [`is_king_attacked`]. Panics if `side` has no king and there is at least one move left to test.
pub fn filter_self_check(board: &Board, side: Color, moves: &mut MoveMap) {
    let mut scratch = *board;
    let mut pruned = 0;

    for (&from, targets) in moves.iter_mut() {
        for to in *targets {
            let simulated = SimulatedMove::new(&mut scratch, from, to);
            if is_king_attacked(&simulated, side) {
                targets.clear(to);
                pruned += 1;
            }
        }
    }

    trace!("Pruned {pruned} move(s) that would leave {side}'s king attacked");
}

/// Computes all legal moves for `side` on `board`.
///
/// Every occupied square appears as a key, even if it belongs to the opponent or has nowhere to go;
/// such keys map to an empty set.
///
/// # Panics
/// See [`filter_self_check`].
///
/// # Example
/// ```
/// # use caissa::{legal_moves, Board, Color};
/// let moves = legal_moves(&Board::default(), Color::White);
/// let count: u8 = moves.values().map(|targets| targets.population()).sum();
/// assert_eq!(count, 20);
/// ```
pub fn legal_moves(board: &Board, side: Color) -> MoveMap {
    let mut moves = pseudo_legal_moves(board);
    filter_ownership(board, side, &mut moves);
    filter_self_check(board, side, &mut moves);
    moves
}

/// A move played on a scratch board for as long as this guard lives.
///
/// Dropping the guard puts the moved piece back on its source square and restores whatever
/// was captured on the destination, even when the guard is dropped during a panic.
struct SimulatedMove<'a> {
    board: &'a mut Board,
    from: Square,
    to: Square,
    moved: Option<Piece>,
    captured: Option<Piece>,
}

impl<'a> SimulatedMove<'a> {
    fn new(board: &'a mut Board, from: Square, to: Square) -> Self {
        let moved = board.take(from);
        let captured = match moved {
            Some(piece) => board.place(piece, to),
            None => None,
        };

        Self {
            board,
            from,
            to,
            moved,
            captured,
        }
    }
}

impl Deref for SimulatedMove<'_> {
    type Target = Board;
    fn deref(&self) -> &Self::Target {
        &*self.board
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        if let Some(piece) = self.moved {
            self.board.take(self.to);
            self.board.place(piece, self.from);
        }
        if let Some(piece) = self.captured {
            self.board.place(piece, self.to);
        }
    }
}

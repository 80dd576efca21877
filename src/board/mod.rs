/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Sets of squares, stored as 64-bit masks.
mod bitboard;

/// The [`Game`] type: a board, a side to move, and the rules for moving.
mod game;

/// Removing moves that are not allowed: capturing your own pieces, and leaving your king attacked.
mod legality;

/// Where each kind of piece can go, ignoring whose king is safe.
mod movegen;

/// The [`Move`] type and the move map returned by move generation.
mod moves;

/// Node counting over the tree of legal moves.
mod perft;

/// Colors, piece kinds, and pieces.
mod piece;

/// The [`Board`]: which piece stands on which square.
mod position;

/// Squares, files, and ranks.
mod square;

pub use bitboard::*;
pub use game::*;
pub use legality::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use square::*;

/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Everything needed to play by the rules: squares, pieces, the board, move generation, and the game itself.
mod board;

/// Textual commands accepted by a game session.
mod cli;

/// An interactive game, driven by commands read from `stdin`.
mod session;

pub use board::*;
pub use cli::*;
pub use session::*;

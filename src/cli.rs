/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;

use crate::Square;

/// A command to be sent to a game session.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<COMMAND>")
)]
pub enum GameCommand {
    /// Print a visual representation of the current board.
    #[command(aliases = ["display", "d"])]
    Board,

    /// Generate and print a FEN string for the current position, or load a position from one.
    ///
    /// Only the piece placements and the side to move are read.
    Fen {
        /// The FEN string to load. If omitted, the current position is printed instead.
        fen: Vec<String>,
    },

    /// List all legal moves in the current position, or for a specific piece.
    ///
    /// Moves are printed one per line, as `<from> <to>`, sorted by source and then destination.
    #[command(alias = "moves")]
    List {
        /// Only list moves of the piece on this square.
        square: Option<Square>,
    },

    /// Move the piece on one square to another, if that is a legal move.
    Move {
        /// The square of the piece to move, such as `e2`.
        from: Square,

        /// The square to move it to, such as `e4`.
        to: Square,
    },

    /// Start a new game from the standard starting position.
    New,

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Quit the game.
    #[command(alias = "exit")]
    Quit,

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },
}

impl FromStr for GameCommand {
    type Err = clap::Error;
    /// Attempt to parse a [`GameCommand`] from a line of input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn test_parse_move() {
        let cmd = "move e2 e4".parse::<GameCommand>().unwrap();
        assert_eq!(
            cmd,
            GameCommand::Move {
                from: Square::E2,
                to: Square::E4
            }
        );

        assert!("move e2".parse::<GameCommand>().is_err());
        assert!("move e2 e9".parse::<GameCommand>().is_err());
        assert!("move z2 e4".parse::<GameCommand>().is_err());
    }

    #[test]
    fn test_aliases() {
        assert_eq!("d".parse::<GameCommand>().unwrap(), GameCommand::Board);
        assert_eq!("display".parse::<GameCommand>().unwrap(), GameCommand::Board);
        assert_eq!("exit".parse::<GameCommand>().unwrap(), GameCommand::Quit);
        assert_eq!(
            "moves a2".parse::<GameCommand>().unwrap(),
            GameCommand::List {
                square: Some(Square::A2)
            }
        );
        assert_eq!(
            "list".parse::<GameCommand>().unwrap(),
            GameCommand::List { square: None }
        );
    }

    #[test]
    fn test_fen_collects_all_fields() {
        let cmd = "fen 4k3/8/8/8/8/8/8/4K3 b - - 0 1"
            .parse::<GameCommand>()
            .unwrap();
        let GameCommand::Fen { fen } = cmd else {
            panic!("expected a fen command, got {cmd:?}");
        };
        assert_eq!(fen.join(" "), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");

        assert_eq!(
            "fen".parse::<GameCommand>().unwrap(),
            GameCommand::Fen { fen: vec![] }
        );
    }

    #[test]
    fn test_help_and_unknown_commands() {
        let err = "help".parse::<GameCommand>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        assert!("castle".parse::<GameCommand>().is_err());
        assert!("perft deep".parse::<GameCommand>().is_err());
    }
}

/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Known node counts from <https://www.chessprogramming.org/Perft_Results>,
//! limited to depths where castling, en passant, and promotion cannot occur.

use caissa::{perft, perft_generic, Game, FEN_STARTPOS};

fn test_perft_fen_nodes(depth: usize, fen: &str, expected: u64) {
    let position = Game::from_fen(fen).unwrap();
    let res = perft(&position, depth);
    assert_eq!(res, expected, "PERFT({depth}) failed on {fen}");
}

#[cfg(test)]
mod startpos_perft {
    use super::*;

    #[test]
    fn test_startpos_perft_1() {
        test_perft_fen_nodes(1, FEN_STARTPOS, 20);
    }

    #[test]
    fn test_startpos_perft_2() {
        test_perft_fen_nodes(2, FEN_STARTPOS, 400);
    }

    #[test]
    fn test_startpos_perft_3() {
        test_perft_fen_nodes(3, FEN_STARTPOS, 8_902);
    }

    #[test]
    #[ignore = "slow without optimizations"]
    fn test_startpos_perft_4() {
        test_perft_fen_nodes(4, FEN_STARTPOS, 197_281);
    }

    #[test]
    fn test_unbulked_perft_matches() {
        let game = Game::new();
        assert_eq!(perft_generic::<false, false>(&game, 2), 400);
    }
}

/// "Position 3": a sparse endgame full of pins along the fourth and fifth ranks.
#[cfg(test)]
mod position_3_perft {
    use super::*;

    const FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    #[test]
    fn test_position_3_perft_1() {
        test_perft_fen_nodes(1, FEN, 14);
    }

    #[test]
    fn test_position_3_perft_2() {
        test_perft_fen_nodes(2, FEN, 191);
    }
}

/// "Position 6": a quiet middlegame where both sides have already castled.
#[cfg(test)]
mod position_6_perft {
    use super::*;

    const FEN: &str = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

    #[test]
    fn test_position_6_perft_1() {
        test_perft_fen_nodes(1, FEN, 46);
    }

    #[test]
    fn test_position_6_perft_2() {
        test_perft_fen_nodes(2, FEN, 2_079);
    }

    #[test]
    fn test_position_6_perft_3() {
        test_perft_fen_nodes(3, FEN, 89_890);
    }
}

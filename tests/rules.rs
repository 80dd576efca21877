/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use caissa::{Bitboard, Color, Game, GameStatus, Piece, Square};

/// Plays each move in `moves`, written as `"e2e4"`, failing the test if any is rejected.
fn play(game: &mut Game, moves: &[&str]) {
    for mv in moves {
        let (from, to) = mv.split_at(2);
        assert!(
            game.make_move_str(from, to).unwrap(),
            "{mv} was rejected in {game:?}"
        );
    }
}

#[test]
fn test_coordinates_round_trip() {
    for x in 0..8 {
        for y in 0..8 {
            let square = Square::from_axis(x, y).unwrap();
            let parsed = square.to_string().parse::<Square>().unwrap();
            assert_eq!(parsed, square);
            assert_eq!(parsed.axis(), (x, y));
        }
    }

    for n in [-1, 8, 100, i8::MIN, i8::MAX] {
        assert_eq!(Square::from_axis(n, 0), None);
        assert_eq!(Square::from_axis(0, n), None);
    }
}

#[test]
fn test_scholars_mate() {
    let mut game = Game::new();
    play(
        &mut game,
        &["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"],
    );

    assert_eq!(game.side_to_move(), Color::Black);
    assert!(game.is_check());
    assert!(game.is_checkmate());
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert!(game.legal_move_list().is_empty());
}

#[test]
fn test_king_may_capture_the_checker_when_undefended() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "e7e5", "d1h5", "b8c6", "h5f7"]);

    // The queen on f7 is undefended, so the king takes it
    assert!(game.is_check());
    assert!(!game.is_checkmate());
    assert_eq!(
        game.legal_moves_from(Square::E8),
        Bitboard::from_square(Square::F7)
    );

    play(&mut game, &["e8f7"]);
    assert_eq!(game.piece_at(Square::F7), Some(Piece::BLACK_KING));
    assert_eq!(game.population(), 30);
}

#[test]
fn test_shortest_stalemate() {
    // Sam Loyd's ten-move stalemate
    let mut game = Game::new();
    play(
        &mut game,
        &[
            "e2e3", "a7a5", "d1h5", "a8a6", "h5a5", "h7h5", "h2h4", "a6h6", "a5c7", "f7f6",
            "c7d7", "e8f7", "d7b7", "d8d3", "b7b8", "d3h7", "b8c8", "f7g6", "c8e6",
        ],
    );

    assert_eq!(game.side_to_move(), Color::Black);
    assert!(!game.is_check());
    assert!(game.is_draw());
    assert!(!game.is_checkmate());
    assert_eq!(game.status(), GameStatus::Stalemate);
}

#[test]
fn test_king_boxed_in_by_its_own_pieces_is_stalemate() {
    // Every White piece is jammed against its own side or a blocking Black pawn
    let game = Game::from_fen("7k/8/8/8/p7/Pp1p4/RP1P4/KRB5 w").unwrap();

    for square in [Square::A2, Square::B1, Square::B2] {
        assert_eq!(game.color_at(square), Some(Color::White), "{square}");
    }

    assert!(game.legal_move_list().is_empty());
    assert!(!game.is_check());
    assert!(game.is_draw());
    assert!(!game.is_checkmate());
    assert_eq!(game.status(), GameStatus::Stalemate);
}

#[test]
fn test_illegal_moves_are_idempotent() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "e7e5"]);
    let before = game;

    let attempts = [
        ("e1", "e3"), // king too far
        ("e4", "e5"), // pawn blocked
        ("d8", "h4"), // opponent's piece
        ("f1", "f3"), // bishop moving straight
        ("a1", "a3"), // through a pawn
        ("c3", "c4"), // empty square
    ];

    for (from, to) in attempts {
        for _ in 0..2 {
            assert!(!game.make_move_str(from, to).unwrap(), "{from}{to}");
            assert_eq!(game, before);
        }
    }

    for (from, to) in [("e9", "e4"), ("e2", ""), ("", ""), ("E2", "E4")] {
        assert!(game.make_move_str(from, to).is_err());
        assert_eq!(game, before);
    }
}

#[test]
fn test_cannot_ignore_check() {
    let mut game = Game::from_fen("4k3/8/8/8/8/8/3q4/R3K3 w").unwrap();
    assert!(game.is_check());

    // The rook cannot wander off while the king is attacked
    assert!(!game.try_move(Square::A1, Square::A8));
    // But the king can take the undefended queen
    assert!(game.try_move(Square::E1, Square::D2));
    assert!(!game.is_check());
}

#[test]
fn test_pieces_never_capture_their_own() {
    let game = Game::new();
    for (from, targets) in game.legal_moves() {
        for to in targets {
            assert_ne!(
                game.color_at(to),
                game.color_at(from),
                "{from}{to} captures a friendly piece"
            );
        }
    }
}

#[test]
fn test_fen_round_trip_through_play() {
    let mut game = Game::new();
    play(&mut game, &["g1f3", "d7d5", "g2g3"]);
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/ppp1pppp/8/3p4/8/5NP1/PPPPPP1P/RNBQKB1R b - - 0 1"
    );

    let reloaded = Game::from_fen(&game.to_fen()).unwrap();
    assert_eq!(reloaded, game);
}

/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Deref, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, trace};

use super::{
    filter_ownership, filter_self_check, is_king_attacked, legal_moves, pseudo_legal_targets,
    Bitboard, Board, Color, Move, MoveMap, PieceKind, Square,
};

/// FEN string for the starting position of chess.
///
/// Only the placements and side to move are meaningful here; the remaining fields are always `- - 0 1`.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// Classification of a [`Game`]'s current position, from the perspective of the side to move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum GameStatus {
    /// The side to move has legal moves and is not in check.
    Ongoing,

    /// The side to move is in check, but can get out of it.
    Check,

    /// The side to move is in check and has no legal moves. The opponent has won.
    Checkmate,

    /// The side to move is not in check, but has no legal moves. The game is drawn.
    Stalemate,
}

impl GameStatus {
    /// Returns `true` if no more moves can be played.
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Ongoing => "ongoing",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
        };
        write!(f, "{status}")
    }
}

/// A game of chess between two players.
///
/// This type owns the [`Board`] and remembers whose turn it is. Every move passes through the
/// legality filter before it is applied, so a [`Game`] only ever reaches positions that could occur in play
/// (castling, en passant, and promotion aside).
///
/// The basic methods you're probably looking for are [`Game::new`], [`Game::try_move`], and [`Game::legal_moves`].
///
/// # Example
/// ```
/// # use caissa::{Game, Color, GameStatus};
/// let mut game = Game::new();
/// assert!(game.make_move_str("e2", "e4").unwrap());
/// assert_eq!(game.side_to_move(), Color::Black);
/// assert_eq!(game.status(), GameStatus::Ongoing);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Game {
    /// Where every piece is.
    board: Board,

    /// The [`Color`] of the current player.
    side_to_move: Color,
}

impl Game {
    /// Creates a new [`Game`] in the standard starting position, with White to move.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            board: Board::starting_position(),
            side_to_move: Color::White,
        }
    }

    /// Creates a [`Game`] from an arbitrary [`Board`] and side to move.
    ///
    /// No validation is performed. Queries about check panic if the side in question has no king;
    /// see [`is_king_attacked`].
    #[inline(always)]
    pub const fn from_parts(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
        }
    }

    /// Creates a new [`Game`] from the provided FEN string.
    ///
    /// Only the piece placements and the side to move are read; castling rights, en passant,
    /// and the move counters are ignored. If the side to move is omitted, it is White.
    ///
    /// Both players must have exactly one king.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Game, Color};
    /// let game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 b - - 0 1").unwrap();
    /// assert_eq!(game.side_to_move(), Color::Black);
    ///
    /// // No black king
    /// assert!(Game::from_fen("8/8/8/8/8/8/8/R5K1 w").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut split = fen.split_ascii_whitespace();
        let placements = split
            .next()
            .ok_or(anyhow!("FEN string must have piece placements."))?;
        let board = Board::from_fen(placements)?;

        let active_color = split.next().unwrap_or("w");
        let mut chars = active_color.chars();
        let (Some(color), None) = (chars.next(), chars.next()) else {
            bail!("FEN side to move must be a single char. Got {active_color:?}");
        };
        let side_to_move = Color::from_fen(color).context("Failed to parse FEN side to move")?;

        for color in Color::all() {
            let kings = board
                .iter()
                .filter(|(_, piece)| piece.is_king() && piece.color() == color)
                .count();

            if kings != 1 {
                bail!("{color} must have exactly one king. Found {kings} in {placements:?}");
            }
        }

        debug!("Loaded position {placements} with {side_to_move} to move");
        Ok(Self::from_parts(board, side_to_move))
    }

    /// Generates a FEN string of this [`Game`].
    ///
    /// Castling and en passant are never available, and the move counters are not tracked,
    /// so the trailing fields are always `- - 0 1`.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Game, FEN_STARTPOS};
    /// assert_eq!(Game::new().to_fen(), FEN_STARTPOS);
    /// ```
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} - - 0 1",
            self.board.to_fen(),
            self.side_to_move.to_fen()
        )
    }

    /// Puts every piece back on its starting square and gives the move to White.
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("Game reset to the starting position");
    }

    /// Fetch the [`Board`] of this [`Game`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Fetch the [`Color`] of the player whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Computes all legal moves for the side to move.
    ///
    /// Every occupied square is a key of the returned map. Squares holding the opponent's pieces,
    /// or pieces that cannot move, map to an empty [`Bitboard`].
    ///
    /// # Example
    /// ```
    /// # use caissa::{Game, Square};
    /// let moves = Game::new().legal_moves();
    /// assert_eq!(moves.len(), 32);
    /// assert_eq!(moves[&Square::G1].population(), 2);
    /// assert!(moves[&Square::G8].is_empty());
    /// ```
    #[inline(always)]
    pub fn legal_moves(&self) -> MoveMap {
        legal_moves(&self.board, self.side_to_move)
    }

    /// Computes the legal destinations of the piece on `square`.
    ///
    /// Empty if the square is empty or holds a piece of the opponent.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Bitboard, Game, Square};
    /// let game = Game::new();
    /// assert_eq!(game.legal_moves_from(Square::E2), Bitboard::from(Square::E3) | Square::E4);
    /// assert!(game.legal_moves_from(Square::E7).is_empty());
    /// ```
    pub fn legal_moves_from(&self, square: Square) -> Bitboard {
        let mut moves = MoveMap::from([(square, pseudo_legal_targets(&self.board, square))]);
        filter_ownership(&self.board, self.side_to_move, &mut moves);
        filter_self_check(&self.board, self.side_to_move, &mut moves);
        moves.remove(&square).unwrap_or_default()
    }

    /// Computes all legal moves for the side to move, as a flat list ordered by source then destination.
    #[inline(always)]
    pub fn legal_move_list(&self) -> Vec<Move> {
        Move::list(&self.legal_moves())
    }

    /// Returns `true` if the side to move has at least one legal move.
    pub fn has_legal_moves(&self) -> bool {
        self.legal_moves().values().any(Bitboard::is_nonempty)
    }

    /// Attempts to move the piece on `from` to `to`.
    ///
    /// If the move is legal, it is applied (capturing whatever stood on `to`), the turn passes
    /// to the other player, and `true` is returned.
    /// Otherwise nothing changes and `false` is returned.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Game, Square};
    /// let mut game = Game::new();
    /// assert!(!game.try_move(Square::E2, Square::E5));
    /// assert!(game.try_move(Square::E2, Square::E4));
    /// ```
    pub fn try_move(&mut self, from: Square, to: Square) -> bool {
        if !self.legal_moves_from(from).contains(to) {
            trace!("Rejected move {from}{to} for {}", self.side_to_move);
            return false;
        }

        debug!("{} plays {from}{to}", self.side_to_move);
        self.make_move(Move::new(from, to));
        true
    }

    /// Parses two coordinates in algebraic notation and attempts to play the move between them.
    ///
    /// Returns an `Err` if either coordinate is malformed, in which case nothing changes.
    /// Otherwise this behaves like [`Game::try_move`].
    ///
    /// # Example
    /// ```
    /// # use caissa::Game;
    /// let mut game = Game::new();
    /// assert!(game.make_move_str("e2", "e9").is_err());
    /// assert_eq!(game.make_move_str("e2", "e5").unwrap(), false);
    /// assert_eq!(game.make_move_str("e2", "e4").unwrap(), true);
    /// ```
    pub fn make_move_str(&mut self, from: &str, to: &str) -> Result<bool> {
        let mv = Move::from_squares(from, to)?;
        Ok(self.try_move(mv.from(), mv.to()))
    }

    /// Applies the provided [`Move`] and passes the turn. No enforcement of legality.
    ///
    /// Does nothing to the board if `mv.from()` is empty, but still passes the turn.
    #[inline(always)]
    pub fn make_move(&mut self, mv: Move) {
        if let Some(piece) = self.board.take(mv.from()) {
            self.board.place(piece, mv.to());
        }
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Copies `self` and returns a [`Game`] after having applied the provided [`Move`].
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut copied = *self;
        copied.make_move(mv);
        copied
    }

    /// Returns `true` if the side to move's king is attacked by the opponent.
    ///
    /// # Panics
    /// Panics if the side to move has no king. A [`Game`] built with [`Game::new`] or [`Game::from_fen`] always has one.
    #[inline(always)]
    pub fn is_check(&self) -> bool {
        is_king_attacked(&self.board, self.side_to_move)
    }

    /// Returns `true` if the side to move is in check and has no legal moves.
    ///
    /// # Example
    /// ```
    /// # use caissa::Game;
    /// let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w").unwrap();
    /// assert!(!game.is_checkmate());
    /// assert!(game.make_move_str("a1", "a8").unwrap());
    /// assert!(game.is_checkmate());
    /// ```
    #[inline(always)]
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.is_draw()
    }

    /// Returns `true` if the side to move has no legal moves, whether or not it is in check.
    ///
    /// Use [`Game::status`] to tell a stalemate from a checkmate.
    #[inline(always)]
    pub fn is_draw(&self) -> bool {
        !self.has_legal_moves()
    }

    /// Classifies the current position for the side to move.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Game, GameStatus};
    /// let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b").unwrap();
    /// assert_eq!(game.status(), GameStatus::Stalemate);
    /// ```
    pub fn status(&self) -> GameStatus {
        match (self.is_check(), self.has_legal_moves()) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Ongoing,
        }
    }

    /// Counts the pieces of `kind` belonging to `color`.
    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.board
            .iter()
            .filter(|(_, piece)| piece.parts() == (color, kind))
            .count()
    }
}

impl Deref for Game {
    type Target = Board;
    /// A [`Game`] immutably dereferences to a [`Board`], for simplicity.
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.board
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    /// Wrapper for [`Game::from_fen`]
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Default for Game {
    /// Standard starting position for Chess.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    /// Draws the board. With the alternate format mode (`#`), the FEN is printed underneath.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        if f.alternate() {
            write!(f, "\n\nFEN: {}", self.to_fen())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Game({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_moves(game: &Game) -> u32 {
        game.legal_moves()
            .values()
            .map(|targets| targets.population() as u32)
            .sum()
    }

    #[test]
    fn test_starting_position_has_twenty_moves() {
        let game = Game::new();
        assert_eq!(total_moves(&game), 20);

        let pawns = game
            .legal_move_list()
            .into_iter()
            .filter(|mv| game.kind_at(mv.from()) == Some(PieceKind::Pawn))
            .count();
        assert_eq!(pawns, 16);
    }

    #[test]
    fn test_opening_moves_are_not_check() {
        let mut game = Game::new();
        for (from, to) in [("e2", "e4"), ("e7", "e5"), ("d1", "h5")] {
            assert!(game.make_move_str(from, to).unwrap(), "{from}{to}");
        }
        assert!(!game.is_check());
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_check_can_be_blocked() {
        let mut game = Game::new();
        for (from, to) in [("e2", "e4"), ("f7", "f6"), ("d1", "h5")] {
            assert!(game.make_move_str(from, to).unwrap(), "{from}{to}");
        }
        assert!(game.is_check());
        assert!(!game.is_checkmate());
        assert_eq!(game.status(), GameStatus::Check);

        // Only g7g6 blocks, and the king cannot step out of the way
        let moves = game.legal_move_list();
        assert_eq!(moves, vec![Move::new(Square::G7, Square::G6)]);
    }

    #[test]
    fn test_back_rank_mate() {
        let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w").unwrap();
        assert!(game.try_move(Square::A1, Square::A8));
        assert!(game.is_check());
        assert!(game.is_checkmate());
        assert!(game.is_draw());
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert!(game.status().is_over());
    }

    #[test]
    fn test_stalemate() {
        let game = Game::from_fen("7k/5Q2/6K1/8/8/8/8/8 b").unwrap();
        assert!(game.is_draw());
        assert!(!game.is_check());
        assert!(!game.is_checkmate());
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn test_rejected_moves_leave_state_unchanged() {
        let mut game = Game::new();
        let before = game;

        for _ in 0..3 {
            // Blocked, off-geometry, from an empty square, and the opponent's piece
            assert!(!game.try_move(Square::A1, Square::A3));
            assert!(!game.try_move(Square::E2, Square::E5));
            assert!(!game.try_move(Square::E4, Square::E5));
            assert!(!game.try_move(Square::E7, Square::E5));
            assert_eq!(game, before);
        }

        assert!(game.make_move_str("e2", "x4").is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn test_piece_count_after_quiet_move_and_capture() {
        let mut game = Game::new();
        assert!(game.try_move(Square::E2, Square::E4));
        assert!(game.try_move(Square::D7, Square::D5));
        assert_eq!(game.population(), 32);

        assert!(game.try_move(Square::E4, Square::D5));
        assert_eq!(game.population(), 31);
        assert_eq!(game.count(Color::Black, PieceKind::Pawn), 7);
        assert_eq!(game.piece_at(Square::D5).map(|p| p.color()), Some(Color::White));
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new();
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.try_move(Square::G1, Square::F3));
        assert_eq!(game.side_to_move(), Color::Black);

        // White may not move twice
        assert!(!game.try_move(Square::F3, Square::G5));
        assert!(game.try_move(Square::G8, Square::F6));
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn test_reset() {
        let mut game = Game::new();
        assert!(game.try_move(Square::E2, Square::E4));
        game.reset();
        assert_eq!(game, Game::default());
    }

    #[test]
    fn test_fen_validation() {
        assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_ok());
        assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3").is_ok());
        // Two white kings
        assert!(Game::from_fen("4k3/8/8/8/8/8/8/3KK3 w").is_err());
        // Bad side to move
        assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 x").is_err());
        assert!(Game::from_fen("4k3/8/8/8/8/8/8/4K3 white").is_err());
        assert!(Game::from_fen("").is_err());
    }

    #[test]
    fn test_fen_round_trip() {
        let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 0 1";
        assert_eq!(Game::from_fen(fen).unwrap().to_fen(), fen);
        assert_eq!(FEN_STARTPOS.parse::<Game>().unwrap(), Game::new());
    }

    #[test]
    fn test_legal_moves_from_matches_full_map() {
        let game =
            Game::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w").unwrap();
        let moves = game.legal_moves();

        for square in Square::iter() {
            let expected = moves.get(&square).copied().unwrap_or_default();
            assert_eq!(game.legal_moves_from(square), expected, "{square}");
        }
    }
}

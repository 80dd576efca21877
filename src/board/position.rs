/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Context, Result};

use super::{Bitboard, Color, File, Piece, PieceKind, Rank, Square};

/// Piece placements of the standard starting position, in FEN.
pub const FEN_STARTPOS_PLACEMENTS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// A mapping from [`Square`] to the [`Piece`] occupying it.
///
/// Only occupied squares hold a piece; every other square is `None`.
/// The board itself knows nothing about whose turn it is. See [`crate::Game`] for that.
///
/// A [`Board`] does not require each side to have a king.
/// Queries that need one (such as [`crate::is_king_attacked`]) document that requirement.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use caissa::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            mailbox: [None; Square::COUNT],
        }
    }

    /// Creates a [`Board`] set up in the standard starting position.
    ///
    /// White's back rank is on rank 1 with its pawns on rank 2. Black mirrors this on ranks 8 and 7.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Board, Piece, Square};
    /// let board = Board::starting_position();
    /// assert_eq!(board.piece_at(Square::E1), Some(Piece::WHITE_KING));
    /// assert_eq!(board.piece_at(Square::D8), Some(Piece::BLACK_QUEEN));
    /// assert_eq!(board.population(), 32);
    /// ```
    pub fn starting_position() -> Self {
        use PieceKind::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Self::new();
        for color in Color::all() {
            for (file, kind) in File::iter().zip(back_rank) {
                board.place(
                    Piece::new(color, kind),
                    Square::new(file, Rank::first(color)),
                );
                board.place(
                    Piece::new(color, Pawn),
                    Square::new(file, Rank::second(color)),
                );
            }
        }

        board
    }

    /// Constructs a [`Board`] from the piece placements of a FEN string.
    ///
    /// Only the first field is read. Anything after the first space is ignored.
    /// Uppercase letters are White pieces and lowercase letters are Black pieces.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Board, Piece, Square};
    /// let board = Board::from_fen("k7/8/8/8/2N5/8/8/7K w - - 0 1").unwrap();
    /// assert_eq!(board.piece_at(Square::C4), Some(Piece::WHITE_KNIGHT));
    /// assert_eq!(board.piece_at(Square::A8), Some(Piece::BLACK_KING));
    ///
    /// assert!(Board::from_fen("8/8/8").is_err());
    /// assert!(Board::from_fen("9/8/8/8/8/8/8/8").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();

        let placements = fen.split_ascii_whitespace().next().unwrap_or_default();

        if placements.matches('/').count() != 7 {
            bail!("FEN must have piece placements for all 8 ranks. Got {placements:?}");
        }

        // Placements are listed from rank 8 down to rank 1
        for (rank, row) in Rank::iter().rev().zip(placements.split('/')) {
            let mut file = 0;

            for piece_char in row.chars() {
                if let Some(empty) = piece_char.to_digit(10) {
                    if !(1..=File::COUNT as u32).contains(&empty) {
                        bail!(
                            "FEN empty-square counts must be between 1 and 8. Got {piece_char:?} on rank {rank}"
                        );
                    }
                    if file + empty as i8 > File::COUNT as i8 {
                        bail!("FEN rank {rank} describes more than 8 files: {row:?}");
                    }
                    file += empty as i8;
                    continue;
                }

                let piece = Piece::from_fen(piece_char)
                    .context(format!("Failed to parse FEN placements on rank {rank}"))?;
                let Some(square) = Square::from_axis(file, rank.index() as i8) else {
                    bail!("FEN rank {rank} describes more than 8 files: {row:?}");
                };

                board.place(piece, square);
                file += 1;
            }

            if file != File::COUNT as i8 {
                bail!("FEN rank {rank} must describe exactly 8 files. Got {file} in {row:?}");
            }
        }

        Ok(board)
    }

    /// Generates the piece-placement field of a [FEN](https://www.chess.com/terms/fen-chess) string of this [`Board`].
    ///
    /// # Example
    /// ```
    /// # use caissa::Board;
    /// let board = Board::starting_position();
    /// assert_eq!(board.to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    /// ```
    pub fn to_fen(&self) -> String {
        let mut placements = Vec::with_capacity(Rank::COUNT);

        for rank in Rank::iter().rev() {
            let mut row = String::with_capacity(File::COUNT);
            let mut empty_spaces = 0;

            for file in File::iter() {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        row += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    row.push(piece.to_fen());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                row += &empty_spaces.to_string();
            }
            placements.push(row);
        }

        placements.join("/")
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Board, Square};
    /// let board = Board::default();
    /// assert_eq!(board.has(Square::B1), true);
    /// assert_eq!(board.has(Square::B3), false);
    /// ```
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Places the provided [`Piece`] at the supplied [`Square`], replacing whatever was there.
    ///
    /// Returns the piece that was replaced, if any.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Board, Piece, Square};
    /// let mut board = Board::new();
    /// board.place(Piece::WHITE_KNIGHT, Square::C4);
    /// assert_eq!(board.to_fen(), "8/8/8/8/2N5/8/8/8");
    /// ```
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) -> Option<Piece> {
        self.mailbox[square].replace(piece)
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Board, Piece, Square};
    /// let mut board = Board::from_fen("k7/8/8/8/2N5/8/8/7K").unwrap();
    /// let taken = board.take(Square::C4);
    /// assert_eq!(board.to_fen(), "k7/8/8/8/8/8/8/7K");
    /// assert_eq!(taken, Some(Piece::WHITE_KNIGHT));
    /// assert_eq!(board.take(Square::C4), None);
    /// ```
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.mailbox[square].take()
    }

    /// Clears the supplied [`Square`] of any pieces.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.take(square);
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Board, PieceKind, Color, Square};
    /// let board = Board::default();
    /// assert_eq!(board.piece_at(Square::A2).unwrap().kind(), PieceKind::Pawn);
    /// assert_eq!(board.piece_at(Square::A2).unwrap().color(), Color::White);
    /// assert!(board.piece_at(Square::E4).is_none());
    /// ```
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Board, Color, Square};
    /// let board = Board::default();
    /// assert_eq!(board.color_at(Square::A2), Some(Color::White));
    /// assert_eq!(board.color_at(Square::E8), Some(Color::Black));
    /// assert!(board.color_at(Square::E4).is_none());
    /// ```
    #[inline(always)]
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.mailbox[square].map(|piece| piece.color())
    }

    /// Fetches the [`PieceKind`] of the piece at the provided [`Square`], if there is one.
    #[inline(always)]
    pub fn kind_at(&self, square: Square) -> Option<PieceKind> {
        self.mailbox[square].map(|piece| piece.kind())
    }

    /// Fetches a [`Bitboard`] of every square occupied by `color`.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Bitboard, Board, Color};
    /// let board = Board::default();
    /// assert_eq!(board.color(Color::White), Bitboard::RANK_1 | Bitboard::RANK_2);
    /// ```
    pub fn color(&self, color: Color) -> Bitboard {
        self.iter()
            .filter(|(_, piece)| piece.color() == color)
            .map(|(square, _)| square)
            .collect()
    }

    /// Fetches a [`Bitboard`] of every occupied square.
    pub fn occupied(&self) -> Bitboard {
        self.iter().map(|(square, _)| square).collect()
    }

    /// Fetches the [`Square`] of `color`'s king, if it has one.
    ///
    /// If there are several kings of that color, the one nearest `a1` is returned.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Board, Color, Square};
    /// let board = Board::default();
    /// assert_eq!(board.king(Color::White), Some(Square::E1));
    /// assert_eq!(board.king(Color::Black), Some(Square::E8));
    /// assert_eq!(Board::new().king(Color::White), None);
    /// ```
    pub fn king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.iter()
            .find_map(|(square, piece)| (piece == king).then_some(square))
    }

    /// Counts how many pieces are on the board.
    #[inline(always)]
    pub fn population(&self) -> usize {
        self.mailbox.iter().flatten().count()
    }

    /// Returns an iterator over every occupied square and the [`Piece`] on it, from `a1` to `h8`.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Board, Piece, Square};
    /// let board = Board::from_fen("k7/8/8/8/8/8/8/7K").unwrap();
    /// let mut iter = board.iter();
    /// assert_eq!(iter.next(), Some((Square::H1, Piece::WHITE_KING)));
    /// assert_eq!(iter.next(), Some((Square::A8, Piece::BLACK_KING)));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |square| self.piece_at(square).map(|piece| (square, piece)))
    }
}

impl Default for Board {
    /// The standard starting position. See [`Board::starting_position`].
    #[inline(always)]
    fn default() -> Self {
        Self::starting_position()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;
    /// Wrapper for [`Board::from_fen`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.mailbox[index]
    }
}

impl fmt::Display for Board {
    /// Draws the board with column labels above and below, row labels on both sides,
    /// and each piece drawn with its board character. Rank 8 is at the top.
    ///
    /// ```text
    ///     a   b   c   d   e   f   g   h
    ///   +---+---+---+---+---+---+---+---+
    /// 8 | R | N | B | Q | K | B | N | R | 8
    ///   +---+---+---+---+---+---+---+---+
    /// ...
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut labels = String::from("   ");
        for file in File::iter() {
            labels += &format!(" {file}  ");
        }
        let labels = labels.trim_end();
        let separator = format!("  +{}", "---+".repeat(File::COUNT));

        writeln!(f, "{labels}")?;
        writeln!(f, "{separator}")?;
        for rank in Rank::iter().rev() {
            write!(f, "{rank}")?;
            for file in File::iter() {
                let occupant = self
                    .piece_at(Square::new(file, rank))
                    .map(|piece| piece.char())
                    .unwrap_or(' ');
                write!(f, " | {occupant}")?;
            }
            writeln!(f, " | {rank}")?;
            writeln!(f, "{separator}")?;
        }
        write!(f, "{labels}")
    }
}

impl fmt::Debug for Board {
    /// The FEN placements, for compact test failure output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{collections::BTreeMap, fmt, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};

use super::{Bitboard, Square};

/// Every source square on the board, mapped to the set of squares its piece may move to.
///
/// Ordered by source square, so listing moves is deterministic.
pub type MoveMap = BTreeMap<Square, Bitboard>;

/// Represents a move made on a chess board: a piece travelling from one [`Square`] to another.
///
/// There are no special moves, so the two squares are all there is to it.
/// A capture is simply a move onto an occupied square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    /// Creates a new [`Move`] from `from` to `to`.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Move, Square};
    /// let e2e4 = Move::new(Square::E2, Square::E4);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Fetches the source [`Square`] of this [`Move`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Fetches the destination [`Square`] of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Creates a [`Move`] from two coordinates in algebraic notation.
    ///
    /// Will return a [`anyhow::Error`] if either coordinate is invalid.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Move, Square};
    /// assert_eq!(Move::from_squares("g1", "f3").unwrap(), Move::new(Square::G1, Square::F3));
    /// assert!(Move::from_squares("g1", "f9").is_err());
    /// ```
    pub fn from_squares(from: &str, to: &str) -> Result<Self> {
        let from = Square::from_algebraic(from).context("Invalid `from` square")?;
        let to = Square::from_algebraic(to).context("Invalid `to` square")?;
        Ok(Self::new(from, to))
    }

    /// Creates a [`Move`] from the concatenation of two coordinates, such as `"e2e4"`.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Move, Square};
    /// let e7e5 = Move::from_str_pair("e7e5").unwrap();
    /// assert_eq!(e7e5, Move::new(Square::E7, Square::E5));
    /// assert!(Move::from_str_pair("e7").is_err());
    /// assert!(Move::from_str_pair("e7e5q").is_err());
    /// ```
    pub fn from_str_pair(text: &str) -> Result<Self> {
        if text.len() != 4 {
            bail!("Move str must contain exactly two squares. Got {text:?}");
        }

        let from = text
            .get(0..2)
            .ok_or(anyhow!("Move str must contain a `from` square. Got {text:?}"))?;
        let to = text
            .get(2..4)
            .ok_or(anyhow!("Move str must contain a `to` square. Got {text:?}"))?;

        Self::from_squares(from, to)
    }

    /// Flattens a [`MoveMap`] into a list of [`Move`]s, ordered by source square and then by destination.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Bitboard, Move, MoveMap, Square};
    /// let mut moves = MoveMap::new();
    /// moves.insert(Square::G1, Bitboard::from(Square::H3) | Square::F3);
    /// moves.insert(Square::A2, Bitboard::EMPTY_BOARD);
    ///
    /// let list = Move::list(&moves);
    /// assert_eq!(list, vec![Move::new(Square::G1, Square::F3), Move::new(Square::G1, Square::H3)]);
    /// ```
    pub fn list(moves: &MoveMap) -> Vec<Self> {
        moves
            .iter()
            .flat_map(|(&from, targets)| targets.iter().map(move |to| Self::new(from, to)))
            .collect()
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    /// Wrapper for [`Move::from_str_pair`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_pair(s)
    }
}

impl fmt::Display for Move {
    /// A [`Move`] is displayed as its two squares, back to back.
    ///
    /// With the alternate format mode (`#`), the squares are separated by a space.
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{} {}", self.from, self.to)
        } else {
            write!(f, "{}{}", self.from, self.to)
        }
    }
}

impl fmt::Debug for Move {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl<T: AsRef<str>> PartialEq<T> for Move {
    #[inline(always)]
    fn eq(&self, other: &T) -> bool {
        self.to_string().eq(other.as_ref())
    }
}

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

use super::Color;

/// Represents a single square on an `8x8` chess board.
///
/// A square is a (column, row) pair, written in algebraic notation as a file letter `a..h`
/// followed by a rank digit `1..8`. Equivalently, it is a zero-based axis pair `(x, y)` with
/// both components in `[0, 7]`, where `x` counts files from `a` and `y` counts ranks from `1`.
///
/// Internally it is stored as `x + 8 * y`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
///
/// A [`Square`] is always in bounds. Every constructor that could be handed out-of-range input
/// returns an [`Option`] or a [`Result`] instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

impl Square {
    pub const A1: Self = Self::new(File::A, Rank::ONE);
    pub const A2: Self = Self::new(File::A, Rank::TWO);
    pub const A3: Self = Self::new(File::A, Rank::THREE);
    pub const A4: Self = Self::new(File::A, Rank::FOUR);
    pub const A5: Self = Self::new(File::A, Rank::FIVE);
    pub const A6: Self = Self::new(File::A, Rank::SIX);
    pub const A7: Self = Self::new(File::A, Rank::SEVEN);
    pub const A8: Self = Self::new(File::A, Rank::EIGHT);

    pub const B1: Self = Self::new(File::B, Rank::ONE);
    pub const B2: Self = Self::new(File::B, Rank::TWO);
    pub const B3: Self = Self::new(File::B, Rank::THREE);
    pub const B4: Self = Self::new(File::B, Rank::FOUR);
    pub const B5: Self = Self::new(File::B, Rank::FIVE);
    pub const B6: Self = Self::new(File::B, Rank::SIX);
    pub const B7: Self = Self::new(File::B, Rank::SEVEN);
    pub const B8: Self = Self::new(File::B, Rank::EIGHT);

    pub const C1: Self = Self::new(File::C, Rank::ONE);
    pub const C2: Self = Self::new(File::C, Rank::TWO);
    pub const C3: Self = Self::new(File::C, Rank::THREE);
    pub const C4: Self = Self::new(File::C, Rank::FOUR);
    pub const C5: Self = Self::new(File::C, Rank::FIVE);
    pub const C6: Self = Self::new(File::C, Rank::SIX);
    pub const C7: Self = Self::new(File::C, Rank::SEVEN);
    pub const C8: Self = Self::new(File::C, Rank::EIGHT);

    pub const D1: Self = Self::new(File::D, Rank::ONE);
    pub const D2: Self = Self::new(File::D, Rank::TWO);
    pub const D3: Self = Self::new(File::D, Rank::THREE);
    pub const D4: Self = Self::new(File::D, Rank::FOUR);
    pub const D5: Self = Self::new(File::D, Rank::FIVE);
    pub const D6: Self = Self::new(File::D, Rank::SIX);
    pub const D7: Self = Self::new(File::D, Rank::SEVEN);
    pub const D8: Self = Self::new(File::D, Rank::EIGHT);

    pub const E1: Self = Self::new(File::E, Rank::ONE);
    pub const E2: Self = Self::new(File::E, Rank::TWO);
    pub const E3: Self = Self::new(File::E, Rank::THREE);
    pub const E4: Self = Self::new(File::E, Rank::FOUR);
    pub const E5: Self = Self::new(File::E, Rank::FIVE);
    pub const E6: Self = Self::new(File::E, Rank::SIX);
    pub const E7: Self = Self::new(File::E, Rank::SEVEN);
    pub const E8: Self = Self::new(File::E, Rank::EIGHT);

    pub const F1: Self = Self::new(File::F, Rank::ONE);
    pub const F2: Self = Self::new(File::F, Rank::TWO);
    pub const F3: Self = Self::new(File::F, Rank::THREE);
    pub const F4: Self = Self::new(File::F, Rank::FOUR);
    pub const F5: Self = Self::new(File::F, Rank::FIVE);
    pub const F6: Self = Self::new(File::F, Rank::SIX);
    pub const F7: Self = Self::new(File::F, Rank::SEVEN);
    pub const F8: Self = Self::new(File::F, Rank::EIGHT);

    pub const G1: Self = Self::new(File::G, Rank::ONE);
    pub const G2: Self = Self::new(File::G, Rank::TWO);
    pub const G3: Self = Self::new(File::G, Rank::THREE);
    pub const G4: Self = Self::new(File::G, Rank::FOUR);
    pub const G5: Self = Self::new(File::G, Rank::FIVE);
    pub const G6: Self = Self::new(File::G, Rank::SIX);
    pub const G7: Self = Self::new(File::G, Rank::SEVEN);
    pub const G8: Self = Self::new(File::G, Rank::EIGHT);

    pub const H1: Self = Self::new(File::H, Rank::ONE);
    pub const H2: Self = Self::new(File::H, Rank::TWO);
    pub const H3: Self = Self::new(File::H, Rank::THREE);
    pub const H4: Self = Self::new(File::H, Rank::FOUR);
    pub const H5: Self = Self::new(File::H, Rank::FIVE);
    pub const H6: Self = Self::new(File::H, Rank::SIX);
    pub const H7: Self = Self::new(File::H, Rank::SEVEN);
    pub const H8: Self = Self::new(File::H, Rank::EIGHT);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 63;
    pub const COUNT: usize = 64;

    /// Returns an iterator over all available squares, from `a1` to `h8`.
    ///
    /// # Example
    /// ```
    /// # use caissa::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Square::A1);
    /// assert_eq!(iter.last().unwrap(), Square::H8);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use caissa::{Square, File, Rank};
    /// let c4 = Square::new(File::C, Rank::FOUR);
    /// assert_eq!(c4, Square::C4);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 | rank.0 << 3)
    }

    /// Creates a new [`Square`] from a zero-based axis pair.
    ///
    /// Yields `None` if either component lies outside `[0, 7]`. Move generation leans on this to
    /// stop scanning a ray once it runs off the edge of the board.
    ///
    /// # Example
    /// ```
    /// # use caissa::Square;
    /// assert_eq!(Square::from_axis(4, 3), Some(Square::E4));
    /// assert_eq!(Square::from_axis(0, 0), Some(Square::A1));
    /// assert_eq!(Square::from_axis(8, 0), None);
    /// assert_eq!(Square::from_axis(0, -1), None);
    /// ```
    #[inline(always)]
    pub const fn from_axis(x: i8, y: i8) -> Option<Self> {
        if x < 0 || x > 7 || y < 0 || y > 7 {
            return None;
        }

        Some(Self(x as u8 | (y as u8) << 3))
    }

    /// Fetches the zero-based `(x, y)` axis pair of this [`Square`].
    ///
    /// This is the inverse of [`Square::from_axis`].
    ///
    /// # Example
    /// ```
    /// # use caissa::Square;
    /// assert_eq!(Square::E4.axis(), (4, 3));
    /// assert_eq!(Square::H8.axis(), (7, 7));
    /// ```
    #[inline(always)]
    pub const fn axis(&self) -> (i8, i8) {
        (self.file().0 as i8, self.rank().0 as i8)
    }

    /// Attempt to offset this [`Square`] by the file and rank deltas.
    ///
    /// If the result would fall off the board, `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use caissa::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::C4.offset(-1, -1), Some(Square::B3));
    /// assert_eq!(Square::A1.offset(-1, -1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let (x, y) = self.axis();
        match (x.checked_add(file_delta), y.checked_add(rank_delta)) {
            (Some(x), Some(y)) => Self::from_axis(x, y),
            _ => None,
        }
    }

    /// Moves this [`Square`] `n` ranks "forward" from the perspective of `color`.
    ///
    /// White moves towards rank 8, Black towards rank 1.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Square, Color};
    /// assert_eq!(Square::C4.forward_by(Color::White, 1), Some(Square::C5));
    /// assert_eq!(Square::C4.forward_by(Color::Black, 2), Some(Square::C2));
    /// assert_eq!(Square::C8.forward_by(Color::White, 1), None);
    /// ```
    #[inline(always)]
    pub const fn forward_by(&self, color: Color, n: i8) -> Option<Self> {
        match n.checked_mul(color.negation_multiplier()) {
            Some(delta) => self.offset(0, delta),
            None => None,
        }
    }

    /// Fetches the [`File`] of this [`Square`].
    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & 0b0000_0111)
    }

    /// Fetches the [`Rank`] of this [`Square`].
    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Fetches the inner index value of the [`Square`], casted to a [`usize`].
    ///
    /// Useful when using a [`Square`] to index into things.
    ///
    /// # Example
    /// ```
    /// # use caissa::Square;
    /// assert_eq!(Square::C4.index(), 26);
    /// ```
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Creates a [`Square`] from a string in algebraic notation, such as `"e4"`.
    ///
    /// The string must be exactly two characters: a file letter `a..h` followed by a rank digit `1..8`.
    /// Anything else is rejected as an invalid coordinate.
    ///
    /// # Example
    /// ```
    /// # use caissa::Square;
    /// let c4 = Square::from_algebraic("c4");
    /// assert!(c4.is_ok());
    /// assert_eq!(c4.unwrap(), Square::C4);
    ///
    /// assert!(Square::from_algebraic("z0").is_err());
    /// assert!(Square::from_algebraic("C4").is_err());
    /// assert!(Square::from_algebraic("c44").is_err());
    /// ```
    pub fn from_algebraic(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid coordinate {square:?}: must contain exactly 2 characters");
        };

        let file = File::from_char(file).context(format!("Invalid coordinate {square:?}"))?;
        let rank = Rank::from_char(rank).context(format!("Invalid coordinate {square:?}"))?;

        Ok(Self::new(file, rank))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_algebraic`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;
    /// Wrapper for [`Square::from_algebraic`].
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_algebraic(value)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// A [`Square`] can be used to index into an array of 64 elements.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    /// A [`Square`] can be used to mutably index into an array of 64 elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    /// Algebraic notation: the file letter followed by the rank digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    /// Algebraic notation, followed by the internal index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

/// Represents one of eight files (columns) on a chess board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const COUNT: usize = 8;

    /// Returns an iterator over all files, from `a` to `h`.
    ///
    /// # Example
    /// ```
    /// # use caissa::File;
    /// let mut iter = File::iter();
    /// assert_eq!(iter.len(), 8);
    /// assert_eq!(iter.next().unwrap(), File::A);
    /// assert_eq!(iter.last().unwrap(), File::H);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Parses a lowercase file letter `a..h`.
    pub fn from_char(file: char) -> Result<Self> {
        if !('a'..='h').contains(&file) {
            bail!("Invalid char for File: Must be between [a, h]. Got {file:?}");
        }

        Ok(Self(file as u8 - b'a'))
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'a') as char
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}

/// Represents one of eight ranks (rows) on a chess board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const COUNT: usize = 8;

    /// Returns an iterator over all ranks, from `1` to `8`.
    ///
    /// # Example
    /// ```
    /// # use caissa::Rank;
    /// let mut iter = Rank::iter();
    /// assert_eq!(iter.len(), 8);
    /// assert_eq!(iter.next().unwrap(), Rank::ONE);
    /// assert_eq!(iter.last().unwrap(), Rank::EIGHT);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// First rank relative to `color`; where that side's back rank starts.
    #[inline(always)]
    pub const fn first(color: Color) -> Self {
        [Self::ONE, Self::EIGHT][color.index()]
    }

    /// Second rank relative to `color`; the home rank of that side's pawns.
    #[inline(always)]
    pub const fn second(color: Color) -> Self {
        [Self::TWO, Self::SEVEN][color.index()]
    }

    /// Parses a rank digit `1..8`.
    pub fn from_char(rank: char) -> Result<Self> {
        if !('1'..='8').contains(&rank) {
            bail!("Invalid char for Rank: Must be between [1, 8]. Got {rank:?}");
        }

        Ok(Self(rank as u8 - b'1'))
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'1') as char
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squares() {
        // Test the four corners
        assert_eq!(Square::new(File(0), Rank(0)).to_string(), "a1");
        assert_eq!(Square::new(File(7), Rank(0)).to_string(), "h1");
        assert_eq!(Square::new(File(0), Rank(7)).to_string(), "a8");
        assert_eq!(Square::new(File(7), Rank(7)).to_string(), "h8");

        // And some arbitrary location near the middle
        assert_eq!(Square::new(File(3), Rank(3)).to_string(), "d4");
    }

    #[test]
    fn test_parsing() {
        assert_eq!(Rank::ONE, Rank::from_char('1').unwrap());
        assert_eq!(Rank::EIGHT, Rank::from_char('8').unwrap());
        assert_eq!(File::A, File::from_char('a').unwrap());
        assert_eq!(File::H, File::from_char('h').unwrap());

        assert!(Rank::from_char('0').is_err());
        assert!(Rank::from_char('9').is_err());
        assert!(File::from_char('i').is_err());
        assert!(File::from_char('A').is_err());

        // Now test squares as a whole
        assert_eq!(Square::try_from("a1").unwrap(), Square::A1);
        assert_eq!(Square::try_from("h8").unwrap(), Square::H8);
        assert_eq!("d4".parse::<Square>().unwrap(), Square::D4);

        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("1").is_err());
        assert!(Square::try_from("").is_err());
        assert!(Square::try_from("a1 ").is_err());
        assert!(Square::try_from("1a").is_err());
        assert!(Square::try_from("é4").is_err());
    }

    #[test]
    fn test_axis_round_trip() {
        for x in 0..8 {
            for y in 0..8 {
                let square = Square::from_axis(x, y).unwrap();
                assert_eq!(square.axis(), (x, y));
                assert_eq!(square.to_string().parse::<Square>().unwrap(), square);
            }
        }
    }

    #[test]
    fn test_axis_out_of_bounds() {
        for n in -3..11 {
            assert!(Square::from_axis(-1, n).is_none());
            assert!(Square::from_axis(8, n).is_none());
            assert!(Square::from_axis(n, -1).is_none());
            assert!(Square::from_axis(n, 8).is_none());
        }
    }

    #[test]
    fn test_large_offsets_fall_off_the_board() {
        assert_eq!(Square::H8.offset(i8::MAX, 0), None);
        assert_eq!(Square::H8.offset(0, i8::MAX), None);
        assert_eq!(Square::A1.offset(i8::MIN, i8::MIN), None);
        assert_eq!(Square::E4.forward_by(Color::White, i8::MIN), None);
        assert_eq!(Square::E4.forward_by(Color::Black, i8::MIN), None);
        assert_eq!(Square::H8.offset(-7, -7), Some(Square::A1));
    }

    #[test]
    fn test_axis_matches_notation() {
        // x = column - 'a', y = row - 1
        assert_eq!(Square::from_algebraic("a1").unwrap().axis(), (0, 0));
        assert_eq!(Square::from_algebraic("e4").unwrap().axis(), (4, 3));
        assert_eq!(Square::from_algebraic("h2").unwrap().axis(), (7, 1));
    }

    #[test]
    fn test_indexing() {
        let mut board = [0; 64];
        board[Square::D5] = u8::MAX;
        assert_eq!(board[35], u8::MAX);
    }
}

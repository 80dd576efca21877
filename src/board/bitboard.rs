/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Not};

use super::{File, Rank, Square};

/// A [`Bitboard`] is a set of [`Square`]s, stored as one bit per square.
///
/// Move generation hands these out as "the set of squares a piece can reach".
///
/// Bit index 0 is `a1` (the least-significant bit) and bit index 63 is `h8`,
/// following the same `x + 8 * y` layout as [`Square`]. A bitboard of the second rank
/// would look like this:
/// ```text
/// . . . . . . . .
/// . . . . . . . .
/// . . . . . . . .
/// . . . . . . . .
/// . . . . . . . .
/// . . . . . . . .
/// X X X X X X X X
/// . . . . . . . .
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    pub const EMPTY_BOARD: Self = Self(0x0000000000000000);
    pub const FULL_BOARD: Self = Self(0xFFFFFFFFFFFFFFFF);
    pub const RANK_1: Self = Self(0x00000000000000FF);
    pub const RANK_2: Self = Self(0x000000000000FF00);
    pub const RANK_7: Self = Self(0x00FF000000000000);
    pub const RANK_8: Self = Self(0xFF00000000000000);

    /// Constructs a new [`Bitboard`] from the provided bit pattern.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Constructs a new [`Bitboard`] containing only the provided [`Square`].
    ///
    /// # Example
    /// ```
    /// # use caissa::{Bitboard, Square};
    /// let board = Bitboard::from_square(Square::H8);
    /// assert_eq!(board.inner(), 0x8000000000000000);
    /// ```
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.index())
    }

    /// Fetches the inner bit pattern.
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Returns `true` if no squares are in this set.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if at least one square is in this set.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns the number of squares in this set.
    ///
    /// # Example
    /// ```
    /// # use caissa::Bitboard;
    /// assert_eq!(Bitboard::RANK_2.population(), 8);
    /// assert_eq!(Bitboard::EMPTY_BOARD.population(), 0);
    /// ```
    #[inline(always)]
    pub const fn population(&self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Returns `true` if `square` is in this set.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Bitboard, Square};
    /// assert!(Bitboard::RANK_2.contains(Square::E2));
    /// assert!(!Bitboard::RANK_2.contains(Square::E4));
    /// ```
    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & Self::from_square(square).0 != 0
    }

    /// Adds `square` to this set.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Bitboard, Square};
    /// let mut board = Bitboard::EMPTY_BOARD;
    /// board.set(Square::G2);
    /// assert!(board.contains(Square::G2));
    /// assert_eq!(board.population(), 1);
    /// ```
    #[inline(always)]
    pub fn set(&mut self, square: Square) {
        self.0 |= Self::from_square(square).0
    }

    /// Removes `square` from this set.
    ///
    /// # Example
    /// ```
    /// # use caissa::{Bitboard, Square};
    /// let mut board = Bitboard::RANK_1;
    /// board.clear(Square::C1);
    /// assert!(!board.contains(Square::C1));
    /// assert_eq!(board.population(), 7);
    /// ```
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.0 &= !Self::from_square(square).0
    }

    /// Returns the lowest square in this set, if there is one.
    #[inline(always)]
    pub fn lsb(&self) -> Option<Square> {
        self.is_nonempty()
            .then(|| Square(self.0.trailing_zeros() as u8))
    }

    /// Pops and returns the lowest square in this set, if there is one.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let lsb = self.lsb();
        self.0 &= self.0.wrapping_sub(1);
        lsb
    }

    /// Returns a [`BitboardIter`] to iterate over all of the squares in this set, from `a1` towards `h8`.
    #[inline(always)]
    pub const fn iter(&self) -> BitboardIter {
        BitboardIter { bitboard: *self }
    }
}

impl FromIterator<Square> for Bitboard {
    /// A [`Bitboard`] can be created from an iterator over [`Square`]s.
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter().fold(Self::default(), |bb, sq| bb | sq)
    }
}

impl Extend<Square> for Bitboard {
    fn extend<T: IntoIterator<Item = Square>>(&mut self, iter: T) {
        for square in iter {
            self.set(square);
        }
    }
}

macro_rules! impl_bitwise_op {
    // Impl op and op_assign for anything convertible into a Bitboard
    ($op:tt, $op_assign:tt, $func:ident, $func_assign:ident) => {
        impl<T> std::ops::$op<T> for Bitboard
        where
            Self: From<T>,
        {
            type Output = Self;
            #[inline(always)]
            fn $func(self, rhs: T) -> Self::Output {
                Self(self.0.$func(Self::from(rhs).0))
            }
        }

        impl<T> std::ops::$op_assign<T> for Bitboard
        where
            Self: From<T>,
        {
            #[inline(always)]
            fn $func_assign(&mut self, rhs: T) {
                self.0.$func_assign(Self::from(rhs).0);
            }
        }
    };
}

impl_bitwise_op!(BitAnd, BitAndAssign, bitand, bitand_assign);
impl_bitwise_op!(BitOr, BitOrAssign, bitor, bitor_assign);
impl_bitwise_op!(BitXor, BitXorAssign, bitxor, bitxor_assign);

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl From<Square> for Bitboard {
    /// Wrapper for [`Bitboard::from_square`].
    #[inline(always)]
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}

impl From<Option<Square>> for Bitboard {
    /// `None` converts to an empty set. Handy for collecting the result of [`Square::offset`].
    #[inline(always)]
    fn from(value: Option<Square>) -> Self {
        value.map(Self::from_square).unwrap_or_default()
    }
}

impl From<u64> for Bitboard {
    /// Wrapper for [`Bitboard::new`].
    #[inline(always)]
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(136);

        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let occupant = if self.contains(Square::new(file, rank)) {
                    'X'
                } else {
                    '.'
                };

                board.push(occupant);
                board.push(' ');
            }
            board.push('\n');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Bitboard {
    /// Lists the squares in the set, e.g. `{e3, e4}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let squares = self.iter().map(|sq| sq.to_string()).collect::<Vec<_>>();
        write!(f, "{{{}}}", squares.join(", "))
    }
}

/// An iterator over all squares in a [`Bitboard`].
///
/// See [`Bitboard::iter`].
pub struct BitboardIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.bitboard.pop_lsb()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bitboard.population() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for BitboardIter {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;
    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bitboard_to_string() {
        let expected = ". . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        X X X X X X X X \n\
                        . . . . . . . . \n";
        assert_eq!(Bitboard::RANK_2.to_string(), expected);

        let board = Bitboard::from_square(Square::C1) | Square::H8;
        let expected = ". . . . . . . X \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . . . . . . . \n\
                        . . X . . . . . \n";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn test_bitboard_iteration_order() {
        let board: Bitboard = [Square::H8, Square::E4, Square::A1].into_iter().collect();
        let squares = board.iter().collect::<Vec<_>>();
        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
        assert_eq!(board.iter().len(), 3);
    }

    #[test]
    fn test_bitboard_from_option() {
        assert_eq!(Bitboard::from(Square::A1.offset(-1, 0)), Bitboard::EMPTY_BOARD);
        assert_eq!(
            Bitboard::from(Square::A1.offset(1, 0)),
            Bitboard::from_square(Square::B1)
        );
    }

    #[test]
    fn test_bitboard_debug() {
        let board = Bitboard::from_square(Square::E3) | Square::E4;
        assert_eq!(format!("{board:?}"), "{e3, e4}");
        assert_eq!(format!("{:?}", Bitboard::EMPTY_BOARD), "{}");
    }

    #[test]
    fn test_bitboard_ranks() {
        let rank_1: Bitboard = File::iter().map(|f| Square::new(f, Rank::ONE)).collect();
        assert_eq!(rank_1, Bitboard::RANK_1);
        assert_eq!(
            Bitboard::RANK_1 | Bitboard::RANK_2 | Bitboard::RANK_7 | Bitboard::RANK_8,
            Bitboard::new(0xFFFF00000000FFFF)
        );
        assert_eq!(!Bitboard::EMPTY_BOARD, Bitboard::FULL_BOARD);
    }
}

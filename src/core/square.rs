use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::core::coord::Coord;

/// A square of the 8x8 board, packed as `rank * 8 + file` (a1 = 0, h8 = 63).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square name {text:?} (expected a file a-h followed by a rank 1-8)")]
pub struct SquareParseError {
    pub text: String,
}

impl Square {
    pub const COUNT: usize = 64;

    /// `file` and `rank` are 0-based and must be below 8.
    #[inline]
    pub fn new(file: u8, rank: u8) -> Square {
        debug_assert!(file < 8 && rank < 8);
        Square(rank * 8 + file)
    }

    #[inline]
    pub fn from_coord(c: Coord) -> Option<Square> {
        c.on_board().then(|| Square::new(c.x as u8, c.y as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub fn coord(self) -> Coord {
        Coord::new(self.file() as i8, self.rank() as i8)
    }

    /// The square `delta` away, or `None` when that steps off the board.
    #[inline]
    pub fn offset(self, delta: Coord) -> Option<Square> {
        Square::from_coord(self.coord() + delta)
    }

    /// All squares in a1, b1, ..., h8 order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT as u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SquareParseError { text: s.to_string() };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(err());
        }
        let (f, r) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return Err(err());
        }
        Ok(Square::new(f - b'a', r - b'1'))
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_file_then_rank() {
        assert_eq!(Square::new(0, 0).to_string(), "a1");
        assert_eq!(Square::new(6, 6).to_string(), "g7");
        assert_eq!(Square::new(7, 7).to_string(), "h8");
        assert_eq!("e4".parse::<Square>().unwrap(), Square::new(4, 3));
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in ["", "e", "i1", "a9", "a0", "e44", "E4"] {
            assert!(bad.parse::<Square>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn offset_stops_at_the_edge() {
        let h8: Square = "h8".parse().unwrap();
        assert_eq!(h8.offset(Coord::new(1, 0)), None);
        assert_eq!(h8.offset(Coord::new(-1, -1)), Some("g7".parse().unwrap()));
    }
}

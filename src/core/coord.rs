use std::ops::{Add, Mul, Sub};

/// A file/rank offset (`x` = file, `y` = rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    #[inline]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn chebyshev_norm(self) -> i8 {
        self.x.abs().max(self.y.abs())
    }

    #[inline]
    pub fn on_board(self) -> bool {
        (0..8).contains(&self.x) && (0..8).contains(&self.y)
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i8> for Coord {
    type Output = Coord;

    #[inline]
    fn mul(self, rhs: i8) -> Coord {
        Coord {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// The 8 king steps around the origin.
pub const KING_STEPS: [Coord; 8] = [
    Coord { x: -1, y: -1 },
    Coord { x: -1, y: 0 },
    Coord { x: -1, y: 1 },
    Coord { x: 0, y: -1 },
    Coord { x: 0, y: 1 },
    Coord { x: 1, y: -1 },
    Coord { x: 1, y: 0 },
    Coord { x: 1, y: 1 },
];

use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Integer 2D vector shared by canvas space and raster space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct V2l {
    pub x: i64,
    pub y: i64,
}

impl V2l {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn checked_scale(self, factor: i64) -> Option<Self> {
        Some(Self {
            x: self.x.checked_mul(factor)?,
            y: self.y.checked_mul(factor)?,
        })
    }
}

impl Add for V2l {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for V2l {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i64> for V2l {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// Inverse scale. Truncates toward zero like integer division does.
impl Div<i64> for V2l {
    type Output = Self;

    fn div(self, divisor: i64) -> Self {
        Self::new(self.x / divisor, self.y / divisor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectl {
    pub top_left: V2l,
    pub bot_right: V2l,
}

impl Rectl {
    pub const fn new(top_left: V2l, bot_right: V2l) -> Self {
        Self {
            top_left,
            bot_right,
        }
    }

    /// Smallest rectangle containing every point, min/max taken per axis.
    pub fn bounding(points: &[V2l]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut top_left = *first;
        let mut bot_right = *first;
        for point in rest {
            top_left.x = top_left.x.min(point.x);
            top_left.y = top_left.y.min(point.y);
            bot_right.x = bot_right.x.max(point.x);
            bot_right.y = bot_right.y.max(point.y);
        }
        Some(Self::new(top_left, bot_right))
    }

    pub fn width(&self) -> i64 {
        self.bot_right.x - self.top_left.x
    }

    pub fn height(&self) -> i64 {
        self.bot_right.y - self.top_left.y
    }

    pub fn contains(&self, point: V2l) -> bool {
        point.x >= self.top_left.x
            && point.x < self.bot_right.x
            && point.y >= self.top_left.y
            && point.y < self.bot_right.y
    }
}

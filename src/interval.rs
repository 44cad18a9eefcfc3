/*

    One axis of a BoundingBox as a range [min, max].
    The box widens, tests and reports emptiness axis
    by axis through this type.

    Comparisons are strict, so a NaN never moves a bound
    and an inverted range (min > max) contains nothing.

    @author: Bartu
    @date: Sept 2025

*/

use crate::numeric::{Float};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: Float,
    pub max: Float,
}

impl Interval {

    /// (inf, -inf), wider than anything once expanded
    pub const EMPTY: Self = Self {
        min: FloatConst::INF,
        max: FloatConst::NEG_INF,
    };

    /// (MAX, LOWEST), inverted but finite
    pub const EMPTY_FINITE: Self = Self {
        min: FloatConst::MAX,
        max: FloatConst::LOWEST,
    };

    pub fn new(min: Float, max: Float) -> Self {
        Self {
            min,
            max,
        }
    }

    pub fn validate(&self) -> bool {
        self.max >= self.min
    }

    pub fn contains(&self, x: Float) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn expand(&mut self, x: Float) {
        if x < self.min { self.min = x; }
        if x > self.max { self.max = x; }
    }

}


pub trait FloatConst: Copy {
    const INF: Self;
    const NEG_INF: Self;
    const MAX: Self;    // largest finite
    const LOWEST: Self; // most negative finite
}

impl FloatConst for f32 {
    const INF: Self = f32::INFINITY;
    const NEG_INF: Self = f32::NEG_INFINITY;
    const MAX: Self = f32::MAX;
    const LOWEST: Self = f32::MIN;
}

impl FloatConst for f64 {
    const INF: Self = f64::INFINITY;
    const NEG_INF: Self = f64::NEG_INFINITY;
    const MAX: Self = f64::MAX;
    const LOWEST: Self = f64::MIN;
}

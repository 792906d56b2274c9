//! Monetary amounts in integer minor currency units.
//!
//! All stored amounts are integers (e.g. cents). Raw inputs may still arrive
//! as fractional values from pricing forms; `Money::from_raw` is the single
//! point where they are rounded (half away from zero) into minor units.
//! Rounding happens where a monetary quantity is first computed, never
//! deferred to a later aggregate step.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// A monetary amount in minor currency units.
///
/// Signed so credit/adjustment amounts can be represented; comparisons and
/// arithmetic behave like plain integers.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Amount already expressed in minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Round a raw (possibly fractional) amount into minor units.
    ///
    /// Rounds half away from zero: `0.5 -> 1`, `-0.5 -> -1`.
    #[inline]
    pub fn from_raw(raw: f64) -> Self {
        Self(raw.round() as i64)
    }

    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The amount as a raw float, for feeding back into a pre-rounding step.
    #[inline]
    pub fn as_raw(&self) -> f64 {
        self.0 as f64
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Self(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

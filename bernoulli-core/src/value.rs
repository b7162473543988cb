//! Numeric representation capability.
//!
//! Every representation a cache can be instantiated for implements
//! [`BernoulliValue`]. Fixed-width floats carry a finite range and NaN /
//! infinity sentinels; exact rationals carry neither and never overflow.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Num, One};
use std::fmt;
use std::ops::Neg;

/// Arithmetic a Bernoulli/tangent computation needs from its value type.
pub trait BernoulliValue:
    Num + Neg<Output = Self> + Clone + PartialOrd + fmt::Debug + Send + Sync + 'static
{
    /// Human readable name used in errors and logs.
    const NAME: &'static str;

    /// Tangent numbers are stored multiplied by `2^-TANGENT_SCALE_EXP`.
    ///
    /// For fixed-width types this is the exponent of the smallest normal
    /// value, which keeps the scaled recurrence finite well past the index
    /// at which the Bernoulli value itself stops fitting.
    const TANGENT_SCALE_EXP: i32;

    /// Construct from a small non-negative integer.
    fn from_usize(n: usize) -> Self;

    /// Multiply by `2^exp`, exactly where the representation allows.
    fn mul_pow2(self, exp: i32) -> Self;

    /// False for infinities and NaN.
    fn is_representable(&self) -> bool;

    /// Largest finite value, if the representation is bounded.
    fn max_finite() -> Option<Self>;

    /// Positive infinity, if the representation has one.
    fn infinity() -> Option<Self>;

    /// Not-a-number, if the representation has one.
    fn nan() -> Option<Self>;

    /// `2^-TANGENT_SCALE_EXP`.
    fn tangent_scale() -> Self {
        Self::one().mul_pow2(-Self::TANGENT_SCALE_EXP)
    }
}

// ============================================================================
// FIXED-WIDTH FLOATS
// ============================================================================

macro_rules! impl_float_value {
    ($t:ty, $name:expr, $scale_exp:expr, $chunk:expr) => {
        impl BernoulliValue for $t {
            const NAME: &'static str = $name;
            const TANGENT_SCALE_EXP: i32 = $scale_exp;

            fn from_usize(n: usize) -> Self {
                n as $t
            }

            fn mul_pow2(self, exp: i32) -> Self {
                // Split so that no single factor leaves the normal range.
                let mut x = self;
                let mut e = exp;
                while e > $chunk {
                    x *= (2.0 as $t).powi($chunk);
                    e -= $chunk;
                }
                while e < -$chunk {
                    x *= (2.0 as $t).powi(-$chunk);
                    e += $chunk;
                }
                x * (2.0 as $t).powi(e)
            }

            fn is_representable(&self) -> bool {
                self.is_finite()
            }

            fn max_finite() -> Option<Self> {
                Some(<$t>::MAX)
            }

            fn infinity() -> Option<Self> {
                Some(<$t>::INFINITY)
            }

            fn nan() -> Option<Self> {
                Some(<$t>::NAN)
            }
        }
    };
}

impl_float_value!(f32, "f32", 126, 100);
impl_float_value!(f64, "f64", 1022, 1000);

// ============================================================================
// EXACT RATIONALS
// ============================================================================

impl BernoulliValue for BigRational {
    const NAME: &'static str = "BigRational";
    const TANGENT_SCALE_EXP: i32 = 0;

    fn from_usize(n: usize) -> Self {
        BigRational::from_integer(BigInt::from(n))
    }

    fn mul_pow2(self, exp: i32) -> Self {
        let factor = BigInt::one() << exp.unsigned_abs();
        if exp >= 0 {
            self * BigRational::from_integer(factor)
        } else {
            self / BigRational::from_integer(factor)
        }
    }

    fn is_representable(&self) -> bool {
        true
    }

    fn max_finite() -> Option<Self> {
        None
    }

    fn infinity() -> Option<Self> {
        None
    }

    fn nan() -> Option<Self> {
        None
    }

    fn tangent_scale() -> Self {
        Self::one()
    }
}

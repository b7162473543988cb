//! Tangent-number recurrence and the tangent → Bernoulli conversion.
//!
//! Tangent numbers T(0)=0, T(1)=1, T(2)=2, T(3)=16, T(4)=272, ... are the
//! Taylor coefficients of `tan`. They are produced with the Brent–Harvey
//! in-place recurrence over a retained vector of intermediates, which keeps
//! every intermediate bounded by the value being produced. Values are kept
//! scaled by `2^-s` (see [`BernoulliValue::TANGENT_SCALE_EXP`]) so that
//! fixed-width types reach the Bernoulli overflow point before the scaled
//! recurrence itself overflows.

use bernoulli_core::BernoulliValue;

/// Incremental generator of scaled tangent numbers.
///
/// Must be advanced strictly in index order; index `k` is derived from the
/// intermediates left behind by index `k - 1`.
#[derive(Debug, Clone)]
pub struct TangentRecurrence<T> {
    intermediates: Vec<T>,
    next: usize,
}

impl<T: BernoulliValue> TangentRecurrence<T> {
    pub fn new() -> Self {
        Self {
            intermediates: vec![T::zero(), T::tangent_scale()],
            next: 0,
        }
    }

    /// Index the next call to [`advance`](Self::advance) produces.
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Produce `T(next) · 2^-s`.
    ///
    /// Returns `None` once the scaled value is no longer representable; the
    /// recurrence must not be advanced again after that.
    pub fn advance(&mut self) -> Option<T> {
        let i = self.next;
        let value = match i {
            0 => T::zero(),
            1 => T::tangent_scale(),
            _ => {
                let m = &mut self.intermediates;
                m.push(T::zero());
                let head = std::mem::replace(&mut m[1], T::zero());
                m[1] = head * T::from_usize(i - 1);
                for j in 2..=i {
                    let current = std::mem::replace(&mut m[j], T::zero());
                    m[j] = current * T::from_usize(i - j)
                        + m[j - 1].clone() * T::from_usize(i - j + 2);
                }
                m[i].clone()
            }
        };
        if !value.is_representable() {
            return None;
        }
        self.next += 1;
        Some(value)
    }
}

impl<T: BernoulliValue> Default for TangentRecurrence<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove the storage scale from a tangent number.
///
/// `None` when the unscaled value does not fit the representation.
pub fn unscale_tangent<T: BernoulliValue>(scaled: T) -> Option<T> {
    let value = scaled.mul_pow2(T::TANGENT_SCALE_EXP);
    value.is_representable().then_some(value)
}

/// B₂ₙ from the scaled tangent number T(n)·2^-s.
///
/// `B₂ₙ = (−1)^(n−1) · 2n · T(n) / (2^(2n) · (2^(2n) − 1))`, evaluated as
/// `((t / (1 − 2^-2n)) · 2^(s−4n)) · 2n` so no intermediate exceeds the
/// magnitude of the result. `None` when B₂ₙ does not fit.
pub fn tangent_to_bernoulli<T: BernoulliValue>(n: usize, scaled: &T) -> Option<T> {
    if n == 0 {
        return Some(T::one());
    }
    let two_n = i32::try_from(2 * n).ok()?;
    let four_n = two_n.checked_mul(2)?;
    let shift = T::TANGENT_SCALE_EXP.checked_sub(four_n)?;

    let denominator = T::one() - T::one().mul_pow2(-two_n);
    let magnitude = (scaled.clone() / denominator).mul_pow2(shift) * T::from_usize(2 * n);
    if !magnitude.is_representable() {
        return None;
    }
    Some(if n % 2 == 1 { magnitude } else { -magnitude })
}

//! `L1`: a unary linear fractional transformation, `x -> (a*x + c) / (b*x + d)`.

use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::digit::{Digit, EXPONENT, POWER_2, check_digit};
use crate::error::InvariantViolation;
use crate::lft::{digit_from_lower_bound, is_small_enough};
use crate::primitives::{gcd_all, is_plusminus_same_sign};

/// Which corner, `-1` or `1`, maps to the smaller value of `L([-1, 1])`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mono {
    /// `L(-1) <= L(1)`.
    Increasing,
    /// `L(1) < L(-1)`.
    Decreasing,
}

/// A unary LFT `x -> (a*x + c) / (b*x + d)`, held as four arbitrary
/// precision integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L1 {
    a: BigInt,
    b: BigInt,
    c: BigInt,
    d: BigInt,
}

impl fmt::Display for L1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}\t{}\n{}\t{}]", self.a, self.c, self.b, self.d)
    }
}

impl L1 {
    /// Constructs `L1` from raw coefficients. Callers are responsible for
    /// the structural invariants (boundedness, contraction) required at
    /// the particular call site; this constructor performs no validation
    /// itself.
    pub fn new(a: BigInt, b: BigInt, c: BigInt, d: BigInt) -> Self {
        L1 { a, b, c, d }
    }

    /// The identity transform, `x -> x`.
    pub fn identity() -> Self {
        L1::new(BigInt::one(), BigInt::zero(), BigInt::zero(), BigInt::one())
    }

    /// `L1.digit(d)`: the transform that absorbing digit `d` composes with,
    /// `x -> (x + d) / B`.
    pub fn digit(d: Digit) -> Result<Self, InvariantViolation> {
        check_digit(d)?;
        Ok(L1::new(
            BigInt::one(),
            BigInt::zero(),
            BigInt::from(d),
            POWER_2.clone(),
        ))
    }

    /// The constant transform for `p / q`, with `|p/q| <= 1`.
    pub fn from_fraction(p: BigInt, q: BigInt) -> Result<Self, crate::error::DomainError> {
        if p.clone().abs() > q.clone().abs() {
            return Err(crate::error::DomainError::FractionOutOfRange { p, q });
        }
        // Normalize so q carries the sign and is positive, matching the
        // convention the rest of the crate relies on (`d - b > 0`).
        let (p, q) = if q.is_negative() { (-p, -q) } else { (p, q) };
        Ok(L1::new(p, BigInt::zero(), BigInt::zero(), q))
    }

    pub fn a(&self) -> &BigInt {
        &self.a
    }
    pub fn b(&self) -> &BigInt {
        &self.b
    }
    pub fn c(&self) -> &BigInt {
        &self.c
    }
    pub fn d(&self) -> &BigInt {
        &self.d
    }

    /// Replaces `self` with `self . other` (matrix product).
    pub fn compose(&mut self, other: &L1) {
        let (a, b, c, d) = (&self.a, &self.b, &self.c, &self.d);
        let (u, v, w, x) = (&other.a, &other.b, &other.c, &other.d);
        let new_a = a * u + c * v;
        let new_b = b * u + d * v;
        let new_c = a * w + c * x;
        let new_d = b * w + d * x;
        self.a = new_a;
        self.b = new_b;
        self.c = new_c;
        self.d = new_d;
    }

    /// Absorbs one input digit: `self . L1.digit(d)`, computed directly
    /// rather than via a general `compose` since only `c` and `d` change.
    pub fn absorb_digit(&mut self, d: Digit) -> Result<(), InvariantViolation> {
        check_digit(d)?;
        let shift = EXPONENT as usize;
        let new_c = &self.a * d + (&self.c << shift);
        let new_d = &self.b * d + (&self.d << shift);
        self.c = new_c;
        self.d = new_d;
        Ok(())
    }

    /// Mutates `self` to `L1.digit(n)^-1 . self`, the inverse-compose used
    /// by `extract`.
    fn inv_times_digit(&mut self, n: Digit) {
        let shift = EXPONENT as usize;
        let neg_n = -n;
        let new_a = (&self.a << shift) + &self.b * neg_n;
        let new_c = (&self.c << shift) + &self.d * neg_n;
        self.a = new_a;
        self.c = new_c;
        // b and d are unchanged.
    }

    /// Divides all four entries by their GCD, the no-op leaving the
    /// represented function unchanged.
    pub fn normalize(&mut self) {
        let gcd = gcd_all([&self.a, &self.b, &self.c, &self.d]);
        if gcd.is_one() {
            return;
        }
        log::debug!("L1::normalize: dividing entries by gcd {gcd}");
        self.a /= &gcd;
        self.b /= &gcd;
        self.c /= &gcd;
        self.d /= &gcd;
    }

    /// `bc < ad` iff the transform is increasing on `[-1, 1]`.
    fn determinant_sign_is_increasing(&self) -> bool {
        &self.c * &self.b < &self.a * &self.d
    }

    pub fn monotonicity(&self) -> Mono {
        if self.determinant_sign_is_increasing() {
            Mono::Increasing
        } else {
            Mono::Decreasing
        }
    }

    /// `a*d - b*c`.
    fn determinant(&self) -> BigInt {
        &self.a * &self.d - &self.b * &self.c
    }

    /// `d^2 - b^2`, the sign-bearing part of the image-length denominator.
    fn signature(&self) -> BigInt {
        &self.d * &self.d - &self.b * &self.b
    }

    /// The denominator `b*x + d` has constant sign on `[-1, 1]`.
    pub fn is_bounded(&self) -> bool {
        is_plusminus_same_sign(&self.b, &self.d)
    }

    /// `(L(-1), L(1))` as exact rationals. Requires `is_bounded`.
    pub fn bounds(&self) -> Result<(BigRational, BigRational), InvariantViolation> {
        if !self.is_bounded() {
            return Err(InvariantViolation::NotBounded);
        }
        let at_m1 = BigRational::new(&self.c - &self.a, &self.d - &self.b);
        let at_p1 = BigRational::new(&self.c + &self.a, &self.d + &self.b);
        Ok((at_m1, at_p1))
    }

    /// `L([-1, 1])` lies within `[-1, 1]`: the precondition for being
    /// usable in a stream driver.
    pub fn is_contracting(&self) -> bool {
        match self.bounds() {
            Ok((lo, hi)) => lo.abs() <= BigRational::one() && hi.abs() <= BigRational::one(),
            Err(_) => false,
        }
    }

    /// `None` if the image interval is short enough (`<= 2/B`) to commit a
    /// digit; otherwise `Some(())`, meaning "pull the next input digit".
    pub fn next_index_to_pull(&self) -> Option<()> {
        let determinant = self.determinant();
        let signature = self.signature();
        let length_num = match self.monotonicity() {
            Mono::Increasing => determinant,
            Mono::Decreasing => -determinant,
        };
        if is_small_enough(&length_num, &signature) {
            None
        } else {
            Some(())
        }
    }

    /// Emits the next output digit. Requires `next_index_to_pull() ==
    /// None`. Mutates `self` to `L1.digit(n)^-1 . self`.
    pub fn extract(&mut self) -> Result<Digit, InvariantViolation> {
        if self.next_index_to_pull().is_some() {
            return Err(InvariantViolation::NotReadyToExtract);
        }
        let n = match self.monotonicity() {
            Mono::Increasing => digit_from_lower_bound(&(&self.c - &self.a), &(&self.d - &self.b)),
            Mono::Decreasing => digit_from_lower_bound(&(&self.c + &self.a), &(&self.d + &self.b)),
        };
        debug_assert!(check_digit(n).is_ok());
        self.inv_times_digit(n);
        Ok(n)
    }
}

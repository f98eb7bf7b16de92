//! The numeric kernel the rest of the crate is built on.
//!
//! Matrix entries are arbitrary-precision signed integers
//! (`num_bigint::BigInt`); this module only adds the handful of helpers the
//! LFT layer needs on top of that: multi-value GCD (for `normalize`) and
//! the same-sign-at-the-endpoints test shared by `L1::is_bounded` and
//! `L2::is_bounded`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// GCD of an arbitrary number of integers, with the convention
/// `gcd() == 1` so `normalize` callers can always divide by the result
/// safely, including the all-zero case (`gcd(0, 0)` is mathematically 0,
/// clamped to 1 here).
pub fn gcd_all<'a, I: IntoIterator<Item = &'a BigInt>>(values: I) -> BigInt {
    let gcd = values
        .into_iter()
        .fold(BigInt::zero(), |acc, v| acc.gcd(v));
    if gcd.is_zero() { BigInt::one() } else { gcd }
}

/// `Lplus = a*1 + b` and `Lminus = a*(-1) + b` have the same (nonzero)
/// sign iff `|b| > |a|`. Used by both `L1::is_bounded` (on `b, d`) and
/// `L2::is_bounded` (on the four boundary-line coefficient pairs).
pub fn is_plusminus_same_sign(a: &BigInt, b: &BigInt) -> bool {
    b.abs() > a.abs()
}

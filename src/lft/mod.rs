//! Linear fractional transformations: the one-dimensional (`L1`) and
//! two-dimensional bilinear (`L2`) matrix algebra that drives digit
//! absorption and emission.
//!
//! Both layers share two primitives: the "is this image interval short
//! enough to commit a digit" test, and the "which digit does the lower
//! bound round to" extraction rule. They're kept here rather than
//! duplicated in `one.rs`/`two.rs`.

pub mod one;
pub mod two;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive};

use crate::digit::{Digit, EXPONENT, POWER_2};

pub use one::{L1, Mono};
pub use two::{Corner, L2, Mode};

/// `a / b` (with `b > 0`) is small enough to extract a digit from: the
/// interval it measures has length `<= 2 / B`. Tested without division as
/// `a <= b / 2^(E-1)` (`a`, `b` assumed to carry the correct sign already,
/// i.e. `a` is the numerator of the *interval length*, not of a bound).
pub(crate) fn is_small_enough(a: &BigInt, b: &BigInt) -> bool {
    a <= &(b >> (EXPONENT as usize - 1))
}

/// The largest digit `n` such that `[(n-1)/B, (n+1)/B]` contains the
/// lower bound `a / b` (`b > 0`); clamped down by one if that would be
/// `B` itself, since digits must stay strictly below `B`.
///
/// Biased against negative digits at exact midpoints: the symmetric
/// choice would require a ceiling division on the upper bound instead.
/// This bias is required to be preserved, not an accident to fix.
pub(crate) fn digit_from_lower_bound(a: &BigInt, b: &BigInt) -> Digit {
    debug_assert!(b.is_positive());
    // Floor division, not truncation: for a negative `a` this rounds
    // toward negative infinity, matching the bound's actual lower value
    // rather than rounding up toward zero.
    let num = BigInt::from(1) + (a << EXPONENT as usize).div_floor(b);
    let n: Digit = num
        .to_i128()
        .expect("digit bound fits in i128 for EXPONENT <= 126");
    if n == *POWER_2_AS_DIGIT { n - 1 } else { n }
}

/// `POWER_2` as a `Digit`, used only by the clamp in `digit_from_lower_bound`.
#[allow(non_upper_case_globals)]
static POWER_2_AS_DIGIT: std::sync::LazyLock<Digit> = std::sync::LazyLock::new(|| {
    POWER_2
        .to_i128()
        .expect("POWER_2 fits in i128 for EXPONENT <= 126")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_from_lower_bound_clamps_at_power_2() {
        // a/b == 1 exactly -> would compute POWER_2, clamped to POWER_2 - 1.
        let n = digit_from_lower_bound(&POWER_2.clone(), &POWER_2.clone());
        assert_eq!(n, *POWER_2_AS_DIGIT - 1);
    }

    #[test]
    fn digit_from_lower_bound_matches_known_fraction() {
        // lower bound 3/4 -> floor(3 * 2^64 / 4) + 1
        let n = digit_from_lower_bound(&BigInt::from(3), &BigInt::from(4));
        let expected = BigInt::from(1) + (BigInt::from(3) << EXPONENT as usize) / BigInt::from(4);
        assert_eq!(BigInt::from(n), expected);
    }

    #[test]
    fn digit_from_lower_bound_floors_negative_fractions() {
        // -1/3: 1 + floor(-2^64/3) = -6148914691236517205, one less than
        // the truncated-toward-zero -6148914691236517204.
        let n = digit_from_lower_bound(&BigInt::from(-1), &BigInt::from(3));
        assert_eq!(n, -6148914691236517205i128);
    }

    #[test]
    fn is_small_enough_boundary() {
        // length == 2/B exactly: a/b == 2/B <=> a*B/2 == b/... use a=2,b=POWER_2
        let two = BigInt::from(2);
        assert!(is_small_enough(&two, &POWER_2));
        let three = BigInt::from(3);
        assert!(!is_small_enough(&three, &POWER_2));
    }
}

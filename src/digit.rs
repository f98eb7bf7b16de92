//! Signed digits in the engine's native base.
//!
//! A digit is a signed integer `d` with `-B < d < B`, where `B = 2^E` and
//! `E` is a fixed compile-time exponent (`EXPONENT`, reference value 64).
//! A digit represents the closed sub-interval `[(d-1)/B, (d+1)/B]` of
//! `[-1, 1]`; successive digits absorbed into an LFT nest these intervals
//! down to the represented real number.
//!
//! `E` is kept as a compile-time constant rather than a runtime parameter:
//! parameterizing it would require threading `B` through every matrix
//! constant instead of reading it off a `LazyLock`.

use std::sync::LazyLock;

use num_bigint::BigInt;

use crate::error::InvariantViolation;

/// The fixed exponent `E` such that the native base is `B = 2^E`.
///
/// Valid for any value up to 126: digits are stored as `i128`, and a digit
/// must fit in the open range `(-2^E, 2^E)`.
pub const EXPONENT: u32 = 64;

/// A signed digit in the engine's native base, `-B < d < B`.
pub type Digit = i128;

/// `B = 2^EXPONENT`, the native base, as an arbitrary-precision integer.
pub static POWER_2: LazyLock<BigInt> = LazyLock::new(|| BigInt::from(1u8) << EXPONENT as usize);

/// `B` as an `i128`, used for digit-range checks without allocating a
/// `BigInt` on every call.
pub const POWER_2_I128: i128 = 1i128 << EXPONENT;

/// Validates that `d` lies in the open range `(-B, B)` required of a digit.
pub fn check_digit(d: Digit) -> Result<Digit, InvariantViolation> {
    if -POWER_2_I128 < d && d < POWER_2_I128 {
        Ok(d)
    } else {
        Err(InvariantViolation::DigitOutOfRange(d))
    }
}

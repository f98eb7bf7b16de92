//! Exact digit-base conversion: reinterpreting a stream of digits in one
//! base as a stream of digits in another, without ever going through a
//! fractional intermediate representation.
//!
//! Three cases, tried in order:
//! - the source base divides the target base exactly (`target = source^k`):
//!   group `k` source digits into one target digit;
//! - the target base divides the source base exactly: split each source
//!   digit into several target digits;
//! - neither: fall back to the largest base both divide exactly (their
//!   "shared power") and convert through it in two hops. If even that
//!   doesn't exist, the conversion is impossible.

use std::collections::VecDeque;
use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive};

use crate::digit::{Digit, EXPONENT};
use crate::error::NonRepresentableError;
use crate::stream::source::{DigitSource, UnsignedDigitSource};

fn is_power2(n: u128) -> bool {
    n & (n - 1) == 0
}

fn exact_log2(n: u128) -> u32 {
    u128::BITS - n.leading_zeros() - 1
}

/// `bt` is reached from `bf` by repeated exact division: `bt == bf^n` for
/// some `n >= 1`.
fn is_exactly_convertible(bf: u128, mut bt: u128) -> bool {
    while bt > 1 {
        if bt % bf != 0 {
            return false;
        }
        bt /= bf;
    }
    true
}

/// `n` such that `bt == bf^n`, assuming [`is_exactly_convertible`].
fn discrete_log(bf: u128, mut bt: u128) -> u32 {
    let mut n = 0;
    while bt > 1 {
        bt /= bf;
        n += 1;
    }
    n
}

/// The largest `p` such that both `bf` and `bt` are integer powers of `p`.
fn largest_shared_power(mut bf: u128, mut bt: u128) -> u128 {
    while bt > 1 {
        while bf % bt == 0 {
            bf /= bt;
        }
        std::mem::swap(&mut bf, &mut bt);
    }
    bf
}

/// Splits `p` (a digit in base `target_base^(n+1)`, conceptually) into its
/// top digit at position `n` and the remainder, base `target_base`.
/// Floor division, then nudged up by one if negative, the same bias
/// `digit_from_lower_bound` applies, required to be preserved as-is.
fn split_target_base(p: &BigInt, n: u32, target_base: u128) -> (BigInt, BigInt) {
    if is_power2(target_base) {
        let shift = (n * exact_log2(target_base)) as usize;
        let split = p >> shift;
        let rest = p - (&split << shift);
        (rest, split)
    } else {
        let mut base_pow = BigInt::from(1);
        let base = BigInt::from(target_base);
        for _ in 0..n {
            base_pow *= &base;
        }
        let mut split = p.div_floor(&base_pow);
        if split.is_negative() {
            split += BigInt::from(1);
        }
        let rest = p - &split * &base_pow;
        (rest, split)
    }
}

struct GroupDigits {
    inner: Box<dyn Iterator<Item = BigInt> + Send>,
    orig_base: BigInt,
    digits_per_out: u32,
}

impl Iterator for GroupDigits {
    type Item = BigInt;
    fn next(&mut self) -> Option<BigInt> {
        let mut out = BigInt::from(0);
        for _ in 0..self.digits_per_out {
            out = out * &self.orig_base + self.inner.next()?;
        }
        Some(out)
    }
}

struct SplitDigits {
    inner: Box<dyn Iterator<Item = BigInt> + Send>,
    target_base: u128,
    out_digits_per_in: u32,
    pending: VecDeque<BigInt>,
}

impl Iterator for SplitDigits {
    type Item = BigInt;
    fn next(&mut self) -> Option<BigInt> {
        if self.pending.is_empty() {
            let mut digit = self.inner.next()?;
            // Most significant part first.
            for n in (0..self.out_digits_per_in).rev() {
                let (rest, part) = split_target_base(&digit, n, self.target_base);
                digit = rest;
                self.pending.push_back(part);
            }
        }
        self.pending.pop_front()
    }
}

/// Reinterprets `source`, a stream of digits in `orig_base`, as a stream
/// of digits in `target_base`. Fails only if the two bases share no
/// common integer power at all (e.g. base 3 and base 10).
pub fn convert_base(
    source: Box<dyn Iterator<Item = BigInt> + Send>,
    orig_base: u128,
    target_base: u128,
) -> Result<Box<dyn Iterator<Item = BigInt> + Send>, NonRepresentableError> {
    if is_exactly_convertible(orig_base, target_base) {
        return Ok(Box::new(GroupDigits {
            inner: source,
            orig_base: BigInt::from(orig_base),
            digits_per_out: discrete_log(orig_base, target_base),
        }));
    }
    if is_exactly_convertible(target_base, orig_base) {
        return Ok(Box::new(SplitDigits {
            inner: source,
            target_base,
            out_digits_per_in: discrete_log(target_base, orig_base),
            pending: VecDeque::new(),
        }));
    }
    let shared_power = largest_shared_power(target_base, orig_base);
    if shared_power == 1 {
        return Err(NonRepresentableError::NoSharedPower {
            from_base: orig_base,
            to_base: target_base,
        });
    }
    let through_shared = convert_base(source, orig_base, shared_power)?;
    convert_base(through_shared, shared_power, target_base)
}

struct FromUnsigned {
    source: Arc<dyn UnsignedDigitSource>,
}

impl DigitSource for FromUnsigned {
    fn open(&self) -> Box<dyn Iterator<Item = Digit> + Send> {
        let orig_base = self.source.base();
        let raw: Box<dyn Iterator<Item = BigInt> + Send> =
            Box::new(self.source.open().map(BigInt::from));
        let target_base = 1u128 << EXPONENT;
        let converted = convert_base(raw, orig_base, target_base)
            .expect("engine base shares an integer power with every external source this engine ships");
        Box::new(converted.map(|d| {
            d.to_i128()
                .expect("converted digit magnitude stays below the engine base")
        }))
    }
}

/// Adapts an external, unsigned digit source into the engine's native
/// signed-digit base, via [`convert_base`].
pub fn from_unsigned(source: Arc<dyn UnsignedDigitSource>) -> impl DigitSource {
    FromUnsigned { source }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(values: &[i64]) -> Box<dyn Iterator<Item = BigInt> + Send> {
        Box::new(values.to_vec().into_iter().map(BigInt::from))
    }

    #[test]
    fn groups_smaller_base_exactly() {
        // base 4 digits [1, 2] grouped pairwise into one base-16 digit:
        // 1*4 + 2 == 6.
        let out = convert_base(digits(&[1, 2, 3, 0]), 4, 16).unwrap();
        let collected: Vec<BigInt> = out.take(2).collect();
        assert_eq!(collected, vec![BigInt::from(6), BigInt::from(12)]);
    }

    #[test]
    fn splits_larger_base_exactly() {
        // one base-16 digit 6 split into two base-4 digits: 1, 2.
        let out = convert_base(digits(&[6]), 16, 4).unwrap();
        let collected: Vec<BigInt> = out.take(2).collect();
        assert_eq!(collected, vec![BigInt::from(1), BigInt::from(2)]);
    }

    #[test]
    fn round_trips_through_grouping_then_splitting() {
        let grouped = convert_base(digits(&[1, 2, 3, 0]), 4, 16).unwrap();
        let back = convert_base(grouped, 16, 4).unwrap();
        let collected: Vec<BigInt> = back.take(4).collect();
        assert_eq!(
            collected,
            vec![BigInt::from(1), BigInt::from(2), BigInt::from(3), BigInt::from(0)]
        );
    }

    #[test]
    fn no_shared_power_is_rejected() {
        let err = convert_base(digits(&[1]), 3, 10).err().unwrap();
        assert_eq!(
            err,
            NonRepresentableError::NoSharedPower { from_base: 3, to_base: 10 }
        );
    }
}

//! `pi - 3` via the Bailey-Borwein-Plouffe formula, base `2^32` at a time.
//!
//! `pi - 3` rather than `pi` itself so the result lands in `[-1, 1]` and
//! can be read directly as a signed-digit stream once rebased.

use num_bigint::{BigInt, BigUint};
use num_traits::{ToPrimitive, Zero};

use crate::sources::UnsignedDigitSource;

const SHIFT: u32 = 4 * 14;
const EXT_SHIFT: u32 = 4 * 6;

/// The BBP digit-extraction sum `S(j, n)`, truncated to `SHIFT` bits of
/// fractional precision. The finite "left sum" is exact modular
/// exponentiation; the infinite "tail sum" decays geometrically and is
/// summed in `f64` until it stops changing, carrying the same floating
/// point imprecision a negative integer power would introduce.
fn s(j: u64, n: u64) -> BigUint {
    let shift = SHIFT as usize;
    let m = BigUint::from(1u32) << shift;
    let mask = &m - BigUint::from(1u32);
    let mut total = BigUint::zero();
    for k in 0..=n {
        let r = 8 * k + j;
        let exp = n - k;
        let pow_mod = BigUint::from(16u32).modpow(&BigUint::from(exp), &BigUint::from(r));
        let term = (pow_mod << shift) / BigUint::from(r);
        total = (&total + &term) & &mask;
    }

    let mut t: u128 = 0;
    let mut k: i64 = -1;
    let base_as_f64 = (1u128 << SHIFT) as f64;
    loop {
        let xp = (16f64.powi(k as i32) * base_as_f64) as u128;
        let denom = (8 * (n as i64 - k) + j as i64) as u128;
        let newt = t + xp / denom;
        if t == newt {
            break;
        }
        t = newt;
        k -= 1;
    }
    total + BigUint::from(t)
}

/// One base-`2^32` chunk of `pi - 3`, starting at hex digit `n`. `n` must
/// advance by 8 between calls, since one `u32` covers 8 hex digits.
fn chunk(n: u64) -> u32 {
    let combined = BigInt::from(4u32) * BigInt::from(s(1, n))
        - BigInt::from(2u32) * BigInt::from(s(4, n))
        - BigInt::from(s(5, n))
        - BigInt::from(s(6, n));
    let ext_mask = BigInt::from((1u64 << 32) - 1);
    let shifted = combined >> EXT_SHIFT as usize;
    let masked = shifted & ext_mask;
    masked
        .to_u32()
        .expect("masked against a 32-bit mask, always fits in u32")
}

struct BbpIter {
    n: u64,
}

impl Iterator for BbpIter {
    type Item = u128;

    fn next(&mut self) -> Option<u128> {
        let x = chunk(self.n);
        self.n += 8;
        Some(x as u128)
    }
}

/// `pi - 3`, as an external base-`2^32` unsigned digit source.
pub struct PiMinusThree;

impl UnsignedDigitSource for PiMinusThree {
    fn base(&self) -> u128 {
        1u128 << 32
    }

    fn open(&self) -> Box<dyn Iterator<Item = u128> + Send> {
        Box::new(BbpIter { n: 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_chunk_matches_known_pi_hex_digits() {
        // pi - 3 = 0.1415926535897932384626433832795... in decimal;
        // in hex, pi - 3 = 0x0.243F6A8885A3... The BBP formula at n=0
        // extracts the first 8 hex digits starting right after the point.
        let x = chunk(0);
        assert_eq!(x, 0x243F6A88);
    }

    #[test]
    fn second_chunk_continues_the_hex_expansion() {
        let x = chunk(8);
        assert_eq!(x, 0x85A308D3);
    }

    #[test]
    fn base_is_2_32() {
        assert_eq!(PiMinusThree.base(), 1u128 << 32);
    }
}

//! The public numeric façade: `Real` values, `UnaryOp`/`BinaryOp`
//! operators acting on them, and pretty-printing.

use std::sync::Arc;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

use crate::digit::{EXPONENT, POWER_2};
use crate::error::{DomainError, InvariantViolation};
use crate::lft::{L1, L2};
use crate::stream::{DigitSource, ones_stream, transform_binary, transform_unary, zero_stream};

/// An exact real number in `[-1, 1]`, represented lazily as a digit
/// stream. Cloning a `Real` is cheap: it shares the underlying
/// `DigitSource`, not an already-computed value.
#[derive(Clone)]
pub struct Real(Arc<dyn DigitSource>);

impl Real {
    pub fn from_source(source: Arc<dyn DigitSource>) -> Self {
        Real(source)
    }

    /// The constant `0`.
    pub fn zero() -> Self {
        Real(Arc::new(zero_stream()))
    }

    /// The constant `1`.
    pub fn one() -> Self {
        Real(Arc::new(ones_stream()))
    }

    /// The constant `p / q`, built as a constant-matrix unary transform
    /// applied to the stream for `1`, so that absorbing `1`'s digits
    /// drives the transform to its fixed point at `p / q`.
    pub fn from_fraction(p: BigInt, q: BigInt) -> Result<Self, DomainError> {
        let lft = L1::from_fraction(p, q)?;
        let source = transform_unary(lft, Arc::new(ones_stream()))
            .expect("a constant LFT built from a fraction in [-1, 1] is always contracting");
        Ok(Real(Arc::new(source)))
    }

    /// The underlying digit source, shared (not copied).
    pub fn source(&self) -> Arc<dyn DigitSource> {
        self.0.clone()
    }

    /// Renders `[lower, upper]`, the exact rational bounds of the first
    /// `integer_digits` native digits (as the integer part) followed by
    /// enough fractional digits to cover `precision_bits` bits, each
    /// printed as a fixed-point decimal.
    pub fn format_decimal(&self, integer_digits: usize, precision_bits: usize) -> String {
        let mut digit_gen = self.0.open();
        let mut integer_part = BigInt::from(0);
        for _ in 0..integer_digits {
            let digit = digit_gen
                .next()
                .expect("digit source exhausted while reading the integer part");
            integer_part = integer_part * &*POWER_2 + BigInt::from(digit);
        }

        let mut matrix = L1::new(BigInt::from(1), BigInt::from(0), integer_part, BigInt::from(1));
        let steps = precision_bits / EXPONENT as usize;
        for _ in 0..steps {
            let digit = digit_gen
                .next()
                .expect("digit source exhausted while reading the fractional part");
            matrix
                .absorb_digit(digit)
                .expect("digit source produced an in-range digit");
            matrix.normalize();
        }
        let (lower, upper) = matrix
            .bounds()
            .expect("a freshly-absorbed LFT built from digits is always bounded");

        let decimal_places = decimal_places_for(precision_bits);
        format!(
            "[{}, {}]",
            decimal_string(&lower, decimal_places),
            decimal_string(&upper, decimal_places)
        )
    }

    /// Renders a signed hexadecimal fraction (no integer part), tracking
    /// zero-run lengths with a borrow so that e.g. `0x1.000...` rounds to
    /// `0x0.fff...f` rather than truncating the trailing zero run.
    pub fn format_hex(&self, precision_hex_digits: usize) -> String {
        let native_base = 1u128 << EXPONENT;
        let hex_stream: Box<dyn Iterator<Item = BigInt> + Send> =
            crate::stream::convert::convert_base(
                Box::new(self.0.open().map(BigInt::from)),
                native_base,
                16,
            )
            .expect("the engine's native base is a power of two, so base 16 always divides it");
        let mut digit_gen = hex_stream.map(|d| d.to_i64().expect("hex digit fits in i64"));

        let mut precision = precision_hex_digits as i64;
        let mut zeroes: usize = 0;
        let mut digit = digit_gen.next().expect("hex stream is infinite");
        while digit == 0 && precision > 0 {
            zeroes += 1;
            digit = digit_gen.next().expect("hex stream is infinite");
            precision -= 1;
        }

        let mut out = String::new();
        out.push(if digit < 0 { '-' } else { ' ' });
        out.push('.');
        out.push_str(&"0".repeat(zeroes));

        let sign: i64 = if digit < 0 { -1 } else { 1 };
        let mut saved = digit.abs();
        let mut trailing_zeroes = 0usize;
        while precision > 0 {
            trailing_zeroes = 0;
            precision -= 1;
            digit = digit_gen.next().expect("hex stream is infinite");
            while digit == 0 && precision > 0 {
                trailing_zeroes += 1;
                digit = digit_gen.next().expect("hex stream is infinite");
                precision -= 1;
            }
            digit *= sign;
            if digit < 0 {
                out.push_str(&to_hex_digit(saved - 1));
                out.push_str(&"f".repeat(trailing_zeroes));
                saved = 16 - (-digit);
            } else if digit > 0 {
                out.push_str(&to_hex_digit(saved));
                out.push_str(&"0".repeat(trailing_zeroes));
                saved = digit;
            }
        }
        if trailing_zeroes > 0 {
            let rounding = digit_gen.next().expect("hex stream is infinite") * sign;
            if rounding < 0 {
                out.push_str(&to_hex_digit(saved - 1));
                out.push_str(&"f".repeat(trailing_zeroes));
            } else {
                out.push_str(&to_hex_digit(saved));
                out.push_str(&"0".repeat(trailing_zeroes));
            }
        }
        out
    }
}

fn to_hex_digit(digit: i64) -> String {
    debug_assert!((0..16).contains(&digit));
    format!("{digit:x}")
}

/// Rough bits-to-decimal-digits conversion (`log10(2) ~= 0.30103`), used
/// only to size the pretty-printed fractional part.
fn decimal_places_for(precision_bits: usize) -> usize {
    ((precision_bits as f64) * 0.30103).ceil() as usize + 1
}

/// Renders a `BigRational` as a fixed-point decimal with exactly
/// `decimals` fractional digits, truncating (not rounding) the remainder.
fn decimal_string(r: &BigRational, decimals: usize) -> String {
    let negative = r.numer().is_negative() ^ r.denom().is_negative();
    let numer = r.numer().abs();
    let denom = r.denom().abs();
    let mut scale = BigInt::from(1);
    let ten = BigInt::from(10);
    for _ in 0..decimals {
        scale *= &ten;
    }
    let scaled = (numer * scale) / denom;
    let digits = scaled.to_string();
    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };
    let split_at = padded.len() - decimals;
    let (int_part, frac_part) = padded.split_at(split_at);
    format!("{}{int_part}.{frac_part}", if negative { "-" } else { "" })
}

/// A unary operator: a fixed `L1` applied to a `Real`'s digit stream.
#[derive(Clone)]
pub struct UnaryOp(L1);

impl UnaryOp {
    pub fn new(lft: L1) -> Self {
        UnaryOp(lft)
    }

    pub fn apply(&self, x: &Real) -> Result<Real, InvariantViolation> {
        let source = transform_unary(self.0.clone(), x.source())?;
        Ok(Real(Arc::new(source)))
    }
}

/// A binary operator: a fixed `L2` applied to two `Real`s' digit streams.
#[derive(Clone)]
pub struct BinaryOp(L2);

impl BinaryOp {
    pub fn new(lft: L2) -> Self {
        BinaryOp(lft)
    }

    pub fn apply(&self, x: &Real, y: &Real) -> Result<Real, InvariantViolation> {
        let source = transform_binary(self.0.clone(), x.source(), y.source())?;
        Ok(Real(Arc::new(source)))
    }
}

/// A handful of example constants and operators, used by the CLI and
/// integration tests.
pub mod constants {
    use std::sync::Arc;

    use num_bigint::BigInt;

    use super::{BinaryOp, Real, UnaryOp};
    use crate::lft::{L1, L2};
    use crate::sources::PiMinusThree;
    use crate::stream::from_unsigned;

    fn bi(v: i64) -> BigInt {
        BigInt::from(v)
    }

    /// `(x + 3) / 4`.
    pub fn xplus3_over_4() -> UnaryOp {
        UnaryOp::new(L1::new(bi(1), bi(0), bi(3), bi(4)))
    }

    /// `1 / (x + 2)`.
    pub fn one_over_xplus2() -> UnaryOp {
        UnaryOp::new(L1::new(bi(0), bi(1), bi(1), bi(2)))
    }

    /// `x / 3`.
    pub fn third_of() -> UnaryOp {
        UnaryOp::new(L1::new(bi(1), bi(0), bi(0), bi(3)))
    }

    /// `(x*y + 3*x + 3*y) / 10`.
    pub fn times() -> BinaryOp {
        BinaryOp::new(L2::new(bi(1), bi(0), bi(3), bi(0), bi(3), bi(0), bi(0), bi(10)))
    }

    /// `(x + y) / 2`.
    pub fn midpoint() -> BinaryOp {
        BinaryOp::new(L2::new(bi(0), bi(0), bi(1), bi(0), bi(1), bi(0), bi(0), bi(2)))
    }

    /// `x * y`.
    pub fn mult() -> BinaryOp {
        BinaryOp::new(L2::new(bi(1), bi(0), bi(0), bi(0), bi(0), bi(0), bi(0), bi(1)))
    }

    /// `pi - 3`, via the BBP formula rebased into the engine's native base.
    pub fn pi_minus_three() -> Real {
        Real::from_source(Arc::new(from_unsigned(Arc::new(PiMinusThree))))
    }

    /// `pi / 4`, as `(pi - 3 + 3) / 4`.
    pub fn pi_over_4() -> Real {
        xplus3_over_4()
            .apply(&pi_minus_three())
            .expect("xplus3_over_4 is contracting")
    }

    /// `log(2)`, via a continued-fraction-style matrix product generator
    /// rather than any input digit stream.
    pub fn log2() -> Real {
        use crate::stream::{MatrixProductTransform, MatrixSource};

        struct Log2Matrices;
        struct Log2MatrixIter(i64);

        impl Iterator for Log2MatrixIter {
            type Item = L1;
            fn next(&mut self) -> Option<L1> {
                let n = self.0;
                self.0 += 1;
                Some(L1::new(
                    bi(-n),
                    bi(2 * n + 1),
                    bi(-4 * n),
                    bi(7 * n + 3),
                ))
            }
        }

        impl MatrixSource for Log2Matrices {
            fn open(&self) -> Box<dyn Iterator<Item = L1> + Send> {
                Box::new(Log2MatrixIter(1))
            }
        }

        let start = L1::new(bi(1), bi(2), bi(4), bi(6));
        Real::from_source(Arc::new(MatrixProductTransform::new(start, Arc::new(Log2Matrices))))
    }
}

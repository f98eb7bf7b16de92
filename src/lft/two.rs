//! `L2`: a bilinear LFT, `(x, y) -> (a*xy + c*x + e*y + g) / (b*xy + d*x + f*y + h)`.

use std::fmt;
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::digit::{Digit, EXPONENT, check_digit};
use crate::error::InvariantViolation;
use crate::lft::{digit_from_lower_bound, is_small_enough};
use crate::primitives::{gcd_all, is_plusminus_same_sign};

/// Which of the four `(x, y) in {-1, 1}^2` corners a bound refers to.
/// Named `(x sign)(y sign)`, `M` = `-1`, `P` = `1`, so `Mp` is
/// `(x, y) = (-1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    Mm,
    Mp,
    Pm,
    Pp,
}

impl Corner {
    pub fn all() -> [Corner; 4] {
        [Corner::Mm, Corner::Mp, Corner::Pm, Corner::Pp]
    }
}

/// The `(min corner, max corner)` classification of the image of an `L2`
/// over `[-1, 1]^2`. `min != max` always holds for a bounded transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    pub min: Corner,
    pub max: Corner,
}

/// A bilinear LFT over 8 arbitrary-precision integer coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2 {
    a: BigInt,
    b: BigInt,
    c: BigInt,
    d: BigInt,
    e: BigInt,
    f: BigInt,
    g: BigInt,
    h: BigInt,
}

impl fmt::Display for L2 {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "[{}\t{}\t| {}\t{}\n{}\t{}\t| {}\t{}]",
            self.a, self.c, self.e, self.g, self.b, self.d, self.f, self.h
        )
    }
}

impl L2 {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a: BigInt,
        b: BigInt,
        c: BigInt,
        d: BigInt,
        e: BigInt,
        f: BigInt,
        g: BigInt,
        h: BigInt,
    ) -> Self {
        L2 { a, b, c, d, e, f, g, h }
    }

    pub fn coefficients(&self) -> [&BigInt; 8] {
        [
            &self.a, &self.b, &self.c, &self.d, &self.e, &self.f, &self.g, &self.h,
        ]
    }

    /// Replaces `self` with `self . other` along the `x` axis: treats
    /// `other` as a unary LFT acting on `x`, leaving `y` alone.
    pub fn compose_x(&mut self, other: &crate::lft::L1) {
        let (a, b, c, d, e, f, g, h) = self.owned_fields();
        let (u, v, w, x) = (other.a(), other.b(), other.c(), other.d());
        self.a = &a * u + &c * v;
        self.b = &b * u + &d * v;
        self.c = &a * w + &c * x;
        self.d = &b * w + &d * x;
        self.e = &e * u + &g * v;
        self.f = &f * u + &h * v;
        self.g = &e * w + &g * x;
        self.h = &f * w + &h * x;
    }

    /// As `compose_x`, but along the `y` axis.
    pub fn compose_y(&mut self, other: &crate::lft::L1) {
        let (a, b, c, d, e, f, g, h) = self.owned_fields();
        let (u, v, w, x) = (other.a(), other.b(), other.c(), other.d());
        self.a = &a * u + &e * v;
        self.b = &b * u + &f * v;
        self.c = &c * u + &g * v;
        self.d = &d * u + &h * v;
        self.e = &a * w + &e * x;
        self.f = &b * w + &f * x;
        self.g = &c * w + &g * x;
        self.h = &d * w + &h * x;
    }

    fn fields(&self) -> (&BigInt, &BigInt, &BigInt, &BigInt, &BigInt, &BigInt, &BigInt, &BigInt) {
        (&self.a, &self.b, &self.c, &self.d, &self.e, &self.f, &self.g, &self.h)
    }

    #[allow(clippy::type_complexity)]
    fn owned_fields(&self) -> (BigInt, BigInt, BigInt, BigInt, BigInt, BigInt, BigInt, BigInt) {
        (
            self.a.clone(),
            self.b.clone(),
            self.c.clone(),
            self.d.clone(),
            self.e.clone(),
            self.f.clone(),
            self.g.clone(),
            self.h.clone(),
        )
    }

    /// Absorbs one digit on the `x` axis: `self . L1.digit(d)` along `x`.
    /// Only the `x`-bearing columns (`c, d, g, h`) change.
    pub fn absorb_digit_x(&mut self, digit: Digit) -> Result<(), InvariantViolation> {
        check_digit(digit)?;
        let shift = EXPONENT as usize;
        let new_c = &self.a * digit + (&self.c << shift);
        let new_d = &self.b * digit + (&self.d << shift);
        let new_g = &self.e * digit + (&self.g << shift);
        let new_h = &self.f * digit + (&self.h << shift);
        self.c = new_c;
        self.d = new_d;
        self.g = new_g;
        self.h = new_h;
        Ok(())
    }

    /// Absorbs one digit on the `y` axis: only `e, f, g, h` change.
    pub fn absorb_digit_y(&mut self, digit: Digit) -> Result<(), InvariantViolation> {
        check_digit(digit)?;
        let shift = EXPONENT as usize;
        let new_e = &self.a * digit + (&self.e << shift);
        let new_f = &self.b * digit + (&self.f << shift);
        let new_g = &self.c * digit + (&self.g << shift);
        let new_h = &self.d * digit + (&self.h << shift);
        self.e = new_e;
        self.f = new_f;
        self.g = new_g;
        self.h = new_h;
        Ok(())
    }

    /// Mutates `self` to `L1.digit(n)^-1 . self`, applied to both the `x`
    /// and `y` numerator/denominator families at once. `b, d, f, h` are
    /// unchanged.
    fn inv_times_digit(&mut self, n: Digit) {
        let shift = EXPONENT as usize;
        let v = -n;
        let new_a = (&self.a << shift) + &self.b * v;
        let new_c = (&self.c << shift) + &self.d * v;
        let new_e = (&self.e << shift) + &self.f * v;
        let new_g = (&self.g << shift) + &self.h * v;
        self.a = new_a;
        self.c = new_c;
        self.e = new_e;
        self.g = new_g;
    }

    /// Divides all 8 entries by their GCD.
    pub fn normalize(&mut self) {
        let gcd = gcd_all([
            &self.a, &self.b, &self.c, &self.d, &self.e, &self.f, &self.g, &self.h,
        ]);
        if gcd.is_one() {
            return;
        }
        log::debug!("L2::normalize: dividing entries by gcd {gcd}");
        self.a /= &gcd;
        self.b /= &gcd;
        self.c /= &gcd;
        self.d /= &gcd;
        self.e /= &gcd;
        self.f /= &gcd;
        self.g /= &gcd;
        self.h /= &gcd;
    }

    // --- the six sign tests driving mode classification ---
    // Each compares two products without ever dividing, derived from
    // `L(x, y)` restricted to an edge or diagonal of `[-1, 1]^2`.

    /// MM < MP
    fn test_xm(&self) -> bool {
        (&self.g - &self.c) * (&self.f - &self.b) < (&self.e - &self.a) * (&self.h - &self.d)
    }
    /// PM < PP
    fn test_xp(&self) -> bool {
        (&self.g + &self.c) * (&self.f + &self.b) < (&self.e + &self.a) * (&self.h + &self.d)
    }
    /// MM < PM
    fn test_ym(&self) -> bool {
        (&self.g - &self.e) * (&self.d - &self.b) < (&self.c - &self.a) * (&self.h - &self.f)
    }
    /// MP < PP
    fn test_yp(&self) -> bool {
        (&self.g + &self.e) * (&self.d + &self.b) < (&self.c + &self.a) * (&self.h + &self.f)
    }
    /// MM < PP
    fn test_cross_mm_pp(&self) -> bool {
        (&self.g + &self.a) * (&self.d + &self.f) < (&self.c + &self.e) * (&self.h + &self.b)
    }
    /// MP < PM
    fn test_cross_mp_pm(&self) -> bool {
        (&self.g - &self.a) * (&self.d - &self.f) < (&self.c - &self.e) * (&self.h - &self.b)
    }

    /// The `(min, max)` corner classification of the image, via the
    /// twelve-way decision tree: two x-edge comparisons first, then either
    /// two y-edge comparisons (edges agree) or two diagonal comparisons
    /// (edges disagree).
    pub fn mode(&self) -> Mode {
        use Corner::*;
        let incr_xp = self.test_xp();
        let incr_xm = self.test_xm();
        let m = |min, max| {
            let mode = Mode { min, max };
            log::debug!("L2::mode: reclassified as {mode:?}");
            mode
        };
        if incr_xp && incr_xm {
            let incr_ym = self.test_ym();
            let incr_yp = self.test_yp();
            if incr_yp && incr_ym {
                m(Mm, Pp)
            } else if incr_yp {
                m(Pm, Pp)
            } else if incr_ym {
                m(Mm, Mp)
            } else {
                m(Pm, Mp)
            }
        } else if incr_xp {
            let cross_mmpp = self.test_cross_mm_pp();
            let cross_mppm = self.test_cross_mp_pm();
            if cross_mmpp && cross_mppm {
                m(Mp, Pp)
            } else if cross_mmpp {
                m(Pm, Pp)
            } else if cross_mppm {
                m(Mp, Mm)
            } else {
                m(Pm, Mm)
            }
        } else if incr_xm {
            let cross_mmpp = self.test_cross_mm_pp();
            let cross_mppm = self.test_cross_mp_pm();
            if cross_mmpp && cross_mppm {
                m(Mm, Pm)
            } else if cross_mmpp {
                m(Mm, Mp)
            } else if cross_mppm {
                m(Pp, Pm)
            } else {
                m(Pp, Mp)
            }
        } else {
            let incr_ym = self.test_ym();
            let incr_yp = self.test_yp();
            if incr_yp && incr_ym {
                m(Mp, Pm)
            } else if incr_yp {
                m(Mp, Mm)
            } else if incr_ym {
                m(Pp, Pm)
            } else {
                m(Pp, Mm)
            }
        }
    }

    /// The value of the image at `corner`, as `(numerator, denominator)`
    /// before reduction. There are only 4 distinct formulas across all 12
    /// modes, one per corner, so `extract()` and `bounds()` share this one
    /// function instead of a separate formula per mode.
    fn corner_value(&self, corner: Corner) -> (BigInt, BigInt) {
        let (a, b, c, d, e, f, g, h) = self.fields();
        match corner {
            Corner::Mm => (a - c - e + g, b - d - f + h),
            Corner::Pm => (-a + c - e + g, -b + d - f + h),
            Corner::Mp => (-a - c + e + g, -b - d + f + h),
            Corner::Pp => (a + c + e + g, b + d + f + h),
        }
    }

    /// The denominator `b*xy + d*x + f*y + h` has constant sign over
    /// `[-1, 1]^2`.
    pub fn is_bounded(&self) -> bool {
        let (_a, b, _c, d, _e, f, _g, h) = self.fields();
        let at_xp1 = is_plusminus_same_sign(&(f + b), &(h + d));
        let at_xm1 = is_plusminus_same_sign(&(f - b), &(h - d));
        let at_yp1 = is_plusminus_same_sign(&(d + b), &(h + f));
        if at_xp1 && at_xm1 && at_yp1 {
            debug_assert!(is_plusminus_same_sign(&(d - b), &(h - f)));
            true
        } else {
            false
        }
    }

    /// The value at all four corners, as exact rationals, in
    /// `Mm, Mp, Pm, Pp` order.
    pub fn bounds(&self) -> Result<(BigRational, BigRational, BigRational, BigRational), InvariantViolation> {
        if !self.is_bounded() {
            return Err(InvariantViolation::NotBounded);
        }
        let to_ratio = |corner| {
            let (n, d) = self.corner_value(corner);
            BigRational::new(n, d)
        };
        Ok((
            to_ratio(Corner::Mm),
            to_ratio(Corner::Mp),
            to_ratio(Corner::Pm),
            to_ratio(Corner::Pp),
        ))
    }

    pub fn is_contracting(&self) -> bool {
        match self.bounds() {
            Ok((mm, mp, pm, pp)) => {
                [mm, mp, pm, pp]
                    .into_iter()
                    .all(|v| v.abs() <= BigRational::one())
            }
            Err(_) => false,
        }
    }

    /// `(numerator, denominator)` of *half* the image's length: `(max -
    /// min) / 2`, cross-multiplied over the two corners' own denominators
    /// (`length = max_num/max_denom - min_num/min_denom`). `is_small_enough`
    /// and its `L1` counterpart both compare against a half-length
    /// numerator, not the full length, so the numerator computed here is
    /// halved before returning (the cross-multiplied numerator is always
    /// even).
    fn interval_length(&self, mode: Mode) -> (BigInt, BigInt) {
        let (min_num, min_denom) = self.corner_value(mode.min);
        let (max_num, max_denom) = self.corner_value(mode.max);
        let full_num = &max_num * &min_denom - &min_num * &max_denom;
        (full_num / BigInt::from(2), min_denom * max_denom)
    }

    /// `None` if the image interval is short enough (`<= 2/B`) to commit a
    /// digit; otherwise `Some(axis)`, the input axis (`0` = x, `1` = y) to
    /// pull from next.
    ///
    /// The axis choice when more input is needed is a cheap, stateless
    /// hash of the current coefficients mod 2: deterministic given the
    /// matrix state, but otherwise an arbitrary fair scheduling policy
    /// (any policy that visits both axes infinitely often is valid).
    pub fn next_index_to_pull(&self) -> Option<usize> {
        let mode = self.mode();
        let (num, denom) = self.interval_length(mode);
        if is_small_enough(&num, &denom) {
            return None;
        }
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        for coeff in self.coefficients() {
            coeff.hash(&mut hasher);
        }
        Some((hasher.finish() >> 63) as usize)
    }

    /// Emits the next output digit, from the minimum corner's value.
    /// Requires `next_index_to_pull() == None`.
    pub fn extract(&mut self) -> Result<Digit, InvariantViolation> {
        if self.next_index_to_pull().is_some() {
            return Err(InvariantViolation::NotReadyToExtract);
        }
        let (num, denom) = self.corner_value(self.mode().min);
        let n = digit_from_lower_bound(&num, &denom);
        debug_assert!(check_digit(n).is_ok());
        self.inv_times_digit(n);
        Ok(n)
    }
}

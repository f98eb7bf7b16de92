use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use reals::digit::POWER_2_I128;
use reals::lft::{Corner, L2};

fn bi(v: i64) -> BigInt {
    BigInt::from(v)
}

fn mult() -> L2 {
    L2::new(bi(1), bi(0), bi(0), bi(0), bi(0), bi(0), bi(0), bi(1))
}

fn midpoint() -> L2 {
    L2::new(bi(0), bi(0), bi(1), bi(0), bi(1), bi(0), bi(0), bi(2))
}

#[test]
fn mode_classification_agrees_with_the_four_corner_values() {
    let l = L2::new(bi(1), bi(0), bi(2), bi(0), bi(3), bi(0), bi(0), bi(10));
    assert!(l.is_contracting());
    let (mm, mp, pm, pp) = l.bounds().unwrap();
    let by_corner = [
        (Corner::Mm, mm),
        (Corner::Mp, mp),
        (Corner::Pm, pm),
        (Corner::Pp, pp),
    ];
    let mode = l.mode();
    let min_val = by_corner.iter().find(|(c, _)| *c == mode.min).unwrap().1.clone();
    let max_val = by_corner.iter().find(|(c, _)| *c == mode.max).unwrap().1.clone();
    for (_, v) in &by_corner {
        assert!(*v >= min_val && *v <= max_val);
    }
}

#[test]
fn mult_and_midpoint_are_bounded_and_contracting() {
    for l in [mult(), midpoint()] {
        assert!(l.is_bounded());
        assert!(l.is_contracting());
    }
}

#[test]
fn midpoint_of_three_quarters_and_one_contains_seven_eighths() {
    // BinaryOp(L2(0,0,1,0,1,0,0,2)) applied to (3/4, 1): digits B-1 forever
    // for 1, and the digit stream that converges to 3/4 for x.
    let mut l = midpoint();
    // Absorb enough digits of the constant 1 on y, and of 3/4 on x
    // (floor(3*B/4)+1, repeated, approximates the constant well enough to
    // extract several digits).
    let b = BigInt::from(1) << 64usize;
    let x_digit = (BigInt::from(1) + (BigInt::from(3) * &b) / BigInt::from(4))
        .to_i128()
        .unwrap();
    for _ in 0..4 {
        l.absorb_digit_x(x_digit).unwrap();
        l.absorb_digit_y(POWER_2_I128 - 1).unwrap();
        l.normalize();
    }
    let mut digits = Vec::new();
    while l.next_index_to_pull().is_none() {
        digits.push(l.extract().unwrap());
        l.normalize();
    }
    assert!(!digits.is_empty());
    // Reconstruct the rational interval the emitted digits bracket and
    // check it contains 7/8.
    let mut num = BigInt::from(0);
    for d in &digits {
        num = num * &b + BigInt::from(*d);
    }
    let denom = (0..digits.len()).fold(BigInt::from(1), |acc, _| acc * &b);
    let lower = BigRational::new(num.clone() - 1, denom.clone());
    let upper = BigRational::new(num + 1, denom);
    let seven_eighths = BigRational::new(bi(7), bi(8));
    assert!(lower <= seven_eighths && seven_eighths <= upper);
}

#[test]
fn extract_then_normalize_keeps_contracting() {
    let mut l = midpoint();
    for _ in 0..4 {
        l.absorb_digit_x(POWER_2_I128 - 1).unwrap();
        l.absorb_digit_y(POWER_2_I128 - 1).unwrap();
        l.normalize();
    }
    while l.next_index_to_pull().is_none() {
        l.extract().unwrap();
        l.normalize();
        assert!(l.is_contracting());
    }
}

#[test]
fn normalize_is_idempotent() {
    let mut l = L2::new(bi(2), bi(0), bi(4), bi(0), bi(4), bi(0), bi(0), bi(20));
    l.normalize();
    let once = l.clone();
    l.normalize();
    assert_eq!(l, once);
}

#[test]
fn bounds_on_unbounded_lft_is_rejected() {
    // b, d, f, h all zero: the denominator is identically zero, never
    // constant-sign.
    let l = L2::new(bi(1), bi(0), bi(1), bi(0), bi(1), bi(0), bi(1), bi(0));
    assert!(!l.is_bounded());
    assert!(l.bounds().is_err());
}

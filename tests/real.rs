use num_bigint::BigInt;

use reals::real::constants;
use reals::{Real, UnaryOp};
use reals::lft::L1;

#[test]
fn zero_formats_as_an_interval_around_zero() {
    let s = Real::zero().format_decimal(0, 64);
    assert!(s.starts_with("[0.0"));
    assert!(s.ends_with(']'));
}

#[test]
fn from_fraction_contains_the_fraction_at_every_precision() {
    for precision in [16usize, 64, 256] {
        let r = Real::from_fraction(BigInt::from(3), BigInt::from(4)).unwrap();
        let s = r.format_decimal(0, precision);
        assert!(s.starts_with("[0.74") || s.starts_with("[0.75"));
    }
}

#[test]
fn identity_unary_op_reproduces_the_same_digits() {
    let x = Real::from_fraction(BigInt::from(3), BigInt::from(4)).unwrap();
    let identity = UnaryOp::new(L1::identity());
    let y = identity.apply(&x).unwrap();
    assert_eq!(x.format_decimal(0, 128), y.format_decimal(0, 128));
}

#[test]
fn xplus3_over_4_of_zero_matches_from_fraction_three_quarters() {
    let via_operator = constants::xplus3_over_4().apply(&Real::zero()).unwrap();
    let direct = Real::from_fraction(BigInt::from(3), BigInt::from(4)).unwrap();
    assert_eq!(
        via_operator.format_decimal(0, 64),
        direct.format_decimal(0, 64)
    );
}

#[test]
fn midpoint_of_three_quarters_and_one_contains_seven_eighths() {
    let result = constants::midpoint().apply(
        &Real::from_fraction(BigInt::from(3), BigInt::from(4)).unwrap(),
        &Real::one(),
    );
    let s = result.unwrap().format_decimal(0, 64);
    assert!(s.starts_with("[0.87"));
}

#[test]
fn squaring_pi_minus_three_contains_its_known_value() {
    // pi - 3 ~= 0.14159; squared ~= 0.02005.
    let x = constants::pi_minus_three();
    let squared = constants::mult().apply(&x, &x).unwrap();
    let s = squared.format_decimal(0, 64);
    assert!(s.starts_with("[0.0200") || s.starts_with("[0.0201") || s.starts_with("[0.0199"));
}

#[test]
fn pi_over_4_matches_the_known_first_digits() {
    let s = constants::pi_over_4().format_decimal(0, 64);
    assert!(s.starts_with("[0.785") || s.starts_with("[0.784") || s.starts_with("[0.786"));
}

#[test]
fn log2_matches_the_known_first_digits() {
    let s = constants::log2().format_decimal(0, 64);
    assert!(s.starts_with("[0.693"));
}

#[test]
fn format_hex_round_trips_the_leading_digits_of_pi_minus_three() {
    // pi - 3 == 0x0.243f6a88... in hex.
    let s = constants::pi_minus_three().format_hex(6);
    assert!(s.starts_with(" .243f6a"));
}

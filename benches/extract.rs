use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use num_bigint::BigInt;

use reals::real::constants;
use reals::{Real, UnaryOp};
use reals::lft::L1;

fn bench_from_fraction_decimal(c: &mut Criterion) {
    c.bench_function("from_fraction(3/4) to 256 bits", |b| {
        b.iter(|| {
            let r = Real::from_fraction(BigInt::from(3), BigInt::from(4)).unwrap();
            black_box(r.format_decimal(0, 256))
        })
    });
}

fn bench_pi_over_4_extraction(c: &mut Criterion) {
    c.bench_function("pi/4 to 512 bits", |b| {
        b.iter(|| black_box(constants::pi_over_4().format_decimal(0, 512)))
    });
}

fn bench_identity_unary_passthrough(c: &mut Criterion) {
    let identity = UnaryOp::new(L1::identity());
    c.bench_function("identity(pi - 3) to 512 bits", |b| {
        b.iter(|| {
            let y = identity.apply(&constants::pi_minus_three()).unwrap();
            black_box(y.format_decimal(0, 512))
        })
    });
}

fn bench_squaring(c: &mut Criterion) {
    c.bench_function("(pi - 3) * (pi - 3) to 512 bits", |b| {
        b.iter(|| {
            let x = constants::pi_minus_three();
            let squared = constants::mult().apply(&x, &x).unwrap();
            black_box(squared.format_decimal(0, 512))
        })
    });
}

criterion_group!(
    benches,
    bench_from_fraction_decimal,
    bench_pi_over_4_extraction,
    bench_identity_unary_passthrough,
    bench_squaring
);
criterion_main!(benches);

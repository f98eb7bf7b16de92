//! Exact real arithmetic over linear fractional transformations.
//!
//! A real number in `[-1, 1]` is represented lazily as an infinite stream
//! of signed digits in a fixed base `B = 2^E`. Arithmetic operators are
//! linear fractional transformations (unary `L1`, bilinear `L2`) composed
//! against those streams: absorbing an input digit narrows the operator's
//! image interval, and once that interval is short enough the operator
//! emits an output digit and mutates itself to the remainder. Because
//! this is driven purely by interval containment, never by a fixed
//! precision, every digit produced is exactly correct, and the stream
//! produces as many more digits as a caller asks for.
//!
//! # Module overview
//!
//! - `digit`
//!   The digit type, the base `B`, and the range check every absorbed or
//!   emitted digit must satisfy.
//!
//! - `error`
//!   The three failure categories: out-of-domain constructor inputs,
//!   violated structural invariants, and non-representable base
//!   conversions.
//!
//! - `primitives`
//!   The small numeric kernel the LFT layer is built on: multi-value GCD
//!   and the same-sign-at-the-endpoints test.
//!
//! - `lft`
//!   `L1` and `L2`, the unary and bilinear transforms themselves:
//!   composition, digit absorption, boundedness and contraction checks,
//!   and digit extraction.
//!
//! - `stream`
//!   Digit sources (`DigitSource`, `UnsignedDigitSource`) and the drivers
//!   that turn LFT algebra into one: `UnaryTransform`, `BinaryTransform`,
//!   `MatrixProductTransform`, and base conversion between streams in
//!   different bases.
//!
//! - `sources`
//!   Concrete external digit sources, currently the Bailey-Borwein-Plouffe
//!   generator for `pi - 3`.
//!
//! - `real`
//!   The public façade: `Real` values, `UnaryOp`/`BinaryOp` operators, and
//!   decimal/hexadecimal pretty-printing.
//!
//! # Design goals
//!
//! - Every digit produced is exact: no operation ever rounds or
//!   approximates, it only defers until enough input is available.
//! - Arbitrary precision throughout (`num_bigint::BigInt`), so the base
//!   and digit count a caller asks for are the only precision limits.
//! - Operators are values: `UnaryOp`/`BinaryOp` can be constructed,
//!   stored, and applied independently of the streams they eventually run.

pub mod digit;
pub mod error;
pub mod lft;
pub mod primitives;
pub mod real;
pub mod sources;
pub mod stream;

pub use digit::Digit;
pub use error::{DomainError, InvariantViolation, NonRepresentableError};
pub use real::{BinaryOp, Real, UnaryOp};

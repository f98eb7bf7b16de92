//! Error types for the engine's three failure categories.
//!
//! Each category gets its own enum, hand-written with a manual `Display`
//! and `std::error::Error` impl rather than a derive-macro error crate.
//! The error surface here is small enough that the boilerplate doesn't
//! pay for itself, and it keeps the engine dependency-light.

use std::fmt;

use num_bigint::BigInt;

use crate::digit::Digit;

/// A value passed to a constructor falls outside the domain the engine
/// can represent, e.g. a fraction outside `[-1, 1]` passed to
/// `L1::from_fraction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// `p / q` has absolute value greater than 1.
    FractionOutOfRange { p: BigInt, q: BigInt },
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::FractionOutOfRange { p, q } => {
                write!(f, "fraction {p}/{q} is not in [-1, 1]")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// A caller violated one of the engine's structural invariants. This is a
/// programmer error: constructing an operator from a non-contracting LFT,
/// calling `extract` before `next_index_to_pull` returns `None`, calling
/// `bounds` on an unbounded LFT, or passing a digit outside `(-B, B)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The LFT is not contracting; it cannot be used to transform a stream.
    NotContracting,
    /// The LFT's denominator does not have constant sign on the domain.
    NotBounded,
    /// `extract` was called while `next_index_to_pull` is still `Some(_)`.
    NotReadyToExtract,
    /// A digit outside `(-B, B)` was supplied.
    DigitOutOfRange(Digit),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::NotContracting => write!(f, "LFT is not contracting"),
            InvariantViolation::NotBounded => write!(f, "LFT is not bounded"),
            InvariantViolation::NotReadyToExtract => {
                write!(f, "extract called before the image interval contracted")
            }
            InvariantViolation::DigitOutOfRange(d) => {
                write!(f, "digit {d} is out of range for the configured base")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Base conversion was requested between two bases with no shared integer
/// power, so no exact digit-for-digit reduction exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonRepresentableError {
    NoSharedPower { from_base: u128, to_base: u128 },
}

impl fmt::Display for NonRepresentableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonRepresentableError::NoSharedPower { from_base, to_base } => write!(
                f,
                "no exact conversion between base {from_base} and base {to_base}: \
                 neither is an integer power of the other, nor do they share one"
            ),
        }
    }
}

impl std::error::Error for NonRepresentableError {}

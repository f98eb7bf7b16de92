//! The two stream drivers: applying an `L1`/`L2` to one or two digit
//! sources produces a new digit source, lazily. Rust has no generators,
//! so the "drain every extractable digit, then pull exactly one more
//! input digit" loop is written out explicitly as a hand-rolled
//! `Iterator` state machine instead of as a coroutine body.

use std::sync::Arc;

use crate::digit::Digit;
use crate::error::InvariantViolation;
use crate::lft::{L1, L2};
use crate::stream::source::DigitSource;

/// `x -> lft(x)` as a digit source, built by composing `lft` from the
/// left as digits of `x` arrive and extracting digits of the result as
/// soon as its image interval is short enough.
pub struct UnaryTransform {
    start: L1,
    source: Arc<dyn DigitSource>,
}

impl UnaryTransform {
    /// `lft` must be contracting: its image over `[-1, 1]` must itself lie
    /// within `[-1, 1]`, or no digit stream can ever be extracted from it.
    pub fn new(lft: L1, source: Arc<dyn DigitSource>) -> Result<Self, InvariantViolation> {
        if !lft.is_contracting() {
            return Err(InvariantViolation::NotContracting);
        }
        Ok(UnaryTransform { start: lft, source })
    }
}

impl DigitSource for UnaryTransform {
    fn open(&self) -> Box<dyn Iterator<Item = Digit> + Send> {
        Box::new(UnaryState {
            lft: self.start.clone(),
            input: self.source.open(),
        })
    }
}

struct UnaryState {
    lft: L1,
    input: Box<dyn Iterator<Item = Digit> + Send>,
}

impl Iterator for UnaryState {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        loop {
            if self.lft.next_index_to_pull().is_none() {
                let digit = self.lft.extract().expect("next_index_to_pull just returned None");
                log::trace!("UnaryState::next: emitting digit {digit}");
                self.lft.normalize();
                return Some(digit);
            }
            // Ends the stream if the input source is exhausted, rather
            // than silently dropping digits still extractable from the
            // current matrix; unreachable for the infinite sources this
            // engine ships.
            let digit = self.input.next()?;
            log::trace!("UnaryState::next: absorbing digit {digit}");
            self.lft
                .absorb_digit(digit)
                .expect("upstream source produced an in-range digit");
        }
    }
}

/// `(x, y) -> lft(x, y)` as a digit source, pulling from whichever of the
/// two input streams `L2::next_index_to_pull` selects.
pub struct BinaryTransform {
    start: L2,
    x: Arc<dyn DigitSource>,
    y: Arc<dyn DigitSource>,
}

impl BinaryTransform {
    pub fn new(
        lft: L2,
        x: Arc<dyn DigitSource>,
        y: Arc<dyn DigitSource>,
    ) -> Result<Self, InvariantViolation> {
        if !lft.is_contracting() {
            return Err(InvariantViolation::NotContracting);
        }
        Ok(BinaryTransform { start: lft, x, y })
    }
}

impl DigitSource for BinaryTransform {
    fn open(&self) -> Box<dyn Iterator<Item = Digit> + Send> {
        Box::new(BinaryState {
            lft: self.start.clone(),
            x: self.x.open(),
            y: self.y.open(),
        })
    }
}

struct BinaryState {
    lft: L2,
    x: Box<dyn Iterator<Item = Digit> + Send>,
    y: Box<dyn Iterator<Item = Digit> + Send>,
}

impl Iterator for BinaryState {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        loop {
            match self.lft.next_index_to_pull() {
                None => {
                    let digit = self.lft.extract().expect("next_index_to_pull just returned None");
                    log::trace!("BinaryState::next: emitting digit {digit}");
                    self.lft.normalize();
                    return Some(digit);
                }
                Some(0) => {
                    let digit = self.x.next()?;
                    log::trace!("BinaryState::next: absorbing digit {digit} on x");
                    self.lft
                        .absorb_digit_x(digit)
                        .expect("upstream x source produced an in-range digit");
                }
                Some(_) => {
                    let digit = self.y.next()?;
                    log::trace!("BinaryState::next: absorbing digit {digit} on y");
                    self.lft
                        .absorb_digit_y(digit)
                        .expect("upstream y source produced an in-range digit");
                }
            }
        }
    }
}

/// A restartable producer of `L1` matrices, each right-composed into an
/// accumulating transform by [`MatrixProductTransform`]. Used for
/// series-defined constants like `log2`, where there's no input digit
/// stream at all, only an infinite product of matrices converging on the
/// represented value.
pub trait MatrixSource: Send + Sync {
    fn open(&self) -> Box<dyn Iterator<Item = L1> + Send>;
}

/// A digit source defined purely as an infinite product of `L1` matrices
/// composed onto a starting transform, extracting digits as soon as the
/// accumulated product both contracts and is ready.
pub struct MatrixProductTransform {
    start: L1,
    matrices: Arc<dyn MatrixSource>,
}

impl MatrixProductTransform {
    pub fn new(start: L1, matrices: Arc<dyn MatrixSource>) -> Self {
        MatrixProductTransform { start, matrices }
    }
}

impl DigitSource for MatrixProductTransform {
    fn open(&self) -> Box<dyn Iterator<Item = Digit> + Send> {
        Box::new(MatrixProductState {
            lft: self.start.clone(),
            matrices: self.matrices.open(),
        })
    }
}

struct MatrixProductState {
    lft: L1,
    matrices: Box<dyn Iterator<Item = L1> + Send>,
}

impl Iterator for MatrixProductState {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        // Normalizes after every absorbed matrix rather than batching
        // across an entire extract burst: harmless, since GCD reduction
        // never changes the represented value, only the size of the
        // coefficients carried between composes.
        while !self.lft.is_contracting() || self.lft.next_index_to_pull().is_some() {
            let next_matrix = self.matrices.next()?;
            log::trace!("MatrixProductState::next: absorbing matrix {next_matrix}");
            self.lft.compose(&next_matrix);
            self.lft.normalize();
        }
        let digit = self.lft.extract().expect("just confirmed ready to extract");
        log::trace!("MatrixProductState::next: emitting digit {digit}");
        Some(digit)
    }
}

/// Builds the digit source for `lft(source)`.
pub fn transform_unary(
    lft: L1,
    source: Arc<dyn DigitSource>,
) -> Result<UnaryTransform, InvariantViolation> {
    UnaryTransform::new(lft, source)
}

/// Builds the digit source for `lft(x, y)`.
pub fn transform_binary(
    lft: L2,
    x: Arc<dyn DigitSource>,
    y: Arc<dyn DigitSource>,
) -> Result<BinaryTransform, InvariantViolation> {
    BinaryTransform::new(lft, x, y)
}

//! Lazy digit streams and the drivers that turn LFT algebra into them.
//!
//! A [`DigitSource`] is a restartable producer: `open()` can be called any
//! number of times, each call handing back an independent iterator head.
//! This is what lets a binary operator applied to the same real number
//! twice (`x * x`) advance two logically-independent cursors over one
//! underlying sequence.

pub mod convert;
pub mod driver;
pub mod source;

pub use convert::from_unsigned;
pub use driver::{
    BinaryTransform, MatrixProductTransform, MatrixSource, UnaryTransform, transform_binary,
    transform_unary,
};
pub use source::{DigitSource, UnsignedDigitSource, ones_stream, zero_stream};

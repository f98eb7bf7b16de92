//! External digit generators: producers of a real number's digits that
//! don't come from another `DigitSource`, e.g. a constant defined by a
//! closed-form series.

pub mod pi;

pub use crate::stream::source::UnsignedDigitSource;
pub use pi::PiMinusThree;

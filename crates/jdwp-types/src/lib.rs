//! # `jdwp-types`
//! Provides the JDWP types, as defined by the [jdwp-spec], that a reference type model needs: typed ids,
//! type and value tags, error constants and modifier bits.
//!
//! [jdwp-spec]: https://docs.oracle.com/javase/8/docs/technotes/guides/jpda/jdwp-spec.html

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use constants::*;
pub use ids::*;
use crate::private::Repr;
use thiserror::Error;

mod constants;
mod ids;
mod macros;

/// Unknown tag constant
#[derive(Debug, Error)]
#[error("Unknown tag constant: {0}")]
pub struct UnknownTagError<T: Repr>(T);

mod private {
    use std::fmt::{Debug, Display};

    pub trait Identifiable {}
    pub trait Repr: Display + Debug {}

    impl Repr for u8 {}
    impl Repr for u16 {}
}

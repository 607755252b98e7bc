//! Genome abstractions and implementations
//!
//! This module provides the core `Genome` trait, the built-in genome types,
//! and the fixed-point binary codec.

pub mod bit_vector;
pub mod encoding;
pub mod float_vector;
pub mod tour;
pub mod traits;

pub mod prelude {
    pub use super::bit_vector::*;
    pub use super::encoding::*;
    pub use super::float_vector::*;
    pub use super::tour::*;
    pub use super::traits::*;
}

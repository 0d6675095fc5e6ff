//! Core types, errors, and shared functionality.

mod errors;
mod usage;

pub use errors::*;
pub use usage::*;

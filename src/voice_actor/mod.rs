//! Voice actor profiles and their demo recordings.

pub mod entity;
pub mod error;

pub use error::*;

//! Text and speech generation through a hosted model API.

pub mod client;
pub mod error;
pub mod wav;

pub use client::*;
pub use error::*;

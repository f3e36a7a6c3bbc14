//! PIX charge creation.

pub mod error;
pub mod pix;

pub use error::*;
pub use pix::*;

//! Order documents and their fulfilment actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

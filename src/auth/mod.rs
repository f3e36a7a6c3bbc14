//! Session state and route protection.

pub mod guard;
pub mod session;

pub use guard::*;
pub use session::*;

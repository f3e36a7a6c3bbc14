//! Recording order form: per-style schemas, validation and the live
//! duration/credit estimate.

pub mod draft;
pub mod estimator;
pub mod form;

pub use draft::*;
pub use estimator::*;
pub use form::*;

pub mod user;
pub mod voice_actor;
pub mod order;

pub use user::*;
pub use voice_actor::*;
pub use order::*;

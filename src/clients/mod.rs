//! Typed handles over the collection actors. Each client converts framework
//! failures into its own domain error and logs every request.

#[macro_use]
mod macros;
pub mod order_client;
pub mod user_client;
pub mod voice_actor_client;

pub use order_client::OrderClient;
pub use user_client::UserClient;
pub use voice_actor_client::VoiceActorClient;

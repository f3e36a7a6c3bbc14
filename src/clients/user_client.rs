use tracing::{debug, info, instrument};
use crate::domain::{User, UserCreate, UserPatch};
use crate::user_actor::UserError;
use crate::actor_framework::ResourceClient;

/// Client for the users collection.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    /// Signup. Returns the new user id.
    #[instrument(skip(self, params), fields(user_email = %params.email))]
    pub async fn create_user(&self, params: UserCreate) -> Result<String, UserError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(user_id = %id, "User created");
        Ok(id)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }
}

use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new User from signup params.
    ///
    /// # Notes
    /// Accounts start with an empty credit balance.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, String> {
        if params.email.trim().is_empty() {
            return Err("Email required".to_string());
        }
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            phone: params.phone,
            credits: 0,
        })
    }

    /// Updates the user's profile information.
    ///
    /// # Fields Updated
    /// - `name`: User's display name
    /// - `email`: User's email address
    /// - `phone`: Contact number
    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            if email.trim().is_empty() {
                return Err("Email required".to_string());
            }
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Identity of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub is_admin: bool,
}

impl Session {
    pub fn customer(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            is_admin: false,
        }
    }

    pub fn admin(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            is_admin: true,
            ..Self::customer(user_id, email)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The provider has not reported yet.
    Loading,
    Unauthenticated,
    Authenticated(Session),
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Shared handle on the current auth state. Created once at startup and
/// passed to whatever needs it; the auth provider's callback drives it.
#[derive(Clone)]
pub struct SessionContext {
    sender: Arc<watch::Sender<AuthState>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(AuthState::Loading);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn state(&self) -> AuthState {
        self.sender.borrow().clone()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.sender.borrow().session().cloned()
    }

    /// Entry point for the auth provider's session callback.
    pub fn on_auth_state_changed(&self, state: AuthState) {
        match &state {
            AuthState::Authenticated(session) => {
                info!(user_id = %session.user_id, is_admin = session.is_admin, "Session established")
            }
            AuthState::Unauthenticated => info!("Session cleared"),
            AuthState::Loading => info!("Session loading"),
        }
        self.sender.send_replace(state);
    }

    pub fn sign_in(&self, session: Session) {
        self.on_auth_state_changed(AuthState::Authenticated(session));
    }

    pub fn sign_out(&self) {
        self.on_auth_state_changed(AuthState::Unauthenticated);
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sender.subscribe()
    }
}

use std::fmt;
use tracing::{debug, info, warn};
use super::session::{AuthState, SessionContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Signup,
    Dashboard,
    NewOrder,
    Orders,
    OrderDetail(String),
    VoiceActors,
    Admin,
    AdminOrders,
    AdminVoiceActors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone.
    Public,
    /// Only signed-out visitors, e.g. the login page.
    PublicOnly,
    Protected,
    AdminOnly,
}

impl Route {
    /// Where signed-in users land.
    pub const DEFAULT_PROTECTED: Route = Route::Dashboard;

    pub fn access(&self) -> Access {
        match self {
            Route::Landing => Access::Public,
            Route::Login | Route::Signup => Access::PublicOnly,
            Route::Dashboard
            | Route::NewOrder
            | Route::Orders
            | Route::OrderDetail(_)
            | Route::VoiceActors => Access::Protected,
            Route::Admin | Route::AdminOrders | Route::AdminVoiceActors => Access::AdminOnly,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::NewOrder => "/orders/new".to_string(),
            Route::Orders => "/orders".to_string(),
            Route::OrderDetail(id) => format!("/orders/{}", id),
            Route::VoiceActors => "/voice-actors".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::AdminOrders => "/admin/orders".to_string(),
            Route::AdminVoiceActors => "/admin/voice-actors".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Auth state unknown: show a neutral placeholder and stay put.
    Placeholder,
    Render(Route),
    Redirect(Route),
    AccessDenied(Route),
}

/// Pure decision for one (auth state, route) pair.
pub fn evaluate(state: &AuthState, route: &Route) -> GuardOutcome {
    match (state, route.access()) {
        (AuthState::Loading, _) => GuardOutcome::Placeholder,
        (_, Access::Public) => GuardOutcome::Render(route.clone()),
        (AuthState::Unauthenticated, Access::PublicOnly) => GuardOutcome::Render(route.clone()),
        (AuthState::Unauthenticated, Access::Protected | Access::AdminOnly) => {
            GuardOutcome::Redirect(Route::Login)
        }
        (AuthState::Authenticated(_), Access::PublicOnly) => {
            GuardOutcome::Redirect(Route::DEFAULT_PROTECTED)
        }
        (AuthState::Authenticated(_), Access::Protected) => GuardOutcome::Render(route.clone()),
        (AuthState::Authenticated(session), Access::AdminOnly) => {
            if session.is_admin {
                GuardOutcome::Render(route.clone())
            } else {
                GuardOutcome::AccessDenied(route.clone())
            }
        }
    }
}

/// Tracks the current route and re-runs [`evaluate`] whenever either the
/// route or the auth state changes. Redirects update the current route.
pub struct AuthGuard {
    session: SessionContext,
    current: Route,
}

impl AuthGuard {
    pub fn new(session: SessionContext, initial: Route) -> Self {
        Self {
            session,
            current: initial,
        }
    }

    pub fn current_route(&self) -> &Route {
        &self.current
    }

    pub fn navigate(&mut self, route: Route) -> GuardOutcome {
        debug!(route = %route, "Navigating");
        self.current = route;
        self.reevaluate()
    }

    /// Call from the auth state callback.
    pub fn on_auth_change(&mut self) -> GuardOutcome {
        self.reevaluate()
    }

    fn reevaluate(&mut self) -> GuardOutcome {
        let outcome = evaluate(&self.session.state(), &self.current);
        match &outcome {
            GuardOutcome::Redirect(target) => {
                info!(from = %self.current, to = %target, "Redirecting");
                self.current = target.clone();
            }
            GuardOutcome::AccessDenied(route) => warn!(route = %route, "Access denied"),
            GuardOutcome::Placeholder | GuardOutcome::Render(_) => {}
        }
        outcome
    }
}

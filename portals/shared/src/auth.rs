//! Session and role gating.
//!
//! Each portal checks the session before any render. An external auth
//! manager can be injected through [`AuthGate`]; when none is available the
//! portals fall back to [`check_session`], which reads the `currentUser`
//! document straight from the store.
//!
//! Redirects are data, not side effects: the controller hands the
//! [`Route`] to its view binding, which performs the navigation.

use serde::{Deserialize, Serialize};

use crate::store::{self, keys, KeyValueStore};

/// Portal role required to enter a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authenticated user stored under the `currentUser` key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub role: Role,
}

impl SessionUser {
    /// Display name for the welcome banner: the name when present,
    /// otherwise the local part of the email address.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

/// Navigation targets used on auth failure and logout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    SignIn,
    Home,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::SignIn => "signin.html",
            Route::Home => "index.html",
        }
    }
}

/// Result of an auth check.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthOutcome {
    /// Valid session with the required role.
    Granted(SessionUser),
    /// No authenticated user at all.
    MissingSession { redirect: Route },
    /// Authenticated, but for the other portal.
    RoleMismatch { redirect: Route },
}

impl AuthOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthOutcome::Granted(_))
    }
}

/// External session manager capability. Must be consulted before any
/// render when available.
pub trait AuthGate {
    fn check_auth_and_redirect(&mut self, required: Role) -> AuthOutcome;
    fn current_user(&self) -> Option<SessionUser>;
    /// Clear session state.
    fn logout(&mut self);
}

/// Fallback session check against the store when no [`AuthGate`] is
/// injected. A missing or unreadable `currentUser` document redirects to
/// sign-in; a wrong role redirects home.
pub fn check_session(store: &dyn KeyValueStore, required: Role) -> AuthOutcome {
    match store::get_json::<SessionUser>(store, keys::CURRENT_USER) {
        Ok(Some(user)) if user.role == required => AuthOutcome::Granted(user),
        Ok(Some(_)) => AuthOutcome::RoleMismatch {
            redirect: Route::Home,
        },
        _ => AuthOutcome::MissingSession {
            redirect: Route::SignIn,
        },
    }
}

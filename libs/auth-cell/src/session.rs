use tracing::{debug, warn};

use shared_models::auth::{Role, Session};

use crate::header::Route;
use crate::store::{SessionError, SessionStore};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "userRole";

/// Owns the persisted (role, token) pair. Everything else receives a
/// [`Session`] snapshot from here.
pub struct SessionManager<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> Session {
        let role = self.store.get(ROLE_KEY).and_then(|raw| match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => {
                warn!("Ignoring stored role: {}", e);
                None
            }
        });

        Session::new(role, self.store.get(TOKEN_KEY))
    }

    /// Store `role` and return the dashboard it lands on.
    pub fn select_role(&self, role: Role) -> Result<Route, SessionError> {
        debug!("Selecting role {}", role);
        self.store.set(ROLE_KEY, role.as_str())?;
        Ok(Route::dashboard_for(role))
    }

    pub fn store_token(&self, token: &str) -> Result<(), SessionError> {
        self.store.set(TOKEN_KEY, token)
    }

    /// Token first, then role, so a crash in between never leaves a
    /// privileged role without its token.
    pub fn login(&self, role: Role, token: &str) -> Result<Route, SessionError> {
        self.store_token(token)?;
        self.select_role(role)
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove(ROLE_KEY)?;
        self.store.remove(TOKEN_KEY)
    }

    pub fn logout(&self) -> Result<Route, SessionError> {
        self.clear()?;
        Ok(Route::Root)
    }

    /// Patients go back to the public directory rather than the role picker.
    pub fn logout_patient(&self) -> Result<Route, SessionError> {
        self.clear()?;
        Ok(Route::PatientDashboard)
    }

    /// Force-clear a privileged role that has lost its token. Returns the
    /// session as it stands afterwards and whether it was cleared.
    pub fn enforce(&self) -> Result<(Session, bool), SessionError> {
        let session = self.session();
        if session.is_invalid() {
            warn!("Role {:?} present without a token, clearing session", session.role);
            self.clear()?;
            return Ok((Session::anonymous(), true));
        }
        Ok((session, false))
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity class the portal is acting as. Stored under `userRole`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "doctor")]
    Doctor,
    /// Anonymous patient browsing the directory.
    #[serde(rename = "patient")]
    Patient,
    #[serde(rename = "loggedPatient")]
    LoggedPatient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
            Role::LoggedPatient => "loggedPatient",
        }
    }

    /// Roles that are only valid together with an auth token.
    pub fn is_privileged(&self) -> bool {
        match self {
            Role::Admin | Role::Doctor | Role::LoggedPatient => true,
            Role::Patient => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            "loggedPatient" => Ok(Role::LoggedPatient),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Snapshot of the persisted (role, token) pair handed to renderers and
/// controllers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub role: Option<Role>,
    pub token: Option<String>,
}

impl Session {
    pub fn new(role: Option<Role>, token: Option<String>) -> Self {
        Self { role, token }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Token if present and not blank.
    pub fn token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    /// A privileged role without a token is an expired or broken login.
    pub fn is_invalid(&self) -> bool {
        matches!(self.role, Some(role) if role.is_privileged()) && self.token().is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Claims read from JWT-shaped tokens. The portal never verifies the
/// signature; it only needs `exp` to spot stale sessions early.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: Option<u64>,
    pub role: Option<String>,
    pub iat: Option<u64>,
}

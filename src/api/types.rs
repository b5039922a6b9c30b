//! Wire types for the auth and catalog services

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Body of every auth request
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub action: AuthAction,
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthAction::Login => "login",
            AuthAction::Register => "register",
        }
    }

    /// Reason reported when the service answers without a usable session.
    pub fn default_failure(&self) -> &'static str {
        match self {
            AuthAction::Login => "Login failed",
            AuthAction::Register => "Registration failed",
        }
    }
}

/// Auth service response. Failures arrive with a non-2xx status and only
/// `error` set, so every field is optional.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub session_token: Option<String>,
    pub user: Option<User>,
    pub error: Option<String>,
}

/// Error body shape shared by both services
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Service addresses fixed at build time
pub struct Endpoints;

impl Endpoints {
    /// Auth service
    pub const AUTH_URL: &'static str =
        "https://functions.poehali.dev/9f6daa76-c0b1-4588-8086-00d328aa475a";
    /// Catalog service
    pub const CATALOG_URL: &'static str =
        "https://functions.poehali.dev/826a01d0-ba8e-4008-aee6-e8af852fbf7c";
    /// Header carrying the client's admin intent on mutations
    pub const ADMIN_HEADER: &'static str = "X-Is-Admin";
}

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::entity::user::ADMIN_ROLE;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Name of the cookie that carries the session token for browser form posts.
pub const SESSION_COOKIE: &str = "league_session";

/// Authenticated account extracted from `Authorization: Bearer <token>` or,
/// failing that, the session cookie.
///
/// Add this as a handler parameter to require authentication.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub team_id: Option<i32>,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied("Insufficient permissions".into()))
        }
    }

    /// Resolve the team this request acts for.
    ///
    /// Players always act for their linked team; a `requested` team that differs
    /// is refused. Admins may act for any team but must always name it, even
    /// when their own account is linked to one.
    pub fn acting_team(&self, requested: Option<i32>) -> Result<i32, AppError> {
        if self.is_admin() {
            return requested.ok_or_else(|| {
                AppError::Validation("Missing seasonId/defenderTeamId/challengerTeamId".into())
            });
        }
        let own = self.team_id.ok_or_else(|| {
            AppError::PermissionDenied("Your account is not linked to a team".into())
        })?;
        match requested {
            Some(team_id) if team_id != own => Err(AppError::PermissionDenied(
                "You can only act for your own team".into(),
            )),
            _ => Ok(own),
        }
    }

    /// Allow the request if the account belongs to `team_id` or is an admin.
    pub fn require_team(&self, team_id: i32, action: &str) -> Result<(), AppError> {
        if self.is_admin() || self.team_id == Some(team_id) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "Only the {action} team can do this"
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
        {
            Some(header) => header
                .strip_prefix("Bearer ")
                .ok_or(AppError::TokenInvalid)?
                .to_string(),
            None => CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or(AppError::TokenMissing)?,
        };

        let claims =
            jwt::verify(&token, &state.config.auth.jwt_secret).map_err(|_| AppError::TokenInvalid)?;

        Ok(AuthUser {
            user_id: claims.uid,
            username: claims.sub,
            role: claims.role,
            team_id: claims.team_id,
        })
    }
}

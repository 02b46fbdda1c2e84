use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use log::warn;
use models::permission::Permission;
use serde::Deserialize;

/// Claims of a validated access token
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    pub sub: Option<String>,
    /// Granted permission names, e.g. `courseInfo.view_instructor`
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Claims {
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions
            .iter()
            .any(|granted| permission.is_granted_by(granted))
    }
}

/// The caller, as authenticated by the resource server layer.
///
/// Rejects with 401 when the request carries no validated claims.
#[derive(Debug, Clone)]
pub struct Authorized(pub Claims);

impl Authorized {
    /// Fails with 403 unless the caller holds `permission`
    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.0.has(permission) {
            return Ok(());
        }

        warn!(
            "Denied {} to {}",
            permission,
            self.0.sub.as_deref().unwrap_or("anonymous caller")
        );
        Err(AppError::Forbidden(permission))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Authorized {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(Self)
            .ok_or(AppError::Unauthorized)
    }
}

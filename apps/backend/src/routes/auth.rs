//! Authentication middleware
//!
//! Session authentication is not implemented. In development the current
//! user is a seeded fixture chosen by the `role` query parameter, or any
//! existing user named by `user_id`. Production rejects every request.

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{Role, User};
use crate::AppState;

pub const DEV_STUDENT_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);
pub const DEV_PARENT_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0002);
pub const DEV_ADMIN_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0003);

/// Fixture user for a role
pub fn dev_user_id(role: Role) -> Uuid {
    match role {
        Role::Student => DEV_STUDENT_ID,
        Role::Parent => DEV_PARENT_ID,
        Role::Admin => DEV_ADMIN_ID,
    }
}

/// Authenticated user stored in request extensions
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub user: User,
    pub role: Role,
}

impl CurrentUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    /// Reject unless the user has one of the given roles
    pub fn require_role(&self, allowed: &[Role]) -> Result<()> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "role {} may not access this resource",
                self.role.as_str()
            )))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IdentityQuery {
    pub role: Option<String>,
    pub user_id: Option<Uuid>,
}

/// Student routes; `?role=parent` switches to the parent fixture
pub async fn student_auth(
    State(state): State<AppState>,
    query: std::result::Result<Query<IdentityQuery>, QueryRejection>,
    request: Request<Body>,
    next: Next,
) -> Result<Response> {
    authenticate(state, query?.0, Role::Student, request, next).await
}

pub async fn parent_auth(
    State(state): State<AppState>,
    query: std::result::Result<Query<IdentityQuery>, QueryRejection>,
    request: Request<Body>,
    next: Next,
) -> Result<Response> {
    authenticate(state, query?.0, Role::Parent, request, next).await
}

pub async fn admin_auth(
    State(state): State<AppState>,
    query: std::result::Result<Query<IdentityQuery>, QueryRejection>,
    request: Request<Body>,
    next: Next,
) -> Result<Response> {
    authenticate(state, query?.0, Role::Admin, request, next).await
}

async fn authenticate(
    state: AppState,
    query: IdentityQuery,
    default_role: Role,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    if !state.config.environment.is_development() {
        return Err(ApiError::Unauthorized(
            "session authentication is not configured".to_string(),
        ));
    }

    let user = match query.user_id {
        Some(user_id) => state
            .db
            .get_user(user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized(format!("Unknown user {}", user_id)))?,
        None => {
            let role = match query.role.as_deref() {
                Some(raw) => Role::try_from(raw)?,
                None => default_role,
            };
            state
                .db
                .get_user(dev_user_id(role))
                .await?
                .ok_or_else(|| {
                    ApiError::Unauthorized(format!(
                        "Development user for role {} is not seeded",
                        role.as_str()
                    ))
                })?
        }
    };

    let role = user
        .role()
        .ok_or_else(|| ApiError::Internal(format!("User {} has invalid role", user.id)))?;

    request.extensions_mut().insert(CurrentUser { user, role });

    Ok(next.run(request).await)
}

/// Student whose data the caller may read: themselves, or a parent's
/// linked child.
pub async fn resolve_student(state: &AppState, current: &CurrentUser) -> Result<User> {
    match current.role {
        Role::Student => Ok(current.user.clone()),
        Role::Parent => state
            .db
            .get_linked_child(current.id())
            .await?
            .ok_or_else(|| ApiError::NotFound("No linked child".to_string())),
        Role::Admin => Err(ApiError::Forbidden(
            "admins have no student data".to_string(),
        )),
    }
}

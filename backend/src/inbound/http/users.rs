//! Users API handlers.
//!
//! ```text
//! POST   /login      {"username":"admin","password":"password"}
//! POST   /logout
//! GET    /users
//! GET    /users/{id}
//! POST   /users      {"lastName":"Doe","firstName":"Joe"}   (admin)
//! DELETE /users/{id}                                         (admin)
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, NewUser, Role, User, UserId,
    UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Wire representation of a user.
///
/// `id` is omitted from output when absent and ignored on create. Names are
/// optional at the serde level so missing fields reach validation instead of
/// failing deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTransfer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    pub id: Option<i32>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[schema(example = "Joe")]
    pub first_name: Option<String>,
}

impl From<User> for UserTransfer {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id().get()),
            last_name: Some(user.last_name().to_owned()),
            first_name: Some(user.first_name().to_owned()),
        }
    }
}

impl TryFrom<UserTransfer> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: UserTransfer) -> Result<Self, Self::Error> {
        NewUser::try_from_parts(value.last_name, value.first_name)
    }
}

fn invalid(err: impl std::fmt::Display) -> Error {
    Error::invalid_request(err.to_string())
}

/// Decode a create body. Runs after the role check, so unreadable payloads
/// from non-admins never get this far.
fn parse_transfer(body: &[u8]) -> Result<UserTransfer, Error> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, "rejected request body");
        Error::internal(format!("unreadable request body: {err}"))
    })
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<i32>()
        .map(UserId::from)
        .map_err(|err| Error::internal(format!("invalid user id '{raw}': {err}")))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner()).map_err(invalid)?;
    let principal = state.login.authenticate(&credentials).await?;
    session.persist_principal(&principal)?;
    info!(username = principal.username(), role = %principal.role(), "login succeeded");
    Ok(HttpResponse::Ok().finish())
}

/// Drop the current session.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().finish()
}

/// List every user ordered by last name.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users sorted by last name", body = [UserTransfer]),
        (status = 401, description = "Unauthorised", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserTransfer>>> {
    session.require_principal()?;
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserTransfer::from).collect()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserTransfer),
        (status = 401, description = "Unauthorised", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<UserTransfer>> {
    session.require_principal()?;
    let user = state
        .users_query
        .find_user(UserId::from(path.into_inner()))
        .await?;
    Ok(web::Json(user.into()))
}

/// Create a user. Administrators only.
///
/// The body is decoded only after the role check, so callers without the
/// admin role get 403 whatever they send. Any `id` in the body is ignored. A duplicate (lastName, firstName) pair
/// fails with 500.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserTransfer,
    responses(
        (status = 200, description = "Created user", body = UserTransfer),
        (status = 400, description = "Missing lastName or firstName", body = ErrorResponse),
        (status = 401, description = "Unauthorised", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 500, description = "Duplicate user, unreadable body or internal error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<web::Json<UserTransfer>> {
    session.require_role(Role::Admin)?;
    let new_user = NewUser::try_from(parse_transfer(&body)?).map_err(invalid)?;
    let user = state.users_command.create_user(new_user).await?;
    Ok(web::Json(user.into()))
}

/// Delete a user. Administrators only; the id is parsed after the role check.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let id = parse_user_id(&path)?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::Ok().finish())
}

//! Account endpoints: registration and login.
//!
//! ```text
//! POST /api/register {"username":"alice","email":"a@example.com","password":"pw"}
//! POST /api/login {"username":"alice","password":"pw"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::{LoginCredentials, Registration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    RequiredFields, map_login_validation_error, map_registration_validation_error,
};

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const MISSING_LOGIN_FIELDS_MESSAGE: &str = "Missing username or password";
pub const USER_CREATED_MESSAGE: &str = "User created successfully";

/// Registration body. Every field is required and must be non-empty.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice", max_length = 80)]
    pub username: Option<String>,
    #[schema(example = "alice@example.com", max_length = 120)]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

/// Login body.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice")]
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful login body.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    /// HS256 bearer token, valid for 24 hours by default.
    pub token: String,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorSchema),
        (status = 409, description = "Username or email already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        username,
        email,
        password,
    } = payload.into_inner();
    let mut required = RequiredFields::default();
    let username = required.take("username", username);
    let email = required.take("email", email);
    let password = Zeroizing::new(required.take("password", password));
    required.finish(MISSING_FIELDS_MESSAGE)?;

    let registration = Registration::try_from_parts(&username, &email, &password)
        .map_err(map_registration_validation_error)?;
    let user_id = state.registration.register(&registration).await?;
    info!(%user_id, "account registered");
    Ok(HttpResponse::Created().json(MessageResponse::new(USER_CREATED_MESSAGE)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Missing username or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { username, password } = payload.into_inner();
    let mut required = RequiredFields::default();
    let username = required.take("username", username);
    let password = Zeroizing::new(required.take("password", password));
    required.finish(MISSING_LOGIN_FIELDS_MESSAGE)?;

    let credentials = LoginCredentials::try_from_parts(&username, &password)
        .map_err(|err| map_login_validation_error(err, MISSING_LOGIN_FIELDS_MESSAGE))?;
    let token = state.login.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(TokenResponse {
        token: token.as_str().to_owned(),
    }))
}

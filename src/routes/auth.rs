use crate::{
    auth::{verify_password, LoginRequest, LoginResponse, RegisterRequest, TokenService},
    error::AppError,
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Register a new user
///
/// Creates a new account. Hashing happens inside the credential store, so a
/// success response means the hash was computed and the record durably
/// written. No token is issued here; clients log in for one.
#[post("/register")]
pub async fn register(
    users: web::Data<dyn UserStore>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    let user = users
        .create(&register_data.username, &register_data.password)
        .await?;
    log::info!("registered user {}", user.id);

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully"
    })))
}

/// Login user
///
/// Authenticates a user and returns a bearer token. Unknown usernames and
/// wrong passwords produce the same response, so the endpoint cannot be
/// used to probe which usernames exist.
#[post("/login")]
pub async fn login(
    users: web::Data<dyn UserStore>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user = users
        .find_by_username(&login_data.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&login_data.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = tokens.issue(user.id)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

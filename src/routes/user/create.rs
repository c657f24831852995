use crate::db::Store;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::{construct_token, TokenType};
use crate::types::user::{RUserCreate, UserCreateRes};
use crate::types::error::AppError;
use crate::utils::token::{encrypt, new_id, new_token};
use crate::utils::webutils::is_valid_email;
use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use std::sync::Arc;

#[post("")]
async fn create(
    _req: actix_web::HttpRequest,
    _auth: BearerAuth,
    db: web::Data<Arc<dyn Store>>,
    body: web::Json<RUserCreate>,
) -> ApiResult<UserCreateRes> {
    if !is_valid_email(&body.email) {
        return Err(AppError::Validation(format!("invalid email: {}", body.email)));
    }

    let secret = new_token(TokenType::User);
    let auth_hash = encrypt(&secret)
        .map_err(|e| AppError::Internal(format!("failed to hash token: {e}")))?;

    let now = Utc::now();
    let user_id = new_id();
    db.insert_user(entity::user::Model {
        id: user_id,
        name: body.name.clone(),
        email: body.email.clone(),
        auth_hash,
        created_at: now,
        updated_at: now,
    })
    .await?;

    // The bearer token is shown exactly once; only its hash is stored.
    let access_token = construct_token(&user_id.to_string(), &secret);

    Ok(ApiResponse::Created(UserCreateRes {
        id: user_id.to_string(),
        token: access_token,
    }))
}

use crate::db::Store;
use crate::invites::lifecycle;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::extract_token_parts;
use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[post("/{invite_id}/revoke")]
pub async fn revoke_invite(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let requester = match extract_token_parts(auth.token()) {
        Some(parts) => parts.0,
        None => return Err(AppError::Unauthorized),
    };

    lifecycle::revoke_invite(db.get_ref().as_ref(), path.into_inner(), requester, Utc::now())
        .await?;

    Ok(ApiResponse::Ok(Response {
        message: "Invite has been revoked.".to_string(),
    }))
}

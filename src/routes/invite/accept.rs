use crate::config::config;
use crate::db::Store;
use crate::invites::lifecycle;
use crate::types::error::AppError;
use crate::types::invite::InviteAcceptRes;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::extract_token_parts;
use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use std::sync::Arc;

#[post("/accept/{code}")]
pub async fn accept_invite(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<dyn Store>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<InviteAcceptRes> {
    let code = path.into_inner();

    let accepting_user = match extract_token_parts(auth.token()) {
        Some(parts) => parts.0,
        None => return Err(AppError::Unauthorized),
    };

    let acceptance = lifecycle::accept_invite(
        db.get_ref().as_ref(),
        &code,
        accepting_user,
        Utc::now(),
        config().invite_email_binding,
    )
    .await?;

    Ok(ApiResponse::Ok(InviteAcceptRes {
        group_id: acceptance.group_id,
        role: acceptance.role,
    }))
}

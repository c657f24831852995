use crate::config::config;
use crate::db::Store;
use crate::invites::lifecycle;
use crate::types::error::AppError;
use crate::types::invite::{InviteCreateRes, InviteSummary, RInviteCreate};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::extract_token_parts;
use actix_web::{get, post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

#[post("/{group_id}/invite")]
async fn create_invite(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
    body: web::Json<RInviteCreate>,
    auth: BearerAuth,
) -> ApiResult<InviteCreateRes> {
    let requester = match extract_token_parts(auth.token()) {
        Some(parts) => parts.0,
        None => return Err(AppError::Unauthorized),
    };
    let group_id = path.into_inner();

    let invite = lifecycle::create_invite(
        db.get_ref().as_ref(),
        group_id,
        requester,
        body.email.clone(),
        Utc::now(),
    )
    .await?;

    let invite_link = format!("{}/invite/{}", config().public_origin, invite.invite_code);

    Ok(ApiResponse::Created(InviteCreateRes {
        id: invite.id,
        invite_code: invite.invite_code,
        invite_link,
        status: invite.status,
        created_at: invite.created_at,
        expires_at: invite.expires_at,
    }))
}

#[get("/{group_id}/invites")]
async fn list_invites(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<dyn Store>>,
    path: web::Path<Uuid>,
    auth: BearerAuth,
) -> ApiResult<Vec<InviteSummary>> {
    let requester = match extract_token_parts(auth.token()) {
        Some(parts) => parts.0,
        None => return Err(AppError::Unauthorized),
    };
    let group_id = path.into_inner();

    let invites =
        lifecycle::list_group_invites(db.get_ref().as_ref(), group_id, requester, Utc::now())
            .await?;

    Ok(ApiResponse::Ok(
        invites.into_iter().map(InviteSummary::from).collect(),
    ))
}

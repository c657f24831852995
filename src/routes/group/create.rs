use crate::db::Store;
use crate::types::error::AppError;
use crate::types::group::{GroupCreateRes, RGroupCreate};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::token::{extract_token_parts, new_id};
use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::Utc;
use entity::membership::MemberRole;
use std::sync::Arc;

#[post("")]
async fn create_group(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<dyn Store>>,
    body: web::Json<RGroupCreate>,
    auth: BearerAuth,
) -> ApiResult<GroupCreateRes> {
    let creator = match extract_token_parts(auth.token()) {
        Some(parts) => parts.0,
        None => return Err(AppError::Unauthorized),
    };

    if body.name.trim().is_empty() {
        return Err(AppError::Validation("group name must not be empty".into()));
    }

    let now = Utc::now();
    let group_id = new_id();

    // Creator becomes the group's admin in the same write; invitations are
    // the only other way in.
    db.insert_group(
        entity::dining_group::Model {
            id: group_id,
            name: body.name.trim().to_string(),
            created_by: creator,
            created_at: now,
            updated_at: now,
        },
        entity::membership::Model {
            group_id,
            user_id: creator,
            role: MemberRole::Admin,
            joined_at: now,
        },
    )
    .await?;

    Ok(ApiResponse::Created(GroupCreateRes {
        id: group_id.to_string(),
        message: format!("Group {} has been successfully created.", body.name.trim()),
    }))
}

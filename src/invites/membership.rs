use chrono::{DateTime, Utc};
use entity::membership::{MemberRole, Model as MembershipModel};
use uuid::Uuid;

use crate::db::Store;
use crate::types::error::AppError;

/// Resolves an accepted invitation into a membership. Idempotent: an existing
/// `(group, user)` row is returned untouched, so repeated acceptances by the
/// same user can never stack up duplicate rows or demote an admin to member.
pub async fn resolve(
    store: &dyn Store,
    group_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<MembershipModel, AppError> {
    if let Some(existing) = store.membership_for(group_id, user_id).await? {
        return Ok(existing);
    }
    store
        .insert_membership(MembershipModel {
            group_id,
            user_id,
            role: MemberRole::Member,
            joined_at: now,
        })
        .await
}

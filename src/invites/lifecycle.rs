use chrono::{DateTime, Duration, Utc};
use entity::invitation::{InviteStatus, Model as InviteModel};
use entity::membership::MemberRole;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{AcceptOutcome, InsertInvite, Store};
use crate::invites::code::new_invite_code;
use crate::types::error::AppError;
use crate::utils::token::new_id;
use crate::utils::webutils::is_valid_email;

/// Pending invitations live this long.
pub const INVITE_TTL_DAYS: i64 = 7;

/// Collision retries before giving up on the entropy source entirely.
const CODE_ATTEMPTS: usize = 3;

pub fn invite_ttl() -> Duration {
    Duration::days(INVITE_TTL_DAYS)
}

/// What an invite accepted through the engine resolves to.
#[derive(Debug)]
pub struct Acceptance {
    pub group_id: Uuid,
    pub role: MemberRole,
}

/// The status a caller should see *right now*. Expiry is never swept in the
/// background; a pending row past its deadline simply reads as expired, and
/// mutate paths persist that on their way through.
pub fn effective_status(invite: &InviteModel, now: DateTime<Utc>) -> InviteStatus {
    if invite.status == InviteStatus::Pending && now > invite.expires_at {
        InviteStatus::Expired
    } else {
        invite.status
    }
}

async fn require_admin(
    store: &dyn Store,
    group_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    store.group_by_id(group_id).await?;
    match store.membership_for(group_id, user_id).await? {
        Some(m) if m.role == MemberRole::Admin => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}

/// Mints a pending invitation for the group. Admin-only. The returned record
/// is the only response that will ever carry the invite code.
pub async fn create_invite(
    store: &dyn Store,
    group_id: Uuid,
    requester: Uuid,
    invited_email: Option<String>,
    now: DateTime<Utc>,
) -> Result<InviteModel, AppError> {
    require_admin(store, group_id, requester).await?;

    if let Some(email) = &invited_email {
        if !is_valid_email(email) {
            return Err(AppError::Validation(format!("invalid email: {email}")));
        }
    }

    for attempt in 0..CODE_ATTEMPTS {
        let invite = InviteModel {
            id: new_id(),
            group_id,
            invite_code: new_invite_code(),
            invited_email: invited_email.clone(),
            status: InviteStatus::Pending,
            created_by: requester,
            created_at: now,
            expires_at: now + invite_ttl(),
            accepted_at: None,
            accepted_by: None,
            updated_at: now,
        };
        match store.insert_invite(invite.clone()).await? {
            InsertInvite::Inserted => {
                info!(group = %group_id, invite = %invite.id, "invite created");
                return Ok(invite);
            }
            InsertInvite::DuplicateCode => {
                warn!(attempt, "invite code collision, regenerating");
            }
        }
    }
    // Three collisions in a row means the entropy source is broken, not that
    // we were unlucky.
    Err(AppError::Internal("invite code generation exhausted".into()))
}

/// Redeems a code for a membership. Terminal statuses map to their own error
/// kinds; a repeat accept by the user who already redeemed the code is a
/// no-op success that hands back the existing membership.
pub async fn accept_invite(
    store: &dyn Store,
    code: &str,
    user_id: Uuid,
    now: DateTime<Utc>,
    email_binding: bool,
) -> Result<Acceptance, AppError> {
    let mut invite = store
        .invite_by_code(code)
        .await?
        .ok_or(AppError::NotFound)?;

    // Two passes at most: the first over the row as read, the second over
    // whatever a lost conditional update reveals the row to be now.
    for _ in 0..2 {
        match invite.status {
            InviteStatus::Revoked => return Err(AppError::Revoked),
            InviteStatus::Expired => return Err(AppError::Expired),
            InviteStatus::Accepted => {
                return if invite.accepted_by == Some(user_id) {
                    let m = super::membership::resolve(store, invite.group_id, user_id, now)
                        .await?;
                    Ok(Acceptance {
                        group_id: m.group_id,
                        role: m.role,
                    })
                } else {
                    Err(AppError::AlreadyUsed)
                };
            }
            InviteStatus::Pending => {
                // Re-check at mutation time; the read above may have beaten
                // the deadline that this call misses.
                if now > invite.expires_at {
                    store.mark_expired(invite.id, now).await?;
                    return Err(AppError::Expired);
                }
                if email_binding {
                    if let Some(bound) = &invite.invited_email {
                        let user = store.user_by_id(user_id).await?;
                        if !user.email.eq_ignore_ascii_case(bound) {
                            return Err(AppError::Forbidden);
                        }
                    }
                }
                match store.finalize_acceptance(invite.id, user_id, now).await? {
                    AcceptOutcome::Accepted(m) => {
                        info!(group = %m.group_id, user = %user_id, "invite accepted");
                        return Ok(Acceptance {
                            group_id: m.group_id,
                            role: m.role,
                        });
                    }
                    AcceptOutcome::Raced(current) => invite = current,
                }
            }
        }
    }
    Err(AppError::Internal("acceptance race did not settle".into()))
}

/// Admin-initiated withdrawal of a pending invitation.
pub async fn revoke_invite(
    store: &dyn Store,
    invite_id: Uuid,
    requester: Uuid,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let invite = store
        .invite_by_id(invite_id)
        .await?
        .ok_or(AppError::NotFound)?;
    require_admin(store, invite.group_id, requester).await?;

    match effective_status(&invite, now) {
        InviteStatus::Pending => {
            if store.mark_revoked(invite.id, now).await? {
                info!(invite = %invite.id, "invite revoked");
                Ok(())
            } else {
                // Lost a race against an accept or a lazy expiry write.
                Err(AppError::InvalidState)
            }
        }
        InviteStatus::Expired if invite.status == InviteStatus::Pending => {
            store.mark_expired(invite.id, now).await?;
            Err(AppError::InvalidState)
        }
        _ => Err(AppError::InvalidState),
    }
}

/// Invite history for admins, newest first, with expiry already applied to
/// each row. The invite codes themselves stay out of this view.
pub async fn list_group_invites(
    store: &dyn Store,
    group_id: Uuid,
    requester: Uuid,
    now: DateTime<Utc>,
) -> Result<Vec<InviteModel>, AppError> {
    require_admin(store, group_id, requester).await?;
    let rows = store.invites_for_group(group_id).await?;
    Ok(rows
        .into_iter()
        .map(|mut m| {
            m.status = effective_status(&m, now);
            m
        })
        .collect())
}

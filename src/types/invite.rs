use chrono::{DateTime, Utc};
use entity::invitation::{self, InviteStatus};
use entity::membership::MemberRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct RInviteCreate {
    pub email: Option<String>,
}

/// Create response. The only place `invite_code` ever leaves the service.
#[derive(Serialize, Deserialize, Debug)]
pub struct InviteCreateRes {
    pub id: Uuid,
    pub invite_code: String,
    pub invite_link: String,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// List-view shape; deliberately has no `invite_code` field so invite history
/// cannot re-expose a still-live secret.
#[derive(Serialize, Deserialize, Debug)]
pub struct InviteSummary {
    pub id: Uuid,
    pub status: InviteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invited_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<DateTime<Utc>>,
}

impl From<invitation::Model> for InviteSummary {
    fn from(m: invitation::Model) -> Self {
        InviteSummary {
            id: m.id,
            status: m.status,
            invited_email: m.invited_email,
            created_at: m.created_at,
            expires_at: m.expires_at,
            accepted_at: m.accepted_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct InviteAcceptRes {
    pub group_id: Uuid,
    pub role: MemberRole,
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored invitation status. A `Pending` row whose `expires_at` has passed is
/// *effectively* expired even before anything writes the `Expired` value back;
/// the lifecycle engine derives that at read time and persists it on the next
/// mutation of the row.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "expired")]
    Expired,
    #[sea_orm(string_value = "revoked")]
    Revoked,
}

#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invitation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub group_id: Uuid,
    /// Globally unique, URL-safe, never re-issued. Only surfaced in the
    /// create response.
    #[sea_orm(unique)]
    pub invite_code: String,
    pub invited_email: Option<String>,
    pub status: InviteStatus,
    pub created_by: Uuid,
    pub created_at: DateTimeUtc,
    pub expires_at: DateTimeUtc,
    pub accepted_at: Option<DateTimeUtc>,
    pub accepted_by: Option<Uuid>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::dining_group::Entity",
        from = "Column::GroupId",
        to = "super::dining_group::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    DiningGroup,
}

impl Related<super::dining_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiningGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

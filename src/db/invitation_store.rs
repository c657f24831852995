use crate::db::postgres_service::PostgresService;
use crate::db::{AcceptOutcome, InsertInvite};
use crate::types::error::AppError;
use chrono::{DateTime, Utc};
use entity::invitation::{
    ActiveModel as InviteActive, Column, Entity as Invitation, InviteStatus,
    Model as InviteModel,
};
use entity::membership::{ActiveModel as MembershipActive, Entity as Membership, MemberRole};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

impl PostgresService {
    pub async fn create_invite_row(&self, row: InviteModel) -> Result<InsertInvite, AppError> {
        let res = Invitation::insert(InviteActive {
            id: Set(row.id),
            group_id: Set(row.group_id),
            invite_code: Set(row.invite_code),
            invited_email: Set(row.invited_email),
            status: Set(row.status),
            created_by: Set(row.created_by),
            created_at: Set(row.created_at),
            expires_at: Set(row.expires_at),
            accepted_at: Set(row.accepted_at),
            accepted_by: Set(row.accepted_by),
            updated_at: Set(row.updated_at),
        })
        .exec(&self.db)
        .await;

        match res {
            Ok(_) => Ok(InsertInvite::Inserted),
            Err(err) => {
                // The only unique index on this table is the code index, so a
                // violation here means the generator collided.
                if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                    return Ok(InsertInvite::DuplicateCode);
                }
                Err(err.into())
            }
        }
    }

    pub async fn get_invite_by_code(&self, code: &str) -> Result<Option<InviteModel>, AppError> {
        Ok(Invitation::find()
            .filter(Column::InviteCode.eq(code))
            .one(&self.db)
            .await?)
    }

    pub async fn get_invite_by_id(&self, id: Uuid) -> Result<Option<InviteModel>, AppError> {
        Ok(Invitation::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list_invites_for_group(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<InviteModel>, AppError> {
        Ok(Invitation::find()
            .filter(Column::GroupId.eq(group_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn mark_invite_expired(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), AppError> {
        Invitation::update_many()
            .set(InviteActive {
                status: Set(InviteStatus::Expired),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(InviteStatus::Pending))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn mark_invite_revoked(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let res = Invitation::update_many()
            .set(InviteActive {
                status: Set(InviteStatus::Revoked),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(InviteStatus::Pending))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Accept is the one path where two writes must land together: the status
    /// flip and the membership row. The status flip is conditional on the row
    /// still being `pending`, which is what serializes concurrent accepts.
    pub async fn finalize_invite_acceptance(
        &self,
        id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AcceptOutcome, AppError> {
        let txn = self.db.begin().await?;

        let updated = Invitation::update_many()
            .set(InviteActive {
                status: Set(InviteStatus::Accepted),
                accepted_at: Set(Some(now)),
                accepted_by: Set(Some(user_id)),
                updated_at: Set(now),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(InviteStatus::Pending))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            txn.rollback().await?;
            let current = Invitation::find_by_id(id)
                .one(&self.db)
                .await?
                .ok_or_else(|| DbErr::RecordNotFound("Invite not found".into()))?;
            return Ok(AcceptOutcome::Raced(current));
        }

        let invite = Invitation::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Invite not found".into()))?;

        Membership::insert(MembershipActive {
            group_id: Set(invite.group_id),
            user_id: Set(user_id),
            role: Set(MemberRole::Member),
            joined_at: Set(now),
        })
        .on_conflict(
            OnConflict::columns([
                entity::membership::Column::GroupId,
                entity::membership::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&txn)
        .await?;

        let membership = Membership::find()
            .filter(entity::membership::Column::GroupId.eq(invite.group_id))
            .filter(entity::membership::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(AppError::Internal("membership missing after accept".into()))?;

        txn.commit().await?;
        Ok(AcceptOutcome::Accepted(membership))
    }
}

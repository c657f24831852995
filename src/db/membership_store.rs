use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use entity::membership::{ActiveModel as MembershipActive, Entity as Membership, Model as MembershipModel};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

impl PostgresService {
    pub async fn get_membership(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<MembershipModel>, AppError> {
        Ok(Membership::find()
            .filter(entity::membership::Column::GroupId.eq(group_id))
            .filter(entity::membership::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?)
    }

    /// Insert keyed on the (group, user) PK; a concurrent duplicate submission
    /// loses the insert race and reads the winner's row back instead.
    pub async fn upsert_membership(
        &self,
        row: MembershipModel,
    ) -> Result<MembershipModel, AppError> {
        let insert = Membership::insert(MembershipActive {
            group_id: Set(row.group_id),
            user_id: Set(row.user_id),
            role: Set(row.role),
            joined_at: Set(row.joined_at),
        })
        .exec(&self.db)
        .await;

        match insert {
            Ok(_) => Ok(row),
            Err(err) => {
                if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                    return self
                        .get_membership(row.group_id, row.user_id)
                        .await?
                        .ok_or(AppError::Internal("membership vanished after conflict".into()));
                }
                Err(err.into())
            }
        }
    }
}

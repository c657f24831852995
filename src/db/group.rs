use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use entity::dining_group::{ActiveModel as GroupActive, Entity as DiningGroup, Model as GroupModel};
use entity::membership::{ActiveModel as MembershipActive, Entity as Membership, Model as MembershipModel};
use sea_orm::{DbErr, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

impl PostgresService {
    /// Group creation writes the group row and the creator's admin membership
    /// together; a group with no admin would be unmanageable.
    pub async fn create_group(
        &self,
        group: GroupModel,
        creator_membership: MembershipModel,
    ) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        DiningGroup::insert(GroupActive {
            id: Set(group.id),
            name: Set(group.name),
            created_by: Set(group.created_by),
            created_at: Set(group.created_at),
            updated_at: Set(group.updated_at),
        })
        .exec(&txn)
        .await?;

        Membership::insert(MembershipActive {
            group_id: Set(creator_membership.group_id),
            user_id: Set(creator_membership.user_id),
            role: Set(creator_membership.role),
            joined_at: Set(creator_membership.joined_at),
        })
        .exec(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn get_group(&self, id: Uuid) -> Result<GroupModel, AppError> {
        Ok(DiningGroup::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Group not found".into()))?)
    }
}

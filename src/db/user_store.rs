use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

impl PostgresService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(&self.db)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(&self.db)
            .await?)
    }

    /// Signup: create user.
    pub async fn create_user(&self, row: UserModel) -> Result<(), AppError> {
        if self.user_exists_by_email(&row.email).await? {
            return Err(AppError::AlreadyExists);
        }
        User::insert(UserActive {
            id: Set(row.id),
            name: Set(row.name),
            email: Set(row.email),
            auth_hash: Set(row.auth_hash),
            created_at: Set(row.created_at),
            updated_at: Set(row.updated_at),
        })
        .exec(&self.db)
        .await?;
        Ok(())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::{dining_group, invitation, membership, user};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;
use uuid::Uuid;

use crate::db::{AcceptOutcome, InsertInvite, Store};
use crate::types::error::AppError;

#[derive(Clone)]
pub struct PostgresService {
    pub(crate) db: DatabaseConnection,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to PostgreSQL...");
        let db = Database::connect(uri).await?;
        info!("Running migrations...");
        Migrator::up(&db, None).await?;
        info!("Connected to PostgreSQL.");
        Ok(Self { db })
    }
}

#[async_trait]
impl Store for PostgresService {
    async fn insert_user(&self, row: user::Model) -> Result<(), AppError> {
        self.create_user(row).await
    }
    async fn user_by_id(&self, id: Uuid) -> Result<user::Model, AppError> {
        self.get_user_by_id(&id).await
    }
    async fn user_by_email(&self, email: &str) -> Result<Option<user::Model>, AppError> {
        self.get_user_by_email(email).await
    }

    async fn insert_group(
        &self,
        group: dining_group::Model,
        creator_membership: membership::Model,
    ) -> Result<(), AppError> {
        self.create_group(group, creator_membership).await
    }
    async fn group_by_id(&self, id: Uuid) -> Result<dining_group::Model, AppError> {
        self.get_group(id).await
    }

    async fn membership_for(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<membership::Model>, AppError> {
        self.get_membership(group_id, user_id).await
    }
    async fn insert_membership(
        &self,
        row: membership::Model,
    ) -> Result<membership::Model, AppError> {
        self.upsert_membership(row).await
    }

    async fn insert_invite(&self, row: invitation::Model) -> Result<InsertInvite, AppError> {
        self.create_invite_row(row).await
    }
    async fn invite_by_code(&self, code: &str) -> Result<Option<invitation::Model>, AppError> {
        self.get_invite_by_code(code).await
    }
    async fn invite_by_id(&self, id: Uuid) -> Result<Option<invitation::Model>, AppError> {
        self.get_invite_by_id(id).await
    }
    async fn invites_for_group(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<invitation::Model>, AppError> {
        self.list_invites_for_group(group_id).await
    }
    async fn mark_expired(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), AppError> {
        self.mark_invite_expired(id, now).await
    }
    async fn mark_revoked(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AppError> {
        self.mark_invite_revoked(id, now).await
    }
    async fn finalize_acceptance(
        &self,
        id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AcceptOutcome, AppError> {
        self.finalize_invite_acceptance(id, user_id, now).await
    }
}

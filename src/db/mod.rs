use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::{dining_group, invitation, membership, user};
use uuid::Uuid;

use crate::types::error::AppError;

pub mod memory;
pub mod postgres_service;

mod group;
mod invitation_store;
mod membership_store;
mod user_store;

/// Outcome of an invitation insert; a duplicate code is a normal (if
/// astronomically rare) event that the engine retries, not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertInvite {
    Inserted,
    DuplicateCode,
}

/// Outcome of the transactional accept. `Raced` carries the row as it looked
/// when the conditional update missed, so the engine can report the right
/// failure without a second round trip.
#[derive(Debug)]
pub enum AcceptOutcome {
    Accepted(membership::Model),
    Raced(invitation::Model),
}

/// Persistence boundary. Implementations hold no invitation business rules;
/// the one piece of semantics they do own is serializing concurrent accepts
/// (conditional update on `status = pending`) and keeping that update atomic
/// with the membership write.
#[async_trait]
pub trait Store: Send + Sync {
    // users
    async fn insert_user(&self, row: user::Model) -> Result<(), AppError>;
    async fn user_by_id(&self, id: Uuid) -> Result<user::Model, AppError>;
    async fn user_by_email(&self, email: &str) -> Result<Option<user::Model>, AppError>;

    // groups
    async fn insert_group(
        &self,
        group: dining_group::Model,
        creator_membership: membership::Model,
    ) -> Result<(), AppError>;
    async fn group_by_id(&self, id: Uuid) -> Result<dining_group::Model, AppError>;

    // memberships
    async fn membership_for(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<membership::Model>, AppError>;
    /// Idempotent: a conflicting row already present is returned as-is.
    async fn insert_membership(
        &self,
        row: membership::Model,
    ) -> Result<membership::Model, AppError>;

    // invitations
    async fn insert_invite(&self, row: invitation::Model) -> Result<InsertInvite, AppError>;
    async fn invite_by_code(&self, code: &str) -> Result<Option<invitation::Model>, AppError>;
    async fn invite_by_id(&self, id: Uuid) -> Result<Option<invitation::Model>, AppError>;
    /// Newest first.
    async fn invites_for_group(&self, group_id: Uuid)
        -> Result<Vec<invitation::Model>, AppError>;
    /// Persists the lazily derived `expired` state; no-op unless the row is
    /// still `pending`.
    async fn mark_expired(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), AppError>;
    /// Conditional `pending -> revoked`; false when the row was no longer
    /// pending.
    async fn mark_revoked(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AppError>;
    /// `pending -> accepted` plus the membership upsert, atomically.
    async fn finalize_acceptance(
        &self,
        id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AcceptOutcome, AppError>;
}

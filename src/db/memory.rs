use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::invitation::InviteStatus;
use entity::membership::MemberRole;
use entity::{dining_group, invitation, membership, user};
use std::sync::Mutex;
use uuid::Uuid;

use crate::db::{AcceptOutcome, InsertInvite, Store};
use crate::types::error::AppError;

/// In-process store behind the same trait as Postgres. Backs the test suite
/// and dev runs without a database. One mutex over all tables gives the same
/// accept serialization the SQL store gets from its conditional update.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

impl MemoryStore {
    /// Row count over the membership table; duplicate-row assertions in tests
    /// have no other way to see past the idempotent trait surface.
    pub fn membership_count(&self) -> usize {
        self.inner.lock().unwrap().memberships.len()
    }
}

#[derive(Default)]
struct Tables {
    users: Vec<user::Model>,
    groups: Vec<dining_group::Model>,
    memberships: Vec<membership::Model>,
    invitations: Vec<invitation::Model>,
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, row: user::Model) -> Result<(), AppError> {
        let mut t = self.inner.lock().unwrap();
        if t.users.iter().any(|u| u.email == row.email) {
            return Err(AppError::AlreadyExists);
        }
        t.users.push(row);
        Ok(())
    }

    async fn user_by_id(&self, id: Uuid) -> Result<user::Model, AppError> {
        let t = self.inner.lock().unwrap();
        t.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<user::Model>, AppError> {
        let t = self.inner.lock().unwrap();
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_group(
        &self,
        group: dining_group::Model,
        creator_membership: membership::Model,
    ) -> Result<(), AppError> {
        let mut t = self.inner.lock().unwrap();
        t.groups.push(group);
        t.memberships.push(creator_membership);
        Ok(())
    }

    async fn group_by_id(&self, id: Uuid) -> Result<dining_group::Model, AppError> {
        let t = self.inner.lock().unwrap();
        t.groups
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn membership_for(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<membership::Model>, AppError> {
        let t = self.inner.lock().unwrap();
        Ok(t.memberships
            .iter()
            .find(|m| m.group_id == group_id && m.user_id == user_id)
            .cloned())
    }

    async fn insert_membership(
        &self,
        row: membership::Model,
    ) -> Result<membership::Model, AppError> {
        let mut t = self.inner.lock().unwrap();
        if let Some(existing) = t
            .memberships
            .iter()
            .find(|m| m.group_id == row.group_id && m.user_id == row.user_id)
        {
            return Ok(existing.clone());
        }
        t.memberships.push(row.clone());
        Ok(row)
    }

    async fn insert_invite(&self, row: invitation::Model) -> Result<InsertInvite, AppError> {
        let mut t = self.inner.lock().unwrap();
        if t.invitations.iter().any(|i| i.invite_code == row.invite_code) {
            return Ok(InsertInvite::DuplicateCode);
        }
        t.invitations.push(row);
        Ok(InsertInvite::Inserted)
    }

    async fn invite_by_code(&self, code: &str) -> Result<Option<invitation::Model>, AppError> {
        let t = self.inner.lock().unwrap();
        Ok(t.invitations.iter().find(|i| i.invite_code == code).cloned())
    }

    async fn invite_by_id(&self, id: Uuid) -> Result<Option<invitation::Model>, AppError> {
        let t = self.inner.lock().unwrap();
        Ok(t.invitations.iter().find(|i| i.id == id).cloned())
    }

    async fn invites_for_group(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<invitation::Model>, AppError> {
        let t = self.inner.lock().unwrap();
        let mut rows: Vec<_> = t
            .invitations
            .iter()
            .filter(|i| i.group_id == group_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn mark_expired(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), AppError> {
        let mut t = self.inner.lock().unwrap();
        if let Some(inv) = t.invitations.iter_mut().find(|i| i.id == id) {
            if inv.status == InviteStatus::Pending {
                inv.status = InviteStatus::Expired;
                inv.updated_at = now;
            }
        }
        Ok(())
    }

    async fn mark_revoked(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, AppError> {
        let mut t = self.inner.lock().unwrap();
        match t.invitations.iter_mut().find(|i| i.id == id) {
            Some(inv) if inv.status == InviteStatus::Pending => {
                inv.status = InviteStatus::Revoked;
                inv.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn finalize_acceptance(
        &self,
        id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AcceptOutcome, AppError> {
        let mut t = self.inner.lock().unwrap();

        let group_id = {
            let inv = t
                .invitations
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or(AppError::NotFound)?;
            if inv.status != InviteStatus::Pending {
                return Ok(AcceptOutcome::Raced(inv.clone()));
            }
            inv.status = InviteStatus::Accepted;
            inv.accepted_at = Some(now);
            inv.accepted_by = Some(user_id);
            inv.updated_at = now;
            inv.group_id
        };

        if let Some(existing) = t
            .memberships
            .iter()
            .find(|m| m.group_id == group_id && m.user_id == user_id)
        {
            return Ok(AcceptOutcome::Accepted(existing.clone()));
        }
        let row = membership::Model {
            group_id,
            user_id,
            role: MemberRole::Member,
            joined_at: now,
        };
        t.memberships.push(row.clone());
        Ok(AcceptOutcome::Accepted(row))
    }
}

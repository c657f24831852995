use actix_web::{web, App};
use chrono::{DateTime, Duration, Utc};
use entity::invitation::{InviteStatus, Model as InviteModel};
use entity::membership::MemberRole;
use std::sync::Arc;
use tablemate::{
    db::Store,
    invites::code::new_invite_code,
    types::token::{construct_token, TokenType},
    utils::token::{encrypt, new_id, new_token},
};
use uuid::Uuid;

pub struct TestClient {
    pub store: Arc<dyn Store>,
}

impl TestClient {
    pub fn new(store: Arc<dyn Store>) -> Self {
        TestClient { store }
    }

    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.store)))
            .configure(tablemate::routes::configure_routes)
    }

    /// Signs a user up straight through the store and hands back a usable
    /// bearer token, skipping the HTTP signup round trip.
    pub async fn create_test_user(&self, email: Option<String>) -> (Uuid, String) {
        let secret = new_token(TokenType::User);
        let auth_hash = encrypt(&secret).expect("Failed to hash token");
        let user_id = new_id();
        let email = email.unwrap_or_else(|| format!("user-{}@test.com", user_id));
        let now = Utc::now();

        self.store
            .insert_user(entity::user::Model {
                id: user_id,
                name: "Test User".to_string(),
                email,
                auth_hash,
                created_at: now,
                updated_at: now,
            })
            .await
            .expect("Failed to create user");

        let access_token = construct_token(&user_id.to_string(), &secret);
        (user_id, access_token)
    }

    pub async fn create_group_with_admin(&self, admin_id: Uuid) -> Uuid {
        let group_id = new_id();
        let now = Utc::now();
        self.store
            .insert_group(
                entity::dining_group::Model {
                    id: group_id,
                    name: "Test Supper Club".to_string(),
                    created_by: admin_id,
                    created_at: now,
                    updated_at: now,
                },
                entity::membership::Model {
                    group_id,
                    user_id: admin_id,
                    role: MemberRole::Admin,
                    joined_at: now,
                },
            )
            .await
            .expect("Failed to create group");
        group_id
    }

    /// Plants an invitation row directly, so tests can control `expires_at`
    /// without waiting out a real TTL.
    pub async fn seed_invite(
        &self,
        group_id: Uuid,
        created_by: Uuid,
        expires_at: DateTime<Utc>,
    ) -> InviteModel {
        let created_at = expires_at - Duration::days(7);
        let invite = InviteModel {
            id: new_id(),
            group_id,
            invite_code: new_invite_code(),
            invited_email: None,
            status: InviteStatus::Pending,
            created_by,
            created_at,
            expires_at,
            accepted_at: None,
            accepted_by: None,
            updated_at: created_at,
        };
        self.store
            .insert_invite(invite.clone())
            .await
            .expect("Failed to seed invite");
        invite
    }
}

use std::env;
use std::sync::OnceLock;

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: i32,
    /// When unset the server runs against the in-process store, which is
    /// enough for local poking and for the test suite.
    pub db_url: Option<String>,
    pub admin_key: String,
    /// Origin used to build shareable invite links.
    pub public_origin: String,
    /// When true, invites that carry an `invited_email` may only be accepted
    /// by a user with that email.
    pub invite_email_binding: bool,
}

impl EnvConfig {
    fn get_env(key: &str) -> String {
        env::var(key).unwrap_or_else(|_| panic!("Environment variable {} not set", key))
    }

    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        EnvConfig {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            db_url: env::var("POSTGRES_URI").ok(),
            admin_key: Self::get_env("ADMIN_KEY"),
            public_origin: env::var("PUBLIC_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            invite_email_binding: env::var("INVITE_EMAIL_BINDING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

pub static CONFIG: OnceLock<EnvConfig> = OnceLock::new();

pub fn config() -> &'static EnvConfig {
    CONFIG.get().expect("Not initialized")
}

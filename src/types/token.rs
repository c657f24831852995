use base64::{prelude::BASE64_STANDARD, Engine};
use std::fmt;

pub enum TokenType {
    User,
    Admin,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::User => write!(f, "usr"),
            TokenType::Admin => write!(f, "adm"),
        }
    }
}

/// Bearer tokens carry the user id alongside the secret so lookups do not
/// need a token column scan.
pub fn construct_token(user_id: &str, secret: &str) -> String {
    BASE64_STANDARD.encode(format!("{user_id}.{secret}"))
}

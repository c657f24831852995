use crate::db::Store;
use crate::types::{error::AppError, token::TokenType};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{
    engine::general_purpose::URL_SAFE_NO_PAD, prelude::BASE64_STANDARD, Engine as _,
};
use rand_core::{OsRng, RngCore};
use uuid::Uuid;

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub fn new_token(token_type: TokenType) -> String {
    let mut buf = [0u8; 32];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    format!("{}_{}", token_type, URL_SAFE_NO_PAD.encode(buf))
}

pub fn encrypt(token: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(token.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify(token: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(token.as_bytes(), &parsed)
        .is_ok())
}

/// Splits a bearer token back into `(user_id, secret)`. Returns `None` on any
/// malformed input; callers map that to 401.
pub fn extract_token_parts(token: &str) -> Option<(Uuid, String)> {
    let decoded = BASE64_STANDARD.decode(token).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, secret) = decoded.split_once('.')?;
    let uid = Uuid::parse_str(id).ok()?;
    if secret.is_empty() {
        return None;
    }
    Some((uid, secret.to_string()))
}

/// Full bearer validation: parse the token, load the user, check the secret
/// against the stored argon2 hash.
pub async fn authenticate(store: &dyn Store, token: &str) -> Result<Uuid, AppError> {
    let (uid, secret) = extract_token_parts(token).ok_or(AppError::Unauthorized)?;
    let user = store.user_by_id(uid).await.map_err(|_| AppError::Unauthorized)?;
    match verify(&secret, &user.auth_hash) {
        Ok(true) => Ok(uid),
        _ => Err(AppError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::token::construct_token;

    #[test]
    fn token_round_trips_through_bearer_form() {
        let uid = new_id();
        let secret = new_token(TokenType::User);
        let bearer = construct_token(&uid.to_string(), &secret);

        let (parsed_uid, parsed_secret) = extract_token_parts(&bearer).unwrap();
        assert_eq!(parsed_uid, uid);
        assert_eq!(parsed_secret, secret);
    }

    #[test]
    fn garbage_bearer_tokens_are_rejected() {
        assert!(extract_token_parts("not-base64!!").is_none());
        assert!(extract_token_parts(&BASE64_STANDARD.encode("no-dot-here")).is_none());
        assert!(extract_token_parts(&BASE64_STANDARD.encode("not-a-uuid.secret")).is_none());
    }

    #[test]
    fn hash_verifies_original_secret_only() {
        let secret = new_token(TokenType::User);
        let hash = encrypt(&secret).unwrap();
        assert!(verify(&secret, &hash).unwrap());
        assert!(!verify("wrong", &hash).unwrap());
    }
}

use actix_web::{dev::ServiceRequest, error::ErrorUnauthorized, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::config::config;
use crate::db::Store;
use crate::utils::token::authenticate;

pub async fn validate_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let store = match req.app_data::<web::Data<Arc<dyn Store>>>() {
        Some(store) => store.clone(),
        None => return Err((ErrorUnauthorized("Invalid token"), req)),
    };
    match authenticate(store.get_ref().as_ref(), credentials.token()).await {
        Ok(_) => Ok(req),
        Err(_) => Err((ErrorUnauthorized("Invalid token"), req)),
    }
}

pub async fn validate_admin_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    if credentials.token() == config().admin_key {
        Ok(req)
    } else {
        Err((ErrorUnauthorized("Invalid token"), req))
    }
}

/// Just enough checking to reject obviously broken addresses before an
/// invite goes out; deliverability is the mail layer's problem, not ours.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("sam@example.com"));
        assert!(is_valid_email("sam+dinner@mail.example.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("sam@"));
        assert!(!is_valid_email("sam@nodot"));
        assert!(!is_valid_email("sam@.com"));
        assert!(!is_valid_email("sam @example.com"));
    }
}

use crate::utils::webutils::{validate_admin_token, validate_token};
use actix_web::web;

pub mod group;
pub mod health;
pub mod invite;
pub mod user;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let user_auth = actix_web_httpauth::middleware::HttpAuthentication::bearer(validate_token);
    let admin_auth =
        actix_web_httpauth::middleware::HttpAuthentication::bearer(validate_admin_token);

    cfg.service(web::scope("/health").service(health::health));
    cfg.service(
        web::scope("/user").service(
            web::scope("/create")
                .service(user::create::create)
                .wrap(admin_auth),
        ),
    );
    cfg.service(
        web::scope("/group")
            .service(group::create::create_group)
            .service(group::invite::create_invite)
            .service(group::invite::list_invites)
            .wrap(user_auth.clone()),
    );
    cfg.service(
        web::scope("/invite")
            .service(invite::accept::accept_invite)
            .service(invite::revoke::revoke_invite)
            .wrap(user_auth),
    );
}

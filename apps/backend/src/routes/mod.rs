use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod auth;
pub mod games;
pub mod health;
pub mod users;

/// Full route table.
///
/// Registration, login and health are public; everything else under `/api`
/// sits behind `JwtExtract`. Request tracing and CORS are wrapped around the
/// whole `App` by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/api")
            .configure(auth::configure_routes)
            .service(
                web::scope("")
                    .wrap(JwtExtract)
                    .configure(users::configure_routes)
                    .service(web::scope("/games").configure(games::configure_routes)),
            ),
    );
}

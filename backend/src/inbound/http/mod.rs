//! HTTP inbound adapter exposing REST endpoints.

pub mod csrf;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope: login, aggregated user record, and greeting.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use portal_backend::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(users::json_config())
            .service(users::login)
            .service(users::user)
            .service(users::hello),
    );
}

//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::ports::{LoginService, UserRecordQuery};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::not_found;

/// Build an application wired like production around the supplied ports.
///
/// - Wraps every request in [`Trace`] so error envelopes carry trace ids.
/// - Routes unmatched paths to the JSON `404` fallback.
pub fn test_app(
    login: Arc<dyn LoginService>,
    user_records: Arc<dyn UserRecordQuery>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(login, user_records)))
        .wrap(Trace)
        .configure(configure_api)
        .default_service(web::route().to(not_found))
}

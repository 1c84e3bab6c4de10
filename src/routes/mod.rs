pub mod clients;
pub mod fallback;

use actix_files::Files;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    middleware::DefaultHeaders,
    web, App, Error,
};
use std::path::PathBuf;

use crate::{config::FanOutSettings, limiter::AdmissionLimiter};

/// Routes shared by the server and the tests. Every response defaults to a
/// JSON content type unless the handler sets its own.
pub fn build_app(
    limiter: web::Data<AdmissionLimiter>,
    fan_out: FanOutSettings,
    static_dir: PathBuf,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(limiter)
        .app_data(web::Data::new(fan_out))
        .wrap(DefaultHeaders::new().add((header::CONTENT_TYPE, "application/json")))
        .service(web::resource(clients::CLIENTS_PATH).to(clients::clients))
        // Files sets its own content type, so the JSON default above does not apply here.
        .service(Files::new("/static", static_dir))
        .default_service(web::to(fallback::not_found))
}

use actix_web::{http::Method, web, HttpRequest, HttpResponse, Responder};
use tracing::info;

use crate::{
    config::FanOutSettings,
    limiter::AdmissionLimiter,
    models::{ClientsResponse, CorrelationId},
    worker,
};

pub const CLIENTS_PATH: &str = "/admins/v1/clients";

pub async fn clients(
    req: HttpRequest,
    limiter: web::Data<AdmissionLimiter>,
    fan_out: web::Data<FanOutSettings>,
) -> impl Responder {
    let tx_id = CorrelationId::generate();
    info!(tx_id = %tx_id, method = %req.method(), "clients request");

    if req.method() != Method::GET {
        return HttpResponse::MethodNotAllowed().body("405 - Method Not Allowed");
    }

    if fan_out.enabled {
        let report = worker::fan_out(
            limiter.clone().into_inner(),
            tx_id.clone(),
            fan_out.width,
            fan_out.work_delay,
        )
        .await;
        info!(
            tx_id = %tx_id,
            admitted = report.admitted,
            rejected = report.rejected,
            failed = report.failed,
            "fan-out finished"
        );
    }

    // Read outside the limiter's lock; in-flight fan-outs from other requests
    // may or may not be counted yet.
    let count = limiter.admitted_unsynchronized();
    HttpResponse::Ok().json(ClientsResponse::greeting(count))
}

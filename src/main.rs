use actix_web::{middleware::Logger, web, HttpServer};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clients_gate::{config::ServerConfig, limiter::AdmissionLimiter, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // One limiter for the whole process, shared by every worker.
    let limiter = web::Data::new(AdmissionLimiter::new(config.max_concurrent));
    let fan_out = config.fan_out_settings();
    let static_dir = config.static_dir.clone();

    info!(
        bind = %config.bind,
        port = config.port,
        max_concurrent = limiter.max_concurrent(),
        fan_out = fan_out.enabled,
        "starting server"
    );

    HttpServer::new(move || {
        routes::build_app(limiter.clone(), fan_out, static_dir.clone()).wrap(Logger::default())
    })
    .bind((config.bind.as_str(), config.port))?
    .workers(config.workers.get())
    .run()
    .await
}

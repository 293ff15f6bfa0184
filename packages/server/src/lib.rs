#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the bike map dashboard.
//!
//! Serves every aggregation endpoint the dashboard consumes — metric
//! cards, charts, heatmap, record listing, exports, and report
//! generation — against the CSV-backed in-memory record set. All
//! endpoints accept the same serialized filter contract and apply it
//! through the one shared predicate, so counts agree across widgets.

mod handlers;

use std::path::Path;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use bike_map_dataset::TheftDataset;

/// Shared application state.
pub struct AppState {
    /// The loaded record set every aggregation runs against.
    pub dataset: TheftDataset,
}

/// Registers the `/api` routes on an application.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/total-thefts", web::get().to(handlers::total_thefts))
            .route("/highest-area", web::get().to(handlers::highest_area))
            .route("/most-model", web::get().to(handlers::most_model))
            .route("/peak-time", web::get().to(handlers::peak_time))
            .route(
                "/thefts-by-locality",
                web::get().to(handlers::thefts_by_locality),
            )
            // Older dashboard pages fetch the same breakdown by this name.
            .route("/thefts-by-ps", web::get().to(handlers::thefts_by_locality))
            .route("/theft-trends", web::get().to(handlers::theft_trends))
            .route(
                "/day-night-by-company",
                web::get().to(handlers::day_night_by_company),
            )
            .route("/thefts-heatmap", web::get().to(handlers::thefts_heatmap))
            .route("/theft-data", web::get().to(handlers::theft_data))
            .route("/download/{format}", web::post().to(handlers::download))
            .route(
                "/generate-report",
                web::post().to(handlers::generate_report),
            ),
    );
}

/// Starts the bike map API server.
///
/// Loads the dataset from `DATA_PATH` (default `data/thefts.csv`) and
/// binds to `BIND_ADDR`/`PORT`. This is a regular async function — the
/// caller provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the HTTP server
/// fails to bind.
/// Runs [`run_server`] to completion on a fresh Actix system.
///
/// For callers that are not already inside an async runtime (the CLI).
///
/// # Errors
///
/// Same failure modes as [`run_server`].
pub fn run_blocking() -> std::io::Result<()> {
    actix_web::rt::System::new().block_on(run_server())
}

#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let data_path = std::env::var("DATA_PATH").unwrap_or_else(|_| "data/thefts.csv".to_string());
    log::info!("Loading theft dataset from {data_path}...");
    let dataset = TheftDataset::load_csv(Path::new(&data_path))
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let state = web::Data::new(AppState { dataset });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

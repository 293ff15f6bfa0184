//! HTTP handler functions for the bike map API.

use actix_web::{HttpResponse, web};
use bike_map_analytics_models::Series;
use bike_map_filter::FilterState;
use bike_map_server_models::{
    ApiHealth, ApiTheftRecord, HeatmapQueryParams, MessageResponse, ReportQueryParams,
    TheftQueryParams,
};
use bike_map_theft_models::{ExportFormat, TheftRecord};
use chrono::{NaiveDate, Utc};

use crate::AppState;

/// Parses the filter contract, answering 400 on malformed input.
fn parse_filter(params: &TheftQueryParams) -> Result<FilterState, HttpResponse> {
    params.to_filter().map_err(|e| {
        HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
    })
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/total-thefts`
pub async fn total_thefts(
    state: web::Data<AppState>,
    params: web::Query<TheftQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(bike_map_analytics::total_thefts(
            state.dataset.records(),
            &filter,
        )),
        Err(resp) => resp,
    }
}

/// `GET /api/highest-area`
pub async fn highest_area(
    state: web::Data<AppState>,
    params: web::Query<TheftQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(bike_map_analytics::highest_area(
            state.dataset.records(),
            &filter,
        )),
        Err(resp) => resp,
    }
}

/// `GET /api/most-model`
pub async fn most_model(
    state: web::Data<AppState>,
    params: web::Query<TheftQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(bike_map_analytics::most_model(
            state.dataset.records(),
            &filter,
        )),
        Err(resp) => resp,
    }
}

/// `GET /api/peak-time`
pub async fn peak_time(
    state: web::Data<AppState>,
    params: web::Query<TheftQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(bike_map_analytics::peak_time(
            state.dataset.records(),
            &filter,
        )),
        Err(resp) => resp,
    }
}

/// `GET /api/thefts-by-locality` (also served as `/api/thefts-by-ps`)
pub async fn thefts_by_locality(
    state: web::Data<AppState>,
    params: web::Query<TheftQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(Series::new(
            bike_map_analytics::thefts_by_locality(state.dataset.records(), &filter),
        )),
        Err(resp) => resp,
    }
}

/// `GET /api/theft-trends`
pub async fn theft_trends(
    state: web::Data<AppState>,
    params: web::Query<TheftQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(Series::new(bike_map_analytics::theft_trends(
            state.dataset.records(),
            &filter,
        ))),
        Err(resp) => resp,
    }
}

/// `GET /api/day-night-by-company`
pub async fn day_night_by_company(
    state: web::Data<AppState>,
    params: web::Query<TheftQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(Series::new(
            bike_map_analytics::day_night_by_company(state.dataset.records(), &filter),
        )),
        Err(resp) => resp,
    }
}

/// `GET /api/thefts-heatmap`
pub async fn thefts_heatmap(
    state: web::Data<AppState>,
    params: web::Query<HeatmapQueryParams>,
) -> HttpResponse {
    let filter = match params.to_filter() {
        Ok(filter) => filter,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": e.to_string() }));
        }
    };
    HttpResponse::Ok().json(Series::new(bike_map_analytics::heatmap_points(
        state.dataset.records(),
        &filter,
        params.day_night(),
    )))
}

/// `GET /api/theft-data`
///
/// The filtered record listing, in the listing's legacy field names.
pub async fn theft_data(
    state: web::Data<AppState>,
    params: web::Query<TheftQueryParams>,
) -> HttpResponse {
    match parse_filter(&params) {
        Ok(filter) => {
            let records: Vec<ApiTheftRecord> = state
                .dataset
                .records()
                .iter()
                .filter(|record| filter.matches(record))
                .cloned()
                .map(ApiTheftRecord::from)
                .collect();
            HttpResponse::Ok().json(Series::new(records))
        }
        Err(resp) => resp,
    }
}

/// `POST /api/download/{format}`
///
/// Renders the client's already-filtered listing into the requested
/// document format and answers with a download attachment.
pub async fn download(
    path: web::Path<String>,
    body: web::Json<Vec<ApiTheftRecord>>,
) -> HttpResponse {
    let Ok(format) = path.parse::<ExportFormat>() else {
        return HttpResponse::NotFound().json(
            serde_json::json!({ "error": format!("unknown export format {:?}", path.as_str()) }),
        );
    };
    let records: Vec<TheftRecord> = body.into_inner().into_iter().map(Into::into).collect();
    match bike_map_export::render(format, &records) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(format.content_type())
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", format.download_filename()),
            ))
            .body(bytes),
        Err(e) => {
            log::error!("Failed to render {format} export: {e}");
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": format!("Failed to render {format} export") }))
        }
    }
}

/// `POST /api/generate-report`
///
/// Both dates are required and must be ordered; the station filter is
/// optional free text. An empty result set answers with a message
/// payload rather than an all-zero report.
pub async fn generate_report(
    state: web::Data<AppState>,
    params: web::Query<ReportQueryParams>,
) -> HttpResponse {
    let (Some(start_raw), Some(end_raw)) = (&params.start_date, &params.end_date) else {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "start_date and end_date are required" }));
    };
    let parsed = (
        NaiveDate::parse_from_str(start_raw.trim(), "%Y-%m-%d"),
        NaiveDate::parse_from_str(end_raw.trim(), "%Y-%m-%d"),
    );
    let (Ok(start_date), Ok(end_date)) = parsed else {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "dates must be YYYY-MM-DD" }));
    };
    if start_date > end_date {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "start_date must not be after end_date" }));
    }

    let generated_on = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let report = bike_map_analytics::generate_report(
        state.dataset.records(),
        params.police_station.as_deref().filter(|s| !s.trim().is_empty()),
        start_date,
        end_date,
        &generated_on,
    );
    match report {
        Some(report) => HttpResponse::Ok().json(report),
        None => HttpResponse::Ok().json(MessageResponse {
            message: "No theft records found for the selected criteria.".to_string(),
        }),
    }
}

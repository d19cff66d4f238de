// ============================================================
// HTTP INTERFACE
// ============================================================
// Web API for the upload / preview / clean / analyze workflow.
// Presentation glue only: every handler calls into the core and
// renders its result, no cleaning or metric logic lives here.

use std::sync::Mutex;
use std::time::Instant;

use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use serde_json::json;

use crate::application::DatasetSession;
use crate::domain::error::AppError;
use crate::domain::table::DatasetSummary;
use crate::infrastructure::csv::{CsvParser, CsvWriter};

/// Rows included in preview payloads
const PREVIEW_ROWS: usize = 5;

/// File name offered for the cleaned dataset download
const DOWNLOAD_FILE_NAME: &str = "advanta_cleaned_data.csv";

pub struct HttpState {
    pub session: Mutex<DatasetSession>,
}

#[post("/dataset")]
async fn upload_dataset(data: web::Data<HttpState>, body: web::Bytes) -> impl Responder {
    tracing::info!(bytes = body.len(), "Received dataset upload");

    let table = match CsvParser::parse_bytes_auto_detect(&body) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(error = %e, "Dataset upload failed");
            return error_response(&e);
        }
    };

    let summary = DatasetSummary::of(&table, PREVIEW_ROWS);

    let mut session = data.session.lock().unwrap();
    session.load(table);

    HttpResponse::Ok().json(summary)
}

#[get("/dataset/preview")]
async fn preview_dataset(data: web::Data<HttpState>) -> impl Responder {
    let session = data.session.lock().unwrap();

    match session.raw() {
        Ok(table) => HttpResponse::Ok().json(DatasetSummary::of(table, PREVIEW_ROWS)),
        Err(e) => error_response(&e),
    }
}

#[post("/dataset/clean")]
async fn clean_dataset(data: web::Data<HttpState>) -> impl Responder {
    let start = Instant::now();
    let mut session = data.session.lock().unwrap();

    match session.cleaned() {
        Ok(table) => {
            let summary = DatasetSummary::of(table, PREVIEW_ROWS)
                .with_processing_time(start.elapsed().as_millis() as u64);
            HttpResponse::Ok().json(summary)
        }
        Err(e) => {
            tracing::error!(error = %e, "Dataset cleaning failed");
            error_response(&e)
        }
    }
}

#[get("/dataset/clean/download")]
async fn download_cleaned_dataset(data: web::Data<HttpState>) -> impl Responder {
    let mut session = data.session.lock().unwrap();

    let table = match session.cleaned() {
        Ok(table) => table,
        Err(e) => return error_response(&e),
    };

    match CsvWriter::new().write(table) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
            ))
            .body(bytes),
        Err(e) => {
            tracing::error!(error = %e, "Cleaned dataset download failed");
            error_response(&e)
        }
    }
}

#[get("/dataset/metrics")]
async fn dataset_metrics(data: web::Data<HttpState>) -> impl Responder {
    let mut session = data.session.lock().unwrap();

    match session.metrics() {
        Ok(metrics) => HttpResponse::Ok().json(metrics),
        Err(e) => error_response(&e),
    }
}

/// Map core failures to status codes. Missing columns stay
/// machine-readable so the front end can list the exact names.
fn error_response(error: &AppError) -> HttpResponse {
    let body = match error {
        AppError::MissingColumns(cols) => json!({
            "error": error.to_string(),
            "missing_columns": cols,
        }),
        _ => json!({ "error": error.to_string() }),
    };

    match error {
        AppError::ParseError(_) => HttpResponse::BadRequest().json(body),
        AppError::ValidationError(_) | AppError::MissingColumns(_) => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        AppError::Internal(_) | AppError::IoError(_) => {
            HttpResponse::InternalServerError().json(body)
        }
    }
}

pub fn start_server(bind_addr: &str) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState {
        session: Mutex::new(DatasetSession::default_config()),
    });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new().wrap(cors).app_data(state.clone()).service(
            web::scope("/api")
                .service(upload_dataset)
                .service(preview_dataset)
                .service(clean_dataset)
                .service(download_cleaned_dataset)
                .service(dataset_metrics),
        )
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}

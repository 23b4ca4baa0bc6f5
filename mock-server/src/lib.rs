//! A small emulator of the vPIC vehicle API for tests and local use.
//!
//! Serves a fixed `Catalog` under `/api/vehicles`, wrapping every result
//! list in the vPIC envelope. Like the real service, every endpoint needs
//! `format=json`; without it the request is rejected with 400.

pub mod catalog;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};

pub use catalog::Catalog;

pub type Db = Arc<Catalog>;

type Rejection = (StatusCode, &'static str);

/// Query parameters any endpoint may receive.
#[derive(Debug, Default, Deserialize)]
pub struct Params {
    pub format: Option<String>,
    pub year: Option<i32>,
    pub modelyear: Option<i32>,
    #[serde(rename = "ManufacturerType")]
    pub manufacturer_type: Option<String>,
    pub page: Option<usize>,
}

/// Form body of `DecodeVINValuesBatch`.
#[derive(Debug, Deserialize)]
pub struct BatchForm {
    pub format: Option<String>,
    pub data: String,
}

pub fn app() -> Router {
    app_with(Catalog::default())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    Router::new()
        .route("/api/vehicles/GetMakeForManufacturer/{manufacturer}", get(makes_for_manufacturer))
        .route(
            "/api/vehicles/GetMakesForManufacturerAndYear/{manufacturer}",
            get(makes_for_manufacturer_and_year),
        )
        .route("/api/vehicles/GetMakesForVehicleType/{vehicle_type}", get(makes_for_vehicle_type))
        .route("/api/vehicles/getallmanufacturers", get(all_manufacturers))
        .route("/api/vehicles/GetManufacturerDetails/{manufacturer}", get(manufacturer_details))
        .route("/api/vehicles/DecodeVinValues/{vin}", get(decode_vin))
        .route("/api/vehicles/DecodeVINValuesBatch", post(decode_vin_batch))
        .route("/api/vehicles/DecodeVINValuesBatch/", post(decode_vin_batch))
        .route("/api/vehicles/DecodeWMI/{wmi}", get(decode_wmi))
        .route("/api/vehicles/GetWMIsForManufacturer/{search}", get(wmis_for_manufacturer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock vPIC listening");
    }
    axum::serve(listener, app()).await
}

fn require_json(format: Option<&str>) -> Result<(), Rejection> {
    match format {
        Some(f) if f.eq_ignore_ascii_case("json") => Ok(()),
        _ => Err((StatusCode::BAD_REQUEST, "format=json is required")),
    }
}

fn envelope(results: Vec<Value>, criteria: Option<String>) -> Json<Value> {
    let message = if results.is_empty() {
        "No results found"
    } else {
        "Response returned successfully"
    };
    Json(json!({
        "Count": results.len(),
        "Message": message,
        "SearchCriteria": criteria,
        "Results": results,
    }))
}

async fn makes_for_manufacturer(
    State(db): State<Db>,
    Path(manufacturer): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Rejection> {
    require_json(params.format.as_deref())?;
    debug!(%manufacturer, "GetMakeForManufacturer");
    Ok(envelope(
        db.makes_for_manufacturer(&manufacturer),
        Some(format!("Manufacturer:{manufacturer}")),
    ))
}

async fn makes_for_manufacturer_and_year(
    State(db): State<Db>,
    Path(manufacturer): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Rejection> {
    require_json(params.format.as_deref())?;
    let year = params.year.ok_or((StatusCode::BAD_REQUEST, "year is required"))?;
    debug!(%manufacturer, year, "GetMakesForManufacturerAndYear");
    Ok(envelope(
        db.makes_for_manufacturer_and_year(&manufacturer, year),
        Some(format!("Manufacturer:{manufacturer} | Year:{year}")),
    ))
}

async fn makes_for_vehicle_type(
    State(db): State<Db>,
    Path(vehicle_type): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Rejection> {
    require_json(params.format.as_deref())?;
    debug!(%vehicle_type, "GetMakesForVehicleType");
    Ok(envelope(
        db.makes_for_vehicle_type(&vehicle_type),
        Some(format!("Vehicle Type: {vehicle_type}")),
    ))
}

async fn all_manufacturers(
    State(db): State<Db>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Rejection> {
    require_json(params.format.as_deref())?;
    let page = params.page.unwrap_or(1);
    debug!(page, manufacturer_type = ?params.manufacturer_type, "getallmanufacturers");
    Ok(envelope(
        db.manufacturer_page(params.manufacturer_type.as_deref(), page),
        None,
    ))
}

async fn manufacturer_details(
    State(db): State<Db>,
    Path(manufacturer): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Rejection> {
    require_json(params.format.as_deref())?;
    debug!(%manufacturer, "GetManufacturerDetails");
    Ok(envelope(
        db.manufacturer_details(&manufacturer),
        Some(format!("Manufacturer:{manufacturer}")),
    ))
}

async fn decode_vin(
    State(db): State<Db>,
    Path(vin): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Rejection> {
    require_json(params.format.as_deref())?;
    debug!(%vin, modelyear = ?params.modelyear, "DecodeVinValues");
    Ok(envelope(
        vec![db.decode_vin(&vin, params.modelyear)],
        Some(format!("VIN(s): {vin}")),
    ))
}

/// `data` is `vin[,year]` entries separated by `;`. One result per entry,
/// in order.
async fn decode_vin_batch(State(db): State<Db>, Form(form): Form<BatchForm>) -> Result<Json<Value>, Rejection> {
    require_json(form.format.as_deref())?;

    let mut results = Vec::new();
    for entry in form.data.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (vin, year) = match entry.split_once(',') {
            Some((vin, year)) => {
                let year = year
                    .trim()
                    .parse()
                    .map_err(|_| (StatusCode::BAD_REQUEST, "model year must be an integer"))?;
                (vin.trim(), Some(year))
            }
            None => (entry, None),
        };
        results.push(db.decode_vin(vin, year));
    }
    debug!(count = results.len(), "DecodeVINValuesBatch");
    Ok(envelope(results, Some(format!("VINs: {}", form.data))))
}

async fn decode_wmi(
    State(db): State<Db>,
    Path(wmi): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Rejection> {
    require_json(params.format.as_deref())?;
    debug!(%wmi, "DecodeWMI");
    Ok(envelope(db.decode_wmi(&wmi), Some(format!("WMI:{wmi}"))))
}

async fn wmis_for_manufacturer(
    State(db): State<Db>,
    Path(search): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, Rejection> {
    require_json(params.format.as_deref())?;
    debug!(%search, "GetWMIsForManufacturer");
    Ok(envelope(
        db.wmis_for_manufacturer(&search),
        Some(format!("Manufacturer:{search}")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_accept_vpic_spellings() {
        let params: Params =
            serde_json::from_str(r#"{"format":"json","ManufacturerType":"Vehicle Alterer","page":2}"#).unwrap();
        assert_eq!(params.manufacturer_type.as_deref(), Some("Vehicle Alterer"));
        assert_eq!(params.page, Some(2));
        assert!(params.year.is_none());
    }

    #[test]
    fn format_must_be_json() {
        assert!(require_json(Some("json")).is_ok());
        assert!(require_json(Some("JSON")).is_ok());
        assert!(require_json(Some("xml")).is_err());
        assert!(require_json(None).is_err());
    }

    #[test]
    fn envelope_counts_results() {
        let Json(body) = envelope(vec![json!({"a": 1}), json!({"a": 2})], None);
        assert_eq!(body["Count"], 2);
        assert_eq!(body["Message"], "Response returned successfully");
        assert_eq!(body["Results"][1]["a"], 2);
    }

    #[test]
    fn batch_form_requires_data() {
        let result: Result<BatchForm, _> = serde_json::from_str(r#"{"format":"json"}"#);
        assert!(result.is_err());
    }
}

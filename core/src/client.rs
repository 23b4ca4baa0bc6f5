//! Stateless request builder and response parser for the vPIC API.
//!
//! # Design
//! `VpicClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that validates its
//! inputs and produces an `HttpRequest`, and a `parse_*` method that turns
//! the `HttpResponse` into entities. Validation happens entirely inside
//! `build_*`, so an invalid argument never yields a request.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::config::{base_url_from_env, DEFAULT_BASE_URL};
use crate::entity::{Entity, Make, Manufacturer, Wmi};
use crate::error::{ApiError, ValidationError};
use crate::http::{HttpRequest, HttpResponse};
use crate::results::Results;
use crate::types::{check_not_blank, check_wmi, MakeQuery, ManufacturerKey, ManufacturerQuery, Vin};
use crate::vehicle::Vehicle;

/// The vPIC response envelope. Only `Results` is required.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Count", default)]
    count: Option<u64>,
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Results")]
    results: Vec<Map<String, Value>>,
}

/// Synchronous, stateless client for the vPIC API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. See `Vpic` for a facade that also runs the
/// round-trip.
#[derive(Debug, Clone)]
pub struct VpicClient {
    base_url: String,
}

impl Default for VpicClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl VpicClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client for `VPIC_BASE_URL`, or the public endpoint when unset.
    pub fn from_env() -> Self {
        Self::new(&base_url_from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Makes
    // -----------------------------------------------------------------------

    pub fn build_get_makes(&self, query: &MakeQuery) -> Result<HttpRequest, ApiError> {
        query.validate()?;

        match (&query.manufacturer, &query.model_year, &query.vehicle_type) {
            (Some(manufacturer), Some(year), _) => self.get(
                &["GetMakesForManufacturerAndYear", manufacturer.to_string().as_str()],
                &[("year", year.to_string())],
            ),
            (Some(manufacturer), None, _) => {
                self.get(&["GetMakeForManufacturer", manufacturer.to_string().as_str()], &[])
            }
            (None, _, Some(vehicle_type)) => self.get(&["GetMakesForVehicleType", vehicle_type.as_str()], &[]),
            (None, _, None) => Err(ValidationError::MissingPrerequisite {
                field: "makes",
                requires: "manufacturer or vehicle_type",
            }
            .into()),
        }
    }

    pub fn parse_get_makes(&self, query: &MakeQuery, response: HttpResponse) -> Result<Results<Make>, ApiError> {
        let fallback = query
            .manufacturer
            .as_ref()
            .map(ToString::to_string)
            .or_else(|| query.vehicle_type.clone())
            .ok_or(ValidationError::MissingPrerequisite {
                field: "makes",
                requires: "manufacturer or vehicle_type",
            })?;
        let results = parse_results("get_makes", response)?;
        wrap_all(results, &fallback)
    }

    // -----------------------------------------------------------------------
    // Manufacturers
    // -----------------------------------------------------------------------

    pub fn build_get_manufacturers(&self, query: &ManufacturerQuery) -> Result<HttpRequest, ApiError> {
        query.validate()?;

        let mut params = Vec::with_capacity(2);
        if let Some(m_type) = &query.manufacturer_type {
            params.push(("ManufacturerType", m_type.clone()));
        }
        params.push(("page", query.page.to_string()));
        self.get(&["getallmanufacturers"], &params)
    }

    pub fn parse_get_manufacturers(&self, response: HttpResponse) -> Result<Results<Manufacturer>, ApiError> {
        let results = parse_results("get_manufacturers", response)?;
        let manufacturers = results
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Manufacturer::from_raw(raw, &i.to_string()))
            .collect::<Result<Results<_>, _>>()?;
        Ok(manufacturers)
    }

    pub fn build_get_manufacturer_details(&self, manufacturer: &ManufacturerKey) -> Result<HttpRequest, ApiError> {
        manufacturer.validate()?;
        self.get(&["GetManufacturerDetails", manufacturer.to_string().as_str()], &[])
    }

    pub fn parse_get_manufacturer_details(
        &self,
        manufacturer: &ManufacturerKey,
        response: HttpResponse,
    ) -> Result<Results<Manufacturer>, ApiError> {
        let results = parse_results("get_manufacturer_details", response)?;
        wrap_all(results, &manufacturer.to_string())
    }

    // -----------------------------------------------------------------------
    // VIN decoding
    // -----------------------------------------------------------------------

    pub fn build_decode_vin(&self, vin: &Vin) -> Result<HttpRequest, ApiError> {
        let params: Vec<(&str, String)> = vin
            .model_year()
            .map(|year| ("modelyear", year.to_string()))
            .into_iter()
            .collect();
        self.get(&["DecodeVinValues", vin.as_str()], &params)
    }

    pub fn parse_decode_vin(&self, vin: &Vin, response: HttpResponse) -> Result<Vehicle, ApiError> {
        let raw = parse_single("decode_vin", response)?;
        Ok(Vehicle::from_raw(raw, vin.as_str())?)
    }

    /// Build the batch decode POST. The form carries `format=json` and
    /// `data=vin[,year];...` in the order given.
    pub fn build_decode_vins(&self, vins: &[Vin]) -> Result<HttpRequest, ApiError> {
        if vins.is_empty() {
            return Err(ValidationError::EmptyBatch.into());
        }
        let data = vins.iter().map(Vin::batch_entry).collect::<Vec<_>>().join(";");
        let url = self.url(&["DecodeVINValuesBatch", ""])?;
        let request = HttpRequest::post_form(
            url.into(),
            vec![
                ("format".to_string(), "json".to_string()),
                ("data".to_string(), data),
            ],
        );
        debug!(method = "POST", url = %request.url, vins = vins.len(), "built batch decode request");
        Ok(request)
    }

    /// Parse a batch decode response. Results are matched to `vins` by
    /// position; any count mismatch fails the whole batch.
    pub fn parse_decode_vins(&self, vins: &[Vin], response: HttpResponse) -> Result<Results<Vehicle>, ApiError> {
        let results =
            parse_results("decode_vins", response).map_err(|e| ApiError::BatchDecode(Box::new(e)))?;

        if results.len() != vins.len() {
            warn!(requested = vins.len(), returned = results.len(), "batch decode count mismatch");
            return Err(ApiError::BatchIntegrity {
                requested: vins.len(),
                returned: results.len(),
            });
        }

        let vehicles = vins
            .iter()
            .zip(results)
            .map(|(vin, raw)| Vehicle::from_raw(raw, vin.as_str()))
            .collect::<Result<Results<_>, _>>()?;
        Ok(vehicles)
    }

    // -----------------------------------------------------------------------
    // WMI
    // -----------------------------------------------------------------------

    pub fn build_decode_wmi(&self, wmi: &str) -> Result<HttpRequest, ApiError> {
        let wmi = check_wmi(wmi)?;
        self.get(&["DecodeWMI", wmi], &[])
    }

    pub fn parse_decode_wmi(&self, wmi: &str, response: HttpResponse) -> Result<Wmi, ApiError> {
        let raw = parse_single("decode_wmi", response)?;
        Ok(Wmi::from_raw(raw, wmi)?)
    }

    pub fn build_get_wmis(&self, search: &str) -> Result<HttpRequest, ApiError> {
        let search = check_not_blank("search", search)?;
        self.get(&["GetWMIsForManufacturer", search], &[])
    }

    pub fn parse_get_wmis(&self, search: &str, response: HttpResponse) -> Result<Results<Wmi>, ApiError> {
        let results = parse_results("get_wmis", response)?;
        wrap_all(results, search)
    }

    // -----------------------------------------------------------------------
    // URL construction
    // -----------------------------------------------------------------------

    /// `base_url` with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{}: cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// A GET for `segments` with `format=json` followed by `params` in order.
    fn get(&self, segments: &[&str], params: &[(&str, String)]) -> Result<HttpRequest, ApiError> {
        let mut url = self.url(segments)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("format", "json");
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        let request = HttpRequest::get(url.into());
        debug!(method = "GET", url = %request.url, "built request");
        Ok(request)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    warn!(status = response.status, "unexpected status from vPIC");
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_results(operation: &'static str, response: HttpResponse) -> Result<Vec<Map<String, Value>>, ApiError> {
    check_status(&response)?;
    let envelope: Envelope =
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    debug!(
        operation,
        count = envelope.count,
        results = envelope.results.len(),
        message = envelope.message.as_deref().unwrap_or(""),
        "parsed response"
    );
    Ok(envelope.results)
}

/// The first result of a single-entity decode.
fn parse_single(operation: &'static str, response: HttpResponse) -> Result<Map<String, Value>, ApiError> {
    parse_results(operation, response)?
        .into_iter()
        .next()
        .ok_or(ApiError::MissingResult { operation })
}

fn wrap_all<T: Entity>(results: Vec<Map<String, Value>>, fallback: &str) -> Result<Results<T>, ApiError> {
    let wrapped = results
        .into_iter()
        .map(|raw| T::from_raw(raw, fallback))
        .collect::<Result<Results<_>, _>>()?;
    Ok(wrapped)
}

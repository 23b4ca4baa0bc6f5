use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

// --- makes ---

#[tokio::test]
async fn makes_for_manufacturer() {
    let resp = app()
        .oneshot(get("/api/vehicles/GetMakeForManufacturer/honda?format=json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Count"], 2);
    assert_eq!(body["Results"][0]["Make_ID"], 474);
    assert_eq!(body["Results"][0]["Make_Name"], "HONDA");
    assert_eq!(body["Results"][1]["Make_Name"], "ACURA");
}

#[tokio::test]
async fn makes_for_manufacturer_and_year_uses_other_spelling() {
    let resp = app()
        .oneshot(get("/api/vehicles/GetMakesForManufacturerAndYear/987?format=json&year=1970"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Count"], 1);
    assert_eq!(body["Results"][0]["MakeId"], 474);
    assert_eq!(body["Results"][0]["MfrName"], "HONDA MOTOR CO., LTD");
}

#[tokio::test]
async fn makes_for_manufacturer_and_year_needs_year() {
    let resp = app()
        .oneshot(get("/api/vehicles/GetMakesForManufacturerAndYear/honda?format=json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn makes_for_vehicle_type() {
    let resp = app()
        .oneshot(get("/api/vehicles/GetMakesForVehicleType/truck?format=json"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["Count"], 1);
    assert_eq!(body["Results"][0]["MakeName"], "FORD");
    assert_eq!(body["Results"][0]["VehicleTypeName"], "Truck");
}

// --- manufacturers ---

#[tokio::test]
async fn manufacturers_are_paged() {
    let first = body_json(
        app()
            .oneshot(get("/api/vehicles/getallmanufacturers?format=json"))
            .await
            .unwrap(),
    )
    .await;
    let second = body_json(
        app()
            .oneshot(get("/api/vehicles/getallmanufacturers?format=json&page=2"))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["Results"][0]["Mfr_ID"], 987);
    assert_eq!(second["Results"][0]["Mfr_ID"], 968);
    assert_eq!(second["Results"][1]["VehicleTypes"][0]["IsPrimary"], true);
}

#[tokio::test]
async fn manufacturers_past_the_last_page_are_empty() {
    let resp = app()
        .oneshot(get(&format!(
            "/api/vehicles/getallmanufacturers?format=json&page={}",
            usize::MAX
        )))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Count"], 0);
    assert_eq!(body["Results"], serde_json::json!([]));
}

#[tokio::test]
async fn manufacturers_filtered_by_type() {
    let resp = app()
        .oneshot(get(
            "/api/vehicles/getallmanufacturers?format=json&ManufacturerType=Incomplete+Vehicle+Manufacturer&page=1",
        ))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["Count"], 1);
    assert_eq!(body["Results"][0]["Mfr_Name"], "FORD MOTOR COMPANY, USA");
}

#[tokio::test]
async fn manufacturer_details_unknown_is_empty() {
    let resp = app()
        .oneshot(get("/api/vehicles/GetManufacturerDetails/nobody?format=json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Count"], 0);
    assert!(body["Results"].as_array().unwrap().is_empty());
}

// --- VIN decoding ---

#[tokio::test]
async fn decode_partial_vin() {
    let resp = app()
        .oneshot(get("/api/vehicles/DecodeVinValues/5UXWX7C5*BA?format=json"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["Count"], 1);
    let vehicle = &body["Results"][0];
    assert_eq!(vehicle["Make"], "BMW");
    assert_eq!(vehicle["ModelYear"], "2011");
    assert_eq!(vehicle["ErrorCode"], "6");
}

#[tokio::test]
async fn decode_vin_batch_keeps_order() {
    let resp = app()
        .oneshot(form_request(
            "/api/vehicles/DecodeVINValuesBatch/",
            "format=json&data=5YJSA3DS*EF%3B5UXWX7C5*BA%2C2012",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Count"], 2);
    assert_eq!(body["Results"][0]["Make"], "TESLA");
    assert_eq!(body["Results"][1]["Make"], "BMW");
    assert_eq!(body["Results"][1]["ModelYear"], "2012");
}

#[tokio::test]
async fn decode_vin_batch_without_trailing_slash() {
    let resp = app()
        .oneshot(form_request("/api/vehicles/DecodeVINValuesBatch", "format=json&data=JHM"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn decode_vin_batch_rejects_bad_year() {
    let resp = app()
        .oneshot(form_request(
            "/api/vehicles/DecodeVINValuesBatch/",
            "format=json&data=JHM%2Cnineteen",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- WMI ---

#[tokio::test]
async fn decode_wmi() {
    let resp = app()
        .oneshot(get("/api/vehicles/DecodeWMI/1FD?format=json"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    let wmi = &body["Results"][0];
    assert_eq!(wmi["CommonName"], "Ford");
    assert_eq!(wmi["ManufacturerName"], "FORD MOTOR COMPANY, USA");
    assert_eq!(wmi["VehicleType"], "Incomplete Vehicle");
    assert!(wmi.get("WMI").is_none());
}

#[tokio::test]
async fn wmis_for_manufacturer() {
    let resp = app()
        .oneshot(get("/api/vehicles/GetWMIsForManufacturer/tesla?format=json"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["Count"], 1);
    assert_eq!(body["Results"][0]["WMI"], "5YJ");
    assert_eq!(body["Results"][0]["Name"], "TESLA, INC.");
}

// --- protocol ---

#[tokio::test]
async fn missing_format_is_rejected() {
    let resp = app()
        .oneshot(get("/api/vehicles/DecodeWMI/1FD"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = body_bytes(resp).await;
    assert_eq!(&bytes[..], b"format=json is required");
}

#[tokio::test]
async fn unknown_endpoint_is_404() {
    let resp = app()
        .oneshot(get("/api/vehicles/GetModelsForMake/honda?format=json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

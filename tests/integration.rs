//! Integration tests for the Labor Cost Engine HTTP API.
//!
//! This test suite drives the router end to end:
//! - Month-by-month accrual
//! - Termination settlement by termination type
//! - Combined cost reports and their advisories
//! - Calculation parameter overrides
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use labor_cost_engine::api::{create_router, AppState};
use labor_cost_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/reference").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a money field serialized as a string.
fn money(value: &Value) -> Decimal {
    decimal(value.as_str().unwrap_or_else(|| panic!("Expected a string, got {}", value)))
}

async fn post_json(uri: &str, body: String) -> (StatusCode, Value) {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    post_json(uri, body.to_string()).await
}

fn employment(start: &str, end: &str, salary: &str) -> Value {
    json!({
        "start_date": start,
        "end_date": end,
        "base_salary": salary
    })
}

fn advisory_codes(body: &Value) -> Vec<String> {
    body["advisories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Accrual
// =============================================================================

#[tokio::test]
async fn test_accrual_four_competencies_with_partial_last_month() {
    let (status, body) = post(
        "/accrual",
        json!({ "employment": employment("2025-05-01", "2025-08-01", "100000") }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let months = body["months"].as_array().unwrap();
    assert_eq!(months.len(), 4);

    let may = &months[0];
    assert_eq!(may["year"], 2025);
    assert_eq!(may["month"], 5);
    assert_eq!(may["days_worked"], 31);
    assert_eq!(money(&may["charges"]["total"]), decimal("35800"));
    assert_eq!(money(&may["provisions"]["thirteenth_salary"]), decimal("8333.33"));
    assert_eq!(may["is_fully_provisioned"], true);

    let august = &months[3];
    assert_eq!(august["days_worked"], 1);
    assert_eq!(money(&august["prorated_salary"]), decimal("3225.81"));
    assert_eq!(money(&august["charges"]["total"]), decimal("1154.84"));
    assert_eq!(money(&august["month_total"]), decimal("1832.27"));

    let salaries: Decimal = months.iter().map(|m| money(&m["prorated_salary"])).sum();
    assert_eq!(money(&body["totals"]["salary"]), salaries);
}

#[tokio::test]
async fn test_accrual_open_period_runs_to_today() {
    let (status, body) = post(
        "/accrual",
        json!({
            "employment": { "start_date": "2025-01-01", "base_salary": "5000" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["months"].as_array().unwrap().len() >= 12);
}

#[tokio::test]
async fn test_accrual_uses_sector_rates_without_config() {
    let (_, body) = post(
        "/accrual",
        json!({
            "employment": {
                "start_date": "2025-01-01",
                "end_date": "2025-01-31",
                "base_salary": "10000",
                "sector": "construction"
            }
        }),
    )
    .await;

    assert_eq!(money(&body["months"][0]["charges"]["risk_insurance"]), decimal("300"));
    assert_eq!(money(&body["totals"]["charges"]), decimal("3680"));
}

#[tokio::test]
async fn test_accrual_disabled_partial_provisioning() {
    let (status, body) = post(
        "/accrual",
        json!({
            "employment": employment("2025-01-20", "2025-02-28", "6200"),
            "config": { "provision_partial_month": false }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let january = &body["months"][0];
    assert_eq!(january["is_fully_provisioned"], false);
    assert_eq!(money(&january["provisions"]["total"]), Decimal::ZERO);
    assert_eq!(money(&january["prorated_salary"]), decimal("2400.00"));

    let february = &body["months"][1];
    assert_eq!(february["is_fully_provisioned"], true);
    assert!(money(&february["provisions"]["total"]) > Decimal::ZERO);
}

#[tokio::test]
async fn test_accrual_commercial_basis_with_exclusive_end() {
    let (status, body) = post(
        "/accrual",
        json!({
            "employment": employment("2025-02-01", "2025-03-16", "3000"),
            "config": { "day_count_basis": "commercial30", "inclusive_end": false }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let months = body["months"].as_array().unwrap();
    assert_eq!(months[0]["days_in_month"], 30);
    // February keeps its 28 days against a 30-day month
    assert_eq!(months[0]["days_worked"], 28);
    assert_eq!(money(&months[0]["prorated_salary"]), decimal("2800"));
    assert_eq!(months[1]["days_worked"], 15);
    assert_eq!(money(&months[1]["prorated_salary"]), decimal("1500"));
}

// =============================================================================
// Severance
// =============================================================================

#[tokio::test]
async fn test_severance_fifteen_day_rule() {
    let (status, body) = post(
        "/severance",
        json!({ "employment": employment("2025-05-01", "2025-08-01", "100000") }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["qualifying_months_for_thirteenth"], 3);
    assert_eq!(money(&body["proportional_thirteenth"]), decimal("25000"));
    assert_eq!(money(&body["vacation_bonus"]), decimal("8333.33"));
    assert_eq!(money(&body["total"]), decimal("63000"));
    assert!(body.get("termination_fine").is_none());
}

#[tokio::test]
async fn test_severance_unjust_dismissal_after_five_years() {
    let mut request = employment("2020-01-01", "2024-12-31", "3000");
    request["termination_type"] = json!("unjust_dismissal");
    let (status, body) = post("/severance", json!({ "employment": request })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice_days"], 45);
    assert_eq!(money(&body["notice_indemnity"]), decimal("4500"));
    assert_eq!(money(&body["termination_fine"]), decimal("5760"));
    assert_eq!(advisory_codes(&body), vec!["FINE_AND_NOTICE_INCLUDED"]);
}

#[tokio::test]
async fn test_severance_mutual_agreement_omits_notice() {
    let mut request = employment("2024-01-01", "2024-12-31", "5000");
    request["termination_type"] = json!("acordoTrabalhista");
    let (status, body) = post("/severance", json!({ "employment": request })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(money(&body["termination_fine"]), decimal("960"));
    assert!(body.get("notice_indemnity").is_none());
    assert!(body.get("notice_days").is_none());
}

// =============================================================================
// Cost report
// =============================================================================

#[tokio::test]
async fn test_report_construction_unjust_dismissal() {
    let mut request = employment("2025-01-01", "2025-12-31", "5000");
    request["sector"] = json!("construction");
    request["termination_type"] = json!("unjust_dismissal");
    let (status, body) = post("/report", json!({ "employment": request })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(uuid::Uuid::parse_str(body["calculation_id"].as_str().unwrap()).is_ok());
    assert_eq!(body["engine_version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["employee"]["days_worked"], 365);
    assert_eq!(body["employee"]["full_months"], 12);
    assert_eq!(body["employee"]["rated_sector"], "construction");

    let totals = &body["totals"];
    assert_eq!(money(&totals["salaries_paid"]), decimal("60000"));
    assert_eq!(money(&totals["mandatory_charges"]), decimal("22080"));
    assert_eq!(money(&totals["termination_cost"]), decimal("20020"));
    assert_eq!(money(&totals["estimated_total_cost"]), decimal("102100"));
    assert_eq!(money(&totals["charges_percentage"]), decimal("70.2"));

    assert_eq!(
        advisory_codes(&body),
        vec!["FINE_AND_NOTICE_INCLUDED", "MAX_RISK_RATE"]
    );
}

#[tokio::test]
async fn test_report_unknown_sector_falls_back() {
    let mut request = employment("2025-03-10", "2025-03-20", "3100");
    request["sector"] = json!("mining");
    let (status, body) = post("/report", json!({ "employment": request })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employee"]["sector"], "mining");
    assert_eq!(body["employee"]["rated_sector"], "services");
    assert_eq!(body["employee"]["termination_type"], "contract_end");
    assert_eq!(advisory_codes(&body), vec!["NO_FULL_MONTH", "UNKNOWN_SECTOR"]);
}

#[tokio::test]
async fn test_report_accumulations_match_months() {
    let mut request = employment("2024-11-10", "2025-04-20", "4200");
    request["sector"] = json!("rural");
    let (status, body) = post("/report", json!({ "employment": request })).await;

    assert_eq!(status, StatusCode::OK);
    let months = body["months"].as_array().unwrap();
    let levy: Decimal = months
        .iter()
        .map(|m| money(&m["charges"]["third_party_levy"]))
        .sum();
    assert_eq!(money(&body["accumulated_charges"]["third_party_levy"]), levy);

    let provisions: Decimal = months.iter().map(|m| money(&m["provisions"]["total"])).sum();
    assert_eq!(money(&body["totals"]["provisions"]), provisions);
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_reversed_interval_returns_400() {
    let (status, body) = post(
        "/accrual",
        json!({ "employment": employment("2025-03-01", "2025-02-01", "1000") }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INTERVAL");
}

#[tokio::test]
async fn test_zero_salary_returns_400() {
    let (status, body) = post(
        "/severance",
        json!({ "employment": employment("2025-01-01", "2025-02-01", "0") }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SALARY");
}

#[tokio::test]
async fn test_salary_above_ceiling_returns_400_on_every_route() {
    for route in ["/accrual", "/severance", "/report"] {
        let (status, body) = post(
            route,
            json!({
                "employment": employment("2025-01-01", "2025-12-31", "10000000000000000000000000")
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "route {}", route);
        assert_eq!(body["code"], "INVALID_SALARY");
    }
}

#[tokio::test]
async fn test_negative_rate_in_config_returns_400() {
    let (status, body) = post(
        "/accrual",
        json!({
            "employment": employment("2025-01-01", "2025-02-01", "1000"),
            "config": {
                "rates": {
                    "employer_social_security": "0.20",
                    "severance_fund": "0.08",
                    "risk_insurance": "-0.02",
                    "third_party_levy": "0.058"
                }
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (status, body) = post_json("/report", "{\"employment\": ".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let (status, body) = post(
        "/report",
        json!({ "employment": { "base_salary": "1000" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/accrual")
                .body(Body::from(
                    json!({ "employment": employment("2025-01-01", "2025-02-01", "1000") })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

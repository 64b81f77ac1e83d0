//! Integration tests for `SheetWriter` against wiremock stand-ins for Google's
//! token endpoint and the Sheets v4 API.

use std::path::Path;

use chrono::NaiveDate;
use cstrack_core::DailyStats;
use cstrack_sheets::{
    load_service_account_key, ServiceAccountKey, SheetLayout, SheetWriter, SheetsClient,
    SheetsError,
};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const SHEET_ID: &str = "1TZiqBvutsozibzfIxxbn_n-q1rkqArjFCw2XhFb8HW0";
const HEADER_PATH: &str =
    "/v4/spreadsheets/1TZiqBvutsozibzfIxxbn_n-q1rkqArjFCw2XhFb8HW0/values/'DashBoard(Weekly_FY25)'!6:6";
const QA_CELL_PATH: &str =
    "/v4/spreadsheets/1TZiqBvutsozibzfIxxbn_n-q1rkqArjFCw2XhFb8HW0/values/'DashBoard(Weekly_FY25)'!H327";
const CALLS_CELL_PATH: &str =
    "/v4/spreadsheets/1TZiqBvutsozibzfIxxbn_n-q1rkqArjFCw2XhFb8HW0/values/'DashBoard(Weekly_FY25)'!H328";

fn test_key(server: &MockServer) -> ServiceAccountKey {
    let fixture =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/test_service_account.json");
    let mut key = load_service_account_key(&fixture).expect("fixture key should load");
    key.token_uri = format!("{}/token", server.uri());
    key
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.test",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_header(server: &MockServer, cells: &[&str]) {
    Mock::given(method("GET"))
        .and(path(HEADER_PATH))
        .and(header("authorization", "Bearer ya29.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "'DashBoard(Weekly_FY25)'!A6:ZZ6",
            "majorDimension": "ROWS",
            "values": [cells]
        })))
        .mount(server)
        .await;
}

async fn connect(server: &MockServer) -> SheetWriter {
    let client = SheetsClient::connect_with_base_url(&test_key(server), 30, &server.uri())
        .await
        .expect("connect should succeed");
    SheetWriter::new(client, SheetLayout::default())
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

fn put_bodies(requests: &[Request]) -> Vec<serde_json::Value> {
    requests
        .iter()
        .filter(|r| r.method.as_str() == "PUT")
        .map(|r| serde_json::from_slice(&r.body).expect("PUT body should be JSON"))
        .collect()
}

#[tokio::test]
async fn writes_both_counters_into_the_date_column() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_header(&server, &["", "", "", "", "", "", "1/1", "1/2"]).await;
    for cell_path in [QA_CELL_PATH, CALLS_CELL_PATH] {
        Mock::given(method("PUT"))
            .and(path(cell_path))
            .and(query_param("valueInputOption", "USER_ENTERED"))
            .and(header("authorization", "Bearer ya29.test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spreadsheetId": SHEET_ID,
                "updatedCells": 1
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let writer = connect(&server).await;
    let column = writer
        .write_daily_stats(&DailyStats::new(date(1, 2), 15, 42))
        .await
        .expect("write should succeed");
    assert_eq!(column, 8);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        put_bodies(&requests),
        vec![
            serde_json::json!({
                "range": "'DashBoard(Weekly_FY25)'!H327",
                "majorDimension": "ROWS",
                "values": [[15]]
            }),
            serde_json::json!({
                "range": "'DashBoard(Weekly_FY25)'!H328",
                "majorDimension": "ROWS",
                "values": [[42]]
            }),
        ]
    );
}

#[tokio::test]
async fn column_resolution_is_repeatable() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_header(&server, &["", "", "", "", "", "", "1/1", "1/2"]).await;

    let writer = connect(&server).await;
    let first = writer.resolve_column(date(1, 2)).await.expect("first resolve");
    let second = writer.resolve_column(date(1, 2)).await.expect("second resolve");
    assert_eq!((first, second), (8, 8));

    let requests = server.received_requests().await.unwrap();
    let header_reads = requests
        .iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert_eq!(header_reads, 2, "each resolve reads the header row once");
    assert!(put_bodies(&requests).is_empty());
}

#[tokio::test]
async fn missing_date_label_writes_nothing() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_header(&server, &["", "", "", "", "", "", "1/1", "1/2"]).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let writer = connect(&server).await;
    let err = writer
        .write_daily_stats(&DailyStats::new(date(1, 3), 15, 42))
        .await
        .unwrap_err();

    assert!(
        matches!(err, SheetsError::ColumnNotFound { ref label, row: 6 } if label == "1/3"),
        "got {err:?}"
    );
    let requests = server.received_requests().await.unwrap();
    assert!(put_bodies(&requests).is_empty());
}

#[tokio::test]
async fn empty_header_row_is_column_not_found() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path(HEADER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "'DashBoard(Weekly_FY25)'!A6:ZZ6",
            "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;

    let writer = connect(&server).await;
    let err = writer.resolve_column(date(1, 2)).await.unwrap_err();
    assert!(matches!(err, SheetsError::ColumnNotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn second_write_failure_leaves_first_cell_written() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_header(&server, &["", "", "", "", "", "", "1/1", "1/2"]).await;
    Mock::given(method("PUT"))
        .and(path(QA_CELL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(CALLS_CELL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": {
                "code": 503,
                "message": "The service is currently unavailable.",
                "status": "UNAVAILABLE"
            }
        })))
        .mount(&server)
        .await;

    let writer = connect(&server).await;
    let err = writer
        .write_daily_stats(&DailyStats::new(date(1, 2), 15, 42))
        .await
        .unwrap_err();

    assert!(
        matches!(err, SheetsError::Api { status: 503, ref message } if message == "The service is currently unavailable."),
        "got {err:?}"
    );
    let requests = server.received_requests().await.unwrap();
    assert_eq!(put_bodies(&requests).len(), 2);
}

#[tokio::test]
async fn permission_denied_surfaces_google_message() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path(HEADER_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&server)
        .await;

    let writer = connect(&server).await;
    let err = writer.resolve_column(date(1, 2)).await.unwrap_err();
    assert!(
        matches!(err, SheetsError::Api { status: 403, ref message } if message.contains("permission")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn rejected_assertion_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid JWT Signature."
        })))
        .mount(&server)
        .await;

    let result = SheetsClient::connect_with_base_url(&test_key(&server), 30, &server.uri()).await;
    let err = result.err().expect("token exchange should fail");
    assert!(
        matches!(err, SheetsError::Unauthorized { status: 400, ref message } if message == "Invalid JWT Signature."),
        "got {err:?}"
    );
}

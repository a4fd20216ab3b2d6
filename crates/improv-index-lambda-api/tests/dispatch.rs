//! End-to-end dispatch tests through the public routing surface.

use aws_sdk_dynamodb::operation::scan::ScanOutput;
use aws_smithy_mocks::{mock, mock_client};
use serde_json::json;

use improv_index_lambda_api::{handle, AppState};
use improv_index_lambda_shared::test_utils::{api_event, mock_request_id};
use improv_index_lib::{string_key, Secrets};

fn state_with(client: aws_sdk_dynamodb::Client, table: Option<&str>) -> AppState {
    AppState {
        dynamodb: client,
        activities_table: table.map(String::from),
        secrets: Secrets::new("TEST_SECRETS", None),
    }
}

#[tokio::test]
async fn every_outcome_is_a_well_formed_envelope() {
    let scan_rule = mock!(aws_sdk_dynamodb::Client::scan).then_output(|| {
        ScanOutput::builder()
            .set_items(Some(vec![string_key("id", "freeze-tag")]))
            .build()
    });
    let client = mock_client!(aws_sdk_dynamodb, [&scan_rule]);
    let state = state_with(client, Some("activities"));

    let payloads = vec![
        api_event("OPTIONS", "/anything"),
        api_event("GET", "/activities"),
        api_event("DELETE", "/activities"),
        json!({}),
        json!(42),
    ];

    for payload in payloads {
        let envelope = handle(&state, &mock_request_id("envelope"), payload).await;
        assert!([200, 400, 500].contains(&envelope.status_code));
        // Body must parse as JSON and headers must carry the CORS set.
        let body = envelope.body_json();
        assert!(body.is_object());
        assert_eq!(envelope.headers["Access-Control-Allow-Origin"], "*");
    }
}

#[tokio::test]
async fn activities_route_round_trips_through_the_proxy_shape() {
    let scan_rule = mock!(aws_sdk_dynamodb::Client::scan).then_output(|| {
        ScanOutput::builder()
            .set_items(Some(vec![
                string_key("id", "freeze-tag"),
                string_key("id", "zip-zap-zop"),
            ]))
            .build()
    });
    let client = mock_client!(aws_sdk_dynamodb, [&scan_rule]);
    let state = state_with(client, Some("activities"));

    let envelope = handle(
        &state,
        &mock_request_id("round-trip"),
        api_event("GET", "/activities"),
    )
    .await;

    // The envelope serializes with the field names API Gateway expects.
    let wire = serde_json::to_value(&envelope).unwrap();
    assert_eq!(wire["statusCode"], 200);
    let body: serde_json::Value =
        serde_json::from_str(wire["body"].as_str().unwrap()).unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

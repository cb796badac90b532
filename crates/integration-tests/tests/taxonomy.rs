mod harness;

use faultline_core::trace;
use harness::config::ConfigBuilder;
use harness::server::TestServer;

#[tokio::test]
async fn business_failure() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let (status, header, body) = server
        .envelope(server.client().post(server.url("/orders/7/pay")))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["errorCode"], "ORDER_NOT_PAYABLE");
    assert_eq!(body["message"], "Order 7 cannot be paid");
    assert_eq!(body["path"], "/orders/7/pay");
    assert_eq!(body["status"], 400);
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(body.get("fieldErrors").is_none());

    let trace_id = body["traceId"].as_str().unwrap();
    assert!(trace::is_well_formed(trace_id, "BIZ"));
    assert_eq!(header.as_deref(), Some(trace_id));
}

#[tokio::test]
async fn business_failure_without_message_falls_back_to_key() {
    let server = TestServer::start(ConfigBuilder::new().without_messages().build())
        .await
        .unwrap();

    let (status, _, body) = server
        .envelope(server.client().post(server.url("/orders/7/pay")))
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], "error.order.not_payable");
}

#[tokio::test]
async fn not_found_failure() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let (status, _, body) = server.envelope(server.client().get(server.url("/users/42"))).await;

    assert_eq!(status, 404);
    assert_eq!(body["errorCode"], "USER_NOT_FOUND");
    assert_eq!(body["message"], "User 42 was not found");
    assert!(trace::is_well_formed(body["traceId"].as_str().unwrap(), "NF"));
}

#[tokio::test]
async fn technical_failure_hides_cause() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let (status, _, body) = server.envelope(server.client().get(server.url("/payments"))).await;

    assert_eq!(status, 500);
    assert_eq!(body["errorCode"], "PAYMENTS_UNAVAILABLE");
    assert_eq!(body["message"], "An internal server error occurred");
    assert!(!body.to_string().contains("payments-db"));
    assert!(trace::is_well_formed(body["traceId"].as_str().unwrap(), "TECH"));
}

#[tokio::test]
async fn success_is_untouched() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server.client().get(server.url("/users/1")).send().await.unwrap();

    assert_eq!(resp.status(), 200);
    assert!(resp.headers().get("x-trace-id").is_none());
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["email"], "ada@example.com");
}

//! Mock HTTP server tests for [`PostgrestStore`] and [`HostAdvisor`].
//!
//! Uses [`wiremock`] to stand up a local server that emulates a PostgREST
//! endpoint and an OpenAI-compatible completion endpoint. This exercises
//! the full request/response path without real infrastructure.
//!
//! Coverage:
//! - Select with equality filters translated to `column=eq.value` params
//! - Select auth failure and error-message extraction
//! - Upsert as one POST with merge-duplicates preference
//! - Upsert rejection surfacing the PostgREST message
//! - Advisor success, suggestions from extra choices, context forwarding
//! - Advisor auth failure and malformed responses

use serde_json::json;
use wiremock::matchers::{body_json, header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cortado_host::{HostAdvisor, HostError, PostgrestStore, TableStore};
use cortado_host::{AdvisorConfig, StoreConfig};
use cortado_sdk::{Advisor, Filter};

/// Build a `StoreConfig` pointing at the given mock server URL.
fn store_config(server_url: &str) -> StoreConfig {
    StoreConfig {
        base_url: server_url.into(),
        api_key_env: "MOCK_UNUSED_STORE_KEY".into(),
        employees_table: "employees".into(),
        audit_table: "sdk_audit_logs".into(),
    }
}

/// Build an `AdvisorConfig` pointing at the given mock server URL.
fn advisor_config(server_url: &str) -> AdvisorConfig {
    AdvisorConfig {
        base_url: server_url.into(),
        api_key_env: "MOCK_UNUSED_ADVISOR_KEY".into(),
        model: "test-model".into(),
    }
}

// ── Select ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn select_translates_filter_to_eq_params() {
    let server = MockServer::start().await;

    let rows = json!([
        {"id": 1, "status": "pending", "table_number": 4},
        {"id": 2, "status": "pending", "table_number": 4}
    ]);

    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("status", "eq.pending"))
        .and(query_param("table_number", "eq.4"))
        .and(query_param("select", "*"))
        .and(header("apikey", "svc-mock-key"))
        .and(header("Authorization", "Bearer svc-mock-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&rows))
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::with_api_key(store_config(&server.uri()), "svc-mock-key".into());
    let filter = Filter::new().eq("status", "pending").eq("table_number", 4);

    let result = store.select("orders", &filter).await.unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0]["id"], 1);
}

#[tokio::test]
async fn select_without_filter_only_sends_select_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("select", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::with_api_key(store_config(&server.uri()), "svc-key".into());
    let rows = store.select("orders", &Filter::new()).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn select_401_returns_auth_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"message\":\"JWT expired\"}"))
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::with_api_key(store_config(&server.uri()), "svc-stale".into());
    let err = store.select("orders", &Filter::new()).await.unwrap_err();
    assert!(
        matches!(err, HostError::AuthFailed(_)),
        "expected AuthFailed, got: {err:?}"
    );
}

#[tokio::test]
async fn select_500_extracts_postgrest_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("{\"message\":\"relation does not exist\",\"code\":\"42P01\"}"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::with_api_key(store_config(&server.uri()), "svc-key".into());
    let err = store.select("orders", &Filter::new()).await.unwrap_err();
    assert!(matches!(err, HostError::RequestFailed(_)));
    assert!(err.to_string().contains("relation does not exist"));
}

#[tokio::test]
async fn select_non_array_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json {{{"))
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::with_api_key(store_config(&server.uri()), "svc-key".into());
    let err = store.select("orders", &Filter::new()).await.unwrap_err();
    assert!(
        matches!(err, HostError::InvalidResponse(_)),
        "expected InvalidResponse, got: {err:?}"
    );
}

// ── Upsert ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_posts_whole_batch_with_merge_preference() {
    let server = MockServer::start().await;

    let records = vec![json!({"id": 1, "name": "Burger"}), json!({"id": 2, "name": "Flat White"})];

    Mock::given(method("POST"))
        .and(path("/menu_items"))
        .and(headers("Prefer", vec!["resolution=merge-duplicates", "return=minimal"]))
        .and(header("apikey", "svc-mock-key"))
        .and(body_json(json!([
            {"id": 1, "name": "Burger"},
            {"id": 2, "name": "Flat White"}
        ])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::with_api_key(store_config(&server.uri()), "svc-mock-key".into());
    store.upsert("menu_items", &records).await.unwrap();
}

#[tokio::test]
async fn upsert_rejection_surfaces_store_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/menu_items"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_string("{\"message\":\"duplicate key value\",\"code\":\"23505\"}"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = PostgrestStore::with_api_key(store_config(&server.uri()), "svc-key".into());
    let err = store
        .upsert("menu_items", &[json!({"id": 1})])
        .await
        .unwrap_err();
    assert!(
        matches!(err, HostError::Rejected(_)),
        "expected Rejected, got: {err:?}"
    );
    assert!(err.to_string().contains("duplicate key value"));
}

#[tokio::test]
async fn upsert_missing_api_key_returns_not_configured() {
    let mut config = store_config("http://localhost:1");
    config.api_key_env = "CORTADO_NONEXISTENT_MOCK_KEY_99999".into();
    let store = PostgrestStore::new(config);

    let err = store.upsert("orders", &[]).await.unwrap_err();
    assert!(
        matches!(err, HostError::NotConfigured(_)),
        "expected NotConfigured, got: {err:?}"
    );
}

// ── Advisor ────────────────────────────────────────────────────────────

#[tokio::test]
async fn consult_success_returns_content_and_tokens() {
    let server = MockServer::start().await;

    let body = json!({
        "id": "chatcmpl-test-001",
        "object": "chat.completion",
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "86 the oat milk."},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 6, "total_tokens": 18}
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-mock-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let advisor = HostAdvisor::with_api_key(advisor_config(&server.uri()), "sk-mock-key".into());
    let reply = advisor.consult("what should we 86?", None).await.unwrap();

    assert_eq!(reply.content, "86 the oat milk.");
    assert!(reply.suggestions.is_empty());
    assert_eq!(reply.tokens_used, 18);
}

#[tokio::test]
async fn consult_extra_choices_become_suggestions() {
    let server = MockServer::start().await;

    let body = json!({
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "Push the specials."}},
            {"index": 1, "message": {"role": "assistant", "content": "Rotate the pastry case."}},
            {"index": 2, "message": {"role": "assistant", "content": "Prep more cold brew."}}
        ],
        "usage": {"total_tokens": 30}
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let advisor = HostAdvisor::with_api_key(advisor_config(&server.uri()), "sk-key".into());
    let reply = advisor.consult("slow afternoon, ideas?", None).await.unwrap();

    assert_eq!(reply.content, "Push the specials.");
    assert_eq!(
        reply.suggestions,
        vec!["Rotate the pastry case.", "Prep more cold brew."]
    );
}

#[tokio::test]
async fn consult_forwards_context_as_system_message() {
    let server = MockServer::start().await;

    let body = json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "ok"}}],
        "usage": {"total_tokens": 5}
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_json(json!({
            "model": "test-model",
            "messages": [
                {"role": "system", "content": "Context:\n{\"open_orders\":7}"},
                {"role": "user", "content": "how is the shift going?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let advisor = HostAdvisor::with_api_key(advisor_config(&server.uri()), "sk-key".into());
    let context = json!({"open_orders": 7});
    advisor
        .consult("how is the shift going?", Some(&context))
        .await
        .unwrap();
}

#[tokio::test]
async fn consult_401_is_an_advisor_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("{\"error\":{\"message\":\"Invalid API key\"}}"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let advisor = HostAdvisor::with_api_key(advisor_config(&server.uri()), "sk-bad".into());
    let err = advisor.consult("hello", None).await.unwrap_err();
    assert!(err.to_string().contains("authentication failed"));
}

#[tokio::test]
async fn consult_empty_choices_is_an_advisor_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .expect(1)
        .mount(&server)
        .await;

    let advisor = HostAdvisor::with_api_key(advisor_config(&server.uri()), "sk-key".into());
    let err = advisor.consult("hello", None).await.unwrap_err();
    assert!(err.to_string().contains("no choices"));
}

#[tokio::test]
async fn consult_malformed_body_is_an_advisor_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json {{{"))
        .expect(1)
        .mount(&server)
        .await;

    let advisor = HostAdvisor::with_api_key(advisor_config(&server.uri()), "sk-key".into());
    let err = advisor.consult("hello", None).await.unwrap_err();
    assert!(err.to_string().contains("failed to parse response"));
}

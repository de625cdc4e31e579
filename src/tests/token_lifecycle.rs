// Token lifecycle against mock vendor hosts:
//  - concurrent callers share one token fetch
//  - a 401 from the API resets the token and retries exactly once
//  - other failures surface without touching the token
//  - a failed token fetch is shared until the cache is reset

#[cfg(test)]
mod test {

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap as AxumHeaders;
use axum::{routing::get, Json};
use futures::future::join_all;
use http::StatusCode;
use httpmock::Method::{GET, POST};
use httpmock::MockServer;

use crate::error::{AuthError, TransportError, ZoomError};
use crate::executor::request::{QueryParams, RequestDescriptor};
use crate::tests::common::{json, response, spawn_axum, test_config, Router, ScriptedTransport};
use crate::{ReqwestTransport, ZoomClient};

fn scripted_client(transport: ScriptedTransport) -> (ZoomClient<Arc<ScriptedTransport>>, Arc<ScriptedTransport>) {
    let transport = Arc::new(transport);
    let client = ZoomClient::with_transport(
        test_config("https://api.test/v2", "https://auth.test"),
        transport.clone(),
    )
    .unwrap();
    (client, transport)
}

async fn mock_auth(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .query_param("grant_type", "account_credentials")
                .query_param("account_id", "acc-1")
                .header("authorization", "Basic aWQ6c2VjcmV0");
            then.status(200)
                .json_body(json!({"access_token": "xxxxx", "token_type": "bearer", "expires_in": 3599}));
        })
        .await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_token_fetch() {
    let (client, transport) =
        scripted_client(ScriptedTransport::default().with_token_delay(Duration::from_millis(50)));

    let tokens = join_all((0..10).map(|_| {
        let client = client.clone();
        async move { client.token().await }
    }))
    .await;

    assert_eq!(transport.token_calls(), 1);
    for token in tokens {
        assert_eq!(token.unwrap().access_token, "tok-1");
    }
}

#[tokio::test]
async fn token_is_fetched_once_for_many_calls() {
    let auth = MockServer::start_async().await;
    let api = MockServer::start_async().await;
    let auth_mock = mock_auth(&auth).await;
    let groups = api
        .mock_async(|when, then| {
            when.method(GET).path("/groups").header("authorization", "Bearer xxxxx");
            then.status(200).json_body(json!({"total_records": 1, "groups": [{"id": "abc"}]}));
        })
        .await;

    let client = ZoomClient::new(test_config(api.base_url(), auth.base_url())).unwrap();
    for _ in 0..3 {
        let page = client.groups().list_groups().await.unwrap();
        assert_eq!(page.body["groups"][0]["id"], "abc");
    }

    assert_eq!(auth_mock.calls_async().await, 1);
    assert_eq!(groups.calls_async().await, 3);
}

#[tokio::test]
async fn unauthorized_once_refreshes_and_succeeds() {
    let auth = MockServer::start_async().await;
    let auth_mock = mock_auth(&auth).await;

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    let api_router = Router::new().route(
        "/groups/{group_id}",
        get(move |headers: AxumHeaders| {
            let calls = calls_clone.clone();
            async move {
                assert_eq!(headers["authorization"], "Bearer xxxxx");
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    (StatusCode::UNAUTHORIZED, Json(json!({"code": 124, "message": "Invalid access token."})))
                } else {
                    (StatusCode::OK, Json(json!({"id": "abc", "name": "Group 1"})))
                }
            }
        }),
    );
    let (api_h, api_addr) = spawn_axum(api_router).await;

    let client = ZoomClient::new(test_config(format!("http://{}", api_addr), auth.base_url())).unwrap();
    let group = client.groups().get_group("abc").await.unwrap();

    assert_eq!(group.body["name"], "Group 1");
    assert_eq!(auth_mock.calls_async().await, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(client.token_generation(), 1);
    assert_eq!(client.metrics().auth_retries.get(), 1);

    api_h.abort();
}

#[tokio::test]
async fn unauthorized_twice_is_authorization_rejected() {
    let auth = MockServer::start_async().await;
    let api = MockServer::start_async().await;
    let auth_mock = mock_auth(&auth).await;
    let api_mock = api
        .mock_async(|when, then| {
            when.method(GET).path("/meetings/85746065");
            then.status(401).json_body(json!({"code": 124, "message": "Invalid access token."}));
        })
        .await;

    let client = ZoomClient::new(test_config(api.base_url(), auth.base_url())).unwrap();
    let err = client
        .meetings()
        .get_meeting("85746065", QueryParams::new())
        .await
        .unwrap_err();

    match err {
        ZoomError::AuthorizationRejected { body } => assert_eq!(body["code"], 124),
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(auth_mock.calls_async().await, 2);
    assert_eq!(api_mock.calls_async().await, 2);
    // the token rejected on the retry is discarded too
    assert_eq!(client.token_generation(), 2);
}

#[tokio::test]
async fn other_failures_surface_without_refresh() {
    let auth = MockServer::start_async().await;
    let api = MockServer::start_async().await;
    let auth_mock = mock_auth(&auth).await;
    let not_found = api
        .mock_async(|when, then| {
            when.method(GET).path("/groups/missing");
            then.status(404).json_body(json!({"code": 4130, "message": "A group with this 4130 does not exist."}));
        })
        .await;
    let failing = api
        .mock_async(|when, then| {
            when.method(GET).path("/groups/broken");
            then.status(500).body("");
        })
        .await;

    let client = ZoomClient::new(test_config(api.base_url(), auth.base_url())).unwrap();

    let err = client.groups().get_group("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        ZoomError::Api { body, .. } => assert_eq!(body["code"], 4130),
        other => panic!("unexpected error {:?}", other),
    }

    let err = client.groups().get_group("broken").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

    assert_eq!(auth_mock.calls_async().await, 1);
    assert_eq!(not_found.calls_async().await, 1);
    assert_eq!(failing.calls_async().await, 1);
    assert_eq!(client.token_generation(), 0);
}

#[tokio::test]
async fn transport_error_is_not_retried() {
    let (client, transport) = scripted_client(ScriptedTransport::new(vec![Err(
        TransportError::Connect("connection refused".into()),
    )]));

    let err = client
        .request(RequestDescriptor::get("/groups"))
        .await
        .unwrap_err();

    assert!(matches!(err, ZoomError::Transport(TransportError::Connect(_))));
    assert_eq!(transport.token_calls(), 1);
    assert_eq!(transport.api_calls(), 1);
    assert_eq!(client.token_generation(), 0);
}

#[tokio::test]
async fn retry_uses_the_fresh_token() {
    let (client, transport) = scripted_client(ScriptedTransport::new(vec![
        response(StatusCode::UNAUTHORIZED, json!({"code": 124})),
        response(StatusCode::OK, json!({"id": "abc"})),
    ]));

    client.groups().get_group("abc").await.unwrap();

    assert_eq!(transport.api_authorizations(), vec!["Bearer tok-1", "Bearer tok-2"]);
    assert_eq!(transport.token_calls(), 2);
}

#[tokio::test]
async fn list_endpoint_refreshes_once_and_walks_every_page() {
    let (client, transport) = scripted_client(ScriptedTransport::new(vec![
        response(StatusCode::UNAUTHORIZED, json!({"code": 124})),
        response(
            StatusCode::OK,
            json!({"members": [{"email": "jane@x"}], "next_page_token": "ghi"}),
        ),
        response(StatusCode::OK, json!({"members": [{"email": "john@x"}], "next_page_token": ""})),
    ]));

    let members = client
        .groups()
        .list_group_members("abc", QueryParams::new())
        .collect_items()
        .await
        .unwrap();

    assert_eq!(members, vec![json!({"email": "jane@x"}), json!({"email": "john@x"})]);
    assert_eq!(transport.token_calls(), 2);
    assert_eq!(transport.api_calls(), 3);
    assert_eq!(
        transport.api_authorizations(),
        vec!["Bearer tok-1", "Bearer tok-2", "Bearer tok-2"]
    );
}

#[tokio::test]
async fn list_endpoint_rejected_twice_fails_the_stream() {
    let (client, transport) = scripted_client(ScriptedTransport::new(vec![
        response(StatusCode::UNAUTHORIZED, json!({"code": 124})),
        response(StatusCode::UNAUTHORIZED, json!({"code": 124})),
    ]));

    let err = client
        .groups()
        .list_group_members("abc", QueryParams::new())
        .collect_items()
        .await
        .unwrap_err();

    assert!(matches!(err, ZoomError::AuthorizationRejected { .. }), "{:?}", err);
    assert_eq!(transport.token_calls(), 2);
    assert_eq!(transport.api_calls(), 2);
}

#[tokio::test]
async fn failed_token_fetch_is_shared_until_reset() {
    let auth = MockServer::start_async().await;
    let auth_mock = auth
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(400).json_body(json!({"reason": "Invalid client_id or client_secret", "error": "invalid_client"}));
        })
        .await;

    let client = ZoomClient::with_transport(
        test_config("http://127.0.0.1:9/v2", auth.base_url()),
        ReqwestTransport::new().unwrap(),
    )
    .unwrap();

    for _ in 0..2 {
        let err = client.groups().list_groups().await.unwrap_err();
        assert!(
            matches!(err, ZoomError::Auth(AuthError::Rejected { status, .. }) if status == StatusCode::BAD_REQUEST),
            "{:?}",
            err
        );
    }
    assert_eq!(auth_mock.calls_async().await, 1);

    client.reset_token();
    assert!(client.token().await.is_err());
    assert_eq!(auth_mock.calls_async().await, 2);
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let err = ZoomClient::with_transport(
        test_config("not a url", "https://zoom.us").with_timeout(Duration::from_secs(5)),
        ScriptedTransport::default(),
    )
    .err()
    .unwrap();

    match err {
        ZoomError::Config(message) => assert!(message.contains("baseURL"), "{}", message),
        other => panic!("unexpected error {:?}", other),
    }
}
}

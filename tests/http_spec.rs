use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use linctl::client::*;
use linctl::ClientConfig;
use serde_json::{json, Value};

const PROJECT_ID: &str = "5d2c5a3e-8f1b-4c7e-9a0d-1b2c3d4e5f60";

/// Serve `app` on an ephemeral local port and return its GraphQL URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server failed");
    });
    format!("http://{}/graphql", addr)
}

async fn client_for(app: Router) -> LinearClient {
    let url = serve(app).await;
    LinearClient::from_config(&ClientConfig::new(url, "test-key")).expect("Failed to build client")
}

fn replying(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        "/graphql",
        post(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    )
}

mod requests {
    use super::*;

    #[tokio::test]
    async fn posts_query_and_variables_with_bearer_auth() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
        let recorder = seen.clone();
        let app = Router::new().route(
            "/graphql",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorder = recorder.clone();
                async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *recorder.lock().unwrap() = Some((auth, body));
                    Json(json!({"data": {"teams": {"nodes": [
                        {"id": "team-1", "key": "ENG", "name": "Engineering"}
                    ]}}}))
                }
            }),
        );
        let client = client_for(app).await;

        let team = client.resolve_team("ENG").await.unwrap();
        assert_eq!(team.id, "team-1");

        let (auth, body) = seen.lock().unwrap().clone().expect("No request recorded");
        assert_eq!(auth, "Bearer test-key");
        assert!(body["query"].as_str().unwrap().starts_with("query TeamByKey("));
        assert_eq!(body["variables"], json!({"key": "ENG"}));
    }

    #[tokio::test]
    async fn decodes_the_data_payload() {
        let client = client_for(replying(
            StatusCode::OK,
            r#"{"data":{"viewer":{"id":"user-me","name":"Ada Lovelace","email":"ada@example.com"}}}"#,
        ))
        .await;

        let me = client.viewer().await.unwrap();

        assert_eq!(me.id, "user-me");
        assert_eq!(me.email, "ada@example.com");
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn envelope_errors_are_classified() {
        let client = client_for(replying(
            StatusCode::OK,
            r#"{"data":null,"errors":[{"message":"Project not found"}]}"#,
        ))
        .await;

        let err = client.get_project(PROJECT_ID).await.unwrap_err();

        assert!(err.is_not_found(Entity::Project));
        assert!(err.to_string().contains("Project not found"));
    }

    #[tokio::test]
    async fn errors_with_partial_data_fail_the_call() {
        let client = client_for(replying(
            StatusCode::OK,
            r#"{"data":{"project":{"id":"p1","name":"Alpha"}},"errors":[{"message":"Field lead failed"}]}"#,
        ))
        .await;

        let err = client.get_project(PROJECT_ID).await.unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::Unclassified));
    }

    #[tokio::test]
    async fn unauthorized_status_is_an_auth_failure() {
        let client = client_for(replying(StatusCode::UNAUTHORIZED, r#"{"error":"bad key"}"#)).await;

        let err = client.viewer().await.unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::AuthFailure));
    }

    #[tokio::test]
    async fn server_errors_are_unclassified_with_the_body() {
        let client = client_for(replying(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")).await;

        let err = client.viewer().await.unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::Unclassified));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn malformed_json_is_a_transport_failure() {
        let client = client_for(replying(StatusCode::OK, "<html>oops</html>")).await;

        let err = client.viewer().await.unwrap_err();

        assert_eq!(err.kind(), None);
        assert!(matches!(err, ClientError::Transport(TransportError::Decode(_))));
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let app = Router::new().route(
            "/graphql",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"data": {}})).into_response()
            }),
        );
        let url = serve(app).await;
        let config = ClientConfig::new(url, "test-key").with_timeout(Duration::from_millis(200));
        let client = LinearClient::from_config(&config).unwrap();

        let err = client.viewer().await.unwrap_err();

        assert_eq!(err.kind(), None);
        assert!(matches!(err, ClientError::Transport(TransportError::Timeout)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_failure() {
        let config = ClientConfig::new("http://127.0.0.1:9/graphql", "test-key")
            .with_timeout(Duration::from_secs(2));
        let client = LinearClient::from_config(&config).unwrap();

        let err = client.viewer().await.unwrap_err();

        assert_eq!(err.kind(), None);
    }
}

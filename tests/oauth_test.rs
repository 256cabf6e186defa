//! Integration tests for the OAuth2 password grant.

use docusign::{auth, Client, Credentials, DocuSignError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_request_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("client_id=very-secret"))
        .and(body_string_contains("username=johndoe"))
        .and(body_string_contains("scope=api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-token",
            "token_type": "bearer",
            "scope": "api"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/login_information"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "loginAccounts": [{ "accountId": "1703061" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let root = mock_server.uri();
    let token = auth::request_token(&root, "johndoe", "secret", "very-secret")
        .await
        .unwrap();
    assert_eq!(token, "fresh-token");

    let client = Client::new(&root, Credentials::OAuth2 { token }).unwrap();
    client.accounts().login_information().await.unwrap();
}

#[tokio::test]
async fn test_request_token_invalid_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_client",
            "error_description": "The client ID is not recognized."
        })))
        .mount(&mock_server)
        .await;

    let err = auth::request_token(&mock_server.uri(), "johndoe", "secret", "bad-key")
        .await
        .unwrap_err();

    assert!(err.is_oauth2());
    assert!(err.is_auth_error());
    match err {
        DocuSignError::OAuth2 {
            status,
            error,
            description,
            body,
        } => {
            assert_eq!(status, 400);
            assert_eq!(error, "invalid_client");
            assert_eq!(description.as_deref(), Some("The client ID is not recognized."));
            assert_eq!(body["error"], "invalid_client");
        }
        other => panic!("Expected OAuth2 error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_token_non_json_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = auth::request_token(&mock_server.uri(), "johndoe", "secret", "very-secret")
        .await
        .unwrap_err();

    match err {
        DocuSignError::OAuth2 { status, error, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(error, "unknown");
            assert_eq!(body, serde_json::Value::String("Internal Server Error".to_string()));
        }
        other => panic!("Expected OAuth2 error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_revoke_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/revoke"))
        .and(body_string_contains("token=fresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    auth::revoke_token(&mock_server.uri(), "fresh-token").await.unwrap();
}

#[tokio::test]
async fn test_token_request_uses_client_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header(
            "User-Agent",
            format!("docusign-rust/{}", env!("CARGO_PKG_VERSION")).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-token"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let token = auth::request_token(&mock_server.uri(), "johndoe", "secret", "very-secret")
        .await
        .unwrap();
    assert_eq!(token, "fresh-token");
}

#[tokio::test]
async fn test_token_request_transport_error() {
    // Nothing listens on port 1.
    let err = auth::request_token("http://127.0.0.1:1", "johndoe", "secret", "very-secret")
        .await
        .unwrap_err();

    match err {
        DocuSignError::Transport { method, url, .. } => {
            assert_eq!(method, "POST");
            assert_eq!(url, "http://127.0.0.1:1/oauth2/token");
        }
        other => panic!("Expected Transport error, got {:?}", other),
    }
}

//! Integration tests for templates.

use docusign::{Client, ClientConfig};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_template() {
    let mock_server = MockServer::start().await;
    let template_id = Uuid::parse_str("00000000-0000-0000-0000-000000000007").unwrap();

    Mock::given(method("GET"))
        .and(path(format!("/accounts/1703061/templates/{}", template_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "envelopeTemplateDefinition": { "templateId": template_id.to_string() }
        })))
        .mount(&mock_server)
        .await;

    let client = Client::with_config(ClientConfig {
        root_url: Some(mock_server.uri()),
        account_id: Some("1703061".to_string()),
        oauth2_token: Some("some-oauth2-token".to_string()),
        ..Default::default()
    })
    .unwrap();

    let template = client.templates().get(&template_id).await.unwrap();
    assert_eq!(
        template["envelopeTemplateDefinition"]["templateId"],
        template_id.to_string()
    );
}

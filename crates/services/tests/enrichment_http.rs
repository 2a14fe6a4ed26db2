use services::{ChatEnricher, EnrichError, Enricher, EnricherConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn enricher(server: &MockServer) -> ChatEnricher {
    ChatEnricher::new(Some(EnricherConfig {
        base_url: format!("{}/v1", server.uri()),
        api_key: "test-key".into(),
        model: "test-model".into(),
    }))
}

#[tokio::test]
async fn enrich_parses_chat_reply() {
    let server = MockServer::start().await;

    let content = serde_json::json!({
        "entries": [
            {
                "term": "Mitigate",
                "vietnameseTranslation": "Giảm nhẹ",
                "definition": "To make something less severe.",
                "example": "Trees mitigate flooding.",
                "bandLevel": "7.5",
                "collocations": ["mitigate the risk"]
            }
        ]
    })
    .to_string();
    let response_body = serde_json::json!({
        "choices": [{"message": {"content": content, "role": "assistant"}, "index": 0}],
        "model": "test-model"
    });

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
        .mount(&server)
        .await;

    let entries = enricher(&server).enrich("mitigate: giảm nhẹ").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].term, "Mitigate");
    assert_eq!(entries[0].translation, "Giảm nhẹ");
    assert_eq!(entries[0].collocations, vec!["mitigate the risk".to_string()]);
}

#[tokio::test]
async fn enrich_surfaces_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = enricher(&server).enrich("anything").await.unwrap_err();
    assert!(matches!(err, EnrichError::HttpStatus(status) if status.as_u16() == 429));
}

#[tokio::test]
async fn enrich_rejects_empty_content() {
    let server = MockServer::start().await;

    let response_body = serde_json::json!({
        "choices": [{"message": {"content": null, "role": "assistant"}, "index": 0}]
    });
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
        .mount(&server)
        .await;

    let err = enricher(&server).enrich("anything").await.unwrap_err();
    assert!(matches!(err, EnrichError::EmptyResponse));
}

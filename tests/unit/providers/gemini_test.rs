use translingua::providers::Provider;
use translingua::providers::gemini::{
    Gemini, GeminiModel, GenerateContentRequest, GenerateContentResponse, ListModelsResponse,
    qualified_model_name,
};
use translingua::errors::{ProviderError, TranslationError};
use translingua::model_discovery::discover_model;
use translingua::providers::{ModelCatalog, ModelInfo};
use translingua::translation::Translator;

use crate::common;

#[test]
fn test_gemini_request_shouldSerializeSingleUserTurn() {
    let request = GenerateContentRequest::new("Translate this");

    let json = serde_json::to_string(&request).expect("Failed to serialize request");

    assert_eq!(json, r#"{"contents":[{"role":"user","parts":[{"text":"Translate this"}]}]}"#);
}

#[test]
fn test_gemini_promptRequest_shouldBeSingleUserTurn() {
    let model: GeminiModel = Gemini::new("key", "", "v1beta").model("gemini-1.5-flash");
    let request = model.prompt_request("Hello");

    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(value["contents"].as_array().unwrap().len(), 1);
    assert_eq!(value["contents"][0]["parts"][0]["text"], "Hello");
    assert!(value.get("generationConfig").is_none());
}

#[test]
fn test_gemini_extract_text() {
    let response: GenerateContentResponse = serde_json::from_str(r#"{
        "candidates": [
            {
                "content": { "role": "model", "parts": [ { "text": "Hola, " }, { "text": "mundo\n" } ] },
                "finishReason": "STOP"
            },
            {
                "content": { "role": "model", "parts": [ { "text": "ignored" } ] }
            }
        ],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 3, "totalTokenCount": 15 }
    }"#).expect("Failed to parse response");

    assert_eq!(GeminiModel::extract_text(&response), "Hola, mundo\n");
    assert_eq!(response.usage_metadata.unwrap().total_token_count, 15);
}

#[test]
fn test_gemini_extract_text_withoutCandidates_shouldBeEmpty() {
    let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(Gemini::extract_text_from_response(&response), "");
}

#[test]
fn test_gemini_listModels_shouldParsePage() {
    let page: ListModelsResponse = serde_json::from_str(r#"{
        "models": [
            {
                "name": "models/embedding-001",
                "displayName": "Embedding 001",
                "supportedGenerationMethods": ["embedContent"]
            },
            {
                "name": "models/gemini-1.5-flash",
                "displayName": "Gemini 1.5 Flash",
                "inputTokenLimit": 1000000,
                "supportedGenerationMethods": ["generateContent", "countTokens"]
            }
        ],
        "nextPageToken": "abc"
    }"#).expect("Failed to parse listing");

    assert_eq!(page.next_page_token.as_deref(), Some("abc"));
    let models: Vec<ModelInfo> = page.models.into_iter().map(ModelInfo::from).collect();
    assert!(!models[0].supports_generation());
    assert!(models[1].supports_generation());
    assert_eq!(models[1].display_name.as_deref(), Some("Gemini 1.5 Flash"));
}

#[test]
fn test_gemini_baseUrl_shouldJoinEndpointAndVersion() {
    assert_eq!(
        Gemini::new("key", "", "v1beta").base_url(),
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert_eq!(Gemini::new("key", "http://localhost:8080/", "/v1/").base_url(), "http://localhost:8080/v1");
}

#[test]
fn test_gemini_debug_shouldRedactApiKey() {
    let debug = format!("{:?}", Gemini::new("super-secret", "", "v1beta"));
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_qualifiedModelName_shouldPrefixBareIds() {
    assert_eq!(qualified_model_name("gemini-1.5-flash"), "models/gemini-1.5-flash");
    assert_eq!(qualified_model_name("models/gemini-pro"), "models/gemini-pro");
    assert_eq!(qualified_model_name("tunedModels/my-model"), "tunedModels/my-model");
    assert_eq!(Gemini::new("k", "", "v1").model("gemini-pro").name(), "models/gemini-pro");
}

#[tokio::test]
async fn test_gemini_discovery_shouldFollowPagesInOrder() -> anyhow::Result<()> {
    let first_page = r#"{
        "models": [
            { "name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"] }
        ],
        "nextPageToken": "page-2"
    }"#;
    let second_page = r#"{
        "models": [
            { "name": "models/aqa", "supportedGenerationMethods": ["generateAnswer"] },
            { "name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent"] },
            { "name": "models/gemini-1.5-pro", "supportedGenerationMethods": ["generateContent"] }
        ]
    }"#;
    let (base_url, server) = common::spawn_stub_server(vec![
        (200, first_page.to_string()),
        (200, second_page.to_string()),
    ]).await?;
    let gemini = Gemini::new("test-key", &base_url, "v1beta");

    let selected = discover_model(&gemini).await?;

    assert_eq!(selected, "models/gemini-1.5-flash");
    let requests = server.await?;
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("GET /v1beta/models "));
    assert!(requests[1].starts_with("GET /v1beta/models?pageToken=page-2 "));
    Ok(())
}

#[tokio::test]
async fn test_gemini_listModels_withAuthFailure_shouldClassifyStatus() -> anyhow::Result<()> {
    let (base_url, server) = common::spawn_stub_server(vec![
        (403, r#"{"error":{"message":"API key not valid"}}"#.to_string()),
    ]).await?;
    let gemini = Gemini::new("bad-key", &base_url, "v1beta");

    let result = gemini.list_models().await;

    match result {
        Err(ProviderError::AuthenticationError(message)) => assert!(message.contains("API key not valid")),
        other => panic!("Unexpected result: {:?}", other),
    }
    server.await?;
    Ok(())
}

#[tokio::test]
async fn test_gemini_translate_withQuotaExhausted_shouldReachCallerAsRateLimit() -> anyhow::Result<()> {
    let (base_url, server) = common::spawn_stub_server(vec![
        (429, r#"{"error":{"code":429,"message":"Resource has been exhausted"}}"#.to_string()),
    ]).await?;
    let model = Gemini::new("test-key", &base_url, "v1beta").model("gemini-1.5-flash");

    let result = Translator::new(&model).translate("Hello", "English", "Spanish").await;

    match result {
        Err(TranslationError::Provider(ProviderError::RateLimitExceeded(message))) => {
            assert!(message.contains("Resource has been exhausted"));
        }
        other => panic!("Unexpected result: {:?}", other),
    }
    let requests = server.await?;
    assert_eq!(requests, vec!["POST /v1beta/models/gemini-1.5-flash:generateContent HTTP/1.1".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_gemini_translate_withSuccess_shouldReturnTrimmedText() -> anyhow::Result<()> {
    let body = r#"{
        "candidates": [ { "content": { "role": "model", "parts": [ { "text": "  Hola\n" } ] }, "finishReason": "STOP" } ],
        "usageMetadata": { "promptTokenCount": 20, "candidatesTokenCount": 2, "totalTokenCount": 22 }
    }"#;
    let (base_url, server) = common::spawn_stub_server(vec![(200, body.to_string())]).await?;
    let model = Gemini::new("test-key", &base_url, "v1beta").model("gemini-1.5-flash");

    let text = Translator::new(&model).translate("Hello", "English", "Spanish").await?;

    assert_eq!(text, "Hola");
    server.await?;
    Ok(())
}

// This test is disabled by default as it requires real API credentials
#[ignore]
#[tokio::test]
async fn test_integration_with_real_api() {
    let api_key = std::env::var("GEMINI_API_KEY")
        .expect("GEMINI_API_KEY environment variable not set");
    let gemini = Gemini::new(api_key, "", "v1beta");

    let model_name = discover_model(&gemini).await.expect("model discovery failed");
    let model = gemini.model(model_name);

    let text = Translator::new(&model)
        .translate("Good morning", "English", "French")
        .await
        .expect("translation failed");

    assert!(text.to_lowercase().contains("bonjour"), "Unexpected translation: {}", text);
}

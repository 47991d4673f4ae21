/*!
 * Tests for prompt construction and the translator contract
 */

use translingua::errors::{ProviderError, TranslationError};
use translingua::providers::mock::MockProvider;
use translingua::translation::{PromptTemplate, TranslationRequest, Translator, build_translation_prompt};
use translingua::SupportedLanguage;

use crate::common;

/// Every supported pair puts text and both names into the prompt verbatim
#[test]
fn test_buildPrompt_withAllLanguagePairs_shouldContainTextAndLanguages() {
    let text = "The quick brown fox\njumps over {the} lazy dog";

    for source in SupportedLanguage::ALL {
        for target in SupportedLanguage::ALL {
            let prompt = build_translation_prompt(text, source.display_name(), target.display_name());

            assert!(prompt.contains(text), "text missing for {} -> {}", source, target);
            assert!(prompt.contains(&format!("from {} to {}", source, target)));
            assert!(prompt.contains("Return ONLY the translated text."));
        }
    }
}

#[test]
fn test_promptTemplate_default_shouldBeTranslator() {
    let rendered = PromptTemplate::default().render("English", "Hindi", "Hi");
    assert_eq!(rendered, build_translation_prompt("Hi", "English", "Hindi"));
}

#[tokio::test]
async fn test_translate_shouldSendPromptToClient() {
    common::init_logging();
    let provider = MockProvider::replying("Bonjour");
    let translator = Translator::new(&provider);

    translator.translate("Hello", "English", "French").await.unwrap();

    assert_eq!(provider.request_count(), 1);
    assert_eq!(
        provider.last_prompt().unwrap(),
        build_translation_prompt("Hello", "English", "French")
    );
}

#[tokio::test]
async fn test_translate_withPaddedCompletion_shouldTrimWhitespaceOnly() {
    let provider = MockProvider::replying("  Hola  \n");
    let translator = Translator::new(&provider);

    let result = translator.translate("Hello", "English", "Spanish").await.unwrap();

    assert_eq!(result, "Hola");
}

#[tokio::test]
async fn test_translate_withInnerWhitespace_shouldKeepIt() {
    let provider = MockProvider::replying("\n Line one\n\nLine two \t");
    let translator = Translator::new(&provider);

    let result = translator.translate("x", "English", "German").await.unwrap();

    assert_eq!(result, "Line one\n\nLine two");
}

#[tokio::test]
async fn test_translate_withFailingClient_shouldPropagateError() {
    let provider = MockProvider::failing();
    let translator = Translator::new(&provider);

    let result = translator.translate("Hello", "English", "Spanish").await;

    match result {
        Err(TranslationError::Provider(ProviderError::ApiError { status_code, .. })) => {
            assert_eq!(status_code, 500);
        }
        other => panic!("Unexpected result: {:?}", other),
    }
    // No retry
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_translate_errorDisplay_shouldBeClientMessage() {
    let provider = MockProvider::failing();
    let error = Translator::new(&provider)
        .translate("Hello", "English", "Spanish")
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "API responded with error: 500 - Simulated provider failure");
}

#[tokio::test]
async fn test_translate_calledTwice_shouldReturnSameResult() {
    let provider = MockProvider::replying("Hola");
    let translator = Translator::new(&provider);

    let first = translator.translate("Hello", "English", "Spanish").await.unwrap();
    let second = translator.translate("Hello", "English", "Spanish").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_translate_englishToTamil_shouldReturnCompletionExactly() {
    let provider = MockProvider::replying("காலை வணக்கம்");
    let translator = Translator::new(&provider);

    let result = translator.translate("Good morning", "English", "Tamil").await.unwrap();

    assert_eq!(result, "காலை வணக்கம்");
}

#[tokio::test]
async fn test_translate_withUnsupportedLanguage_shouldPassItThrough() {
    let provider = MockProvider::replying("ok");
    let translator = Translator::new(&provider);

    translator.translate("Hello", "English", "Klingon").await.unwrap();

    assert!(provider.last_prompt().unwrap().contains("from English to Klingon."));
}

#[tokio::test]
async fn test_translate_withEmptyCompletion_shouldReturnEmptyString() {
    let provider = MockProvider::empty();

    let result = Translator::new(&provider).translate("Hello", "English", "Urdu").await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn test_translateRequest_shouldUseDisplayNames() {
    let provider = MockProvider::replying(" नमस्ते ");
    let request = TranslationRequest::new("Hello", SupportedLanguage::English, SupportedLanguage::Hindi)
        .expect("non-blank text");

    let result = Translator::new(&provider).translate_request(&request).await.unwrap();

    assert_eq!(result.translated_text, "नमस्ते");
    assert!(provider.last_prompt().unwrap().contains("from English to Hindi."));
}

#[test]
fn test_translationRequest_withBlankText_shouldBeRejected() {
    assert!(TranslationRequest::new("", SupportedLanguage::English, SupportedLanguage::Hindi).is_none());
    assert!(TranslationRequest::new(" \n\t ", SupportedLanguage::English, SupportedLanguage::Hindi).is_none());
    assert!(TranslationRequest::new(" a ", SupportedLanguage::English, SupportedLanguage::Hindi).is_some());
}

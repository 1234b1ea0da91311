/*!
 * Tests for the external-call adapter
 */

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use docxlate::errors::TranslationError;
use docxlate::providers::mock::MockProvider;
use docxlate::translation::invoker::sample_excerpt;
use docxlate::translation::{CooldownPolicy, TranslationInvoker, TranslationRequest};

fn invoker_with(provider: MockProvider) -> TranslationInvoker {
    TranslationInvoker::with_mock(provider, CooldownPolicy::disabled())
}

fn request<'a>(text: &'a str) -> TranslationRequest<'a> {
    TranslationRequest {
        text,
        origin_lang: "Spanish",
        destiny_lang: "English",
        domain_context: "a short story",
        doc_features: "10 words",
        preceding_context: "",
        following_context: "",
    }
}

#[tokio::test]
async fn test_invoke_shouldReturnTranslationAndCost() {
    let provider = MockProvider::working().with_custom_response(|req| {
        assert_eq!(req.text, "hola");
        "hello".to_string()
    });
    let invoker = invoker_with(provider);

    let outcome = invoker.invoke(&request("hola")).await.unwrap();

    assert_eq!(outcome.text, "hello");
    assert!(outcome.cost > 0.0);
}

#[tokio::test]
async fn test_invoke_shouldRepairEdgeWhitespace() {
    let provider = MockProvider::working().with_custom_response(|_| "hello".to_string());
    let invoker = invoker_with(provider);

    let outcome = invoker.invoke(&request(" hola ")).await.unwrap();

    assert_eq!(outcome.text, " hello ");
}

#[tokio::test]
async fn test_invoke_withFailingProvider_shouldSurfaceError() {
    let invoker = invoker_with(MockProvider::failing());

    let result = invoker.invoke(&request("hola")).await;

    assert!(matches!(result, Err(TranslationError::Provider(_))));
}

#[tokio::test]
async fn test_invoke_withEmptyCompletion_shouldFail() {
    let invoker = invoker_with(MockProvider::empty());

    let result = invoker.invoke(&request("hola")).await;

    assert!(matches!(
        result,
        Err(TranslationError::EmptyTranslation { .. })
    ));
}

#[tokio::test]
async fn test_translatePlain_shouldTranslateBareText() {
    let provider = MockProvider::working().with_custom_response(|req| {
        assert_eq!(req.text, "informe");
        "report".to_string()
    });
    let invoker = invoker_with(provider);

    let outcome = invoker
        .translate_plain("informe", "Spanish", "English")
        .await
        .unwrap();

    assert_eq!(outcome.text, "report");
}

#[tokio::test]
async fn test_inferTopic_shouldPassBothExcerpts() {
    let provider = MockProvider::working().with_custom_response(|req| {
        assert!(req.text.contains("EXCERPT 1"));
        assert!(req.text.contains("EXCERPT 2"));
        "  a technical manual  ".to_string()
    });
    let invoker = invoker_with(provider);

    let (topic, cost) = invoker
        .infer_topic("first excerpt", "second excerpt", "Spanish")
        .await
        .unwrap();

    assert_eq!(topic, "a technical manual");
    assert!(cost > 0.0);
}

#[tokio::test]
async fn test_testConnection_shouldReflectBackendHealth() {
    assert!(invoker_with(MockProvider::working())
        .test_connection()
        .await
        .is_ok());
    assert!(invoker_with(MockProvider::failing())
        .test_connection()
        .await
        .is_err());
}

#[tokio::test]
async fn test_disabledCooldown_shouldNotPause() {
    let policy = CooldownPolicy::disabled();

    let start = Instant::now();
    policy.pause().await;

    assert!(start.elapsed() < Duration::from_millis(50));
}

#[test]
fn test_sampleExcerpt_withSeededRng_shouldBeDeterministic() {
    let sentences = vec!["a", "b", "c", "d", "e", "f", "g", "h"];

    let mut rng1 = StdRng::seed_from_u64(7);
    let mut rng2 = StdRng::seed_from_u64(7);

    let one = sample_excerpt(&sentences, 3, &mut rng1);
    let two = sample_excerpt(&sentences, 3, &mut rng2);

    assert_eq!(one, two);
    assert_eq!(one.split_whitespace().count(), 3);
}

#[test]
fn test_sampleExcerpt_withShortInput_shouldTakeEverything() {
    let sentences = vec!["only", "two"];
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(sample_excerpt(&sentences, 5, &mut rng), "only two");
}

#[test]
fn test_sampleExcerpt_withEmptyInput_shouldBeEmpty() {
    let sentences: Vec<&str> = Vec::new();
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(sample_excerpt(&sentences, 5, &mut rng), "");
}

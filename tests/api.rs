use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use news_summarizer::api::routes::create_router;
use news_summarizer::dataset::{DatasetStore, NewsStory, Split};
use news_summarizer::error::Result;
use news_summarizer::rouge::RougeScorer;
use news_summarizer::summarizer::{GenerationParams, SummaryBackend, Summarizer};
use news_summarizer::AppState;

/// Stand-in generation backend: repeats the first few words of the input.
struct EchoBackend;

impl SummaryBackend for EchoBackend {
    fn generate(&self, text: &str, _params: &GenerationParams) -> Result<String> {
        let head: Vec<&str> = text.split_whitespace().take(6).collect();
        Ok(head.join(" "))
    }
}

fn test_router(with_dataset: bool) -> Router {
    let dataset = with_dataset.then(|| {
        Arc::new(DatasetStore::from_stories(
            Split::Test,
            vec![
                NewsStory {
                    article: "Five Americans were monitored for three weeks at a hospital."
                        .to_string(),
                    highlights: "Five Americans monitored at a hospital .".to_string(),
                },
                NewsStory {
                    article: "A second article about something else entirely.".to_string(),
                    highlights: "A second highlight .".to_string(),
                },
            ],
        ))
    });

    let state = AppState {
        summarizer: Summarizer::new(Arc::new(EchoBackend)),
        dataset,
        scorer: Arc::new(RougeScorer::new(true)),
    };

    create_router(state)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn index_serves_the_form() {
    let response = test_router(false)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Summarize"));
    assert!(page.contains("/api/summarize"));
}

#[tokio::test]
async fn summarize_returns_a_summary() {
    let (status, body) = post_json(
        test_router(false),
        "/api/summarize",
        json!({ "text": "A long article with many words that should be summarized." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["status"], "success");
    assert_eq!(body["data"]["summary"], "A long article with many words");
    assert_eq!(body["data"]["word_count"], 6);
}

#[tokio::test]
async fn summarize_rejects_blank_text() {
    let (status, body) = post_json(
        test_router(false),
        "/api/summarize",
        json!({ "text": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("empty input"));
}

#[tokio::test]
async fn summarize_rejects_inverted_length_bounds() {
    let (status, body) = post_json(
        test_router(false),
        "/api/summarize",
        json!({ "text": "some text", "min_length": 200, "max_length": 100 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("invalid generation parameters"));
}

#[tokio::test]
async fn evaluate_without_dataset_is_unavailable() {
    let (status, body) = post_json(
        test_router(false),
        "/api/evaluate",
        json!({ "sample_count": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("dependency unavailable"));
}

#[tokio::test]
async fn evaluate_scores_requested_rows_in_order() {
    let (status, body) = post_json(
        test_router(true),
        "/api/evaluate",
        json!({ "split": "test", "sample_count": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let samples = body["data"]["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 2);
    for (i, sample) in samples.iter().enumerate() {
        assert_eq!(sample["index"], i);
        assert!(!sample["generated_summary"].as_str().unwrap().is_empty());
        assert!(sample["rouge"]["rouge1"]["fmeasure"].is_number());
    }
    assert!(body["data"]["mean"]["rouge1"].is_number());
}

#[tokio::test]
async fn evaluate_with_out_of_range_count_fails() {
    let (status, body) = post_json(
        test_router(true),
        "/api/evaluate",
        json!({ "sample_count": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid dataset index"));
}

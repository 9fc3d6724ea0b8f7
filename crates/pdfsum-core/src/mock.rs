//! Mock backend for testing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::api::{ApiError, ApiFuture, SummarizerApi};
use crate::types::{EvaluationRow, ExtractResponse, SummarizeRequest, SummarizeResponse};

/// A scripted reply for one [`MockApi`] endpoint.
#[derive(Clone, Debug)]
pub enum MockResponse<T> {
    Ok(T),
    Err(ApiError),
}

impl<T: Clone> MockResponse<T> {
    fn to_result(&self) -> Result<T, ApiError> {
        match self {
            MockResponse::Ok(v) => Ok(v.clone()),
            MockResponse::Err(e) => Err(e.clone()),
        }
    }
}

/// A hand-rolled [`SummarizerApi`] for tests.
///
/// Every endpoint returns a fixed response (configurable per endpoint), counts
/// its calls, and can be slowed down with [`with_delay`](MockApi::with_delay).
/// Uploaded file names and summarize bodies are recorded for assertions.
pub struct MockApi {
    extract: MockResponse<String>,
    summary: MockResponse<SummarizeResponse>,
    evaluate: MockResponse<()>,
    results: MockResponse<Vec<EvaluationRow>>,
    image: MockResponse<Vec<u8>>,
    delay: Option<Duration>,
    extract_calls: AtomicUsize,
    summarize_calls: AtomicUsize,
    evaluate_calls: AtomicUsize,
    results_calls: AtomicUsize,
    image_calls: AtomicUsize,
    uploaded: Mutex<Vec<String>>,
    summarize_requests: Mutex<Vec<SummarizeRequest>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    /// A mock where every call succeeds with empty-ish data.
    pub fn new() -> Self {
        Self {
            extract: MockResponse::Ok(String::new()),
            summary: MockResponse::Ok(SummarizeResponse {
                summary: String::new(),
                keywords: None,
                runtime_sec: 0.0,
                tokens_generated: 0,
                speed_tokens_per_sec: 0.0,
            }),
            evaluate: MockResponse::Ok(()),
            results: MockResponse::Ok(Vec::new()),
            image: MockResponse::Ok(Vec::new()),
            delay: None,
            extract_calls: AtomicUsize::new(0),
            summarize_calls: AtomicUsize::new(0),
            evaluate_calls: AtomicUsize::new(0),
            results_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            uploaded: Mutex::new(Vec::new()),
            summarize_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_extract(mut self, response: MockResponse<String>) -> Self {
        self.extract = response;
        self
    }

    pub fn with_summary(mut self, response: MockResponse<SummarizeResponse>) -> Self {
        self.summary = response;
        self
    }

    pub fn with_evaluate(mut self, response: MockResponse<()>) -> Self {
        self.evaluate = response;
        self
    }

    pub fn with_results(mut self, response: MockResponse<Vec<EvaluationRow>>) -> Self {
        self.results = response;
        self
    }

    pub fn with_image(mut self, response: MockResponse<Vec<u8>>) -> Self {
        self.image = response;
        self
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub fn summarize_calls(&self) -> usize {
        self.summarize_calls.load(Ordering::SeqCst)
    }

    pub fn evaluate_calls(&self) -> usize {
        self.evaluate_calls.load(Ordering::SeqCst)
    }

    pub fn results_calls(&self) -> usize {
        self.results_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    /// File names passed to `extract_text`, in call order.
    pub fn uploaded_names(&self) -> Vec<String> {
        self.uploaded.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Bodies passed to `summarize`, in call order.
    pub fn summarize_requests(&self) -> Vec<SummarizeRequest> {
        self.summarize_requests
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    async fn pause(&self) {
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
    }
}

impl SummarizerApi for MockApi {
    fn extract_text<'a>(&'a self, file_name: &'a str, _bytes: Vec<u8>) -> ApiFuture<'a, ExtractResponse> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut names) = self.uploaded.lock() {
            names.push(file_name.to_string());
        }
        Box::pin(async move {
            self.pause().await;
            self.extract.to_result().map(|text| ExtractResponse {
                text,
                filename: Some(file_name.to_string()),
                message: None,
            })
        })
    }

    fn summarize<'a>(&'a self, request: &'a SummarizeRequest) -> ApiFuture<'a, SummarizeResponse> {
        self.summarize_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.summarize_requests.lock() {
            requests.push(request.clone());
        }
        Box::pin(async move {
            self.pause().await;
            self.summary.to_result()
        })
    }

    fn evaluate<'a>(&'a self, _text: &'a str) -> ApiFuture<'a, ()> {
        self.evaluate_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.pause().await;
            self.evaluate.to_result()
        })
    }

    fn evaluation_results(&self) -> ApiFuture<'_, Vec<EvaluationRow>> {
        self.results_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.pause().await;
            self.results.to_result()
        })
    }

    fn fetch_image<'a>(&'a self, _url: &'a str) -> ApiFuture<'a, Vec<u8>> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            self.pause().await;
            self.image.to_result()
        })
    }
}

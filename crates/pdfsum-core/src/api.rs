//! Backend client trait and its reqwest implementation.

use std::future::Future;
use std::pin::Pin;

use reqwest::multipart::{Form, Part};
use thiserror::Error;

use crate::types::{EvaluateRequest, EvaluationRow, ExtractResponse, SummarizeRequest, SummarizeResponse};

/// Boxed future returned by every [`SummarizerApi`] call.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Failure of a single backend request.
///
/// `Display` is the message shown to the user: the backend's `detail` when it
/// sent one, the transport error otherwise.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),
    #[error("{detail}")]
    Backend { status: u16, detail: String },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a backend error from a non-2xx status and its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").cloned())
            .and_then(|detail| match detail {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) if s.is_empty() => None,
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        ApiError::Backend { status, detail }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// The summarization backend as seen by the client.
pub trait SummarizerApi: Send + Sync {
    /// Upload a PDF and return the extracted text.
    fn extract_text<'a>(&'a self, file_name: &'a str, bytes: Vec<u8>) -> ApiFuture<'a, ExtractResponse>;

    /// Summarize extracted text with the given model.
    fn summarize<'a>(&'a self, request: &'a SummarizeRequest) -> ApiFuture<'a, SummarizeResponse>;

    /// Trigger the benchmark pipeline. Only success or failure matters.
    fn evaluate<'a>(&'a self, text: &'a str) -> ApiFuture<'a, ()>;

    /// Fetch the benchmark table, in backend order.
    fn evaluation_results(&self) -> ApiFuture<'_, Vec<EvaluationRow>>;

    /// Fetch a static image by absolute URL.
    fn fetch_image<'a>(&'a self, url: &'a str) -> ApiFuture<'a, Vec<u8>>;
}

/// [`SummarizerApi`] over HTTP.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }
}

/// Turn a non-2xx response into [`ApiError::Backend`].
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::from_response(status.as_u16(), &body))
}

impl SummarizerApi for HttpApi {
    fn extract_text<'a>(&'a self, file_name: &'a str, bytes: Vec<u8>) -> ApiFuture<'a, ExtractResponse> {
        Box::pin(async move {
            let part = Part::bytes(bytes)
                .file_name(file_name.to_string())
                .mime_str("application/pdf")?;
            let form = Form::new().part("file", part);

            let resp = self
                .client
                .post(self.endpoint("extract-text"))
                .multipart(form)
                .send()
                .await?;
            let resp = check_status(resp).await?;
            Ok(resp.json::<ExtractResponse>().await?)
        })
    }

    fn summarize<'a>(&'a self, request: &'a SummarizeRequest) -> ApiFuture<'a, SummarizeResponse> {
        Box::pin(async move {
            let resp = self
                .client
                .post(self.endpoint("summarize"))
                .json(request)
                .send()
                .await?;
            let resp = check_status(resp).await?;
            Ok(resp.json::<SummarizeResponse>().await?)
        })
    }

    fn evaluate<'a>(&'a self, text: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let resp = self
                .client
                .post(self.endpoint("evaluate"))
                .json(&EvaluateRequest { text })
                .send()
                .await?;
            check_status(resp).await?;
            Ok(())
        })
    }

    fn evaluation_results(&self) -> ApiFuture<'_, Vec<EvaluationRow>> {
        Box::pin(async move {
            let resp = self
                .client
                .get(self.endpoint("evaluation-results"))
                .send()
                .await?;
            let resp = check_status(resp).await?;
            Ok(resp.json::<Vec<EvaluationRow>>().await?)
        })
    }

    fn fetch_image<'a>(&'a self, url: &'a str) -> ApiFuture<'a, Vec<u8>> {
        Box::pin(async move {
            let resp = self.client.get(url).send().await?;
            let resp = check_status(resp).await?;

            // A 200 that isn't an image (an HTML error page, say) still counts
            // as a failed load.
            if let Some(content_type) = resp
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                && !content_type.starts_with("image/")
            {
                return Err(ApiError::Decode(format!(
                    "expected an image, got {content_type}"
                )));
            }

            Ok(resp.bytes().await?.to_vec())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let err = ApiError::from_response(400, r#"{"detail":"File must be a PDF"}"#);
        assert_eq!(err.to_string(), "File must be a PDF");
        assert!(matches!(err, ApiError::Backend { status: 400, .. }));
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let err = ApiError::from_response(
            422,
            r#"{"detail":[{"loc":["body","text"],"msg":"field required"}]}"#,
        );
        let msg = err.to_string();
        assert!(msg.contains("field required"), "{msg}");
    }

    #[test]
    fn missing_detail_falls_back_to_status_message() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Request failed with status code 502");

        let err = ApiError::from_response(500, r#"{"detail":""}"#);
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let api = HttpApi::new("http://localhost:8000/");
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.endpoint("summarize"), "http://localhost:8000/api/summarize");
    }
}

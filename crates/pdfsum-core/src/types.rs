//! Request and response bodies exchanged with the summarization backend.

use serde::{Deserialize, Deserializer, Serialize};

/// Response of `POST /api/extract-text`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/summarize`.
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// Response of `POST /api/summarize`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_f64")]
    pub runtime_sec: f64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tokens_generated: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub speed_tokens_per_sec: f64,
}

/// Body of `POST /api/evaluate`.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateRequest<'a> {
    pub text: &'a str,
}

/// One benchmark record from `GET /api/evaluation-results`.
///
/// The backend serves these straight from a CSV with blank cells filled by
/// `""`, so every numeric column tolerates strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluationRow {
    pub model: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub runtime_s: f64,
    #[serde(deserialize_with = "lenient_u64")]
    pub tokens: u64,
    #[serde(rename = "memory_MB", deserialize_with = "lenient_f64")]
    pub memory_mb: f64,
    #[serde(rename = "ROUGE1", deserialize_with = "lenient_f64")]
    pub rouge1: f64,
    #[serde(rename = "ROUGE2", deserialize_with = "lenient_f64")]
    pub rouge2: f64,
    #[serde(rename = "ROUGEL", deserialize_with = "lenient_f64")]
    pub rougel: f64,
    #[serde(rename = "BERTScore_F1", deserialize_with = "lenient_f64")]
    pub bertscore_f1: f64,
    #[serde(default)]
    pub summary: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Null(()),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Null(()) => Ok(0.0),
        NumberOrText::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| serde::de::Error::custom(format!("expected a number, got {s:?}")))
        }
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value.round() as u64)
    } else {
        Err(serde::de::Error::custom(format!(
            "expected a non-negative count, got {value}"
        )))
    }
}

//! The three benchmark chart images served by the backend.

use crate::api::{ApiError, SummarizerApi};

/// Shown in place of a chart that failed to load.
pub const FALLBACK_IMAGE_URL: &str = "https://placehold.co/400x300?text=Chart+Not+Found";

pub struct ChartSpec {
    pub title: &'static str,
    pub file: &'static str,
}

pub const CHARTS: [ChartSpec; 3] = [
    ChartSpec {
        title: "Runtime vs Quality",
        file: "runtime_vs_quality.png",
    },
    ChartSpec {
        title: "Runtime vs ROUGE",
        file: "runtime_vs_rouge.png",
    },
    ChartSpec {
        title: "Memory Usage",
        file: "memory_usage.png",
    },
];

/// `<base>/static/<file>?t=<timestamp>`
pub fn chart_url(base_url: &str, file: &str, timestamp: i64) -> String {
    format!(
        "{}/static/{}?t={}",
        base_url.trim_end_matches('/'),
        file,
        timestamp
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartState {
    Loading,
    Loaded {
        bytes: usize,
        dimensions: Option<(u32, u32)>,
    },
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ChartImage {
    pub title: &'static str,
    pub url: String,
    pub state: ChartState,
}

impl ChartImage {
    /// The URL currently displayed: the chart itself, or the placeholder once
    /// it has failed.
    pub fn source(&self) -> &str {
        match self.state {
            ChartState::Fallback => FALLBACK_IMAGE_URL,
            _ => &self.url,
        }
    }
}

/// The chart row for one evaluation timestamp.
#[derive(Debug, Clone)]
pub struct ChartGallery {
    pub timestamp: i64,
    pub images: Vec<ChartImage>,
}

impl ChartGallery {
    pub fn new(base_url: &str, timestamp: i64) -> Self {
        let images = CHARTS
            .iter()
            .map(|spec| ChartImage {
                title: spec.title,
                url: chart_url(base_url, spec.file, timestamp),
                state: ChartState::Loading,
            })
            .collect();
        Self { timestamp, images }
    }

    pub fn urls(&self) -> Vec<String> {
        self.images.iter().map(|i| i.url.clone()).collect()
    }

    /// Record the fetch result for image `index`. Each image falls back on its
    /// own. Returns false for a result from another timestamp.
    pub fn apply(&mut self, timestamp: i64, index: usize, result: Result<Vec<u8>, ApiError>) -> bool {
        if timestamp != self.timestamp {
            return false;
        }
        let Some(image) = self.images.get_mut(index) else {
            return false;
        };
        image.state = match result {
            Ok(data) => ChartState::Loaded {
                bytes: data.len(),
                dimensions: png_dimensions(&data),
            },
            Err(err) => {
                tracing::warn!(url = %image.url, error = %err, "chart failed to load, using placeholder");
                ChartState::Fallback
            }
        };
        true
    }
}

/// Fetch one chart image.
pub async fn fetch_chart<A>(api: &A, url: &str) -> Result<Vec<u8>, ApiError>
where
    A: SummarizerApi + ?Sized,
{
    api.fetch_image(url).await
}

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Width and height from a PNG's IHDR chunk.
pub fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < 24 || &data[..8] != PNG_SIGNATURE || &data[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(data[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(data[20..24].try_into().ok()?);
    Some((width, height))
}

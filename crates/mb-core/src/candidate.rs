//! Search request/response shapes and image-candidate normalization.
//!
//! The search backend is loose about how it describes an image: a bare URL
//! string, an object with `image`, or an object with `url`. All of that
//! ambiguity is resolved here, once, at ingress. Everything downstream sees
//! a `NewItem::Image`.

use crate::error::{SceneError, SceneResult};
use crate::id::ItemId;
use crate::model::NewItem;
use crate::store::SceneStore;
use serde::{Deserialize, Serialize};

/// Category used when a candidate carries none.
pub const DEFAULT_CATEGORY: &str = "Design Inspiration";

/// Color value the picker starts at; treated as "no color preference".
const UNSET_COLOR: &str = "#000000";

// ─── Request ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchQuery {
    pub q: String,
    pub industry: String,
    pub font: String,
    pub color: String,
    pub design_style: String,
    pub image_type: bool,
    pub vector_type: bool,
    pub psd_type: bool,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            industry: String::new(),
            font: String::new(),
            color: UNSET_COLOR.into(),
            design_style: String::new(),
            image_type: true,
            vector_type: false,
            psd_type: false,
        }
    }
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    /// A query with only whitespace is never sent.
    pub fn is_sendable(&self) -> bool {
        !self.q.trim().is_empty()
    }

    /// Key/value pairs for the `/search` request. URL encoding is left to
    /// the caller; asset flags go over the wire as `"true"`/`"false"`.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let flag = |b: bool| if b { "true" } else { "false" }.to_string();
        vec![
            ("q", self.q.clone()),
            ("industry", self.industry.clone()),
            ("font", self.font.clone()),
            ("color", self.color.clone()),
            ("designStyle", self.design_style.clone()),
            ("imageType", flag(self.image_type)),
            ("vectorType", flag(self.vector_type)),
            ("psdType", flag(self.psd_type)),
        ]
    }

    /// Human-readable echo of the request, e.g.
    /// `"cafe logo | Industry: Food | Color: #aa3300"`.
    pub fn summary(&self) -> String {
        let mut out = self.q.clone();
        for (label, value) in [
            ("Industry", &self.industry),
            ("Font", &self.font),
            ("Style", &self.design_style),
        ] {
            if !value.is_empty() {
                out.push_str(&format!(" | {label}: {value}"));
            }
        }
        if !self.color.is_empty() && !self.color.eq_ignore_ascii_case(UNSET_COLOR) {
            out.push_str(&format!(" | Color: {}", self.color));
        }
        out
    }
}

// ─── Response ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResponse {
    pub images: Vec<ImageCandidate>,
    pub ai_suggestions: String,
    pub related_terms: Vec<String>,
    pub color_palette: Vec<String>,
}

impl SearchResponse {
    /// Decode a `/search` response body.
    ///
    /// # Errors
    /// `NetworkFailure` if the body is not a search response (an error page
    /// from a proxy, a truncated transfer).
    pub fn from_json(body: &str) -> SceneResult<Self> {
        serde_json::from_str(body).map_err(|e| {
            log::warn!("unusable search response: {e}");
            SceneError::NetworkFailure(format!("malformed search response: {e}"))
        })
    }
}

/// Object form of a search result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateRecord {
    pub image: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub format: Option<String>,
    pub file_type: Option<String>,
    pub source_url: Option<String>,
}

/// One image result in any of the shapes the backend emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageCandidate {
    Url(String),
    Record(CandidateRecord),
}

/// Asset class shown as a badge next to each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    Image,
    Vector,
    Psd,
}

impl AssetFormat {
    fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "vector" | "svg" => Self::Vector,
            "psd" => Self::Psd,
            _ => Self::Image,
        }
    }

    fn from_source(source: &str) -> Self {
        let path = source.split(['?', '#']).next().unwrap_or(source).to_ascii_lowercase();
        if path.ends_with(".svg") {
            Self::Vector
        } else if path.ends_with(".psd") {
            Self::Psd
        } else {
            Self::Image
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ImageCandidate {
    /// The image URL, preferring `image` over `url`.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url.trim()).filter(|s| !s.is_empty()),
            Self::Record(rec) => non_empty(&rec.image).or_else(|| non_empty(&rec.url)),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Url(_) => None,
            Self::Record(rec) => non_empty(&rec.title),
        }
    }

    pub fn category(&self) -> &str {
        match self {
            Self::Url(_) => DEFAULT_CATEGORY,
            Self::Record(rec) => non_empty(&rec.category).unwrap_or(DEFAULT_CATEGORY),
        }
    }

    /// Explicit `fileType`/`format` wins; otherwise inferred from the extension.
    pub fn format(&self) -> AssetFormat {
        if let Self::Record(rec) = self
            && let Some(label) = non_empty(&rec.file_type).or_else(|| non_empty(&rec.format))
        {
            return AssetFormat::from_label(label);
        }
        self.source().map_or(AssetFormat::Image, AssetFormat::from_source)
    }

    /// Turn the candidate into an add request, or `None` if it has no usable source.
    pub fn normalize(&self) -> Option<NewItem> {
        let mut item = NewItem::image(self.source()?);
        if let Some(title) = self.title() {
            item = item.with_title(title);
        }
        Some(item)
    }
}

/// Group candidates by category, keeping first-seen category order and
/// the original order within each group.
pub fn group_by_category(candidates: &[ImageCandidate]) -> Vec<(String, Vec<&ImageCandidate>)> {
    let mut groups: Vec<(String, Vec<&ImageCandidate>)> = Vec::new();
    for candidate in candidates {
        let category = candidate.category();
        match groups.iter_mut().find(|(name, _)| name == category) {
            Some((_, members)) => members.push(candidate),
            None => groups.push((category.to_string(), vec![candidate])),
        }
    }
    groups
}

/// Add every usable candidate to the store. Candidates without a source are
/// skipped with a warning rather than failing the batch.
pub fn ingest_images(store: &mut SceneStore, candidates: &[ImageCandidate]) -> Vec<ItemId> {
    candidates
        .iter()
        .filter_map(|candidate| match candidate.normalize() {
            Some(item) => Some(store.add(item)),
            None => {
                log::warn!("skipping image candidate without a source: {candidate:?}");
                None
            }
        })
        .collect()
}

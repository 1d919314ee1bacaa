use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::toc_item::TocItem;

/// A wiki content section as delivered by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw markdown.
    #[serde(default)]
    pub content: String,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub ext: Option<ContentExt>,
}

/// Extension fields of a content item. Keys other than `toc` are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentExt {
    /// TOC computed by the backend; its IDs match the injected heading anchors.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub toc: Option<Vec<TocItem>>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ContentItem {
    pub fn from_markdown(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_toc(mut self, toc: Vec<TocItem>) -> Self {
        self.ext.get_or_insert_with(ContentExt::default).toc = Some(toc);
        self
    }

    /// The backend TOC, when present and non-empty.
    pub fn backend_toc(&self) -> Option<&[TocItem]> {
        self.ext
            .as_ref()
            .and_then(|ext| ext.toc.as_deref())
            .filter(|toc| !toc.is_empty())
    }
}

/// Deserializes `T`, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::debug!("ignoring malformed content extension field: {err}");
            None
        }
    }))
}

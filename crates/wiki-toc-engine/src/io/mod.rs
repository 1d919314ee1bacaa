use crate::models::ContentItem;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content item JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Loads a content item from disk.
///
/// `.json` files hold a serialized [`ContentItem`] (as the backend returns
/// it); anything else is read as a bare markdown document.
pub fn load_content_item(path: &Path) -> Result<ContentItem, ContentError> {
    if !path.exists() {
        return Err(ContentError::NotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return serde_json::from_str(&raw).map_err(|source| ContentError::Json {
            path: path.to_path_buf(),
            source,
        });
    }

    let mut item = ContentItem::from_markdown(raw);
    item.title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());
    Ok(item)
}

/// Resolves `path` against `content_dir` when it does not exist as given.
pub fn resolve_content_path(path: &Path, content_dir: Option<&Path>) -> PathBuf {
    match content_dir {
        Some(dir) if path.is_relative() && !path.exists() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::now_timestamp;
use crate::wordpress::CreatedPost;

const MARKER_SUFFIX: &str = ".published";

/// Sidecar record written next to an article once it has been published.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublishMarker {
    pub post_id: u64,
    pub published_at: String,
    pub url: String,
}

impl PublishMarker {
    pub fn for_post(post: &CreatedPost) -> Result<Self> {
        Ok(Self {
            post_id: post.id,
            published_at: now_timestamp()?,
            url: post.link.clone(),
        })
    }
}

pub fn marker_path(article: &Path) -> PathBuf {
    let mut name = OsString::from(article.as_os_str());
    name.push(MARKER_SUFFIX);
    PathBuf::from(name)
}

pub fn write_marker(article: &Path, marker: &PublishMarker) -> Result<PathBuf> {
    let path = marker_path(article);
    let json = serde_json::to_string_pretty(marker).context("failed to encode publish marker")?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Returns the marker left by an earlier run, if any.
pub fn read_marker(article: &Path) -> Result<Option<PublishMarker>> {
    let path = marker_path(article);
    if !path.exists() {
        return Ok(None);
    }
    let raw =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let marker = serde_json::from_str(&raw)
        .with_context(|| format!("{}: invalid publish marker", path.display()))?;
    Ok(Some(marker))
}

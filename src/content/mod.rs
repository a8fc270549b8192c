use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

const DELIMITER: &str = "---";
const DEFAULT_STATUS: &str = "draft";

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub path: PathBuf,
    pub title: String,
    pub date: Option<String>,
    pub status: String,
    pub categories: Option<String>,
    pub tags: Option<String>,
    pub body: String,
    pub metadata: FrontMatter,
}

/// Flat `key: value` pairs from the block between the `---` lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: BTreeMap<String, String>,
}

impl FrontMatter {
    pub fn parse(block: &str) -> Self {
        let mut fields = BTreeMap::new();
        for line in block.split('\n') {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            fields.insert(key.to_string(), unquote(value.trim()).to_string());
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

pub fn load_article(path: impl AsRef<Path>) -> Result<Article> {
    let path = std::path::absolute(path.as_ref())
        .with_context(|| format!("failed to resolve {}", path.as_ref().display()))?;
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }

    let raw =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    log::debug!("read {} bytes from {}", raw.len(), path.display());

    Article::from_source(path, &raw)
}

impl Article {
    pub fn from_source(path: PathBuf, raw: &str) -> Result<Self> {
        let (metadata, body) = parse_front_matter(raw)?;

        let Some(title) = metadata.non_empty("title") else {
            bail!("title is not specified in {}", path.display());
        };
        let status = metadata
            .non_empty("status")
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());

        Ok(Self {
            path,
            title,
            date: metadata.non_empty("date"),
            status,
            categories: metadata.non_empty("categories"),
            tags: metadata.non_empty("tags"),
            body: body.to_string(),
            metadata,
        })
    }
}

/// Splits `raw` into its front matter and body.
///
/// The text must open with a `---` line and the block ends at the first
/// following `---` line that is terminated by a newline. Everything after it
/// is returned untouched.
pub fn parse_front_matter(raw: &str) -> Result<(FrontMatter, &str)> {
    let opening = format!("{DELIMITER}\n");
    let closing = format!("\n{DELIMITER}\n");

    let Some(rest) = raw.strip_prefix(opening.as_str()) else {
        bail!("front matter not found: the file must start with a --- line");
    };
    let Some(end) = rest.find(closing.as_str()) else {
        bail!("front matter not found: missing closing --- line");
    };

    let front = FrontMatter::parse(&rest[..end]);
    let body = &rest[end + closing.len()..];
    Ok((front, body))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

use anyhow::{Context, Result, anyhow};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::content::Article;
use crate::utils::now_timestamp;

const POSTS_PATH: &str = "wp-json/wp/v2/posts";

/// Request body for `POST /wp-json/wp/v2/posts`.
///
/// Categories and tags are not sent: the API expects term ids and the
/// article only carries free text names.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostPayload<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub status: &'a str,
    pub date: String,
}

impl<'a> PostPayload<'a> {
    pub fn from_article(article: &'a Article) -> Result<Self> {
        let date = match &article.date {
            Some(date) => date.clone(),
            None => now_timestamp()?,
        };
        Ok(Self {
            title: &article.title,
            content: &article.body,
            status: &article.status,
            date,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// The subset of the created post returned by WordPress that we use.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreatedPost {
    pub id: u64,
    pub link: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub title: Rendered,
}

pub struct Client {
    agent: ureq::Agent,
    endpoint: String,
    authorization: String,
}

impl Client {
    pub fn new(config: &Config) -> Self {
        let token = basic_auth_token(&config.username, &config.app_password);
        Self {
            agent: ureq::AgentBuilder::new().build(),
            endpoint: posts_endpoint(&config.base_url),
            authorization: format!("Basic {token}"),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn create_post(&self, payload: &PostPayload<'_>) -> Result<CreatedPost> {
        let body = serde_json::to_string(payload).context("failed to encode post payload")?;
        log::debug!("POST {} ({} bytes)", self.endpoint, body.len());

        let response = match self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .set("Authorization", &self.authorization)
            .send_string(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => return Err(rejection(code, response)),
            Err(err) => return Err(anyhow!("request to {} failed: {err}", self.endpoint)),
        };

        // ureq only reports 4xx and 5xx as errors; redirects it did not follow land here.
        let code = response.status();
        log::debug!("WordPress answered with status {code}");
        if !(200..300).contains(&code) {
            return Err(rejection(code, response));
        }

        response
            .into_json()
            .map_err(|err| anyhow!("failed to decode WordPress response: {err}"))
    }
}

fn rejection(code: u16, response: ureq::Response) -> anyhow::Error {
    let text = response
        .into_string()
        .unwrap_or_else(|err| format!("<unreadable body: {err}>"));
    anyhow!("failed to publish to WordPress: {code} {text}")
}

pub fn basic_auth_token(username: &str, password: &str) -> String {
    BASE64.encode(format!("{username}:{password}"))
}

pub fn posts_endpoint(base_url: &str) -> String {
    format!("{}/{POSTS_PATH}", base_url.trim_end_matches('/'))
}

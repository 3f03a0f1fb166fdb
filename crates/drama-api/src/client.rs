//! HTTP client for the posting site.
//!
//! Every call waits a fixed, configured delay before it is sent, carries the
//! `Authorization` credential, and treats any status other than 200 as an
//! [`ApiError::Status`] unless the endpoint explicitly tolerates it. There is
//! no retry; callers decide what to do with a failure.

use std::time::Duration;

use drama_core::AppConfig;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::types::{Ack, Listing, Post, RepostCheck, SiteComment};

/// Replying to a direct message answers 500 even when the reply is stored.
const DIRECT_MESSAGE_ALLOWED_FAILURES: &[u16] = &[500];

/// Client for the posting site's API.
///
/// Use [`DramaClient::from_config`] for real runs or [`DramaClient::new`]
/// to point at a mock server in tests.
pub struct DramaClient {
    client: Client,
    auth_token: String,
    base_url: Url,
    request_delay: Duration,
}

impl DramaClient {
    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the `reqwest::Client` cannot be built or
    /// [`ApiError::InvalidBaseUrl`] if the configured site is not a valid host.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.site_base_url(),
            &config.auth_token,
            config.request_delay(),
            config.request_timeout_secs,
        )
    }

    /// Creates a client for `base_url` (scheme and host, optionally a path
    /// prefix).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the `reqwest::Client` cannot be built or
    /// [`ApiError::InvalidBaseUrl`] if `base_url` is not an http(s) URL.
    pub fn new(
        base_url: &str,
        auth_token: &str,
        request_delay: Duration,
        timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("autodrama/0.1")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            auth_token: auth_token.to_owned(),
            base_url: parsed,
            request_delay,
        })
    }

    /// Creates a link post.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] on a non-200 response, [`ApiError::Schema`] if
    /// the created post cannot be parsed, [`ApiError::Http`] on network failure.
    pub async fn create_post(&self, title: &str, url: &str, body: &str) -> Result<Post, ApiError> {
        let endpoint = self.endpoint(&["submit"])?;
        let form = [("title", title), ("url", url), ("body", body)];
        let (_, text) = self.send(Method::POST, endpoint, Some(&form[..]), &[]).await?;
        parse(&text, "submit")
    }

    /// Sends a direct message to `username`.
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn send_message(&self, username: &str, message: &str) -> Result<Ack, ApiError> {
        let user_segment = format!("@{username}");
        let endpoint = self.endpoint(&[user_segment.as_str(), "message"])?;
        let form = [("message", message)];
        let (_, text) = self.send(Method::POST, endpoint, Some(&form[..]), &[]).await?;
        parse(&text, "message")
    }

    /// Replies to the item identified by `parent_fullname` inside
    /// `submission_id`.
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn reply_to_comment(
        &self,
        parent_fullname: &str,
        submission_id: &str,
        message: &str,
    ) -> Result<SiteComment, ApiError> {
        let endpoint = self.endpoint(&["comment"])?;
        let form = [
            ("parent_fullname", parent_fullname),
            ("submission", submission_id),
            ("body", message),
        ];
        let (_, text) = self.send(Method::POST, endpoint, Some(&form[..]), &[]).await?;
        parse(&text, "comment")
    }

    /// Like [`DramaClient::reply_to_comment`] but takes a bare id and builds
    /// the `t3_` fullname itself.
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn reply_to_comment_by_id(
        &self,
        comment_id: &str,
        submission_id: &str,
        message: &str,
    ) -> Result<SiteComment, ApiError> {
        self.reply_to_comment(&format!("t3_{comment_id}"), submission_id, message)
            .await
    }

    /// Replies to a direct message.
    ///
    /// Returns `Ok(None)` when the site answers with its known spurious 500.
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn reply_to_direct_message(
        &self,
        message_id: u64,
        message: &str,
    ) -> Result<Option<SiteComment>, ApiError> {
        let endpoint = self.endpoint(&["reply"])?;
        let parent_id = message_id.to_string();
        let form = [("parent_id", parent_id.as_str()), ("body", message)];
        let (status, text) = self
            .send(
                Method::POST,
                endpoint,
                Some(&form[..]),
                DIRECT_MESSAGE_ALLOWED_FAILURES,
            )
            .await?;
        if status == StatusCode::OK {
            parse(&text, "reply").map(Some)
        } else {
            tracing::warn!(
                message_id,
                status = status.as_u16(),
                "direct message reply returned a tolerated failure status"
            );
            Ok(None)
        }
    }

    /// Whether `url` has already been posted on the site.
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn has_url_been_posted(&self, url: &str) -> Result<bool, ApiError> {
        let endpoint = self.endpoint(&["is_repost"])?;
        let form = [("url", url)];
        let (_, text) = self.send(Method::POST, endpoint, Some(&form[..]), &[]).await?;
        let check: RepostCheck = parse(&text, "is_repost")?;
        Ok(check.is_repost())
    }

    /// Lists recent comments site-wide (first page only).
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn list_comments(&self) -> Result<Vec<SiteComment>, ApiError> {
        let endpoint = self.endpoint(&["comments"])?;
        let (_, text) = self.send(Method::GET, endpoint, None, &[]).await?;
        let listing: Listing<SiteComment> = parse(&text, "comments")?;
        Ok(listing.data)
    }

    /// Lists one page of notifications.
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn list_notifications(&self, page: u32) -> Result<Vec<SiteComment>, ApiError> {
        let mut endpoint = self.endpoint(&["notifications"])?;
        endpoint
            .query_pairs_mut()
            .append_pair("page", &page.to_string());
        let (_, text) = self.send(Method::GET, endpoint, None, &[]).await?;
        let listing: Listing<SiteComment> =
            parse(&text, &format!("notifications(page={page})"))?;
        Ok(listing.data)
    }

    /// Fetches a single comment by id.
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn get_comment(&self, id: u64) -> Result<SiteComment, ApiError> {
        let id_segment = id.to_string();
        let endpoint = self.endpoint(&["comment", id_segment.as_str()])?;
        let (_, text) = self.send(Method::GET, endpoint, None, &[]).await?;
        parse(&text, &format!("comment(id={id})"))
    }

    /// Marks all notifications as read.
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn clear_notifications(&self) -> Result<Ack, ApiError> {
        let endpoint = self.endpoint(&["clear"])?;
        let (_, text) = self.send(Method::POST, endpoint, None, &[]).await?;
        parse(&text, "clear")
    }

    /// Transfers `amount` coins to `username`.
    ///
    /// # Errors
    ///
    /// See [`DramaClient::create_post`].
    pub async fn give_coins(&self, username: &str, amount: u64) -> Result<Ack, ApiError> {
        let user_segment = format!("@{username}");
        let endpoint = self.endpoint(&[user_segment.as_str(), "transfer_coins"])?;
        let amount = amount.to_string();
        let form = [("amount", amount.as_str())];
        let (_, text) = self.send(Method::POST, endpoint, Some(&form[..]), &[]).await?;
        parse(&text, "transfer_coins")
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Waits the pacing delay, sends the request, and enforces the
    /// 200-or-whitelisted status rule. Returns the status and raw body.
    async fn send(
        &self,
        method: Method,
        url: Url,
        form: Option<&[(&str, &str)]>,
        allowed_failures: &[u16],
    ) -> Result<(StatusCode, String), ApiError> {
        tracing::debug!(
            delay_ms = u64::try_from(self.request_delay.as_millis()).unwrap_or(u64::MAX),
            "pacing before API call"
        );
        tokio::time::sleep(self.request_delay).await;

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, &self.auth_token)
            .header(ACCEPT, "application/json");
        if let Some(form) = form {
            request = request.form(form);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            "API call complete"
        );

        if status != StatusCode::OK && !allowed_failures.contains(&status.as_u16()) {
            return Err(ApiError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok((status, body))
    }
}

fn parse<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Schema {
        context: context.to_owned(),
        source,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

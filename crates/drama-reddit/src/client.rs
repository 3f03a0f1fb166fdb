//! Reddit API client (client-credentials OAuth).

use std::time::Duration;

use drama_core::{Comment, ListingSource, RedditCredentials, Submission, TimeWindow};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::RedditError;
use crate::normalize::{flatten_comments, submissions};
use crate::types::{Listing, SubredditAbout, TokenResponse};

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE_URL: &str = "https://oauth.reddit.com/";
/// Largest page a listing endpoint returns.
const LISTING_PAGE_MAX: usize = 100;
const COMMENT_LIMIT: usize = 500;

/// Reddit API client holding a valid access token.
pub struct RedditClient {
    client: Client,
    token: String,
    user_agent: String,
    api_base: Url,
}

impl RedditClient {
    /// Create a new `RedditClient` by exchanging client credentials for a token.
    ///
    /// # Errors
    ///
    /// Returns [`RedditError::TokenExchange`] if Reddit rejects the credentials
    /// or [`RedditError::Http`] on network failure.
    pub async fn new(credentials: &RedditCredentials, timeout_secs: u64) -> Result<Self, RedditError> {
        Self::with_base_urls(credentials, timeout_secs, TOKEN_URL, API_BASE_URL).await
    }

    /// Like [`RedditClient::new`] with custom token and API URLs (for testing
    /// with wiremock).
    ///
    /// # Errors
    ///
    /// See [`RedditClient::new`]; also [`RedditError::InvalidUrl`] if
    /// `api_base` does not parse.
    pub async fn with_base_urls(
        credentials: &RedditCredentials,
        timeout_secs: u64,
        token_url: &str,
        api_base: &str,
    ) -> Result<Self, RedditError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let normalised = format!("{}/", api_base.trim_end_matches('/'));
        let api_base = Url::parse(&normalised).map_err(|e| RedditError::InvalidUrl {
            url: api_base.to_string(),
            reason: e.to_string(),
        })?;

        let token = Self::fetch_token(&client, credentials, token_url).await?;
        tracing::debug!("obtained Reddit access token");

        Ok(Self {
            client,
            token,
            user_agent: credentials.user_agent.clone(),
            api_base,
        })
    }

    async fn fetch_token(
        client: &Client,
        credentials: &RedditCredentials,
        token_url: &str,
    ) -> Result<String, RedditError> {
        let response = client
            .post(token_url)
            .header("User-Agent", &credentials.user_agent)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RedditError::TokenExchange(response.status().as_u16()));
        }

        let body = response.text().await?;
        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|source| RedditError::Deserialize {
                context: "access_token".to_string(),
                source,
            })?;
        Ok(token.access_token)
    }

    fn endpoint(&self, path: &str) -> Result<Url, RedditError> {
        self.api_base
            .join(path)
            .map_err(|e| RedditError::InvalidUrl {
                url: path.to_string(),
                reason: e.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
        context: &str,
    ) -> Result<T, RedditError> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", &self.user_agent)
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RedditError::UnexpectedStatus {
                endpoint: context.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| RedditError::Deserialize {
            context: context.to_string(),
            source,
        })
    }
}

impl ListingSource for RedditClient {
    type Error = RedditError;

    async fn controversial(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: usize,
    ) -> Result<Vec<Submission>, RedditError> {
        if limit > LISTING_PAGE_MAX {
            tracing::debug!(
                requested = limit,
                max = LISTING_PAGE_MAX,
                "capping listing request to a single page"
            );
        }
        let url = self.endpoint(&format!("r/{subreddit}/controversial"))?;
        let params = [
            ("t", window.as_str().to_string()),
            ("limit", limit.min(LISTING_PAGE_MAX).to_string()),
            ("raw_json", "1".to_string()),
        ];
        let listing: Listing = self
            .get_json(url, &params, &format!("r/{subreddit}/controversial"))
            .await?;
        let submissions = submissions(listing);

        tracing::debug!(
            subreddit,
            window = %window,
            count = submissions.len(),
            "fetched controversial submissions"
        );
        Ok(submissions)
    }

    async fn submission(&self, id: &str) -> Result<Submission, RedditError> {
        let url = self.endpoint(&format!("by_id/t3_{id}"))?;
        let listing: Listing = self
            .get_json(url, &[("raw_json", "1".to_string())], &format!("by_id/t3_{id}"))
            .await?;
        submissions(listing)
            .into_iter()
            .next()
            .ok_or_else(|| RedditError::SubmissionNotFound(id.to_string()))
    }

    async fn subscribers(&self, subreddit: &str) -> Result<u64, RedditError> {
        let url = self.endpoint(&format!("r/{subreddit}/about"))?;
        let about: SubredditAbout = self
            .get_json(url, &[("raw_json", "1".to_string())], &format!("r/{subreddit}/about"))
            .await?;
        Ok(about.data.subscribers.unwrap_or(0))
    }

    async fn comments(&self, submission: &Submission) -> Result<Vec<Comment>, RedditError> {
        let url = self.endpoint(&format!("comments/{}", submission.id))?;
        let params = [
            ("limit", COMMENT_LIMIT.to_string()),
            ("raw_json", "1".to_string()),
        ];
        let (_post, comment_listing): (Listing, Listing) = self
            .get_json(url, &params, &format!("comments/{}", submission.id))
            .await?;
        let comments = flatten_comments(comment_listing);

        tracing::debug!(
            submission = %submission.id,
            count = comments.len(),
            "fetched submission comments"
        );
        Ok(comments)
    }
}

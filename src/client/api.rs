use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::models::{Id, NewPost, Post, PostFilter};

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Non-success response; carries the server's `error` message or a fallback.
    #[error("{0}")]
    Api(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[async_trait]
pub trait PostsApi: Send + Sync {
    async fn list(&self, filter: &PostFilter) -> ClientResult<Vec<Post>>;
    async fn get(&self, id: Id) -> ClientResult<Post>;
    async fn create(&self, post: &NewPost) -> ClientResult<Post>;
    async fn update(&self, id: Id, post: &NewPost) -> ClientResult<Post>;
    async fn delete(&self, id: Id) -> ClientResult<()>;
}

#[derive(Clone)]
pub struct HttpPostsApi {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpPostsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http: reqwest::Client::new() }
    }

    /// Client for the API at `POSTS_API_URL`, or the local default.
    pub fn from_env() -> Self {
        Self::new(crate::config::api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into `ClientError::Api`, preferring the body's message.
    async fn check(resp: reqwest::Response, fallback: &str) -> ClientResult<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| fallback_message(status, fallback));
        Err(ClientError::Api(message))
    }
}

fn fallback_message(status: StatusCode, fallback: &str) -> String {
    if status == StatusCode::NOT_FOUND { "Post not found".to_string() } else { fallback.to_string() }
}

/// Query pairs for a filter; empty values are left out.
pub fn filter_params(filter: &PostFilter) -> Vec<(&'static str, &str)> {
    let mut params = Vec::new();
    if let Some(s) = filter.search() {
        params.push(("search", s));
    }
    if let Some(c) = filter.category() {
        params.push(("category", c));
    }
    params
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn list(&self, filter: &PostFilter) -> ClientResult<Vec<Post>> {
        let resp = self.http.get(self.url("/posts")).query(&filter_params(filter)).send().await?;
        Ok(Self::check(resp, "Failed to load posts").await?.json().await?)
    }

    async fn get(&self, id: Id) -> ClientResult<Post> {
        let resp = self.http.get(self.url(&format!("/posts/{id}"))).send().await?;
        Ok(Self::check(resp, "Post not found").await?.json().await?)
    }

    async fn create(&self, post: &NewPost) -> ClientResult<Post> {
        let resp = self.http.post(self.url("/posts")).json(post).send().await?;
        Ok(Self::check(resp, "Failed to create post").await?.json().await?)
    }

    async fn update(&self, id: Id, post: &NewPost) -> ClientResult<Post> {
        let resp = self.http.put(self.url(&format!("/posts/{id}"))).json(post).send().await?;
        Ok(Self::check(resp, "Failed to update post").await?.json().await?)
    }

    async fn delete(&self, id: Id) -> ClientResult<()> {
        let resp = self.http.delete(self.url(&format!("/posts/{id}"))).send().await?;
        Self::check(resp, "Failed to delete post").await?;
        Ok(())
    }
}

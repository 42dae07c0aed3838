use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::models::{CreateUserRecord, UpdateUserRecord, UserRecord};

mod error;

pub use error::ClientError;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Error body returned by the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the users API
#[derive(Debug, Clone)]
pub struct UsersClient {
    client: Client,
    base_url: Url,
}

impl UsersClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let raw = base_url.into();
        let base_url =
            Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(raw));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET /`
    pub async fn list_users(&self) -> ClientResult<Vec<UserRecord>> {
        let response = self.client.get(self.endpoint([""])).send().await?;
        Self::parse(response).await
    }

    /// `GET /users/{profesion}`
    pub async fn list_users_by_profession(&self, profesion: &str) -> ClientResult<Vec<UserRecord>> {
        let url = self.endpoint(["users", profesion]);
        let response = self.client.get(url).send().await?;
        Self::parse(response).await
    }

    /// `POST /users`
    pub async fn create_user(&self, user: &CreateUserRecord) -> ClientResult<UserRecord> {
        tracing::debug!(username = %user.username, "Creating user");

        let response = self
            .client
            .post(self.endpoint(["users"]))
            .json(user)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// `PUT /users/{id}`
    pub async fn update_user(&self, id: i64, user: &UpdateUserRecord) -> ClientResult<UserRecord> {
        let id = id.to_string();
        let response = self
            .client
            .put(self.endpoint(["users", id.as_str()]))
            .json(user)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);

        Err(ClientError::from_status(status, message))
    }
}

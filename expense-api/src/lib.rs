pub mod endpoints;
mod error;
pub mod repositories;

pub use crate::error::ExpenseApiError;
use repositories::*;
use secrecy::{ExposeSecret, SecretString};
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

/// Realtime database the app was originally built against
pub const DEFAULT_BASE_URL: &str =
    "https://expense-list-testing-default-rtdb.europe-west1.firebasedatabase.app";

pub struct Client {
    inner: ApiClient,
}

impl Client {
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: ApiClient::new(base_url.trim_end_matches('/')),
        }
    }

    /// Client for databases whose rules require an access token
    pub fn with_token(base_url: &str, token: &SecretString) -> Self {
        Self {
            inner: ApiClient::new(base_url.trim_end_matches('/'))
                .bearer_auth(token.expose_secret()),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, ExpenseApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

pub struct Request;

impl Request {
    pub fn expenses() -> ExpenseRepository {
        ExpenseRepository::new()
    }
}

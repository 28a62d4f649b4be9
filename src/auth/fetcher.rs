use std::future::Future;
use std::sync::Arc;

use http::Method;
use reqwest::Client;
use serde_json::Value;

use crate::error::HttpError;
use crate::utils::http_client::send_json;

/// Everything needed to ask an auth endpoint for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub method: Method,
    pub url: String,
    pub basic_auth: Option<(String, String)>,
    pub form: Vec<(String, String)>,
}

impl TokenRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            basic_auth: None,
            form: Vec::new(),
        }
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }
}

/// Performs token requests and returns the decoded JSON body.
pub trait TokenFetcher: Send + Sync {
    fn fetch(
        &self,
        request: TokenRequest,
    ) -> impl Future<Output = Result<Value, HttpError>> + Send;
}

impl<T: TokenFetcher> TokenFetcher for Arc<T> {
    fn fetch(
        &self,
        request: TokenRequest,
    ) -> impl Future<Output = Result<Value, HttpError>> + Send {
        (**self).fetch(request)
    }
}

/// [`TokenFetcher`] over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTokenFetcher {
    client: Client,
}

impl HttpTokenFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl TokenFetcher for HttpTokenFetcher {
    async fn fetch(&self, request: TokenRequest) -> Result<Value, HttpError> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(http::header::ACCEPT, "application/json");

        if let Some((username, password)) = &request.basic_auth {
            builder = builder.basic_auth(username, Some(password));
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        send_json(builder, &request.url).await
    }
}
